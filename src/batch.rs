//! Batch processor: traversal, placement, and outcome accounting.

use crate::constants::{RENAME_PAD_WIDTH, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::{ResizeError, Result};
use crate::policy::{plan_resize, ResizePlan};
use crate::processing::{
    encode_image, load_supported_image, plan_image_file, resample, resize_image_file, FileOutcome,
    ResizeOptions,
};
use crate::{info, verbose, warn};
use image::{DynamicImage, GenericImageView};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Counters accumulated across one traversal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunOutcome {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}

/// Sequential-name generator for rename mode. One instance is owned by a
/// single traversal; the counter is shared across subdirectories and never
/// resets mid-run.
#[derive(Debug)]
pub struct RenameCounter {
    next: u32,
}

impl RenameCounter {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn advance(&mut self) {
        self.next += 1;
    }

    fn candidate(&self, out_root: &Path, extension: &str) -> PathBuf {
        out_root.join(format!(
            "{:0width$}.{}",
            self.next,
            extension,
            width = RENAME_PAD_WIDTH
        ))
    }

    /// Find the first counter value whose target path is free.
    ///
    /// A target that already exists is rejected unless it is `current`
    /// itself; self-match is accepted so a file keeps its own slot.
    pub fn claim_target(&mut self, out_root: &Path, current: &Path, extension: &str) -> PathBuf {
        loop {
            let candidate = self.candidate(out_root, extension);
            if candidate.exists() && candidate != current {
                verbose!("Name {:?} is taken, advancing counter", candidate);
                self.advance();
                continue;
            }
            return candidate;
        }
    }
}

impl Default for RenameCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// How one file in rename mode reaches its target name. Decided once per
/// file, then executed by a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Resize needed: resample and encode straight to the target name.
    Reencode,
    /// No resize, output directory differs from the input root: byte copy.
    CopyBytes,
    /// No resize, same root, different name: rename in place.
    RenameFile,
    /// Already carries the target name: no-op counted as a skip.
    KeepName,
}

fn decide_placement(needed: bool, same_root: bool, current: &Path, target: &Path) -> Placement {
    if needed {
        Placement::Reencode
    } else if !same_root {
        Placement::CopyBytes
    } else if current != target {
        Placement::RenameFile
    } else {
        Placement::KeepName
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect candidate files under `root`, sorted by path so the traversal
/// order (and rename-counter assignment) is deterministic.
pub fn collect_image_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let walker = if recursive {
        WalkDir::new(root).sort_by_file_name()
    } else {
        WalkDir::new(root).sort_by_file_name().max_depth(1)
    };

    let mut files = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported_image(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    verbose!("Collected {} candidate files", files.len());
    Ok(files)
}

/// Process a directory tree, dispatching on rename mode.
pub fn process_directory(input_root: &Path, options: &ResizeOptions) -> Result<RunOutcome> {
    if !input_root.exists() {
        return Err(ResizeError::InputNotFound(input_root.to_path_buf()));
    }

    let files = collect_image_files(input_root, options.recursive)?;
    if files.is_empty() {
        warn!("No image files found in {:?}", input_root);
        return Ok(RunOutcome::default());
    }
    info!("📊 Found {} image files to process", files.len());

    if options.rename {
        process_directory_renamed(input_root, &files, options)
    } else {
        process_directory_mirrored(input_root, &files, options)
    }
}

/// Non-rename mode: mirror each file's relative path into the output
/// directory when one is configured, else operate in place. Files that
/// already fit are skipped, not copied.
fn process_directory_mirrored(
    input_root: &Path,
    files: &[PathBuf],
    options: &ResizeOptions,
) -> Result<RunOutcome> {
    let mut outcome = RunOutcome::default();

    if let Some(dir) = &options.output_dir {
        fs::create_dir_all(dir).map_err(|_| ResizeError::DirectoryCreationFailed(dir.clone()))?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(ProgressStyle::default_bar());

    for file in files {
        let output = options.output_dir.as_ref().map(|dir| {
            let relative = file.strip_prefix(input_root).unwrap_or(file);
            dir.join(relative)
        });

        match resize_image_file(file, output.as_deref(), options) {
            Ok(FileOutcome::Resized { from, to }) => {
                info!(
                    "🔄 Resized: {:?} ({}x{}) -> ({}x{})",
                    file, from.0, from.1, to.0, to.1
                );
                outcome.succeeded += 1;
            }
            Ok(FileOutcome::AlreadyFits { size }) => {
                info!("⏭️  Skipped (already fits): {:?} ({}x{})", file, size.0, size.1);
                outcome.skipped += 1;
            }
            Ok(FileOutcome::Unsupported) => {
                outcome.skipped += 1;
            }
            Err(e) => {
                crate::error!("Failed to process {:?}: {}", file, e);
                outcome.failed += 1;
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(outcome)
}

/// Rename mode: assign zero-padded sequential names with collision
/// avoidance, then place each file by a four-way strategy.
fn process_directory_renamed(
    input_root: &Path,
    files: &[PathBuf],
    options: &ResizeOptions,
) -> Result<RunOutcome> {
    let mut outcome = RunOutcome::default();
    let mut counter = RenameCounter::new();

    // Resolve the output root once. When the configured output directory is
    // the input root under another spelling, fall back to the input root so
    // target paths compare equal to walked paths.
    let out_root = match &options.output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .map_err(|_| ResizeError::DirectoryCreationFailed(dir.clone()))?;
            if fs::canonicalize(dir)? == fs::canonicalize(input_root)? {
                input_root.to_path_buf()
            } else {
                dir.clone()
            }
        }
        None => input_root.to_path_buf(),
    };
    let same_root = out_root.as_path() == input_root;

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(ProgressStyle::default_bar());

    for file in files {
        let extension = file
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        let target = counter.claim_target(&out_root, file, &extension);

        match load_supported_image(file) {
            Ok(Some((img, kind))) => {
                let (width, height) = img.dimensions();
                match plan_resize(width, height, options.max_edge) {
                    Ok(plan) => {
                        let placement = decide_placement(plan.needed, same_root, file, &target);
                        apply_placement(
                            placement, &img, kind, file, &target, &plan, options, &mut outcome,
                        );
                    }
                    Err(e) => {
                        crate::error!("Failed to process {:?}: {}", file, e);
                        outcome.failed += 1;
                    }
                }
            }
            // The collection pass only yields supported extensions.
            Ok(None) => {
                outcome.skipped += 1;
            }
            Err(e) => {
                crate::error!("Failed to process {:?}: {}", file, e);
                outcome.failed += 1;
            }
        }

        // One step per processed file on every outcome branch, so later
        // files never compete for an earlier file's slot.
        counter.advance();
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(outcome)
}

#[allow(clippy::too_many_arguments)]
fn apply_placement(
    placement: Placement,
    img: &DynamicImage,
    kind: crate::constants::ImageKind,
    source: &Path,
    target: &Path,
    plan: &ResizePlan,
    options: &ResizeOptions,
    outcome: &mut RunOutcome,
) {
    let applied: Result<()> = match placement {
        Placement::Reencode => {
            let resized = resample(img, plan.new_width, plan.new_height);
            encode_image(&resized, target, kind, options.quality)
        }
        Placement::CopyBytes => fs::copy(source, target).map(|_| ()).map_err(Into::into),
        Placement::RenameFile => fs::rename(source, target).map_err(Into::into),
        Placement::KeepName => Ok(()),
    };

    match applied {
        Ok(()) => match placement {
            Placement::Reencode => {
                info!(
                    "🔄 Resized to {:?} ({}x{})",
                    target, plan.new_width, plan.new_height
                );
                outcome.succeeded += 1;
            }
            Placement::CopyBytes => {
                info!("📁 Copied {:?} -> {:?}", source, target);
                outcome.succeeded += 1;
            }
            Placement::RenameFile => {
                info!("📁 Renamed {:?} -> {:?}", source, target);
                outcome.succeeded += 1;
            }
            Placement::KeepName => {
                info!("⏭️  Skipped (already named): {:?}", source);
                outcome.skipped += 1;
            }
        },
        Err(e) => {
            crate::error!("Failed to process {:?}: {}", source, e);
            outcome.failed += 1;
        }
    }
}

/// Decision-only traversal: report what a real run would do, write nothing.
pub fn dry_run_directory(input_root: &Path, options: &ResizeOptions) -> Result<RunOutcome> {
    if !input_root.exists() {
        return Err(ResizeError::InputNotFound(input_root.to_path_buf()));
    }

    let files = collect_image_files(input_root, options.recursive)?;
    let mut outcome = RunOutcome::default();

    for file in &files {
        match plan_image_file(file, options.max_edge) {
            Ok(FileOutcome::Resized { from, to }) => {
                info!(
                    "[dry-run] Would resize: {:?} ({}x{}) -> ({}x{})",
                    file, from.0, from.1, to.0, to.1
                );
                outcome.succeeded += 1;
            }
            Ok(FileOutcome::AlreadyFits { size }) => {
                info!(
                    "[dry-run] No resize needed: {:?} ({}x{})",
                    file, size.0, size.1
                );
                outcome.skipped += 1;
            }
            Ok(FileOutcome::Unsupported) => {
                outcome.skipped += 1;
            }
            Err(e) => {
                crate::error!("[dry-run] Would fail: {:?} - {}", file, e);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
