//! Single-file pipeline: load, plan, resample, encode.

use crate::constants::{
    ImageKind, MAX_QUALITY, MIN_MAX_EDGE, MIN_QUALITY, PNG_OPT_PRESET,
};
use crate::error::{ResizeError, Result};
use crate::policy::{plan_resize, quality_to_compression_level};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageReader};
use oxipng::{Deflaters, InFile, Options, OutFile};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Run-wide configuration, validated once at startup.
#[derive(Debug, Clone)]
pub struct ResizeOptions {
    pub max_edge: u32,
    pub quality: u8,
    pub rename: bool,
    pub output_dir: Option<PathBuf>,
    pub recursive: bool,
    pub dry_run: bool,
}

impl ResizeOptions {
    pub fn new(
        max_edge: u32,
        quality: u8,
        rename: bool,
        output_dir: Option<PathBuf>,
        recursive: bool,
        dry_run: bool,
    ) -> Result<Self> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(ResizeError::InvalidQuality(quality));
        }
        if max_edge < MIN_MAX_EDGE {
            return Err(ResizeError::InvalidMaxEdge(max_edge));
        }

        Ok(Self {
            max_edge,
            quality,
            rename,
            output_dir,
            recursive,
            dry_run,
        })
    }
}

/// What happened (or would happen) to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Resized { from: (u32, u32), to: (u32, u32) },
    AlreadyFits { size: (u32, u32) },
    Unsupported,
}

/// Decode an image if its extension is supported.
///
/// `Ok(None)` means the extension is outside the supported set, which
/// callers treat as a skip rather than a failure.
pub fn load_supported_image(path: &Path) -> Result<Option<(DynamicImage, ImageKind)>> {
    let Some(kind) = ImageKind::from_path(path) else {
        return Ok(None);
    };

    let img = ImageReader::open(path)?.decode()?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidImage(format!(
            "decoded to zero dimension ({}x{}): {}",
            width,
            height,
            path.display()
        )));
    }

    Ok(Some((img, kind)))
}

/// Decision-only variant of [`resize_image_file`]: opens the image and
/// computes the plan but never writes. Backs the dry-run paths.
pub fn plan_image_file(input: &Path, max_edge: u32) -> Result<FileOutcome> {
    let Some((img, _kind)) = load_supported_image(input)? else {
        return Ok(FileOutcome::Unsupported);
    };

    let (width, height) = img.dimensions();
    let plan = plan_resize(width, height, max_edge)?;
    if !plan.needed {
        return Ok(FileOutcome::AlreadyFits {
            size: (width, height),
        });
    }

    Ok(FileOutcome::Resized {
        from: (width, height),
        to: (plan.new_width, plan.new_height),
    })
}

/// Resize one file if its long edge exceeds the configured maximum.
///
/// `output` defaults to the input path, i.e. overwrite in place.
pub fn resize_image_file(
    input: &Path,
    output: Option<&Path>,
    options: &ResizeOptions,
) -> Result<FileOutcome> {
    let Some((img, kind)) = load_supported_image(input)? else {
        return Ok(FileOutcome::Unsupported);
    };

    let (width, height) = img.dimensions();
    let plan = plan_resize(width, height, options.max_edge)?;
    if !plan.needed {
        return Ok(FileOutcome::AlreadyFits {
            size: (width, height),
        });
    }

    let target = output.unwrap_or(input);
    let resized = resample(&img, plan.new_width, plan.new_height);
    encode_image(&resized, target, kind, options.quality)?;

    Ok(FileOutcome::Resized {
        from: (width, height),
        to: (plan.new_width, plan.new_height),
    })
}

/// Regenerate pixel data at the planned dimensions with a Lanczos filter.
pub fn resample(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    img.resize_exact(width, height, FilterType::Lanczos3)
}

/// Encode an image to `output` with format-specific parameters.
///
/// JPEG uses the quality setting directly. PNG maps quality onto a 0-9
/// compression level; level 0 skips the optimization pass entirely.
pub fn encode_image(img: &DynamicImage, output: &Path, kind: ImageKind, quality: u8) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|_| ResizeError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }
    }

    match kind {
        ImageKind::Jpeg => {
            let file = fs::File::create(output)?;
            let writer = BufWriter::new(file);
            let encoder = JpegEncoder::new_with_quality(writer, quality);
            img.write_with_encoder(encoder)?;
        }
        ImageKind::Png => {
            let level = quality_to_compression_level(quality);
            if level == 0 {
                img.save_with_format(output, image::ImageFormat::Png)?;
                return Ok(());
            }

            // Write uncompressed first, then let oxipng recompress into the
            // final location. The temp file is removed on every exit path.
            let temp_path = output.with_extension("tmp.png");
            img.save_with_format(&temp_path, image::ImageFormat::Png)?;

            struct TempFileGuard(PathBuf);
            impl Drop for TempFileGuard {
                fn drop(&mut self) {
                    let _ = fs::remove_file(&self.0);
                }
            }
            let _guard = TempFileGuard(temp_path.clone());

            let mut png_options = Options::from_preset(PNG_OPT_PRESET);
            png_options.force = true;
            png_options.deflate = Deflaters::Libdeflater { compression: level };

            let input = InFile::Path(temp_path);
            let out = OutFile::Path {
                path: Some(output.to_path_buf()),
                preserve_attrs: false,
            };
            oxipng::optimize(&input, &out, &png_options)
                .map_err(|e| ResizeError::PngOptimization(e.to_string()))?;
        }
    }

    Ok(())
}
