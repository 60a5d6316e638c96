use clap::Parser;
use img_fit::batch::{dry_run_directory, process_directory};
use img_fit::cli::Args;
use img_fit::error::{ResizeError, Result};
use img_fit::processing::{plan_image_file, resize_image_file, FileOutcome, ResizeOptions};
use img_fit::{info, logger};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            img_fit::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let options = ResizeOptions::new(
        args.max_size,
        args.quality,
        args.rename,
        args.output,
        args.recursive,
        args.dry_run,
    )?;

    logger::set_verbose_mode(args.verbose);
    if args.verbose {
        print_configuration(&options);
    }

    let input = args.input.as_path();
    if input.is_file() {
        run_single_file(input, &options)
    } else if input.is_dir() {
        run_directory(input, &options)
    } else {
        Err(ResizeError::InputNotFound(input.to_path_buf()))
    }
}

fn print_configuration(options: &ResizeOptions) {
    info!("Max edge: {}px", options.max_edge);
    info!("Quality: {}", options.quality);
    info!("Sequential rename: {}", options.rename);
    info!("Recursive: {}", options.recursive);
    info!("Dry run: {}", options.dry_run);
    if let Some(dir) = &options.output_dir {
        info!("Output directory: {:?}", dir);
    }
    info!("{}", "-".repeat(50));
}

fn run_single_file(input: &Path, options: &ResizeOptions) -> Result<()> {
    if options.dry_run {
        match plan_image_file(input, options.max_edge) {
            Ok(FileOutcome::Resized { from, to }) => info!(
                "[dry-run] Would resize: {:?} ({}x{}) -> ({}x{})",
                input, from.0, from.1, to.0, to.1
            ),
            Ok(FileOutcome::AlreadyFits { size }) => info!(
                "[dry-run] No resize needed: {:?} ({}x{})",
                input, size.0, size.1
            ),
            Ok(FileOutcome::Unsupported) => {
                info!("[dry-run] Unsupported file format: {:?}", input)
            }
            Err(e) => img_fit::error!("[dry-run] Would fail: {:?} - {}", input, e),
        }
        return Ok(());
    }

    // A single-file output directory holds the result under the input's
    // own file name.
    let output = match &options.output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .map_err(|_| ResizeError::DirectoryCreationFailed(dir.clone()))?;
            input.file_name().map(|name| dir.join(name))
        }
        None => None,
    };

    // Per-file errors are reported but never change the exit status; only
    // invalid configuration and a missing input path are fatal.
    match resize_image_file(input, output.as_deref(), options) {
        Ok(FileOutcome::Resized { from, to }) => {
            info!(
                "🔄 Resized: {:?} ({}x{}) -> ({}x{})",
                input, from.0, from.1, to.0, to.1
            );
            info!("✅ Image resize complete");
        }
        Ok(FileOutcome::AlreadyFits { size }) => {
            info!("✅ No resize needed: {:?} ({}x{})", input, size.0, size.1);
        }
        Ok(FileOutcome::Unsupported) => {
            info!("⏭️  Skipped unsupported file format: {:?}", input);
        }
        Err(e) => {
            img_fit::error!("Failed to process {:?}: {}", input, e);
        }
    }
    Ok(())
}

fn run_directory(input: &Path, options: &ResizeOptions) -> Result<()> {
    if options.dry_run {
        let outcome = dry_run_directory(input, options)?;
        info!("\n📊 Dry-run Summary:");
        info!("  🔄 Would resize: {}", outcome.succeeded);
        info!("  ⏭️  Would skip: {}", outcome.skipped);
        info!("  ❌ Would fail: {}", outcome.failed);
    } else {
        let outcome = process_directory(input, options)?;
        info!("\n📊 Batch Summary:");
        info!("  ✅ Resized: {}", outcome.succeeded);
        info!("  ⏭️  Skipped: {}", outcome.skipped);
        info!("  ❌ Failed: {}", outcome.failed);
    }
    Ok(())
}
