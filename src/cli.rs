use crate::constants::{DEFAULT_MAX_EDGE, DEFAULT_QUALITY};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-fit",
    about = "Batch image resizer that caps the longest edge while preserving aspect ratio",
    long_about = "img-fit shrinks JPEG and PNG images whose longest edge exceeds a configurable \
                  threshold, preserving aspect ratio. It handles single files or whole directory \
                  trees, can mirror results into a separate output directory, and can rename \
                  processed files to zero-padded sequential names.",
    version,
    after_help = "EXAMPLES:\n  \
    img-fit image.jpg                      # resize one image in place\n  \
    img-fit ./photos/                      # resize every image in a directory\n  \
    img-fit ./photos/ -o ./resized/        # write results to another directory\n  \
    img-fit image.jpg -s 500 -q 85         # custom edge limit and quality\n  \
    img-fit ./photos/ --rename             # sequential 00001.jpg style names\n  \
    img-fit ./photos/ -r --dry-run         # recursive, decisions only"
)]
pub struct Args {
    #[arg(help = "Input image file or directory")]
    pub input: PathBuf,

    #[arg(short = 'o', long, help = "Output directory path")]
    pub output: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "max-size",
        default_value_t = DEFAULT_MAX_EDGE,
        help = "Longest-edge limit in pixels (minimum: 10)",
        long_help = "Images whose longest edge exceeds this limit are scaled down so the long \
                     edge matches it exactly, preserving aspect ratio."
    )]
    pub max_size: u32,

    #[arg(
        short = 'q',
        long,
        default_value_t = DEFAULT_QUALITY,
        help = "Image quality (1-100, default: 100)",
        long_help = "For JPEG the value is the encoder quality. For PNG it maps onto a 0-9 \
                     compression level: 100 means no extra compression, 1 means maximum."
    )]
    pub quality: u8,

    #[arg(
        long,
        help = "Rename processed files to sequential names (00001.jpg, 00002.png, ...)"
    )]
    pub rename: bool,

    #[arg(short = 'r', long, help = "Process subdirectories recursively")]
    pub recursive: bool,

    #[arg(short = 'v', long, help = "Echo the configuration before running")]
    pub verbose: bool,

    #[arg(long, help = "Report decisions without writing, renaming, or copying")]
    pub dry_run: bool,
}
