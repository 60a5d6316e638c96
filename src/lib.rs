pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod logger;
pub mod policy;
pub mod processing;

pub use batch::{
    collect_image_files, dry_run_directory, is_supported_image, process_directory, RenameCounter,
    RunOutcome,
};
pub use constants::ImageKind;
pub use error::{ResizeError, Result};
pub use policy::{
    compute_new_size, plan_resize, quality_to_compression_level, should_resize, ResizePlan,
};
pub use processing::{
    encode_image, load_supported_image, plan_image_file, resample, resize_image_file, FileOutcome,
    ResizeOptions,
};
