//! Image processing and input handling.

mod input;
mod jobs;
mod session;

pub use input::{determine_output_path, expand_inputs, is_supported, SUPPORTED_EXTENSIONS};
pub use jobs::{batch_base_seed, run_jobs, unique_output_paths, JobOutcome};
pub use session::{build_pipeline, pipeline_from, save_json, to_json};
