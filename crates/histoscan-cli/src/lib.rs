//! Shared utilities for histoscan-cli
//!
//! Argument structs, input discovery, pipeline construction and the batch
//! runner used by the `histoscan` binary.

pub mod args;
pub mod processing;

// Re-export commonly used items at the crate root for convenience
pub use args::{OutputArgs, SeedArgs};
pub use processing::{
    batch_base_seed, build_pipeline, determine_output_path, expand_inputs, is_supported,
    pipeline_from, run_jobs, save_json, to_json, unique_output_paths, JobOutcome,
    SUPPORTED_EXTENSIONS,
};
