use std::path::PathBuf;

use histoscan_cli::{build_pipeline, determine_output_path, expand_inputs};

/// Generate the virtual IHC image for a single input.
pub fn cmd_transform(input: PathBuf, out: Option<PathBuf>, seed: Option<u64>) -> Result<(), String> {
    // Validates existence and extension
    expand_inputs(std::slice::from_ref(&input), false)?;

    let output = determine_output_path(&input, &out)?;
    let pipeline = build_pipeline(seed);

    let written = pipeline
        .transform()
        .transform(&input, &output)
        .map_err(|e| format!("IHC generation failed: {}", e))?;

    println!("{}", written.display());
    Ok(())
}
