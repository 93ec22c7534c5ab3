use std::path::PathBuf;

use histoscan_cli::{build_pipeline, expand_inputs, to_json};
use histoscan_core::report::{format_confidence, format_percentage};
use histoscan_core::SeverityResult;

/// Score an existing (already transformed) image.
pub fn cmd_score(input: PathBuf, json: bool, seed: Option<u64>) -> Result<(), String> {
    expand_inputs(std::slice::from_ref(&input), false)?;

    let pipeline = build_pipeline(seed);
    let result = pipeline
        .scorer()
        .score(&input)
        .map_err(|e| format!("Severity prediction failed: {}", e))?;

    if json {
        println!("{}", to_json(&result)?);
    } else {
        print_result(&input, &result);
    }
    Ok(())
}

fn print_result(input: &std::path::Path, result: &SeverityResult) {
    println!("Severity scoring: {}", input.display());
    println!("  HER2 status:        {}", result.status.as_str().to_uppercase());
    println!(
        "  Confidence:         {}",
        format_confidence(Some(result.confidence))
    );
    println!("  Cancer grade:       {}", result.grade);
    println!(
        "  Biomarker:          {}",
        format_percentage(Some(result.biomarker_percentage))
    );
    println!("  Staining intensity: {}", result.intensity);
    println!(
        "  Cells:              {} / {} positive",
        result.positive_cells, result.total_cells
    );
    println!(
        "  Stained area:       {}",
        format_percentage(Some(result.stained_area))
    );
}
