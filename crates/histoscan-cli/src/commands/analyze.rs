use std::path::{Path, PathBuf};

use histoscan_cli::{build_pipeline, expand_inputs, save_json, to_json};

/// Run transform then scoring on one input and print the diagnostic report.
///
/// The derived image goes to `out` (default: next to the input). With
/// `save`, the JSON report is also written to that file.
pub fn cmd_analyze(
    input: PathBuf,
    out: Option<PathBuf>,
    seed: Option<u64>,
    json: bool,
    save: Option<PathBuf>,
) -> Result<(), String> {
    expand_inputs(std::slice::from_ref(&input), false)?;

    let output_dir = out.unwrap_or_else(|| {
        input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf()
    });

    let report = build_pipeline(seed)
        .run(&input, &output_dir)
        .map_err(|e| e.to_string())?;

    if json {
        println!("{}", to_json(&report)?);
    } else {
        println!("{}", report.render_text());
    }

    if let Some(save_path) = save {
        save_json(&report, &save_path)?;
        if !json {
            println!("Report saved to: {}", save_path.display());
        }
    }

    Ok(())
}
