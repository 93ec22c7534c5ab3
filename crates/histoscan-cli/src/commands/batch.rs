use std::path::PathBuf;
use std::time::Instant;

use histoscan_cli::{batch_base_seed, build_pipeline, expand_inputs, run_jobs, to_json, SUPPORTED_EXTENSIONS};

/// Analyze many inputs in parallel.
pub fn cmd_batch(
    inputs: Vec<PathBuf>,
    recursive: bool,
    out: Option<PathBuf>,
    threads: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<(), String> {
    let batch_start = Instant::now();

    if inputs.is_empty() {
        return Err("No input files or directories specified".to_string());
    }

    // Expand directories to file lists
    let inputs = expand_inputs(&inputs, recursive)?;

    if inputs.is_empty() {
        return Err(format!(
            "No supported image files found (supported: {})",
            SUPPORTED_EXTENSIONS.join(", ")
        ));
    }

    let output_dir = out.unwrap_or_else(|| PathBuf::from("."));
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
    }

    if !json {
        println!("Found {} image files to process", inputs.len());
        if let Some(n) = threads {
            println!("Using {} threads for parallel processing", n);
        }
        println!();
    }

    let pipeline = build_pipeline(None);
    let base_seed = batch_base_seed(&pipeline, seed);
    let outcomes = run_jobs(
        &pipeline,
        &inputs,
        &output_dir,
        base_seed,
        threads,
        |count, total, outcome| {
            if json {
                return;
            }
            match (&outcome.report, &outcome.error) {
                (Some(report), _) => println!(
                    "[{}/{}] {} -> {} (HER2 {}, {}, {:.2}s)",
                    count,
                    total,
                    outcome.input.display(),
                    report.generated_image.display(),
                    report.result.status,
                    report.result.grade,
                    outcome.elapsed_seconds
                ),
                (None, error) => println!(
                    "[{}/{}] {} FAILED: {}",
                    count,
                    total,
                    outcome.input.display(),
                    error.as_deref().unwrap_or("unknown error")
                ),
            }
        },
    )?;

    let success_count = outcomes.iter().filter(|o| o.is_success()).count();
    let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_success()).collect();
    let batch_elapsed = batch_start.elapsed();

    if json {
        println!("{}", to_json(&outcomes)?);
    } else {
        println!("\n========================================");
        println!("BATCH ANALYSIS COMPLETE");
        println!("========================================");
        println!("  Successful: {}", success_count);
        println!("  Failed:     {}", failed.len());
        println!("  Output dir: {}", output_dir.display());
        println!("  Total time: {:.2}s", batch_elapsed.as_secs_f64());
        if success_count > 0 {
            println!(
                "  Avg time:   {:.2}s per file",
                batch_elapsed.as_secs_f64() / success_count as f64
            );
        }

        if !failed.is_empty() {
            println!("\nErrors:");
            for outcome in &failed {
                println!(
                    "  {}: {}",
                    outcome.input.display(),
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("{} files failed to process", failed.len()))
    }
}
