//! Parallel batch execution over a rayon thread pool.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use histoscan_core::noise::job_seed;
use histoscan_core::pipeline::ihc_output_path;
use histoscan_core::{AnalysisPipeline, DiagnosticReport};
use rayon::prelude::*;
use serde::Serialize;

/// Outcome of one batch job
#[derive(Debug, Serialize)]
pub struct JobOutcome {
    pub input: PathBuf,
    pub elapsed_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DiagnosticReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Base seed for per-job seeds: the CLI seed, else whichever component seed
/// the config sets.
pub fn batch_base_seed(pipeline: &AnalysisPipeline, cli_seed: Option<u64>) -> Option<u64> {
    cli_seed
        .or(pipeline.transform().settings().seed)
        .or(pipeline.scorer().settings().seed)
}

/// One derived-image path per input, all distinct.
///
/// Inputs sharing a file stem (`a/slide.png` and `b/slide.png`, or
/// `slide.png` and `slide.tif`) get `_1`, `_2`, ... suffixes in input order.
pub fn unique_output_paths(inputs: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let base = ihc_output_path(input, output_dir);
            let mut candidate = base.clone();
            let mut n = 1;
            while !taken.insert(candidate.clone()) {
                candidate = numbered(&base, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

fn numbered(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.extension() {
        Some(ext) => path.with_file_name(format!("{}_{}.{}", stem, n, ext.to_string_lossy())),
        None => path.with_file_name(format!("{}_{}", stem, n)),
    }
}

/// Run the pipeline over `inputs` in parallel, writing into `output_dir`.
///
/// Every job gets its own output file (see [`unique_output_paths`]). With a
/// `base_seed`, job `i` uses `job_seed(base_seed, i)` so results do not
/// depend on scheduling. `threads` of `None` uses one thread per core.
/// `on_done` is called after each job with (completed count, total, outcome).
pub fn run_jobs<F>(
    pipeline: &AnalysisPipeline,
    inputs: &[PathBuf],
    output_dir: &Path,
    base_seed: Option<u64>,
    threads: Option<usize>,
    on_done: F,
) -> Result<Vec<JobOutcome>, String>
where
    F: Fn(usize, usize, &JobOutcome) + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .build()
        .map_err(|e| format!("Failed to configure thread pool: {}", e))?;

    let outputs = unique_output_paths(inputs, output_dir);
    let processed_count = AtomicUsize::new(0);
    let total = inputs.len();

    let outcomes = pool.install(|| {
        inputs
            .par_iter()
            .enumerate()
            .map(|(index, input)| {
                let started = Instant::now();
                let seed = base_seed.map(|base| job_seed(base, index as u64));
                let output = &outputs[index];
                log::debug!(
                    "Job {}: {} -> {} (seed {:?})",
                    index,
                    input.display(),
                    output.display(),
                    seed
                );

                let job_pipeline = pipeline.clone().with_seed(seed);
                let (report, error) = match job_pipeline.run_to(input, output) {
                    Ok(report) => (Some(report), None),
                    Err(e) => {
                        log::warn!("Job {} ({}) failed: {}", index, input.display(), e);
                        (None, Some(e.to_string()))
                    }
                };

                let outcome = JobOutcome {
                    input: input.clone(),
                    elapsed_seconds: started.elapsed().as_secs_f64(),
                    report,
                    error,
                };

                let count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
                on_done(count, total, &outcome);
                outcome
            })
            .collect::<Vec<_>>()
    });

    Ok(outcomes)
}
