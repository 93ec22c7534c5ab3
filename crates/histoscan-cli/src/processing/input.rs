//! Input file handling and path utilities.

use std::path::{Path, PathBuf};

use histoscan_core::pipeline::ihc_output_path;

/// Image extensions accepted as analysis input
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

/// Whether `path` carries one of the [`SUPPORTED_EXTENSIONS`] (case-insensitive).
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Determine where the derived image for `input` is written
///
/// * `out` is a directory: `<out>/<stem>_ihc.png`
/// * `out` is any other path: used as-is
/// * no `out`: `<stem>_ihc.png` next to the input
pub fn determine_output_path(input: &Path, out: &Option<PathBuf>) -> Result<PathBuf, String> {
    if input.file_stem().is_none() {
        return Err(format!("Invalid input filename: {}", input.display()));
    }

    match out {
        Some(out_path) if out_path.is_dir() => Ok(ihc_output_path(input, out_path)),
        Some(out_path) => Ok(out_path.clone()),
        None => {
            let parent = input.parent().unwrap_or(Path::new("."));
            Ok(ihc_output_path(input, parent))
        }
    }
}

/// Expand a list of inputs (files and directories) into a list of image files.
///
/// Directories are scanned for files with a supported extension; with
/// `recursive`, subdirectories are scanned too. Explicitly named files with
/// another extension are rejected.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_images_from_dir(input, recursive, &mut files)?;
        } else if input.is_file() {
            if !is_supported(input) {
                return Err(format!(
                    "Unsupported file type: {} (supported: {})",
                    input.display(),
                    SUPPORTED_EXTENSIONS.join(", ")
                ));
            }
            files.push(input.clone());
        } else {
            return Err(format!("Path not found: {}", input.display()));
        }
    }

    // Sort for consistent ordering
    files.sort();
    Ok(files)
}

/// Recursively collect image files from a directory.
fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();

        if path.is_dir() {
            if recursive {
                collect_images_from_dir(&path, recursive, files)?;
            }
        } else if path.is_file() && is_supported(&path) {
            files.push(path);
        }
    }
    Ok(())
}
