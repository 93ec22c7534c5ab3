//! Analysis configuration management.
//!
//! This module provides configuration discovery and loading, the process-wide
//! configuration handle, and the per-component settings types.

mod defaults;

pub use defaults::{ScorerSettings, TransformSettings};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Once, OnceLock};

use serde::{Deserialize, Serialize};

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["histoscan.yml", "histoscan.yaml"];

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "HISTOSCAN_CONFIG";

/// Public handle that stores the loaded configuration, its source path, and warnings.
#[derive(Debug)]
pub struct ConfigHandle {
    pub config: AnalysisConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

/// Complete configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub transform: TransformSettings,
    pub scorer: ScorerSettings,
}

impl AnalysisConfig {
    /// Clamp out-of-range values, recording a warning for each fix.
    pub fn sanitize(mut self, warnings: &mut Vec<String>) -> Self {
        self.transform.sanitize(warnings);
        self.scorer.sanitize(warnings);
        self
    }

    /// Parse a YAML document and sanitize it.
    pub fn from_yaml(contents: &str, warnings: &mut Vec<String>) -> Result<Self, serde_yaml::Error> {
        let config: AnalysisConfig = serde_yaml::from_str(contents)?;
        Ok(config.sanitize(warnings))
    }

    /// Render as YAML, e.g. for `histoscan init`.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Load configuration from disk, optionally forcing a specific path.
///
/// The first candidate that exists and parses wins. Unreadable or invalid
/// files are skipped with a warning; if nothing loads, built-in defaults are
/// returned.
pub fn load_config(custom_path: Option<&Path>) -> ConfigHandle {
    let mut warnings = Vec::new();

    if let Some(path) = custom_path {
        if !path.is_file() {
            warnings.push(format!("Config file {} not found", path.display()));
        }
    }

    for candidate in get_config_candidates(custom_path) {
        if !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match AnalysisConfig::from_yaml(&contents, &mut warnings) {
                Ok(config) => {
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return ConfigHandle {
                        config,
                        source: Some(source),
                        warnings,
                    };
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No histoscan config found; using built-in defaults.".to_string());
    ConfigHandle {
        config: AnalysisConfig::default(),
        source: None,
        warnings,
    }
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(dir) = user_config_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(dir.join(name));
        }
    }

    candidates
}

/// Per-user configuration directory (`~/.histoscan`).
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".histoscan"))
}

static CONFIG_HANDLE: OnceLock<ConfigHandle> = OnceLock::new();
static LOG_CONFIG_ONCE: Once = Once::new();

/// Load the process-wide configuration from `custom_path` (or discovery).
///
/// Only the first call loads anything; later calls return the existing handle.
pub fn init_config(custom_path: Option<&Path>) -> &'static ConfigHandle {
    CONFIG_HANDLE.get_or_init(|| load_config(custom_path))
}

/// Access the process-wide configuration (loaded once per process).
pub fn config_handle() -> &'static ConfigHandle {
    init_config(None)
}

/// Log config source and warnings the first time it is requested.
pub fn log_config_usage() {
    LOG_CONFIG_ONCE.call_once(|| {
        let handle = config_handle();
        match &handle.source {
            Some(source) => log::info!("Loaded histoscan config from {}", source.display()),
            None => log::debug!("Using built-in histoscan defaults"),
        }
        for warning in &handle.warnings {
            log::warn!("Config warning: {}", warning);
        }
    });
}
