//! Pipeline construction and result output shared by the commands.

use std::path::Path;

use histoscan_core::config::{config_handle, AnalysisConfig};
use histoscan_core::AnalysisPipeline;
use serde::Serialize;

/// Build the pipeline from the process-wide config, with an optional seed override.
pub fn build_pipeline(seed: Option<u64>) -> AnalysisPipeline {
    pipeline_from(&config_handle().config, seed)
}

/// Build a pipeline from an explicit config.
pub fn pipeline_from(config: &AnalysisConfig, seed: Option<u64>) -> AnalysisPipeline {
    AnalysisPipeline::from_config(config).with_seed(seed)
}

/// Pretty JSON rendering of any serializable result.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize JSON: {}", e))
}

/// Write `value` as pretty JSON to `path`.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), String> {
    let json = to_json(value)?;
    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use histoscan_core::TransformSettings;
    use tempfile::tempdir;

    #[test]
    fn test_seed_override_reaches_both_components() {
        let pipeline = pipeline_from(&AnalysisConfig::default(), Some(17));
        assert_eq!(pipeline.transform().settings().seed, Some(17));
        assert_eq!(pipeline.scorer().settings().seed, Some(17));
    }

    #[test]
    fn test_no_override_keeps_config_seed() {
        let config = AnalysisConfig {
            transform: TransformSettings {
                seed: Some(3),
                ..TransformSettings::default()
            },
            ..AnalysisConfig::default()
        };
        let pipeline = pipeline_from(&config, None);
        assert_eq!(pipeline.transform().settings().seed, Some(3));
        assert_eq!(pipeline.scorer().settings().seed, None);
    }

    #[test]
    fn test_save_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_json(&vec![1, 2, 3], &path).unwrap();

        let parsed: Vec<i32> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn test_save_json_bad_path() {
        let err = save_json(&1, Path::new("/nonexistent/dir/out.json")).unwrap_err();
        assert!(err.contains("Failed to write"));
    }
}
