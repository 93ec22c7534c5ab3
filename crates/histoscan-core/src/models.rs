//! Data models for the analysis results

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical HER2 expression status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Her2Status {
    Positive,
    Equivocal,
    Negative,
}

impl Her2Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Equivocal => "equivocal",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Her2Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cancer grade derived from the biomarker percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CancerGrade {
    #[serde(rename = "Grade 1")]
    Grade1,
    #[serde(rename = "Grade 2")]
    Grade2,
    #[serde(rename = "Grade 3")]
    Grade3,
}

impl CancerGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grade1 => "Grade 1",
            Self::Grade2 => "Grade 2",
            Self::Grade3 => "Grade 3",
        }
    }
}

impl fmt::Display for CancerGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative staining intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StainingIntensity {
    Weak,
    Moderate,
    Strong,
}

impl StainingIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for StainingIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result bundle of one severity scoring run.
///
/// Invariants: `positive_cells <= total_cells`, `confidence` in 0.0-1.0,
/// `biomarker_percentage` and `stained_area` in 0.0-100.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityResult {
    /// HER2 status selected by the threshold policy
    #[serde(rename = "her2_status")]
    pub status: Her2Status,

    /// Confidence fraction (0.0-1.0)
    pub confidence: f64,

    /// Grade derived from `biomarker_percentage`
    #[serde(rename = "cancer_grade")]
    pub grade: CancerGrade,

    /// Share of tissue expressing the biomarker (0-100)
    pub biomarker_percentage: f64,

    /// Qualitative staining intensity
    #[serde(rename = "staining_intensity")]
    pub intensity: StainingIntensity,

    /// Cells counted as biomarker-positive
    pub positive_cells: u32,

    /// Cells counted in total
    pub total_cells: u32,

    /// Stained area percentage (0-100)
    pub stained_area: f64,
}

impl SeverityResult {
    /// Positive cells as a percentage of all cells, `None` with no cells.
    pub fn positive_cell_percentage(&self) -> Option<f64> {
        if self.total_cells == 0 {
            return None;
        }
        Some(self.positive_cells as f64 / self.total_cells as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SeverityResult {
        SeverityResult {
            status: Her2Status::Positive,
            confidence: 0.9,
            grade: CancerGrade::Grade3,
            biomarker_percentage: 75.0,
            intensity: StainingIntensity::Strong,
            positive_cells: 750,
            total_cells: 1000,
            stained_area: 80.0,
        }
    }

    #[test]
    fn test_severity_result_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["her2_status"], "positive");
        assert_eq!(json["cancer_grade"], "Grade 3");
        assert_eq!(json["staining_intensity"], "strong");
        assert_eq!(json["positive_cells"], 750);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Her2Status::Equivocal.to_string(), "equivocal");
        assert_eq!(CancerGrade::Grade2.to_string(), "Grade 2");
        assert_eq!(StainingIntensity::Weak.to_string(), "weak");
    }

    #[test]
    fn test_positive_cell_percentage() {
        let result = sample();
        assert!((result.positive_cell_percentage().unwrap() - 75.0).abs() < 1e-9);

        let empty = SeverityResult {
            positive_cells: 0,
            total_cells: 0,
            ..sample()
        };
        assert!(empty.positive_cell_percentage().is_none());
    }
}
