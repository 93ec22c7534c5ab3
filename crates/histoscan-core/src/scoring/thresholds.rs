//! Fixed threshold policy. Every comparison is a strict `>`.

use crate::models::{CancerGrade, Her2Status, StainingIntensity};
use crate::stats::IntensityStatistics;

/// Mean intensity above which (together with the std threshold) the image is positive
pub const POSITIVE_MEAN_THRESHOLD: f64 = 0.6;
/// Intensity spread above which (together with the mean threshold) the image is positive
pub const POSITIVE_STD_THRESHOLD: f64 = 0.15;
/// Mean intensity above which a non-positive image is equivocal
pub const EQUIVOCAL_MEAN_THRESHOLD: f64 = 0.4;

/// Biomarker percentage above which the grade is 3
pub const GRADE_3_THRESHOLD: f64 = 70.0;
/// Biomarker percentage above which the grade is 2
pub const GRADE_2_THRESHOLD: f64 = 30.0;

/// Categorical outcome of the threshold policy and the ranges its numeric
/// values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBand {
    pub status: Her2Status,
    pub intensity: StainingIntensity,
    /// Half-open range for the confidence draw
    pub confidence: (f64, f64),
    /// Half-open range for the biomarker percentage draw
    pub biomarker_percentage: (f64, f64),
}

pub const POSITIVE_BAND: StatusBand = StatusBand {
    status: Her2Status::Positive,
    intensity: StainingIntensity::Strong,
    confidence: (0.75, 0.95),
    biomarker_percentage: (60.0, 90.0),
};

pub const EQUIVOCAL_BAND: StatusBand = StatusBand {
    status: Her2Status::Equivocal,
    intensity: StainingIntensity::Moderate,
    confidence: (0.5, 0.75),
    biomarker_percentage: (20.0, 60.0),
};

pub const NEGATIVE_BAND: StatusBand = StatusBand {
    status: Her2Status::Negative,
    intensity: StainingIntensity::Weak,
    confidence: (0.8, 0.95),
    biomarker_percentage: (0.0, 20.0),
};

/// Select the status band for a pair of intensity statistics.
pub fn classify(stats: &IntensityStatistics) -> &'static StatusBand {
    if stats.mean > POSITIVE_MEAN_THRESHOLD && stats.std_dev > POSITIVE_STD_THRESHOLD {
        &POSITIVE_BAND
    } else if stats.mean > EQUIVOCAL_MEAN_THRESHOLD {
        &EQUIVOCAL_BAND
    } else {
        &NEGATIVE_BAND
    }
}

/// Grade for a biomarker percentage; exactly 70 is grade 2, exactly 30 is grade 1.
pub fn grade_for(biomarker_percentage: f64) -> CancerGrade {
    if biomarker_percentage > GRADE_3_THRESHOLD {
        CancerGrade::Grade3
    } else if biomarker_percentage > GRADE_2_THRESHOLD {
        CancerGrade::Grade2
    } else {
        CancerGrade::Grade1
    }
}
