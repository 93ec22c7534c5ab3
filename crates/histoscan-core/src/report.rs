//! Diagnostic report
//!
//! Text sections and the serializable report bundle built after a full
//! analysis run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Her2Status, SeverityResult};
use crate::stats::TextureFeatures;

const POSITIVE_RECOMMENDATIONS: &[&str] = &[
    "Consider HER2-targeted therapy (e.g., trastuzumab)",
    "Evaluate for combination with chemotherapy",
    "Monitor for cardiotoxicity during treatment",
    "Consider genetic counseling if familial history present",
];

const NEGATIVE_RECOMMENDATIONS: &[&str] = &[
    "HER2-targeted therapy not indicated",
    "Consider hormone receptor status evaluation",
    "Standard chemotherapy protocols may be appropriate",
    "Regular monitoring and follow-up recommended",
];

const EQUIVOCAL_RECOMMENDATIONS: &[&str] = &[
    "Equivocal result requires additional testing",
    "Consider FISH analysis for confirmation",
    "Repeat IHC staining with fresh tissue if available",
    "Clinical correlation recommended",
];

/// Run parameters quoted in the technical notes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TechnicalContext {
    pub processing_seconds: f64,
    pub texture: TextureFeatures,
    pub transform_size: (u32, u32),
    pub scorer_size: (u32, u32),
}

/// Complete report of one analysis session
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub session_id: Uuid,
    pub source_file: PathBuf,
    pub generated_image: PathBuf,
    pub created_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub processing_seconds: f64,
    pub result: SeverityResult,
    pub texture: TextureFeatures,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub technical_notes: String,
}

impl DiagnosticReport {
    /// Assemble the report and render its text sections.
    pub fn new(
        session_id: Uuid,
        source_file: PathBuf,
        generated_image: PathBuf,
        created_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        result: SeverityResult,
        context: TechnicalContext,
    ) -> Self {
        Self {
            session_id,
            source_file,
            generated_image,
            created_at,
            completed_at,
            processing_seconds: context.processing_seconds,
            summary: generate_summary(&result),
            recommendations: generate_recommendations(result.status)
                .iter()
                .map(|s| s.to_string())
                .collect(),
            technical_notes: generate_technical_notes(&result, &context),
            texture: context.texture,
            result,
        }
    }

    /// Plain-text rendering for terminal output.
    pub fn render_text(&self) -> String {
        format!(
            "Session: {}\nSource: {}\nGenerated IHC: {}\n\n{}\n{}\n{}",
            self.session_id,
            self.source_file.display(),
            self.generated_image.display(),
            self.summary,
            render_recommendations(self.result.status),
            self.technical_notes,
        )
    }
}

/// Summary paragraph with status, grade, biomarker and intensity.
pub fn generate_summary(result: &SeverityResult) -> String {
    format!(
        "HER2 Expression Analysis Summary:\n\
         \n\
         HER2 Status: {} (Confidence: {})\n\
         Cancer Grade: {}\n\
         Biomarker Expression: {} of analyzed tissue\n\
         Staining Intensity: {}\n\
         \n\
         This analysis was performed using virtual IHC generation from H&E stained tissue sections.\n",
        result.status.as_str().to_uppercase(),
        format_confidence(Some(result.confidence)),
        result.grade,
        format_percentage(Some(result.biomarker_percentage)),
        result.intensity,
    )
}

/// Fixed recommendation list for a status.
pub fn generate_recommendations(status: Her2Status) -> &'static [&'static str] {
    match status {
        Her2Status::Positive => POSITIVE_RECOMMENDATIONS,
        Her2Status::Negative => NEGATIVE_RECOMMENDATIONS,
        Her2Status::Equivocal => EQUIVOCAL_RECOMMENDATIONS,
    }
}

/// Recommendation list as a bulleted block.
pub fn render_recommendations(status: Her2Status) -> String {
    let items: String = generate_recommendations(status)
        .iter()
        .map(|item| format!("  • {}\n", item))
        .collect();
    format!("Recommendations:\n{}", items)
}

pub fn generate_technical_notes(result: &SeverityResult, context: &TechnicalContext) -> String {
    let texture = &context.texture;
    let lines = [
        "Technical Analysis Notes:".to_string(),
        String::new(),
        "Image Processing:".to_string(),
        format!(
            "  • Virtual IHC generated at {}x{}",
            context.transform_size.0, context.transform_size.1
        ),
        format!(
            "  • Severity scored at {}x{}",
            context.scorer_size.0, context.scorer_size.1
        ),
        String::new(),
        "Analysis Parameters:".to_string(),
        format!(
            "  • Model confidence: {}",
            format_confidence(Some(result.confidence))
        ),
        format!("  • Processing time: {:.1} seconds", context.processing_seconds),
        format!(
            "  • Cells: {} positive of {} ({})",
            result.positive_cells,
            result.total_cells,
            format_percentage(result.positive_cell_percentage())
        ),
        format!(
            "  • Stained area: {}",
            format_percentage(Some(result.stained_area))
        ),
        String::new(),
        "Texture Features:".to_string(),
        format!("  • Mean intensity: {:.2}", texture.mean_intensity),
        format!("  • Intensity std: {:.2}", texture.std_intensity),
        format!("  • Entropy: {:.3} bits", texture.entropy),
        format!("  • Contrast: {:.2}", texture.contrast),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// A confidence fraction as a percentage with one decimal, or "N/A".
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(value) => format!("{:.1}%", value * 100.0),
        None => "N/A".to_string(),
    }
}

/// A percentage value with one decimal, or "N/A".
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(value) => format!("{:.1}%", value),
        None => "N/A".to_string(),
    }
}
