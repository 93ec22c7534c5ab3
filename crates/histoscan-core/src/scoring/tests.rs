//! Tests for the severity scorer

use super::*;
use crate::models::{CancerGrade, Her2Status, StainingIntensity};
use crate::noise::seeded_rng;
use image::Rgb;
use std::fs;
use tempfile::tempdir;

fn stats(mean: f64, std_dev: f64) -> IntensityStatistics {
    IntensityStatistics { mean, std_dev }
}

/// Bright stripes over a mid background: mean ~0.72, std ~0.28
fn bright_varied_image() -> RgbImage {
    RgbImage::from_fn(64, 64, |x, _| {
        if x % 2 == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([110, 110, 110])
        }
    })
}

fn assert_invariants(result: &SeverityResult) {
    assert!(result.positive_cells <= result.total_cells);
    assert!((0.0..=1.0).contains(&result.confidence));
    assert!((0.0..=100.0).contains(&result.biomarker_percentage));
    assert!((0.0..=100.0).contains(&result.stained_area));
    assert_eq!(result.grade, grade_for(result.biomarker_percentage));
}

// ========================================================================
// Threshold policy
// ========================================================================

#[test]
fn test_classify_positive() {
    let band = classify(&stats(0.7, 0.2));
    assert_eq!(band.status, Her2Status::Positive);
    assert_eq!(band.intensity, StainingIntensity::Strong);
}

#[test]
fn test_classify_bright_but_flat_is_equivocal() {
    let band = classify(&stats(0.7, 0.1));
    assert_eq!(band.status, Her2Status::Equivocal);
    assert_eq!(band.intensity, StainingIntensity::Moderate);
}

#[test]
fn test_classify_negative() {
    let band = classify(&stats(0.3, 0.3));
    assert_eq!(band.status, Her2Status::Negative);
    assert_eq!(band.intensity, StainingIntensity::Weak);
}

#[test]
fn test_classify_boundaries_are_strict() {
    // Exactly on both positive thresholds is not positive
    assert_eq!(classify(&stats(0.6, 0.15)).status, Her2Status::Equivocal);
    // Exactly on the equivocal threshold is negative
    assert_eq!(classify(&stats(0.4, 0.5)).status, Her2Status::Negative);
    assert_eq!(classify(&stats(0.6001, 0.1501)).status, Her2Status::Positive);
}

#[test]
fn test_grade_boundaries_are_strict() {
    assert_eq!(grade_for(0.0), CancerGrade::Grade1);
    assert_eq!(grade_for(30.0), CancerGrade::Grade1);
    assert_eq!(grade_for(30.01), CancerGrade::Grade2);
    assert_eq!(grade_for(70.0), CancerGrade::Grade2);
    assert_eq!(grade_for(70.01), CancerGrade::Grade3);
    assert_eq!(grade_for(100.0), CancerGrade::Grade3);
}

// ========================================================================
// Draws
// ========================================================================

#[test]
fn test_draw_result_stays_inside_band() {
    for band in [&POSITIVE_BAND, &EQUIVOCAL_BAND, &NEGATIVE_BAND] {
        let mut rng = seeded_rng(7);
        for _ in 0..500 {
            let result = draw_result(band, [800, 1500], &mut rng);

            assert_eq!(result.status, band.status);
            assert_eq!(result.intensity, band.intensity);
            assert!(result.confidence >= band.confidence.0);
            assert!(result.confidence < band.confidence.1);
            assert!(result.biomarker_percentage >= band.biomarker_percentage.0);
            assert!(result.biomarker_percentage < band.biomarker_percentage.1);
            assert!((800..=1500).contains(&result.total_cells));
            assert_invariants(&result);
        }
    }
}

#[test]
fn test_positive_cells_follow_biomarker_percentage() {
    let mut rng = seeded_rng(11);
    for _ in 0..200 {
        let r = draw_result(&EQUIVOCAL_BAND, [800, 1500], &mut rng);
        let expected = (r.total_cells as f64 * r.biomarker_percentage / 100.0).floor() as u32;
        assert_eq!(r.positive_cells, expected);
    }
}

#[test]
fn test_stained_area_within_jitter() {
    let mut rng = seeded_rng(3);
    for _ in 0..200 {
        let r = draw_result(&POSITIVE_BAND, [800, 1500], &mut rng);
        let upper = (r.biomarker_percentage * 1.2).min(100.0);
        assert!(r.stained_area >= r.biomarker_percentage * 0.8 - 1e-9);
        assert!(r.stained_area <= upper + 1e-9);
    }
}

#[test]
fn test_degenerate_cell_range() {
    let mut rng = seeded_rng(0);
    let r = draw_result(&NEGATIVE_BAND, [1000, 1000], &mut rng);
    assert_eq!(r.total_cells, 1000);
}

// ========================================================================
// In-memory scoring
// ========================================================================

#[test]
fn test_mid_gray_scores_equivocal() {
    let image = RgbImage::from_pixel(256, 256, Rgb([128, 128, 128]));
    let result = SeverityScorer::default().score_image(&image, &mut seeded_rng(1));

    assert_eq!(result.status, Her2Status::Equivocal);
    assert_eq!(result.intensity, StainingIntensity::Moderate);
    assert!(matches!(
        result.grade,
        CancerGrade::Grade1 | CancerGrade::Grade2
    ));
    assert_invariants(&result);
}

#[test]
fn test_dark_image_scores_negative() {
    let image = RgbImage::from_pixel(100, 100, Rgb([60, 40, 70]));
    let result = SeverityScorer::default().score_image(&image, &mut seeded_rng(2));

    assert_eq!(result.status, Her2Status::Negative);
    assert_eq!(result.grade, CancerGrade::Grade1);
}

#[test]
fn test_bright_varied_image_scores_positive() {
    let scorer = SeverityScorer::new(ScorerSettings {
        // Keep the stripes intact
        canonical_size: [64, 64],
        ..ScorerSettings::default()
    });
    let assessment = scorer.assess_image(&bright_varied_image(), &mut seeded_rng(3));

    assert!(assessment.statistics.mean > POSITIVE_MEAN_THRESHOLD);
    assert!(assessment.statistics.std_dev > POSITIVE_STD_THRESHOLD);
    assert_eq!(assessment.result.status, Her2Status::Positive);
    assert_ne!(assessment.result.grade, CancerGrade::Grade1);
}

#[test]
fn test_same_statistics_same_categories_across_seeds() {
    let image = RgbImage::from_pixel(40, 40, Rgb([150, 120, 140]));
    let scorer = SeverityScorer::default();

    let first = scorer.score_image(&image, &mut seeded_rng(0));
    for seed in 1..50 {
        let result = scorer.score_image(&image, &mut seeded_rng(seed));
        assert_eq!(result.status, first.status);
        assert_eq!(result.intensity, first.intensity);
        assert_invariants(&result);
    }
}

#[test]
fn test_same_seed_is_reproducible() {
    let image = bright_varied_image();
    let scorer = SeverityScorer::default();

    let a = scorer.score_image(&image, &mut seeded_rng(99));
    let b = scorer.score_image(&image, &mut seeded_rng(99));
    assert_eq!(a, b);
}

// ========================================================================
// File-level scoring
// ========================================================================

#[test]
fn test_score_file_with_settings_seed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ihc.png");
    RgbImage::from_pixel(50, 30, Rgb([128, 128, 128]))
        .save(&path)
        .unwrap();

    let scorer = SeverityScorer::new(ScorerSettings {
        seed: Some(5),
        ..ScorerSettings::default()
    });
    let a = scorer.score(&path).unwrap();
    let b = scorer.score(&path).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.status, Her2Status::Equivocal);
}

#[test]
fn test_assess_reports_texture() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ihc.png");
    RgbImage::from_pixel(20, 20, Rgb([90, 90, 90]))
        .save(&path)
        .unwrap();

    let assessment = SeverityScorer::default()
        .assess_with_rng(&path, &mut seeded_rng(0))
        .unwrap();

    assert!((assessment.texture.mean_intensity - 90.0).abs() < 1e-9);
    assert!(assessment.texture.entropy.abs() < 1e-12);
}

#[test]
fn test_score_empty_file_is_decode_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.png");
    fs::write(&path, b"").unwrap();

    let err = SeverityScorer::default()
        .score_with_rng(&path, &mut seeded_rng(0))
        .unwrap_err();
    assert!(matches!(err, DecodeError::Image { .. }), "got {:?}", err);
}

#[test]
fn test_score_garbage_file_is_decode_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slide.jpg");
    fs::write(&path, b"this is not a jpeg").unwrap();

    assert!(SeverityScorer::default()
        .score_with_rng(&path, &mut seeded_rng(0))
        .is_err());
}

#[test]
fn test_score_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = SeverityScorer::default()
        .score_with_rng(dir.path().join("nope.png"), &mut seeded_rng(0))
        .unwrap_err();
    assert!(matches!(err, DecodeError::Io { .. }));
}
