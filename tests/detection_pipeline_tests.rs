//! End-to-end pipeline tests over synthetic targets
//!
//! These exercise the full detect → validate → dedup → metrics →
//! annotate flow on deterministic images: light paper with dark
//! circular holes. They protect the dedup separation invariant, the
//! canonical aggregation order and the recalibration/merge flows.

use approx::assert_relative_eq;
use shotgroup::detector::{Preprocessed, detect_candidates, detect_candidates_sequential};
use shotgroup::metrics::{Calibration, MoaCalculator};
use shotgroup::models::{GrayImage, MIN_SHOT_SEPARATION, Point, Shot};
use shotgroup::tools::synthetic_target;
use shotgroup::utils::grayscale::rgb_to_grayscale;
use shotgroup::{Error, ShotAnalyzer, detect_shots};

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

/// Three well-separated holes, all comfortably inside the border margin
const HOLES: [(i32, i32, i32); 3] = [(160, 120, 11), (470, 130, 12), (320, 360, 10)];

fn detect_fixture() -> Vec<Shot> {
    let rgb = synthetic_target(WIDTH, HEIGHT, &HOLES);
    detect_shots(&rgb, WIDTH, HEIGHT).unwrap()
}

#[test]
fn finds_every_hole_once() {
    let shots = detect_fixture();
    assert_eq!(shots.len(), HOLES.len());
    for &(cx, cy, _) in &HOLES {
        let hit = shots
            .iter()
            .any(|s| ((s.x - cx).pow(2) + (s.y - cy).pow(2)) <= 9);
        assert!(hit, "no shot within 3 px of ({cx}, {cy}): {shots:?}");
    }
}

#[test]
fn dedup_invariant_holds_end_to_end() {
    let shots = detect_fixture();
    for i in 0..shots.len() {
        for j in i + 1..shots.len() {
            assert!(shots[i].distance(&shots[j]) >= MIN_SHOT_SEPARATION);
        }
    }
}

#[test]
fn detected_shots_carry_default_radius() {
    assert!(detect_fixture().iter().all(|s| s.radius == 10));
}

#[test]
fn detection_is_deterministic() {
    let rgb = synthetic_target(WIDTH, HEIGHT, &HOLES);
    let first = detect_shots(&rgb, WIDTH, HEIGHT).unwrap();
    let second = detect_shots(&rgb, WIDTH, HEIGHT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_aggregation_matches_sequential_order() {
    let rgb = synthetic_target(WIDTH, HEIGHT, &HOLES);
    let gray = rgb_to_grayscale(&rgb, WIDTH, HEIGHT);
    let pre = Preprocessed::from_gray(GrayImage::from_raw(gray, WIDTH, HEIGHT).unwrap());
    assert_eq!(detect_candidates(&pre), detect_candidates_sequential(&pre));
}

#[test]
fn blank_target_yields_empty_set_not_error() {
    let rgb = synthetic_target(WIDTH, HEIGHT, &[]);
    assert!(detect_shots(&rgb, WIDTH, HEIGHT).unwrap().is_empty());
}

#[test]
fn hole_near_border_is_rejected_by_validation() {
    // center 10 px from the edge, inside no detector's reach past the
    // 20 px validation margin
    let rgb = synthetic_target(WIDTH, HEIGHT, &[(10, 120, 10)]);
    assert!(detect_shots(&rgb, WIDTH, HEIGHT).unwrap().is_empty());
}

#[test]
fn bad_buffers_are_invalid_images() {
    assert_eq!(detect_shots(&[], 0, 0).unwrap_err(), Error::InvalidImage);
    assert_eq!(
        detect_shots(&[0u8; 12], 5, 5).unwrap_err(),
        Error::InvalidImage
    );
}

#[test]
fn analyze_bundles_shots_metrics_and_overlay() {
    let rgb = synthetic_target(WIDTH, HEIGHT, &HOLES);
    let analysis = ShotAnalyzer::new().analyze(&rgb, WIDTH, HEIGHT).unwrap();
    assert_eq!(analysis.shots.len(), 3);
    assert_eq!(analysis.metrics.shot_count, 3);
    assert!(analysis.metrics.extreme_spread_moa > 0.0);
    assert_eq!(analysis.annotated.width(), WIDTH);
    assert_eq!(analysis.annotated.height(), HEIGHT);
    // the overlay is drawn on a copy
    assert_ne!(analysis.annotated.as_slice(), &rgb[..]);
}

#[test]
fn manual_corrections_then_recalibration_flow() {
    let shots = detect_fixture();

    // shooter adds a hole the detectors missed
    let analyzer = ShotAnalyzer::new();
    let (merged, metrics) = analyzer
        .apply_corrections(&shots, &[vec![200.0, 300.0]])
        .unwrap();
    assert_eq!(merged.len(), shots.len() + 1);
    assert_eq!(metrics.shot_count, merged.len());

    // recalibration replaces the scale and shrinks the MOA numbers
    let cal = Calibration::from_reference_points(Point::new(0.0, 0.0), Point::new(400.0, 0.0), 2.0)
        .unwrap();
    assert_relative_eq!(cal.pixels_per_inch, 200.0);
    let recalibrated = MoaCalculator::new(cal).group_statistics(&merged);
    assert!(recalibrated.extreme_spread_moa < metrics.extreme_spread_moa);
    // metrics stay recomputable: same inputs, same outputs
    assert_eq!(recalibrated, MoaCalculator::new(cal).group_statistics(&merged));
}
