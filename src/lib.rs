//! shotgroup - shot-hole detection and MOA group analysis for paper
//! shooting targets
//!
//! A pure Rust engine that turns a photograph of a shot-up paper
//! target into a deduplicated set of bullet-hole coordinates and the
//! group's precision expressed in Minutes-Of-Angle. Four independent
//! detection heuristics propose candidates, local contrast validation
//! rejects print artifacts and highlights, and a calibration value
//! object converts pixel spreads into inches and MOA.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Overlay rendering (shot circles, index labels, reference scale)
pub mod annotate;
/// Candidate detection, validation and deduplication
pub mod detector;
/// Closed error kinds
pub mod error;
/// Merging manual corrections into a shot set
pub mod merge;
/// Calibration and MOA group statistics
pub mod metrics;
/// Core data structures (Shot, GrayImage, BitMatrix, Point)
pub mod models;
/// Image-file and synthetic-target helpers for the CLI, tests and benches
pub mod tools;
/// Image-processing building blocks
pub mod utils;

pub use error::{Error, Result};
pub use metrics::{Calibration, GroupMetrics, MoaCalculator};
pub use models::{ColorImage, GrayImage, Point, PointI, Shot};

use log::debug;

use detector::dedup::dedup_shots;
use detector::{HoleValidator, Preprocessed, detect_candidates};
use utils::grayscale::rgb_to_grayscale;

/// Detect shot holes in an RGB image
///
/// # Arguments
/// * `rgb` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// The final deduplicated shot set, in detection order. An image with
/// no recognizable holes yields an empty set, not an error.
pub fn detect_shots(rgb: &[u8], width: usize, height: usize) -> Result<Vec<Shot>> {
    if width == 0 || height == 0 || rgb.len() != width * height * 3 {
        return Err(Error::InvalidImage);
    }

    // Step 1: Convert to grayscale
    let gray = rgb_to_grayscale(rgb, width, height);
    detect_shots_from_grayscale(&gray, width, height)
}

/// Detect shot holes from a pre-computed grayscale image
///
/// Same pipeline as [`detect_shots`] minus the color conversion.
pub fn detect_shots_from_grayscale(gray: &[u8], width: usize, height: usize) -> Result<Vec<Shot>> {
    let gray = GrayImage::from_raw(gray.to_vec(), width, height)?;

    // Step 2: Build the preprocessed variants all detectors share
    let pre = Preprocessed::from_gray(gray);

    // Step 3: Candidate proposal, canonical order Blob → Contour → Hough → Template
    let candidates = detect_candidates(&pre);

    // Step 4: Contrast validation against the raw grayscale
    let validated = HoleValidator::validate(&pre.gray, &candidates);
    debug!(
        "validation kept {} of {} candidates",
        validated.len(),
        candidates.len()
    );

    // Step 5: Minimum-separation dedup, first occurrence wins
    let shots = dedup_shots(&validated);
    debug!("final shot set: {} shots", shots.len());

    Ok(shots.into_iter().map(|p| Shot::at(p.x, p.y)).collect())
}

/// Everything one analysis pass produces
#[derive(Debug, Clone)]
pub struct TargetAnalysis {
    /// Final deduplicated shot set
    pub shots: Vec<Shot>,
    /// Group statistics under the analyzer's calibration
    pub metrics: GroupMetrics,
    /// Annotated copy of the input frame
    pub annotated: ColorImage,
}

/// Detector with a calibration threaded through analysis calls
///
/// The calibration is read-only during detection; concurrent analyses
/// with different calibrations each construct their own `ShotAnalyzer`.
#[derive(Debug, Clone, Default)]
pub struct ShotAnalyzer {
    calibration: Calibration,
}

impl ShotAnalyzer {
    /// Analyzer with the default (uncalibrated) scale assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer over an explicit calibration
    pub fn with_calibration(calibration: Calibration) -> Self {
        Self { calibration }
    }

    /// The calibration this analyzer computes under
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Detect shots only
    pub fn detect(&self, rgb: &[u8], width: usize, height: usize) -> Result<Vec<Shot>> {
        detect_shots(rgb, width, height)
    }

    /// Full pass: detect, compute group statistics, render the overlay
    pub fn analyze(&self, rgb: &[u8], width: usize, height: usize) -> Result<TargetAnalysis> {
        let shots = detect_shots(rgb, width, height)?;
        let image = ColorImage::from_raw(rgb.to_vec(), width, height)?;
        let metrics = MoaCalculator::new(self.calibration).group_statistics(&shots);
        let annotated = annotate::annotate(&image, &shots, &self.calibration, true);
        Ok(TargetAnalysis {
            shots,
            metrics,
            annotated,
        })
    }

    /// Merge manual corrections into a prior shot set and recompute
    /// statistics; the merged set replaces the prior one in the
    /// caller's record
    pub fn apply_corrections(
        &self,
        auto: &[Shot],
        manual: &[Vec<f64>],
    ) -> Result<(Vec<Shot>, GroupMetrics)> {
        let merged = merge::merge_shots(auto, manual)?;
        let metrics = MoaCalculator::new(self.calibration).group_statistics(&merged);
        Ok((merged, metrics))
    }
}
