//! Contrast validation of candidate holes
//!
//! The geometric detectors cannot tell a bullet hole from a printed
//! bullseye ring, a specular highlight or paper texture. This stage
//! compares the mean intensity of a small window around the candidate
//! against the mean of a wider surrounding window and keeps only
//! candidates that look like a dark hole on light paper or a light
//! hole on dark paper.

use crate::models::{GrayImage, PointI};

/// Candidates closer than this to any image border are rejected
/// outright; their windows would be truncated.
const BORDER_MARGIN: i32 = 20;
/// Half-size of the inner sampling window
const INNER_HALF: i32 = 10;
/// Half-size of the outer sampling window (includes the inner window)
const OUTER_HALF: i32 = 20;

/// Dark hole: inner/outer ratio below this...
const DARK_RATIO: f64 = 0.7;
/// ...and inner mean below this
const DARK_MAX_MEAN: f64 = 150.0;
/// Light hole: inner/outer ratio above this...
const LIGHT_RATIO: f64 = 1.3;
/// ...and inner mean above this
const LIGHT_MIN_MEAN: f64 = 100.0;

/// Local-contrast hole validator
pub struct HoleValidator;

impl HoleValidator {
    /// Keep the candidates that pass the contrast test, preserving
    /// input order
    pub fn validate(gray: &GrayImage, candidates: &[PointI]) -> Vec<PointI> {
        candidates
            .iter()
            .copied()
            .filter(|c| Self::is_hole(gray, c))
            .collect()
    }

    /// Contrast test for a single candidate
    pub fn is_hole(gray: &GrayImage, candidate: &PointI) -> bool {
        let width = gray.width() as i32;
        let height = gray.height() as i32;
        let (x, y) = (candidate.x, candidate.y);

        if x < BORDER_MARGIN || x >= width - BORDER_MARGIN || y < BORDER_MARGIN || y >= height - BORDER_MARGIN
        {
            return false;
        }

        let inner_mean = gray.window_mean(
            (x - INNER_HALF) as usize,
            (y - INNER_HALF) as usize,
            (x + INNER_HALF) as usize,
            (y + INNER_HALF) as usize,
        );
        // the outer window deliberately includes the inner region;
        // the ratio still separates holes from flat paper
        let outer_mean = gray.window_mean(
            (x - OUTER_HALF) as usize,
            (y - OUTER_HALF) as usize,
            (x + OUTER_HALF) as usize,
            (y + OUTER_HALF) as usize,
        );

        if outer_mean == 0.0 {
            return false;
        }
        let contrast_ratio = inner_mean / outer_mean;

        let is_dark_hole = contrast_ratio < DARK_RATIO && inner_mean < DARK_MAX_MEAN;
        let is_light_hole = contrast_ratio > LIGHT_RATIO && inner_mean > LIGHT_MIN_MEAN;
        is_dark_hole || is_light_hole
    }
}
