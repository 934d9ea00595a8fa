//! Contour-based candidate detection
//!
//! Adaptive-thresholds the blurred frame, cleans the mask with a
//! close-then-open pass and keeps external regions that are hole-sized
//! and round enough. Emits region centroids.

use crate::detector::components::find_regions;
use crate::detector::{CandidateDetector, Preprocessed};
use crate::models::PointI;
use crate::utils::threshold::{adaptive_threshold, close3, fill_holes, open3};

/// Adaptive threshold neighborhood size
const BLOCK_SIZE: usize = 11;
/// Constant subtracted from the local mean
const THRESHOLD_C: f64 = 2.0;
/// Area gate in px²
const MIN_AREA: usize = 100;
const MAX_AREA: usize = 5000;
/// Contours are gated more strictly than blobs; thresholded masks are
/// noisier than intensity regions
const MIN_CIRCULARITY: f64 = 0.3;

/// Candidate detector over thresholded contours
pub struct ContourDetector;

impl CandidateDetector for ContourDetector {
    fn name(&self) -> &'static str {
        "contour"
    }

    fn detect(&self, pre: &Preprocessed) -> Vec<PointI> {
        let mask = adaptive_threshold(&pre.blur5, BLOCK_SIZE, THRESHOLD_C);
        // close-then-open cleanup, then treat each region as its
        // filled external contour
        let mask = fill_holes(&open3(&close3(&mask)));

        find_regions(&mask)
            .into_iter()
            .filter(|r| {
                r.area >= MIN_AREA && r.area <= MAX_AREA && r.circularity() >= MIN_CIRCULARITY
            })
            .map(|r| r.center())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GrayImage;

    fn preprocessed_with_disk(size: usize, cx: i32, cy: i32, r: i32) -> Preprocessed {
        let mut img = GrayImage::filled(size, size, 210);
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy <= r * r {
                    img.set(x as usize, y as usize, 25);
                }
            }
        }
        Preprocessed::from_gray(img)
    }

    #[test]
    fn centroid_of_dark_disk() {
        let pre = preprocessed_with_disk(120, 60, 55, 10);
        let centers = ContourDetector.detect(&pre);
        assert!(!centers.is_empty());
        assert!(centers[0].distance(&PointI::new(60, 55)) <= 3.0);
    }

    #[test]
    fn flat_frame_has_no_contours() {
        let pre = Preprocessed::from_gray(GrayImage::filled(80, 80, 150));
        assert!(ContourDetector.detect(&pre).is_empty());
    }
}
