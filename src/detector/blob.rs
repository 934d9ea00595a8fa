//! Threshold-sweep blob detection
//!
//! Binarizes the frame at a ladder of thresholds, extracts connected
//! dark regions at each level and keeps the compact, roughly circular
//! ones. Centers that reappear across several threshold levels are
//! merged and emitted as candidates. Light blobs are found by running
//! the same sweep over the inverted frame.

use crate::detector::components::find_regions;
use crate::detector::{CandidateDetector, Preprocessed};
use crate::models::{BitMatrix, GrayImage, PointI};
use crate::utils::filter::invert;

/// Acceptance constraints for one blob
#[derive(Debug, Clone, Copy)]
pub struct BlobParams {
    /// Minimum region area in px²
    pub min_area: usize,
    /// Maximum region area in px²
    pub max_area: usize,
    /// Minimum circularity 4πA/P²
    pub min_circularity: f64,
    /// Minimum area / convex-hull-area ratio
    pub min_convexity: f64,
    /// Minimum minor/major second-moment eigenvalue ratio
    pub min_inertia_ratio: f64,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            min_area: 100,
            max_area: 5000,
            min_circularity: 0.1,
            min_convexity: 0.1,
            min_inertia_ratio: 0.1,
        }
    }
}

/// Threshold ladder: 50..=220 step 10
const THRESHOLD_MIN: u8 = 50;
const THRESHOLD_MAX: u8 = 220;
const THRESHOLD_STEP: u8 = 10;

/// Centers closer than this across threshold levels are the same blob
const MERGE_DISTANCE: f64 = 10.0;

/// A blob center must be seen at this many threshold levels
const MIN_REPEATABILITY: usize = 2;

/// Circular-blob detector over dark regions
pub struct BlobDetector;

impl CandidateDetector for BlobDetector {
    fn name(&self) -> &'static str {
        "blob"
    }

    /// Three passes in fixed order: dark blobs on the enhanced frame,
    /// dark blobs on the inverted grayscale, light blobs on the
    /// enhanced frame (as dark blobs of its inverse)
    fn detect(&self, pre: &Preprocessed) -> Vec<PointI> {
        let params = BlobParams::default();
        let mut candidates = detect_dark_blobs(&pre.enhanced, &params);
        candidates.extend(detect_dark_blobs(&pre.inverted, &params));
        candidates.extend(detect_dark_blobs(&invert(&pre.enhanced), &params));
        candidates
    }
}

struct Track {
    sum_x: f64,
    sum_y: f64,
    hits: usize,
    last: PointI,
}

/// Sweep the threshold ladder and emit merged dark-blob centers
pub fn detect_dark_blobs(gray: &GrayImage, params: &BlobParams) -> Vec<PointI> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut t = THRESHOLD_MIN;
    while t <= THRESHOLD_MAX {
        for center in blob_centers_at(gray, t, params) {
            match tracks
                .iter_mut()
                .find(|track| center.distance(&track.last) < MERGE_DISTANCE)
            {
                Some(track) => {
                    track.sum_x += center.x as f64;
                    track.sum_y += center.y as f64;
                    track.hits += 1;
                    track.last = center;
                }
                None => tracks.push(Track {
                    sum_x: center.x as f64,
                    sum_y: center.y as f64,
                    hits: 1,
                    last: center,
                }),
            }
        }
        t = match t.checked_add(THRESHOLD_STEP) {
            Some(next) => next,
            None => break,
        };
    }

    tracks
        .into_iter()
        .filter(|track| track.hits >= MIN_REPEATABILITY)
        .map(|track| {
            PointI::new(
                (track.sum_x / track.hits as f64).round() as i32,
                (track.sum_y / track.hits as f64).round() as i32,
            )
        })
        .collect()
}

/// Centers of acceptable dark regions at one threshold level
fn blob_centers_at(gray: &GrayImage, threshold: u8, params: &BlobParams) -> Vec<PointI> {
    let width = gray.width();
    let height = gray.height();
    let mut mask = BitMatrix::new(width, height);
    let pixels = gray.as_slice();
    for y in 0..height {
        for x in 0..width {
            mask.set(x, y, pixels[y * width + x] < threshold);
        }
    }

    find_regions(&mask)
        .into_iter()
        .filter(|r| {
            r.area >= params.min_area
                && r.area <= params.max_area
                && r.circularity() >= params.min_circularity
                && r.convexity() >= params.min_convexity
                && r.inertia_ratio() >= params.min_inertia_ratio
        })
        .map(|r| r.center())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk_image(size: usize, cx: i32, cy: i32, r: i32, fg: u8, bg: u8) -> GrayImage {
        let mut img = GrayImage::filled(size, size, bg);
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy <= r * r {
                    img.set(x as usize, y as usize, fg);
                }
            }
        }
        img
    }

    #[test]
    fn finds_dark_disk_center() {
        let img = disk_image(100, 50, 50, 12, 20, 220);
        let centers = detect_dark_blobs(&img, &BlobParams::default());
        assert_eq!(centers.len(), 1);
        assert!(centers[0].distance(&PointI::new(50, 50)) <= 2.0);
    }

    #[test]
    fn area_gate_rejects_tiny_and_huge() {
        let tiny = disk_image(100, 50, 50, 4, 20, 220); // area ≈ 50 < 100
        assert!(detect_dark_blobs(&tiny, &BlobParams::default()).is_empty());
        let huge = disk_image(200, 100, 100, 60, 20, 220); // area ≈ 11k > 5000
        assert!(detect_dark_blobs(&huge, &BlobParams::default()).is_empty());
    }

    #[test]
    fn flat_image_yields_nothing() {
        let img = GrayImage::filled(80, 80, 128);
        assert!(detect_dark_blobs(&img, &BlobParams::default()).is_empty());
    }
}
