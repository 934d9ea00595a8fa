//! Shot-hole candidate detection
//!
//! Four independent strategies propose candidate centers, each reading
//! its own preprocessed variant of the same frame:
//! - Blob detection (threshold-sweep connected components)
//! - Contour analysis (adaptive threshold + morphology)
//! - Hough circle transform (gradient voting)
//! - Template matching (synthetic hole templates)
//!
//! Their outputs are concatenated in a fixed canonical order, then
//! cross-validated against local contrast and deduplicated. The
//! canonical order matters: deduplication is first-wins, so it decides
//! which detector's hit survives when several agree.

pub mod blob;
pub mod components;
pub mod contour;
pub mod dedup;
pub mod hough;
pub mod template;
pub mod validate;

use log::debug;

use crate::models::{GrayImage, PointI};
use crate::utils::filter::{enhance_contrast, gaussian_blur, invert};

pub use blob::BlobDetector;
pub use contour::ContourDetector;
pub use dedup::filter_close_candidates;
pub use hough::HoughCircleDetector;
pub use template::TemplateMatcher;
pub use validate::HoleValidator;

/// Preprocessed variants of one input frame
///
/// Built once per detection call; detectors only read from it, so it
/// can be shared freely across worker threads.
pub struct Preprocessed {
    /// Raw grayscale frame
    pub gray: GrayImage,
    /// Contrast-enhanced (×1.5) variant for blob work
    pub enhanced: GrayImage,
    /// Intensity-inverted grayscale for dark-background passes
    pub inverted: GrayImage,
    /// 5×5 Gaussian blur for contour work
    pub blur5: GrayImage,
    /// 9×9 Gaussian blur for circle work
    pub blur9: GrayImage,
}

impl Preprocessed {
    /// Derive all working variants from a grayscale frame
    pub fn from_gray(gray: GrayImage) -> Self {
        let enhanced = enhance_contrast(&gray, 1.5);
        let inverted = invert(&gray);
        let blur5 = gaussian_blur(&gray, 5);
        let blur9 = gaussian_blur(&gray, 9);
        Self {
            gray,
            enhanced,
            inverted,
            blur5,
            blur9,
        }
    }
}

/// One candidate-proposing strategy
pub trait CandidateDetector: Sync {
    /// Short name used in stage logging
    fn name(&self) -> &'static str;
    /// Propose candidate centers for the frame
    fn detect(&self, pre: &Preprocessed) -> Vec<PointI>;
}

/// Run all four detectors and concatenate their candidates in the
/// canonical order Blob → Contour → Hough → Template.
///
/// The detectors are mutually independent and run on rayon workers;
/// each appends to its own list and concatenation happens only after
/// all four complete, so the downstream first-wins dedup is
/// deterministic regardless of thread completion order.
pub fn detect_candidates(pre: &Preprocessed) -> Vec<PointI> {
    let ((blob, contour), (hough, template)) = rayon::join(
        || {
            rayon::join(
                || BlobDetector.detect(pre),
                || ContourDetector.detect(pre),
            )
        },
        || {
            rayon::join(
                || HoughCircleDetector.detect(pre),
                || TemplateMatcher.detect(pre),
            )
        },
    );

    debug!(
        "candidates: blob={} contour={} hough={} template={}",
        blob.len(),
        contour.len(),
        hough.len(),
        template.len()
    );

    let mut all = blob;
    all.extend(contour);
    all.extend(hough);
    all.extend(template);
    all
}

/// Sequential variant of [`detect_candidates`], same canonical order.
/// Used to verify that parallel aggregation is order-stable.
pub fn detect_candidates_sequential(pre: &Preprocessed) -> Vec<PointI> {
    let detectors: [&dyn CandidateDetector; 4] = [
        &BlobDetector,
        &ContourDetector,
        &HoughCircleDetector,
        &TemplateMatcher,
    ];
    let mut all = Vec::new();
    for det in detectors {
        let found = det.detect(pre);
        debug!("{}: {} candidates", det.name(), found.len());
        all.extend(found);
    }
    all
}
