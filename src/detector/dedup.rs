//! Minimum-separation deduplication
//!
//! Walks validated candidates in aggregation order and keeps each one
//! only if it is at least the minimum separation away from everything
//! already kept. First occurrence wins, which makes the canonical
//! detector order the tie-break between detectors that agree on a
//! hole.

use crate::models::{MIN_SHOT_SEPARATION, PointI};

/// Collapse candidates closer than `min_distance` pixels, first wins.
///
/// Postcondition: every pair in the output is at least `min_distance`
/// apart.
pub fn filter_close_candidates(candidates: &[PointI], min_distance: f64) -> Vec<PointI> {
    let mut kept: Vec<PointI> = Vec::new();
    for candidate in candidates {
        let too_close = kept
            .iter()
            .any(|existing| candidate.distance(existing) < min_distance);
        if !too_close {
            kept.push(*candidate);
        }
    }
    kept
}

/// [`filter_close_candidates`] at the standard shot separation
pub fn dedup_shots(candidates: &[PointI]) -> Vec<PointI> {
    filter_close_candidates(candidates, MIN_SHOT_SEPARATION)
}
