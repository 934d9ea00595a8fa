use serde::{Deserialize, Serialize};

use crate::metrics::Calibration;
use crate::models::Shot;

/// MOA ≈ 1.047 inch at 100 yards; 95.5 is the inverse-scaled factor
/// applied to inches-per-yard ratios throughout the original tooling
const MOA_FACTOR: f64 = 95.5;

/// Derived statistics for one shot group
///
/// Always recomputable from shot set + calibration; never a source of
/// truth. Defined as all-zero when the group has fewer than 2 shots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    /// Number of shots in the group
    pub shot_count: usize,
    /// Largest pairwise spread, in MOA
    pub extreme_spread_moa: f64,
    /// Largest centroid-to-shot distance, in MOA
    pub center_to_center_moa: f64,
    /// Arithmetic mean of shot coordinates, pixels
    pub group_center: [f64; 2],
    /// Largest pairwise spread, in inches
    pub group_size_inches: f64,
}

/// Computes group metrics under one calibration
///
/// Construct a fresh calculator per calibration override instead of
/// mutating a shared one; concurrent requests must not interfere.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoaCalculator {
    calibration: Calibration,
}

impl MoaCalculator {
    /// Calculator over the given calibration
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }

    /// Extreme spread of the group in MOA: the maximum pairwise pixel
    /// distance converted through the calibration. Zero under 2 shots.
    pub fn extreme_spread_moa(&self, shots: &[Shot]) -> f64 {
        if shots.len() < 2 {
            return 0.0;
        }
        round2(self.to_moa(max_pairwise_distance(shots)))
    }

    /// Center-to-center MOA: the maximum distance from the group
    /// centroid to any shot, converted. Zero under 2 shots.
    pub fn center_to_center_moa(&self, shots: &[Shot]) -> f64 {
        if shots.len() < 2 {
            return 0.0;
        }
        let (cx, cy) = centroid(shots);
        let max_from_center = shots
            .iter()
            .map(|s| ((s.x as f64 - cx).powi(2) + (s.y as f64 - cy).powi(2)).sqrt())
            .fold(0.0f64, f64::max);
        round2(self.to_moa(max_from_center))
    }

    /// Bundle of all group statistics
    pub fn group_statistics(&self, shots: &[Shot]) -> GroupMetrics {
        if shots.len() < 2 {
            return GroupMetrics {
                shot_count: shots.len(),
                extreme_spread_moa: 0.0,
                center_to_center_moa: 0.0,
                group_center: [0.0, 0.0],
                group_size_inches: 0.0,
            };
        }
        let (cx, cy) = centroid(shots);
        let spread_px = max_pairwise_distance(shots);
        GroupMetrics {
            shot_count: shots.len(),
            extreme_spread_moa: self.extreme_spread_moa(shots),
            center_to_center_moa: self.center_to_center_moa(shots),
            group_center: [cx, cy],
            group_size_inches: round2(spread_px / self.calibration.pixels_per_inch),
        }
    }

    /// Convert a pixel distance to MOA under this calibration
    fn to_moa(&self, distance_px: f64) -> f64 {
        let inches = distance_px / self.calibration.pixels_per_inch;
        inches / self.calibration.target_distance_yards * MOA_FACTOR
    }
}

fn centroid(shots: &[Shot]) -> (f64, f64) {
    let n = shots.len() as f64;
    let sum_x: f64 = shots.iter().map(|s| s.x as f64).sum();
    let sum_y: f64 = shots.iter().map(|s| s.y as f64).sum();
    (sum_x / n, sum_y / n)
}

fn max_pairwise_distance(shots: &[Shot]) -> f64 {
    let mut max = 0.0f64;
    for i in 0..shots.len() {
        for j in i + 1..shots.len() {
            max = max.max(shots[i].distance(&shots[j]));
        }
    }
    max
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn two_inch_group_at_default_calibration() {
        // shots 200 px apart at 100 px/inch and 100 yards
        let shots = [Shot::at(0, 0), Shot::at(200, 0)];
        let calc = MoaCalculator::default();
        assert_relative_eq!(calc.extreme_spread_moa(&shots), 1.91);
        let stats = calc.group_statistics(&shots);
        assert_relative_eq!(stats.group_size_inches, 2.0);
        assert_relative_eq!(stats.group_center[0], 100.0);
        assert_relative_eq!(stats.group_center[1], 0.0);
        // each shot is 100 px from the centroid: 1 inch → 0.96 MOA
        assert_relative_eq!(stats.center_to_center_moa, 0.96);
    }

    #[test]
    fn fewer_than_two_shots_is_all_zero() {
        let calc = MoaCalculator::default();
        for shots in [vec![], vec![Shot::at(123, 456)]] {
            let stats = calc.group_statistics(&shots);
            assert_eq!(stats.shot_count, shots.len());
            assert_eq!(stats.extreme_spread_moa, 0.0);
            assert_eq!(stats.center_to_center_moa, 0.0);
            assert_eq!(stats.group_center, [0.0, 0.0]);
            assert_eq!(stats.group_size_inches, 0.0);
        }
    }

    #[test]
    fn radius_is_irrelevant_to_metrics() {
        let calc = MoaCalculator::default();
        let a = [Shot::new(0, 0, 10), Shot::new(200, 0, 10)];
        let b = [Shot::new(0, 0, 3), Shot::new(200, 0, 25)];
        assert_eq!(calc.group_statistics(&a), calc.group_statistics(&b));
    }

    #[test]
    fn recomputation_is_pure() {
        let shots = [Shot::at(10, 20), Shot::at(310, 40), Shot::at(150, 260)];
        let calc = MoaCalculator::default();
        assert_eq!(calc.group_statistics(&shots), calc.group_statistics(&shots));
    }

    #[test]
    fn tighter_calibration_scales_moa() {
        let shots = [Shot::at(0, 0), Shot::at(200, 0)];
        let cal = Calibration {
            pixels_per_inch: 200.0,
            ..Calibration::default()
        };
        let calc = MoaCalculator::new(cal);
        // 1 inch at 100 yards
        assert_relative_eq!(calc.extreme_spread_moa(&shots), 0.96);
    }

    #[test]
    fn extreme_spread_uses_farthest_pair() {
        let shots = [
            Shot::at(0, 0),
            Shot::at(100, 0),
            Shot::at(0, 300),
        ];
        let calc = MoaCalculator::default();
        let stats = calc.group_statistics(&shots);
        assert_relative_eq!(stats.group_size_inches, 3.16); // √(100² + 300²)/100
    }
}
