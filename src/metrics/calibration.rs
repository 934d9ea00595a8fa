use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Point;

/// Default scale assumption when no calibration was performed
pub const DEFAULT_PIXELS_PER_INCH: f64 = 100.0;
/// Default shooter-to-target distance assumption
pub const DEFAULT_TARGET_DISTANCE_YARDS: f64 = 100.0;

/// Pixel-to-real-world scale, as a value object
///
/// A calibration is derived once from two reference points of known
/// real-world separation and then threaded read-only through metric
/// and annotation calls; recalibrating builds a new value rather than
/// mutating this one. `target_distance_yards` is not derivable from
/// the reference points — it is a separate caller-supplied assumption
/// about how far the shooter stood.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// First reference point, pixels
    pub point1: Point,
    /// Second reference point, pixels
    pub point2: Point,
    /// Declared real-world distance between the reference points
    pub distance_inches: f64,
    /// Derived scale factor
    pub pixels_per_inch: f64,
    /// Distance the group was shot at
    pub target_distance_yards: f64,
}

impl Calibration {
    /// Derive a calibration from two reference points a known number
    /// of inches apart. Fails with `DegenerateCalibration` when the
    /// points coincide.
    pub fn from_reference_points(point1: Point, point2: Point, distance_inches: f64) -> Result<Self> {
        let pixel_distance = point1.distance(&point2) as f64;
        if pixel_distance == 0.0 {
            return Err(Error::DegenerateCalibration);
        }
        Ok(Self {
            point1,
            point2,
            distance_inches,
            pixels_per_inch: pixel_distance / distance_inches,
            target_distance_yards: DEFAULT_TARGET_DISTANCE_YARDS,
        })
    }

    /// Replace the target-distance assumption
    pub fn with_target_distance(mut self, yards: f64) -> Self {
        self.target_distance_yards = yards;
        self
    }
}

impl Default for Calibration {
    /// Uncalibrated state: 100 px/inch at 100 yards
    fn default() -> Self {
        Self {
            point1: Point::default(),
            point2: Point::new(DEFAULT_PIXELS_PER_INCH as f32, 0.0),
            distance_inches: 1.0,
            pixels_per_inch: DEFAULT_PIXELS_PER_INCH,
            target_distance_yards: DEFAULT_TARGET_DISTANCE_YARDS,
        }
    }
}
