use serde::{Deserialize, Serialize};

use crate::models::PointI;

/// Radius assigned to a shot when none was explicitly measured, in pixels
pub const DEFAULT_SHOT_RADIUS: i32 = 10;

/// Minimum pixel separation between any two shots in a deduplicated
/// shot set. Candidates closer than this collapse into one.
pub const MIN_SHOT_SEPARATION: f64 = 50.0;

/// A validated, deduplicated bullet-hole detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    /// Center X pixel coordinate
    pub x: i32,
    /// Center Y pixel coordinate
    pub y: i32,
    /// Hole radius in pixels
    pub radius: i32,
}

impl Shot {
    /// Create a shot with an explicit radius
    pub fn new(x: i32, y: i32, radius: i32) -> Self {
        Self { x, y, radius }
    }

    /// Create a shot with the default radius
    pub fn at(x: i32, y: i32) -> Self {
        Self::new(x, y, DEFAULT_SHOT_RADIUS)
    }

    /// Center as a pixel coordinate
    pub fn center(&self) -> PointI {
        PointI::new(self.x, self.y)
    }

    /// Euclidean distance between shot centers
    pub fn distance(&self, other: &Shot) -> f64 {
        self.center().distance(&other.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_radius_applied() {
        assert_eq!(Shot::at(5, 7).radius, DEFAULT_SHOT_RADIUS);
    }

    #[test]
    fn serde_roundtrip() {
        let shot = Shot::new(120, 340, 12);
        let json = serde_json::to_string(&shot).unwrap();
        let back: Shot = serde_json::from_str(&json).unwrap();
        assert_eq!(shot, back);
    }
}
