//! Calibration and group statistics
//!
//! Converts pixel distances into real-world inches and MOA. The
//! calibration is a value object threaded through each call; the
//! calculator holds no mutable state.

/// Pixel-to-inch calibration value object
pub mod calibration;
/// MOA group statistics
pub mod group;

pub use calibration::{Calibration, DEFAULT_PIXELS_PER_INCH, DEFAULT_TARGET_DISTANCE_YARDS};
pub use group::{GroupMetrics, MoaCalculator};
