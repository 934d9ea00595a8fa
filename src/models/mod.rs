/// Owned grayscale and RGB image buffers
pub mod image;
/// Packed binary pixel mask
pub mod matrix;
/// Float and integer 2D points
pub mod point;
/// The shot record and its separation constants
pub mod shot;

pub use image::{ColorImage, GrayImage};
pub use matrix::BitMatrix;
pub use point::{Point, PointI};
pub use shot::{DEFAULT_SHOT_RADIUS, MIN_SHOT_SEPARATION, Shot};
