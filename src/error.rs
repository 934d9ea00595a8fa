use thiserror::Error;

/// Closed set of failures the engine surfaces to callers.
///
/// A detector finding nothing is not an error: it simply contributes
/// zero candidates and the pipeline proceeds with the rest.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The buffer cannot be interpreted as a raster image
    /// (zero dimension or length inconsistent with width × height × channels).
    #[error("invalid image buffer")]
    InvalidImage,
    /// The two calibration reference points coincide.
    #[error("calibration points coincide")]
    DegenerateCalibration,
    /// A shot row has a column count other than 2 or 3, or a negative
    /// coordinate or radius.
    #[error("malformed shot array")]
    MalformedShotArray,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
