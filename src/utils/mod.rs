//! Utility functions for image processing
//!
//! This module provides the building blocks the detectors sit on:
//! - Grayscale conversion (RGB to luminance)
//! - Preprocessing filters (Gaussian blur, contrast, inversion)
//! - Adaptive thresholding and binary morphology
//! - Drawing primitives for the annotator

pub mod draw;
pub mod filter;
pub mod grayscale;
pub mod threshold;
