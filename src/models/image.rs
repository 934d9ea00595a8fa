use crate::error::{Error, Result};

/// Owned 8-bit grayscale image
///
/// Detection operates on these; the working buffers produced by the
/// preprocessor are all `GrayImage`s over the same dimensions.
#[derive(Debug, Clone)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImage {
    /// Wrap an existing luminance buffer; fails if dimensions are zero
    /// or the buffer length does not match width × height.
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width * height {
            return Err(Error::InvalidImage);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a uniform image of the given intensity
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Intensity at (x, y); panics out of bounds (hot paths index the
    /// raw slice directly)
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Set intensity at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }

    /// Raw row-major luminance bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mean intensity over the axis-aligned window
    /// [x0, x1) × [y0, y1), clipped to the image. Returns 0.0 for an
    /// empty window.
    pub fn window_mean(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return 0.0;
        }
        let mut sum = 0u64;
        for y in y0..y1 {
            let row = &self.data[y * self.width + x0..y * self.width + x1];
            sum += row.iter().map(|&p| p as u64).sum::<u64>();
        }
        sum as f64 / ((x1 - x0) * (y1 - y0)) as f64
    }
}

/// Owned RGB image, 3 bytes per pixel
///
/// Only the annotator writes to one of these; detection never touches
/// color data after grayscale conversion.
#[derive(Debug, Clone)]
pub struct ColorImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ColorImage {
    /// Wrap an existing RGB buffer; fails if dimensions are zero or
    /// the buffer length does not match width × height × 3.
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width * height * 3 {
            return Err(Error::InvalidImage);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a uniform image of the given color
    pub fn filled(width: usize, height: usize, color: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at (x, y)
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Write a pixel, ignoring out-of-bounds coordinates so drawing
    /// code can clip implicitly
    pub fn put(&mut self, x: i32, y: i32, color: [u8; 3]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 3;
        self.data[i..i + 3].copy_from_slice(&color);
    }

    /// Raw row-major RGB bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw RGB bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
