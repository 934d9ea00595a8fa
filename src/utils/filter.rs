//! Pixel-level preprocessing filters
//!
//! Pure transforms over grayscale buffers: separable Gaussian blur,
//! linear contrast enhancement and intensity inversion. Each detector
//! consumes exactly one of these variants.

use crate::models::GrayImage;

/// Sigma for a Gaussian kernel of the given (odd) size,
/// 0.3·((k−1)·0.5 − 1) + 0.8, the usual default-sigma rule.
fn sigma_for_ksize(ksize: usize) -> f64 {
    0.3 * ((ksize - 1) as f64 * 0.5 - 1.0) + 0.8
}

fn gaussian_kernel(ksize: usize) -> Vec<f64> {
    let sigma = sigma_for_ksize(ksize);
    let center = (ksize / 2) as f64;
    let mut kernel: Vec<f64> = (0..ksize)
        .map(|i| {
            let d = i as f64 - center;
            (-d * d / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Gaussian blur with a square kernel of odd size `ksize`, replicated
/// borders. Implemented as two separable passes.
pub fn gaussian_blur(src: &GrayImage, ksize: usize) -> GrayImage {
    debug_assert!(ksize % 2 == 1);
    let width = src.width();
    let height = src.height();
    let kernel = gaussian_kernel(ksize);
    let half = (ksize / 2) as i32;
    let data = src.as_slice();

    // Horizontal pass
    let mut tmp = vec![0f64; width * height];
    for y in 0..height {
        let row = &data[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let sx = (x as i32 + k as i32 - half).clamp(0, width as i32 - 1) as usize;
                acc += w * row[sx] as f64;
            }
            tmp[y * width + x] = acc;
        }
    }

    // Vertical pass
    let mut out = GrayImage::filled(width, height, 0);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let sy = (y as i32 + k as i32 - half).clamp(0, height as i32 - 1) as usize;
                acc += w * tmp[sy * width + x];
            }
            out.set(x, y, acc.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

/// Linear contrast enhancement: v' = saturate(alpha * v)
pub fn enhance_contrast(src: &GrayImage, alpha: f32) -> GrayImage {
    let scaled: Vec<u8> = src
        .as_slice()
        .iter()
        .map(|&v| (v as f32 * alpha).round().clamp(0.0, 255.0) as u8)
        .collect();
    GrayImage::from_raw(scaled, src.width(), src.height()).unwrap_or_else(|_| src.clone())
}

/// Intensity inversion: v' = 255 - v
pub fn invert(src: &GrayImage) -> GrayImage {
    let inverted: Vec<u8> = src.as_slice().iter().map(|&v| 255 - v).collect();
    GrayImage::from_raw(inverted, src.width(), src.height()).unwrap_or_else(|_| src.clone())
}
