//! Adaptive thresholding and binary morphology
//!
//! Produces `BitMatrix` masks (true = foreground) for the contour
//! detector: Gaussian-weighted adaptive threshold in inverse-binary
//! mode, followed by 3×3 close/open passes to knit holes together and
//! drop speckle.

use crate::models::{BitMatrix, GrayImage};
use crate::utils::filter::gaussian_blur;

/// Gaussian adaptive threshold, inverse binary: a pixel is foreground
/// when it is darker than its Gaussian-weighted neighborhood mean
/// minus `c`.
pub fn adaptive_threshold(src: &GrayImage, block_size: usize, c: f64) -> BitMatrix {
    debug_assert!(block_size % 2 == 1);
    let local_mean = gaussian_blur(src, block_size);
    let width = src.width();
    let height = src.height();
    let mut mask = BitMatrix::new(width, height);

    let pixels = src.as_slice();
    let means = local_mean.as_slice();
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let threshold = means[idx] as f64 - c;
            mask.set(x, y, (pixels[idx] as f64) <= threshold);
        }
    }
    mask
}

/// 3×3 dilation: a pixel becomes foreground if any neighbor is
pub fn dilate3(mask: &BitMatrix) -> BitMatrix {
    let width = mask.width();
    let height = mask.height();
    let mut out = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut hit = false;
            'scan: for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx >= 0 && ny >= 0 && mask.get(nx as usize, ny as usize) {
                        hit = true;
                        break 'scan;
                    }
                }
            }
            out.set(x, y, hit);
        }
    }
    out
}

/// 3×3 erosion: a pixel stays foreground only if all neighbors are.
/// Pixels outside the image count as background, so foreground touching
/// the border erodes.
pub fn erode3(mask: &BitMatrix) -> BitMatrix {
    let width = mask.width();
    let height = mask.height();
    let mut out = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut all = true;
            'scan: for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx < 0 || ny < 0 || !mask.get(nx as usize, ny as usize) {
                        all = false;
                        break 'scan;
                    }
                }
            }
            out.set(x, y, all);
        }
    }
    out
}

/// Morphological close (dilate then erode)
pub fn close3(mask: &BitMatrix) -> BitMatrix {
    erode3(&dilate3(mask))
}

/// Morphological open (erode then dilate)
pub fn open3(mask: &BitMatrix) -> BitMatrix {
    dilate3(&erode3(mask))
}

/// Fill enclosed background pockets so each region becomes its outer
/// (external) contour's filled shape. Background pixels are kept only
/// when 4-connected to the image border.
pub fn fill_holes(mask: &BitMatrix) -> BitMatrix {
    let width = mask.width();
    let height = mask.height();
    let mut outside = vec![false; width * height];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for x in 0..width {
        stack.push((x, 0));
        stack.push((x, height - 1));
    }
    for y in 0..height {
        stack.push((0, y));
        stack.push((width - 1, y));
    }

    while let Some((x, y)) = stack.pop() {
        let idx = y * width + x;
        if outside[idx] || mask.get(x, y) {
            continue;
        }
        outside[idx] = true;
        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < width {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < height {
            stack.push((x, y + 1));
        }
    }

    let mut filled = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            filled.set(x, y, !outside[y * width + x]);
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_threshold_marks_small_dark_spot() {
        let mut img = GrayImage::filled(40, 40, 200);
        for y in 19..22 {
            for x in 19..22 {
                img.set(x, y, 30);
            }
        }
        let mask = adaptive_threshold(&img, 11, 2.0);
        assert!(mask.get(20, 20));
        assert!(!mask.get(2, 2));
    }

    #[test]
    fn adaptive_threshold_marks_only_the_rim_of_a_large_patch() {
        // deep inside a wide uniform patch the local mean equals the
        // patch value, so only pixels near the intensity step trip the
        // threshold; fill_holes recovers the interior downstream
        let mut img = GrayImage::filled(60, 60, 200);
        for y in 20..40 {
            for x in 20..40 {
                img.set(x, y, 30);
            }
        }
        let mask = adaptive_threshold(&img, 11, 2.0);
        assert!(mask.get(20, 30));
        assert!(!mask.get(30, 30));
        assert!(fill_holes(&mask).get(30, 30));
    }

    #[test]
    fn flat_image_yields_empty_mask() {
        // local mean equals the pixel everywhere, so v <= mean - c never holds
        let img = GrayImage::filled(20, 20, 128);
        let mask = adaptive_threshold(&img, 11, 2.0);
        assert_eq!(mask.fill_count(), 0);
    }

    #[test]
    fn open_removes_single_pixel_speckle() {
        let mut mask = BitMatrix::new(20, 20);
        mask.set(10, 10, true);
        assert_eq!(open3(&mask).fill_count(), 0);
    }

    #[test]
    fn fill_holes_closes_an_annulus() {
        let mut mask = BitMatrix::new(30, 30);
        for y in 0..30i32 {
            for x in 0..30i32 {
                let d2 = (x - 15) * (x - 15) + (y - 15) * (y - 15);
                if (36..=100).contains(&d2) {
                    mask.set(x as usize, y as usize, true);
                }
            }
        }
        let filled = fill_holes(&mask);
        assert!(filled.get(15, 15));
        assert!(!filled.get(1, 1));
    }

    #[test]
    fn close_fills_one_pixel_gap() {
        let mut mask = BitMatrix::new(20, 20);
        for y in 5..15 {
            for x in 5..15 {
                mask.set(x, y, true);
            }
        }
        mask.set(10, 10, false);
        assert!(close3(&mask).get(10, 10));
    }
}
