//! Shared helpers for the CLI, benches and integration tests

use std::path::Path;

use image::GenericImageView;

use crate::models::ColorImage;

/// Load an image file as RGB bytes along with its dimensions
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(path)?;
    let (width, height) = img.dimensions();
    let rgb = img.to_rgb8().into_raw();
    Ok((rgb, width as usize, height as usize))
}

/// Encode an annotated frame to an image file, format from extension
pub fn save_rgb<P: AsRef<Path>>(image: &ColorImage, path: P) -> Result<(), image::ImageError> {
    image::save_buffer(
        path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ColorType::Rgb8,
    )
}

/// Paper and hole intensities used by the synthetic target
const PAPER: u8 = 210;
const HOLE: u8 = 25;

/// Render a synthetic target: light paper with dark circular holes.
/// Returns raw RGB bytes. Used wherever a deterministic fixture beats
/// a committed photograph.
pub fn synthetic_target(width: usize, height: usize, holes: &[(i32, i32, i32)]) -> Vec<u8> {
    let mut rgb = vec![PAPER; width * height * 3];
    for &(cx, cy, r) in holes {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let x = cx + dx;
                let y = cy + dy;
                if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
                    continue;
                }
                let i = (y as usize * width + x as usize) * 3;
                rgb[i] = HOLE;
                rgb[i + 1] = HOLE;
                rgb[i + 2] = HOLE;
            }
        }
    }
    rgb
}
