//! Template matching against synthetic hole templates
//!
//! Builds two 20×20 templates (a dark disk on a white field and its
//! photographic negative) and slides both over the raw grayscale frame
//! with normalized cross-correlation. Every location scoring at least
//! the match threshold emits a candidate at the template center.

use rayon::prelude::*;

use crate::detector::{CandidateDetector, Preprocessed};
use crate::models::{GrayImage, PointI};

/// Template side length in pixels
const TEMPLATE_SIZE: usize = 20;
/// Disk radius inside the template
const DISK_RADIUS: i32 = (TEMPLATE_SIZE / 4) as i32;
/// Minimum normalized correlation score
const MATCH_THRESHOLD: f64 = 0.5;

/// Synthetic-template candidate detector
pub struct TemplateMatcher;

impl CandidateDetector for TemplateMatcher {
    fn name(&self) -> &'static str {
        "template"
    }

    /// Dark-hole template first, then its negative, each emitting
    /// matches in row-major order
    fn detect(&self, pre: &Preprocessed) -> Vec<PointI> {
        let dark = synthetic_template(true);
        let light = synthetic_template(false);
        let mut candidates = match_template(&pre.gray, &dark, MATCH_THRESHOLD);
        candidates.extend(match_template(&pre.gray, &light, MATCH_THRESHOLD));
        candidates
    }
}

/// Build a 20×20 hole template; `dark` selects a dark disk on a white
/// field, otherwise the photographic negative
pub fn synthetic_template(dark: bool) -> Vec<u8> {
    let (field, disk) = if dark { (255u8, 0u8) } else { (0u8, 255u8) };
    let center = (TEMPLATE_SIZE / 2) as i32;
    let mut template = vec![field; TEMPLATE_SIZE * TEMPLATE_SIZE];
    for y in 0..TEMPLATE_SIZE as i32 {
        for x in 0..TEMPLATE_SIZE as i32 {
            let dx = x - center;
            let dy = y - center;
            if dx * dx + dy * dy <= DISK_RADIUS * DISK_RADIUS {
                template[y as usize * TEMPLATE_SIZE + x as usize] = disk;
            }
        }
    }
    template
}

/// Normalized cross-correlation match. Returns the centers of all
/// locations scoring at least `threshold`, row-major.
pub fn match_template(gray: &GrayImage, template: &[u8], threshold: f64) -> Vec<PointI> {
    let width = gray.width();
    let height = gray.height();
    if width < TEMPLATE_SIZE || height < TEMPLATE_SIZE {
        return Vec::new();
    }

    let n = (TEMPLATE_SIZE * TEMPLATE_SIZE) as f64;
    let t_mean = template.iter().map(|&v| v as f64).sum::<f64>() / n;
    let t_centered: Vec<f64> = template.iter().map(|&v| v as f64 - t_mean).collect();
    let t_energy: f64 = t_centered.iter().map(|v| v * v).sum();
    if t_energy < 1e-9 {
        return Vec::new();
    }

    let pixels = gray.as_slice();
    let half = (TEMPLATE_SIZE / 2) as i32;
    let rows = height - TEMPLATE_SIZE + 1;
    let cols = width - TEMPLATE_SIZE + 1;

    // Rows are independent; collect per-row then flatten to keep
    // row-major emission order
    let per_row: Vec<Vec<PointI>> = (0..rows)
        .into_par_iter()
        .map(|ty| {
            let mut hits = Vec::new();
            for tx in 0..cols {
                let mut sum_i = 0.0f64;
                let mut sum_ii = 0.0f64;
                let mut sum_it = 0.0f64;
                for y in 0..TEMPLATE_SIZE {
                    let row = &pixels[(ty + y) * width + tx..(ty + y) * width + tx + TEMPLATE_SIZE];
                    let trow = &t_centered[y * TEMPLATE_SIZE..(y + 1) * TEMPLATE_SIZE];
                    for x in 0..TEMPLATE_SIZE {
                        let v = row[x] as f64;
                        sum_i += v;
                        sum_ii += v * v;
                        sum_it += v * trow[x];
                    }
                }
                // ΣT' = 0, so the numerator reduces to Σ I·T'
                let i_energy = sum_ii - sum_i * sum_i / n;
                if i_energy < 1e-9 {
                    continue;
                }
                let score = sum_it / (t_energy * i_energy).sqrt();
                if score >= threshold {
                    hits.push(PointI::new(tx as i32 + half, ty as i32 + half));
                }
            }
            hits
        })
        .collect();

    per_row.into_iter().flatten().collect()
}
