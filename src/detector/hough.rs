//! Gradient-based Hough circle transform
//!
//! Edge pixels of the heavily blurred frame vote along their gradient
//! direction for candidate circle centers across the expected hole
//! radius range. Vote peaks become centers; each center's radius is
//! re-estimated from edge-pixel distances and re-checked against the
//! allowed range.

use crate::detector::{CandidateDetector, Preprocessed};
use crate::models::{GrayImage, PointI};

/// Voting and acceptance parameters for the circle transform
#[derive(Debug, Clone, Copy)]
pub struct HoughParams {
    /// Minimum separation between accepted centers, px
    pub min_dist: f64,
    /// Sobel gradient magnitude required for a pixel to vote
    pub edge_threshold: f64,
    /// Votes required for a cell to become a center
    pub accumulator_threshold: u32,
    /// Smallest acceptable circle radius, px
    pub min_radius: i32,
    /// Largest acceptable circle radius, px
    pub max_radius: i32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            min_dist: 50.0,
            edge_threshold: 60.0,
            accumulator_threshold: 40,
            min_radius: 8,
            max_radius: 40,
        }
    }
}

struct Edge {
    x: i32,
    y: i32,
    dx: f64,
    dy: f64,
}

/// Circle-center candidate detector
pub struct HoughCircleDetector;

impl CandidateDetector for HoughCircleDetector {
    fn name(&self) -> &'static str {
        "hough"
    }

    fn detect(&self, pre: &Preprocessed) -> Vec<PointI> {
        hough_circles(&pre.blur9, &HoughParams::default())
    }
}

/// Run the circle transform and return accepted centers in vote order
pub fn hough_circles(gray: &GrayImage, params: &HoughParams) -> Vec<PointI> {
    let width = gray.width();
    let height = gray.height();
    if width < 3 || height < 3 {
        return Vec::new();
    }

    let edges = sobel_edges(gray, params.edge_threshold);
    if edges.is_empty() {
        return Vec::new();
    }

    // Each edge votes along ±gradient for every radius in range
    let mut acc = vec![0u32; width * height];
    for edge in &edges {
        for sign in [-1.0f64, 1.0] {
            for r in params.min_radius..=params.max_radius {
                let cx = (edge.x as f64 + sign * r as f64 * edge.dx).round() as i32;
                let cy = (edge.y as f64 + sign * r as f64 * edge.dy).round() as i32;
                if cx >= 0 && cy >= 0 && (cx as usize) < width && (cy as usize) < height {
                    acc[cy as usize * width + cx as usize] += 1;
                }
            }
        }
    }

    // Local maxima above the accumulator threshold, strongest first
    let mut peaks: Vec<(u32, usize)> = Vec::new();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let votes = acc[y * width + x];
            if votes < params.accumulator_threshold {
                continue;
            }
            let mut is_max = true;
            'nbr: for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let n = acc[(y as i32 + dy) as usize * width + (x as i32 + dx) as usize];
                    if n > votes {
                        is_max = false;
                        break 'nbr;
                    }
                }
            }
            if is_max {
                peaks.push((votes, y * width + x));
            }
        }
    }
    peaks.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut centers: Vec<PointI> = Vec::new();
    for (_, idx) in peaks {
        let center = PointI::new((idx % width) as i32, (idx / width) as i32);
        if centers.iter().any(|c| c.distance(&center) < params.min_dist) {
            continue;
        }
        let radius = estimate_radius(&edges, &center, params);
        // second filter: modal radius must still be hole-sized
        if (params.min_radius..=params.max_radius).contains(&radius) {
            centers.push(center);
        }
    }
    centers
}

/// Edge pixels with normalized gradient direction
fn sobel_edges(gray: &GrayImage, threshold: f64) -> Vec<Edge> {
    let width = gray.width();
    let height = gray.height();
    let p = gray.as_slice();
    let at = |x: usize, y: usize| p[y * width + x] as f64;

    let mut edges = Vec::new();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let gx = at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1)
                - at(x - 1, y - 1)
                - 2.0 * at(x - 1, y)
                - at(x - 1, y + 1);
            let gy = at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1)
                - at(x - 1, y - 1)
                - 2.0 * at(x, y - 1)
                - at(x + 1, y - 1);
            let mag = (gx * gx + gy * gy).sqrt();
            if mag >= threshold {
                edges.push(Edge {
                    x: x as i32,
                    y: y as i32,
                    dx: gx / mag,
                    dy: gy / mag,
                });
            }
        }
    }
    edges
}

/// Modal distance from supporting edge pixels to the center
fn estimate_radius(edges: &[Edge], center: &PointI, params: &HoughParams) -> i32 {
    let mut histogram = vec![0u32; (params.max_radius + 1) as usize];
    for edge in edges {
        let dx = (edge.x - center.x) as f64;
        let dy = (edge.y - center.y) as f64;
        let r = (dx * dx + dy * dy).sqrt().round() as i32;
        if (params.min_radius..=params.max_radius).contains(&r) {
            histogram[r as usize] += 1;
        }
    }
    let mut best_r = 0;
    let mut best_count = 0;
    for r in params.min_radius..=params.max_radius {
        let count = histogram[r as usize];
        if count > best_count {
            best_count = count;
            best_r = r;
        }
    }
    best_r
}
