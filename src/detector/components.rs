//! Connected-component extraction with shape statistics
//!
//! Labels foreground regions of a `BitMatrix` with a union-find pass
//! and accumulates the per-region statistics the blob and contour
//! filters gate on: area, boundary-pixel perimeter, centroid, central
//! second moments and the boundary point set for convex-hull work.

use crate::models::{BitMatrix, PointI};

/// Union-Find over pixel labels
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
        }
    }

    fn find(&mut self, x: u32) -> u32 {
        if self.parent[x as usize] != x {
            self.parent[x as usize] = self.find(self.parent[x as usize]);
        }
        self.parent[x as usize]
    }

    fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            self.parent[root_x as usize] = root_y;
        }
    }
}

/// A labelled foreground region and its shape statistics
#[derive(Debug, Clone)]
pub struct Region {
    /// Pixel count
    pub area: usize,
    /// Count of foreground pixels with at least one 4-neighbor outside
    /// the region mask (image border counts as outside)
    pub perimeter: usize,
    /// Centroid (first moments)
    pub cx: f64,
    /// Centroid Y
    pub cy: f64,
    /// Central second moment ⟨x²⟩ − cx²
    pub mxx: f64,
    /// Central second moment ⟨y²⟩ − cy²
    pub myy: f64,
    /// Central second moment ⟨xy⟩ − cx·cy
    pub mxy: f64,
    /// Boundary pixel coordinates, row-major encounter order
    pub boundary: Vec<PointI>,
}

impl Region {
    /// Circularity 4πA/P²; zero perimeter yields 0.0 so the caller's
    /// threshold rejects it
    pub fn circularity(&self) -> f64 {
        if self.perimeter == 0 {
            return 0.0;
        }
        let p = self.perimeter as f64;
        4.0 * std::f64::consts::PI * self.area as f64 / (p * p)
    }

    /// Ratio of minor to major second-moment eigenvalue, in [0, 1].
    /// Degenerate (near-zero spread) regions report 1.0.
    pub fn inertia_ratio(&self) -> f64 {
        let trace = self.mxx + self.myy;
        let det = ((self.mxx - self.myy).powi(2) + 4.0 * self.mxy * self.mxy).sqrt();
        let lambda_max = (trace + det) * 0.5;
        let lambda_min = (trace - det) * 0.5;
        if lambda_max < 1e-9 {
            return 1.0;
        }
        (lambda_min / lambda_max).max(0.0)
    }

    /// Ratio of region area to its convex hull area
    pub fn convexity(&self) -> f64 {
        let hull = convex_hull_area(&self.boundary);
        if hull < 1.0 {
            return 1.0;
        }
        self.area as f64 / hull
    }

    /// Centroid rounded to pixel coordinates
    pub fn center(&self) -> PointI {
        PointI::new(self.cx.round() as i32, self.cy.round() as i32)
    }
}

struct Accum {
    area: usize,
    perimeter: usize,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_yy: f64,
    sum_xy: f64,
    boundary: Vec<PointI>,
}

impl Accum {
    fn new() -> Self {
        Self {
            area: 0,
            perimeter: 0,
            sum_x: 0.0,
            sum_y: 0.0,
            sum_xx: 0.0,
            sum_yy: 0.0,
            sum_xy: 0.0,
            boundary: Vec::new(),
        }
    }
}

/// Extract all foreground regions with statistics, in row-major
/// first-pixel encounter order (detection determinism depends on this)
pub fn find_regions(mask: &BitMatrix) -> Vec<Region> {
    let width = mask.width();
    let height = mask.height();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut labels = vec![0u32; width * height];
    let mut next_label = 1u32;
    let mut uf = UnionFind::new(width * height + 1);

    // First pass: provisional labels, merging across left/upper neighbors
    for y in 0..height {
        for x in 0..width {
            if !mask.get(x, y) {
                continue;
            }
            let idx = y * width + x;
            let left = if x > 0 && mask.get(x - 1, y) {
                labels[idx - 1]
            } else {
                0
            };
            let up = if y > 0 && mask.get(x, y - 1) {
                labels[idx - width]
            } else {
                0
            };

            labels[idx] = match (left, up) {
                (0, 0) => {
                    let l = next_label;
                    next_label += 1;
                    l
                }
                (l, 0) => l,
                (0, u) => u,
                (l, u) => {
                    if l != u {
                        uf.union(l, u);
                    }
                    l.min(u)
                }
            };
        }
    }

    // Second pass: resolve roots and accumulate statistics
    let mut root_index: Vec<Option<usize>> = vec![None; next_label as usize];
    let mut accums: Vec<Accum> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if labels[idx] == 0 {
                continue;
            }
            let root = uf.find(labels[idx]) as usize;
            let slot = match root_index[root] {
                Some(s) => s,
                None => {
                    accums.push(Accum::new());
                    let s = accums.len() - 1;
                    root_index[root] = Some(s);
                    s
                }
            };
            let acc = &mut accums[slot];
            let xf = x as f64;
            let yf = y as f64;
            acc.area += 1;
            acc.sum_x += xf;
            acc.sum_y += yf;
            acc.sum_xx += xf * xf;
            acc.sum_yy += yf * yf;
            acc.sum_xy += xf * yf;

            let exposed = x == 0
                || y == 0
                || x + 1 == width
                || y + 1 == height
                || !mask.get(x - 1, y)
                || !mask.get(x + 1, y)
                || !mask.get(x, y - 1)
                || !mask.get(x, y + 1);
            if exposed {
                acc.perimeter += 1;
                acc.boundary.push(PointI::new(x as i32, y as i32));
            }
        }
    }

    accums
        .into_iter()
        .map(|acc| {
            let n = acc.area as f64;
            let cx = acc.sum_x / n;
            let cy = acc.sum_y / n;
            Region {
                area: acc.area,
                perimeter: acc.perimeter,
                cx,
                cy,
                mxx: acc.sum_xx / n - cx * cx,
                myy: acc.sum_yy / n - cy * cy,
                mxy: acc.sum_xy / n - cx * cy,
                boundary: acc.boundary,
            }
        })
        .collect()
}

/// Area of the convex hull of a point set (Andrew monotone chain +
/// shoelace). Fewer than 3 points have zero area.
pub fn convex_hull_area(points: &[PointI]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut pts: Vec<PointI> = points.to_vec();
    pts.sort_by(|a, b| a.x.cmp(&b.x).then(a.y.cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return 0.0;
    }

    let cross = |o: &PointI, a: &PointI, b: &PointI| -> i64 {
        (a.x - o.x) as i64 * (b.y - o.y) as i64 - (a.y - o.y) as i64 * (b.x - o.x) as i64
    };

    let mut lower: Vec<PointI> = Vec::new();
    for p in &pts {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<PointI> = Vec::new();
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let hull: Vec<PointI> = lower.into_iter().chain(upper).collect();
    if hull.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0i64;
    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        twice_area += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    (twice_area.abs() as f64) * 0.5
}
