//! Round-capped, round-joined stroke rasterization.
//!
//! A stroke is kept as a per-pixel coverage buffer. Each new segment is a
//! capsule (the set of points within `radius` of the segment); coverage is
//! the max over segments, so overlapping joins never double up.

use crate::input::SurfacePoint;

/// Dirty rectangle (left, top, width, height)
pub type DirtyRect = (u32, u32, u32, u32);

/// Distance from `p` to the segment `a`-`b`
#[inline]
fn distance_to_segment(px: f32, py: f32, a: SurfacePoint, b: SurfacePoint) -> f32 {
    let (vx, vy) = (b.x - a.x, b.y - a.y);
    let (wx, wy) = (px - a.x, py - a.y);
    let len2 = vx * vx + vy * vy;
    let t = if len2 <= f32::EPSILON {
        0.0
    } else {
        ((wx * vx + wy * vy) / len2).clamp(0.0, 1.0)
    };
    let (dx, dy) = (wx - t * vx, wy - t * vy);
    (dx * dx + dy * dy).sqrt()
}

#[derive(Debug, Clone)]
pub struct StrokeCoverage {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl StrokeCoverage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[(y * self.width + x) as usize]
    }

    /// Add one capsule of the given line width.
    ///
    /// Edges are anti-aliased over one pixel. Returns the touched region,
    /// or `None` when the capsule misses the buffer entirely.
    pub fn add_segment(
        &mut self,
        from: SurfacePoint,
        to: SurfacePoint,
        line_width: f32,
    ) -> Option<DirtyRect> {
        let radius = (line_width * 0.5).max(0.5);
        let extent = radius + 1.0;

        let left = (from.x.min(to.x) - extent).floor().max(0.0);
        let top = (from.y.min(to.y) - extent).floor().max(0.0);
        let right = (from.x.max(to.x) + extent).ceil().min(self.width as f32);
        let bottom = (from.y.max(to.y) + extent).ceil().min(self.height as f32);

        if right <= left || bottom <= top {
            return None;
        }

        let (left, top) = (left as u32, top as u32);
        let (right, bottom) = (right as u32, bottom as u32);

        for y in top..bottom {
            let row = (y * self.width) as usize;
            let py = y as f32 + 0.5;
            for x in left..right {
                let px = x as f32 + 0.5;
                let d = distance_to_segment(px, py, from, to);
                let cov = (radius + 0.5 - d).clamp(0.0, 1.0);
                let slot = &mut self.values[row + x as usize];
                if cov > *slot {
                    *slot = cov;
                }
            }
        }

        Some((left, top, right - left, bottom - top))
    }
}
