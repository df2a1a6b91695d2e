//! Display scaling: how large the editing surface is for a given source image.

use serde::{Deserialize, Serialize};

/// Pixel dimensions shared by the display and mask surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Scale factor that fits the source into the cap box without upscaling.
///
/// Degenerate sources (a zero dimension) scale by 1.
pub fn canvas_scale(src_width: u32, src_height: u32, cap_width: u32, cap_height: u32) -> f64 {
    if src_width == 0 || src_height == 0 {
        return 1.0;
    }
    let width_scale = cap_width as f64 / src_width as f64;
    let height_scale = cap_height as f64 / src_height as f64;
    1.0_f64.min(width_scale).min(height_scale)
}

/// Rounded surface dimensions for a source at `scale`.
///
/// A non-zero source dimension never collapses to zero pixels.
pub fn surface_size(src_width: u32, src_height: u32, scale: f64) -> SurfaceSize {
    let scaled = |dim: u32| -> u32 {
        if dim == 0 {
            return 0;
        }
        ((dim as f64 * scale).round() as u32).max(1)
    };
    SurfaceSize::new(scaled(src_width), scaled(src_height))
}

/// Convenience: scale + rounding in one step.
pub fn fit_surface(src_width: u32, src_height: u32, cap_width: u32, cap_height: u32) -> SurfaceSize {
    let scale = canvas_scale(src_width, src_height, cap_width, cap_height);
    surface_size(src_width, src_height, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_upscales() {
        assert_eq!(canvas_scale(100, 50, 800, 600), 1.0);
        assert_eq!(canvas_scale(800, 600, 800, 600), 1.0);
    }

    #[test]
    fn picks_the_tighter_axis() {
        assert_eq!(canvas_scale(1600, 1200, 800, 600), 0.5);
        assert_eq!(canvas_scale(1600, 600, 800, 600), 0.5);
        assert_eq!(canvas_scale(800, 1200, 800, 600), 0.5);
    }

    #[test]
    fn scale_matches_formula_over_a_grid() {
        let sizes = [1u32, 7, 320, 799, 800, 801, 1024, 1600, 4000, 12000];
        let caps = [(800u32, 600u32), (640, 480), (1, 1), (1920, 1080)];
        for &w in &sizes {
            for &h in &sizes {
                for &(cw, ch) in &caps {
                    let scale = canvas_scale(w, h, cw, ch);
                    let expected = 1.0_f64
                        .min(cw as f64 / w as f64)
                        .min(ch as f64 / h as f64);
                    assert!(scale <= 1.0);
                    assert_eq!(scale, expected);
                }
            }
        }
    }

    #[test]
    fn degenerate_source_scales_by_one() {
        assert_eq!(canvas_scale(0, 600, 800, 600), 1.0);
        assert_eq!(canvas_scale(600, 0, 800, 600), 1.0);
        assert_eq!(surface_size(0, 0, 1.0), SurfaceSize::new(0, 0));
    }

    #[test]
    fn thin_images_keep_at_least_one_pixel() {
        let size = fit_surface(10_000, 1, 800, 600);
        assert_eq!(size, SurfaceSize::new(800, 1));
    }

    #[test]
    fn rounds_to_nearest_pixel() {
        // 1000x750 at 0.8 -> 800x600
        assert_eq!(fit_surface(1000, 750, 800, 600), SurfaceSize::new(800, 600));
        // 999 * (800/999) rounds back to 800
        assert_eq!(fit_surface(999, 333, 800, 600).width, 800);
    }
}
