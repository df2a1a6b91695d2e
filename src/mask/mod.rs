//! Mask layer - freehand paint/erase strokes and their binarization
//!
//! Strokes live on a translucent paint layer that is pixel-aligned with the
//! display surface. On stroke release the layer is converted into a
//! [`BinaryMask`] for the inpaint request.

mod binarize;
mod stroke;

pub use binarize::{binarize, BinaryMask, MASKED, UNMASKED};
pub use stroke::{DirtyRect, StrokeCoverage};

use crate::core::geometry::SurfaceSize;
use crate::input::SurfacePoint;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// How a stroke affects the paint layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushMode {
    /// Source-over with the paint color
    #[default]
    Paint,
    /// Destination-out: removes previously painted alpha
    Erase,
}

/// Brush used for mask strokes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub mode: BrushMode,
    /// Line width in surface pixels; the round cap radius is half of this
    pub size: f32,
}

impl BrushSettings {
    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }
}

#[derive(Debug, Clone)]
struct ActiveStroke {
    brush: BrushSettings,
    last: SurfacePoint,
    /// Paint layer as it was at pointer-down
    base: RgbaImage,
    coverage: StrokeCoverage,
}

#[derive(Debug, Clone, Default)]
enum StrokePhase {
    #[default]
    Idle,
    Drawing(Box<ActiveStroke>),
}

/// Owner of the mask surface and its stroke state machine
#[derive(Debug, Clone)]
pub struct MaskLayer {
    paint: RgbaImage,
    color: [u8; 4],
    threshold: u8,
    phase: StrokePhase,
}

impl MaskLayer {
    pub fn new(color: [u8; 4], threshold: u8) -> Self {
        Self {
            paint: RgbaImage::new(0, 0),
            color,
            threshold,
            phase: StrokePhase::Idle,
        }
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.paint.width(), self.paint.height())
    }

    /// The translucent paint layer shown over the image while masking
    pub fn pixels(&self) -> &RgbaImage {
        &self.paint
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, StrokePhase::Drawing(_))
    }

    /// Reallocate at `size`, discarding strokes
    pub fn reset(&mut self, size: SurfaceSize) {
        self.paint = RgbaImage::new(size.width, size.height);
        self.phase = StrokePhase::Idle;
    }

    /// Wipe to fully transparent and abandon any stroke in progress
    pub fn clear(&mut self) {
        for px in self.paint.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
        self.phase = StrokePhase::Idle;
    }

    /// Idle -> Drawing. Nothing is painted until the pointer moves.
    pub fn begin_stroke(&mut self, at: SurfacePoint, brush: BrushSettings) {
        let size = self.size();
        self.phase = StrokePhase::Drawing(Box::new(ActiveStroke {
            brush,
            last: at,
            base: self.paint.clone(),
            coverage: StrokeCoverage::new(size.width, size.height),
        }));
    }

    /// Drawing -> Drawing: extend the path to `to`.
    ///
    /// Ignored while idle.
    pub fn extend_stroke(&mut self, to: SurfacePoint) -> Option<DirtyRect> {
        let StrokePhase::Drawing(stroke) = &mut self.phase else {
            return None;
        };

        let from = stroke.last;
        stroke.last = to;
        let rect = stroke.coverage.add_segment(from, to, stroke.brush.size)?;
        composite_stroke(&mut self.paint, stroke, self.color, rect);
        Some(rect)
    }

    /// Drawing -> Idle. Returns whether a stroke was actually in progress.
    pub fn end_stroke(&mut self) -> bool {
        matches!(
            std::mem::take(&mut self.phase),
            StrokePhase::Drawing(_)
        )
    }

    pub fn binarize(&self) -> BinaryMask {
        binarize(&self.paint, self.threshold)
    }
}

/// Recomposite `rect` from the pre-stroke snapshot plus the stroke coverage.
fn composite_stroke(paint: &mut RgbaImage, stroke: &ActiveStroke, color: [u8; 4], rect: DirtyRect) {
    let (left, top, width, height) = rect;
    let color_alpha = color[3] as f32 / 255.0;

    for y in top..top + height {
        for x in left..left + width {
            let cov = stroke.coverage.get(x, y);
            let base = *stroke.base.get_pixel(x, y);
            let out = if cov <= 0.0 {
                base
            } else {
                match stroke.brush.mode {
                    BrushMode::Paint => source_over(base, color, color_alpha * cov),
                    BrushMode::Erase => destination_out(base, cov),
                }
            };
            paint.put_pixel(x, y, out);
        }
    }
}

/// Straight-alpha source-over of `color` at `src_a` onto `dst`
#[inline]
fn source_over(dst: Rgba<u8>, color: [u8; 4], src_a: f32) -> Rgba<u8> {
    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let blend = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        blend(color[0], dst.0[0]),
        blend(color[1], dst.0[1]),
        blend(color[2], dst.0[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Destination-out with an opaque eraser at `coverage`
#[inline]
fn destination_out(dst: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let out_a = (dst.0[3] as f32 * (1.0 - coverage)).round().clamp(0.0, 255.0) as u8;
    if out_a == 0 {
        Rgba([0, 0, 0, 0])
    } else {
        Rgba([dst.0[0], dst.0[1], dst.0[2], out_a])
    }
}
