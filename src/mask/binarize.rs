//! Paint layer -> strict black/white mask conversion.

use crate::core::errors::EditorError;
use crate::core::geometry::SurfaceSize;
use crate::file::export::encode_png;
use image::{Rgba, RgbaImage};

/// Opaque white: "edit this pixel"
pub const MASKED: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Opaque black: "leave this pixel alone"
pub const UNMASKED: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A mask whose every pixel is exactly `MASKED` or `UNMASKED`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    pixels: RgbaImage,
}

impl BinaryMask {
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn is_masked(&self, x: u32, y: u32) -> bool {
        self.pixels
            .get_pixel_checked(x, y)
            .is_some_and(|px| *px == MASKED)
    }

    pub fn masked_pixel_count(&self) -> usize {
        self.pixels.pixels().filter(|px| **px == MASKED).count()
    }

    pub fn is_empty(&self) -> bool {
        self.masked_pixel_count() == 0
    }

    pub fn to_png(&self) -> Result<Vec<u8>, EditorError> {
        encode_png(&self.pixels)
    }
}

/// Start from opaque black and turn every painted pixel white.
///
/// A pixel counts as painted when the paint layer's alpha exceeds
/// `threshold`. Regions the eraser drove back to zero alpha stay black.
pub fn binarize(paint: &RgbaImage, threshold: u8) -> BinaryMask {
    let mut pixels = RgbaImage::from_pixel(paint.width(), paint.height(), UNMASKED);
    for (dst, src) in pixels.pixels_mut().zip(paint.pixels()) {
        if src.0[3] > threshold {
            *dst = MASKED;
        }
    }
    BinaryMask { pixels }
}
