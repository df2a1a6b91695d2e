//! Rotation-about-center + tone filter + scaled draw.
//!
//! The image always lands in the unrotated footprint of the surface. Quarter
//! turns of a non-square image therefore crop its corners instead of growing
//! the surface; uncovered pixels stay transparent.

use super::{ToneLut, ViewState};
use crate::core::geometry::SurfaceSize;
use crate::file::ImageResource;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::borrow::Cow;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Render onto a freshly allocated surface.
pub fn compose(image: &ImageResource, view: &ViewState, size: SurfaceSize) -> RgbaImage {
    let mut out = RgbaImage::from_pixel(size.width, size.height, CLEAR);
    draw_into(&mut out, image, view);
    out
}

/// (cos, sin) for a clockwise quarter-turn count, exact for every step.
fn quarter_turn_trig(quarter_turns: u8) -> (f64, f64) {
    match quarter_turns % 4 {
        0 => (1.0, 0.0),
        1 => (0.0, 1.0),
        2 => (-1.0, 0.0),
        _ => (0.0, -1.0),
    }
}

fn scale_to(source: &RgbaImage, width: u32, height: u32) -> Cow<'_, RgbaImage> {
    if source.dimensions() == (width, height) {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(imageops::resize(source, width, height, FilterType::Triangle))
    }
}

/// Draw `image` into an already-cleared `target`.
///
/// Each target pixel center is mapped back through the inverse rotation;
/// the filter is applied to the sampled source pixel before it is written.
fn draw_into(target: &mut RgbaImage, image: &ImageResource, view: &ViewState) {
    let (width, height) = target.dimensions();
    if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
        return;
    }

    let scaled = scale_to(image.pixels(), width, height);
    let lut = ToneLut::for_view(view);

    if view.quarter_turns() == 0 {
        for (dst, src) in target.pixels_mut().zip(scaled.pixels()) {
            *dst = lut.apply(*src);
        }
        return;
    }

    let (cos, sin) = quarter_turn_trig(view.quarter_turns());
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;

    for (x, y, dst) in target.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        let sx = cos * dx + sin * dy + cx;
        let sy = -sin * dx + cos * dy + cy;
        if sx < 0.0 || sy < 0.0 {
            continue;
        }
        let (ix, iy) = (sx.floor() as u32, sy.floor() as u32);
        if ix >= width || iy >= height {
            continue;
        }
        *dst = lut.apply(*scaled.get_pixel(ix, iy));
    }
}

/// The on-screen raster. Exclusively owned by the editor.
#[derive(Debug, Clone)]
pub struct DisplaySurface {
    pixels: RgbaImage,
}

impl Default for DisplaySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface {
    pub fn new() -> Self {
        Self {
            pixels: RgbaImage::new(0, 0),
        }
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Resize, clear fully, then draw under `view`.
    pub fn render(&mut self, image: &ImageResource, view: &ViewState, size: SurfaceSize) {
        if self.size() != size {
            self.pixels = RgbaImage::new(size.width, size.height);
        }
        for px in self.pixels.pixels_mut() {
            *px = CLEAR;
        }
        draw_into(&mut self.pixels, image, view);
    }

    /// Drop the frame, e.g. when there is no image to show.
    pub fn reset(&mut self) {
        self.pixels = RgbaImage::new(0, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x2 image: left half red, right half blue.
    fn split_image() -> ImageResource {
        let img = RgbaImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        ImageResource::from_rgba(img)
    }

    fn gradient(width: u32, height: u32) -> ImageResource {
        ImageResource::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8, 255])
        }))
    }

    fn rotated(turns: u8) -> ViewState {
        let mut view = ViewState::default();
        for _ in 0..turns {
            view.rotate_clockwise();
        }
        view
    }

    #[test]
    fn identity_view_copies_pixels() {
        let image = gradient(6, 4);
        let out = compose(&image, &ViewState::default(), SurfaceSize::new(6, 4));
        assert_eq!(&out, image.pixels());
    }

    #[test]
    fn half_turn_flips_both_axes() {
        let image = gradient(5, 3);
        let out = compose(&image, &rotated(2), SurfaceSize::new(5, 3));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(out.get_pixel(x, y), image.pixels().get_pixel(4 - x, 2 - y));
            }
        }
    }

    #[test]
    fn quarter_turn_of_square_is_clockwise() {
        let image = gradient(4, 4);
        let out = compose(&image, &rotated(1), SurfaceSize::new(4, 4));
        // clockwise: source top-left lands top-right
        assert_eq!(out.get_pixel(3, 0), image.pixels().get_pixel(0, 0));
        assert_eq!(out.get_pixel(0, 0), image.pixels().get_pixel(0, 3));
        assert_eq!(out.get_pixel(3, 3), image.pixels().get_pixel(3, 0));
    }

    #[test]
    fn quarter_turn_of_wide_image_crops_corners() {
        let image = split_image();
        let out = compose(&image, &rotated(1), SurfaceSize::new(4, 2));
        // the surface keeps its size
        assert_eq!(out.dimensions(), (4, 2));
        // corners fall outside the rotated footprint
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(3, 1).0[3], 0);
        // left half of the source is now on top
        assert_eq!(out.get_pixel(1, 0).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 1).0, [0, 0, 255, 255]);
    }

    #[test]
    fn render_is_idempotent() {
        let image = gradient(37, 23);
        let mut view = rotated(3);
        view.set_brightness(140);
        view.set_contrast(60);
        let size = SurfaceSize::new(30, 19);

        let mut surface = DisplaySurface::new();
        surface.render(&image, &view, size);
        let first = surface.pixels().clone();
        surface.render(&image, &view, size);
        assert_eq!(&first, surface.pixels());
        assert_eq!(first, compose(&image, &view, size));
    }

    #[test]
    fn render_clears_previous_frame() {
        let image = split_image();
        let mut surface = DisplaySurface::new();
        surface.render(&image, &ViewState::default(), SurfaceSize::new(4, 2));
        assert_eq!(surface.pixels().get_pixel(0, 0).0[3], 255);

        surface.render(&image, &rotated(1), SurfaceSize::new(4, 2));
        assert_eq!(surface.pixels().get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn filter_applies_to_drawn_pixels_only() {
        let image = split_image();
        let mut view = rotated(1);
        view.set_brightness(0);
        let out = compose(&image, &view, SurfaceSize::new(4, 2));
        // drawn pixels go black, cleared corners stay transparent
        assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn downscales_into_surface() {
        let image = gradient(64, 48);
        let out = compose(&image, &ViewState::default(), SurfaceSize::new(32, 24));
        assert_eq!(out.dimensions(), (32, 24));
        assert!(out.pixels().all(|p| p.0[3] >= 254));
    }

    #[test]
    fn empty_surface_does_not_panic() {
        let image = ImageResource::from_rgba(RgbaImage::new(0, 0));
        let out = compose(&image, &rotated(1), SurfaceSize::new(0, 0));
        assert_eq!(out.dimensions(), (0, 0));
    }
}
