//! Brightness/contrast tone curve baked into a lookup table.
//!
//! Matches the CSS `brightness(b%) contrast(c%)` filter chain: each stage
//! clamps to [0, 1] before the next runs. Alpha is left alone.

use super::ViewState;
use image::Rgba;

pub struct ToneLut {
    table: [u8; 256],
}

impl ToneLut {
    pub fn new(brightness_percent: u8, contrast_percent: u8) -> Self {
        let brightness = brightness_percent as f32 / 100.0;
        let contrast = contrast_percent as f32 / 100.0;

        let mut table = [0u8; 256];
        for (v, out) in table.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            let c = (c * brightness).clamp(0.0, 1.0);
            let c = ((c - 0.5) * contrast + 0.5).clamp(0.0, 1.0);
            *out = (c * 255.0).round() as u8;
        }
        Self { table }
    }

    pub fn for_view(view: &ViewState) -> Self {
        Self::new(view.brightness_percent(), view.contrast_percent())
    }

    #[inline]
    pub fn map(&self, v: u8) -> u8 {
        self.table[v as usize]
    }

    #[inline]
    pub fn apply(&self, px: Rgba<u8>) -> Rgba<u8> {
        let [r, g, b, a] = px.0;
        Rgba([self.map(r), self.map(g), self.map(b), a])
    }
}
