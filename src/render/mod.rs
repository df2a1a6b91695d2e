//! Render pipeline - draws the base image under the current view state

mod filter;
mod pipeline;

pub use filter::ToneLut;
pub use pipeline::{compose, DisplaySurface};

use serde::{Deserialize, Serialize};

pub const MAX_ADJUST_PERCENT: u8 = 200;

/// Non-destructive transform/filter parameters applied at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Clockwise rotation, always one of 0, 90, 180, 270
    rotation_degrees: u16,
    brightness_percent: u8,
    contrast_percent: u8,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation_degrees: 0,
            brightness_percent: 100,
            contrast_percent: 100,
        }
    }
}

impl ViewState {
    pub fn rotation_degrees(&self) -> u16 {
        self.rotation_degrees
    }

    pub fn brightness_percent(&self) -> u8 {
        self.brightness_percent
    }

    pub fn contrast_percent(&self) -> u8 {
        self.contrast_percent
    }

    /// Number of clockwise quarter turns (0..=3)
    pub fn quarter_turns(&self) -> u8 {
        (self.rotation_degrees / 90) as u8
    }

    /// Advance by 90 degrees, wrapping at 360
    pub fn rotate_clockwise(&mut self) -> u16 {
        self.rotation_degrees = (self.rotation_degrees + 90) % 360;
        self.rotation_degrees
    }

    /// Set brightness, clamped to [0, 200]
    pub fn set_brightness(&mut self, percent: i32) -> u8 {
        self.brightness_percent = clamp_percent(percent);
        self.brightness_percent
    }

    /// Set contrast, clamped to [0, 200]
    pub fn set_contrast(&mut self, percent: i32) -> u8 {
        self.contrast_percent = clamp_percent(percent);
        self.contrast_percent
    }

    pub fn has_identity_filter(&self) -> bool {
        self.brightness_percent == 100 && self.contrast_percent == 100
    }
}

fn clamp_percent(percent: i32) -> u8 {
    percent.clamp(0, MAX_ADJUST_PERCENT as i32) as u8
}
