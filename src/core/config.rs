//! Editor configuration.
//!
//! Every field has a default so hosts can pass a partial JSON object
//! (or nothing at all).

use crate::core::errors::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Brush slider range, in surface pixels
pub const MIN_BRUSH_SIZE: f32 = 5.0;
pub const MAX_BRUSH_SIZE: f32 = 100.0;

/// Model names used when building AI requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiModels {
    pub edit: String,
    pub generate: String,
    pub analyze: String,
    pub fast: String,
}

impl Default for AiModels {
    fn default() -> Self {
        Self {
            edit: "gemini-2.5-flash-image".to_string(),
            generate: "gemini-3-pro-image-preview".to_string(),
            analyze: "gemini-3-pro-preview".to_string(),
            fast: "gemini-2.5-flash-lite".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Viewport cap; images wider than this are shown scaled down
    pub max_canvas_width: u32,
    /// Viewport cap; images taller than this are shown scaled down
    pub max_canvas_height: u32,
    /// Brush line width in surface pixels
    pub default_brush_size: f32,
    /// Straight-alpha RGBA used for the interactive paint layer
    pub paint_color: [u8; 4],
    /// Paint-layer alpha must exceed this to count as masked
    pub mask_alpha_threshold: u8,
    pub download_file_name: String,
    pub models: AiModels,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_canvas_width: 800,
            max_canvas_height: 600,
            default_brush_size: 20.0,
            paint_color: [255, 0, 0, 128],
            mask_alpha_threshold: 0,
            download_file_name: "edited-image.png".to_string(),
            models: AiModels::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EditorError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, EditorError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        if self.max_canvas_width == 0 || self.max_canvas_height == 0 {
            return Err(EditorError::InvalidConfig(
                "Canvas caps must be greater than 0".to_string(),
            ));
        }
        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&self.default_brush_size) {
            return Err(EditorError::InvalidConfig(format!(
                "Brush size must be between {} and {}",
                MIN_BRUSH_SIZE, MAX_BRUSH_SIZE
            )));
        }
        if self.paint_color[3] == 0 {
            return Err(EditorError::InvalidConfig(
                "Paint color must not be fully transparent".to_string(),
            ));
        }
        if self.download_file_name.trim().is_empty() {
            return Err(EditorError::InvalidConfig(
                "Download file name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
