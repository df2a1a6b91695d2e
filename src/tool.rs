//! Editing tools selectable by the host.
//!
//! Each variant carries only the options that tool needs.

use serde::{Deserialize, Serialize};

/// Output resolution requested from image generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "camelCase")]
pub enum EditingTool {
    #[default]
    None,
    Rotate,
    /// Brightness/contrast sliders
    Adjust,
    /// Mask painting + masked AI edit
    Inpaint,
    /// Prompt-only AI edit of the whole image
    Edit,
    Generate {
        #[serde(default)]
        size: ImageSize,
    },
    Analyze {
        #[serde(default)]
        fast: bool,
    },
}

impl EditingTool {
    /// Only the inpaint tool captures pointer input on the mask overlay
    pub fn captures_pointer(&self) -> bool {
        matches!(self, EditingTool::Inpaint)
    }

    /// Whether the tool sends work to the AI service
    pub fn uses_ai(&self) -> bool {
        matches!(
            self,
            EditingTool::Inpaint
                | EditingTool::Edit
                | EditingTool::Generate { .. }
                | EditingTool::Analyze { .. }
        )
    }

    /// Generation is the only tool that works without a loaded image
    pub fn requires_image(&self) -> bool {
        !matches!(self, EditingTool::Generate { .. } | EditingTool::None)
    }
}
