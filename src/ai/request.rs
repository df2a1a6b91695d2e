//! Request construction for the four AI operations.

use super::Part;
use crate::core::config::AiModels;
use crate::core::errors::EditorError;
use crate::tool::ImageSize;
use serde::{Deserialize, Serialize};

pub const ANALYZE_PROMPT: &str = "Describe this image in detail.";
pub const QUICK_ANALYZE_PROMPT: &str = "Quickly describe this image.";
const SQUARE_ASPECT: &str = "1:1";

/// A unit of AI work. Image fields hold data URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AiRequest {
    #[serde(rename_all = "camelCase")]
    Inpaint {
        image: String,
        mask: String,
        prompt: String,
        allow_nsfw: bool,
    },
    Edit {
        image: String,
        prompt: String,
    },
    Generate {
        prompt: String,
        size: ImageSize,
    },
    Analyze {
        image: String,
        prompt: String,
        fast: bool,
    },
}

impl AiRequest {
    /// Model configured for this kind of request
    pub fn model<'a>(&self, models: &'a AiModels) -> &'a str {
        match self {
            AiRequest::Inpaint { .. } | AiRequest::Edit { .. } => &models.edit,
            AiRequest::Generate { .. } => &models.generate,
            AiRequest::Analyze { fast: false, .. } => &models.analyze,
            AiRequest::Analyze { fast: true, .. } => &models.fast,
        }
    }

    /// Text part sent alongside the images
    pub fn instruction(&self) -> String {
        match self {
            AiRequest::Inpaint {
                prompt, allow_nsfw, ..
            } => {
                let mut text = format!(
                    "Inpaint the image based on the mask and the following instruction: {}. \
                     The mask (second image) indicates the area to change (white pixels).",
                    prompt
                );
                if *allow_nsfw {
                    text.push_str(" NSFW content is allowed if requested.");
                }
                text
            }
            AiRequest::Edit { prompt, .. } | AiRequest::Generate { prompt, .. } => prompt.clone(),
            AiRequest::Analyze { prompt, fast, .. } => {
                if !prompt.trim().is_empty() {
                    prompt.clone()
                } else if *fast {
                    QUICK_ANALYZE_PROMPT.to_string()
                } else {
                    ANALYZE_PROMPT.to_string()
                }
            }
        }
    }

    /// Whether the reply is expected to carry an image (vs. text)
    pub fn expects_image(&self) -> bool {
        !matches!(self, AiRequest::Analyze { .. })
    }

    pub fn to_body(&self, models: &AiModels) -> Result<GenerateContentRequest, EditorError> {
        let mut parts = match self {
            AiRequest::Inpaint { image, mask, .. } => {
                vec![Part::from_data_url(image)?, Part::from_data_url(mask)?]
            }
            AiRequest::Edit { image, .. } | AiRequest::Analyze { image, .. } => {
                vec![Part::from_data_url(image)?]
            }
            AiRequest::Generate { .. } => Vec::new(),
        };
        parts.push(Part::text(self.instruction()));

        let config = match self {
            AiRequest::Generate { size, .. } => Some(GenerationConfig {
                image_config: ImageConfig {
                    image_size: *size,
                    aspect_ratio: SQUARE_ASPECT.to_string(),
                },
            }),
            _ => None,
        };

        Ok(GenerateContentRequest {
            model: self.model(models).to_string(),
            contents: Contents { parts },
            config,
        })
    }
}

/// `generateContent` call body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub model: String,
    pub contents: Contents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contents {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub image_config: ImageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub image_size: ImageSize,
    pub aspect_ratio: String,
}
