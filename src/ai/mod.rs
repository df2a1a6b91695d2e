//! AI service contracts
//!
//! The core never talks to the network. It builds `generateContent` request
//! bodies from editor state and parses the service's replies; the host does
//! the transport.

mod request;
mod response;

pub use request::{
    AiRequest, Contents, GenerateContentRequest, GenerationConfig, ImageConfig, ANALYZE_PROMPT,
    QUICK_ANALYZE_PROMPT,
};
pub use response::{Candidate, CandidateContent, GenerateContentResponse};

use crate::core::adapters::split_data_url;
use crate::core::errors::EditorError;
use serde::{Deserialize, Serialize};

/// Base64 payload with its MIME type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// One element of a content's `parts` array: either inline data or text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            inline_data: None,
            text: Some(text.into()),
        }
    }

    /// Wrap a `data:<mime>;base64,<payload>` URL without re-encoding it
    pub fn from_data_url(value: &str) -> Result<Self, EditorError> {
        let (mime_type, data) = split_data_url(value)?;
        Ok(Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
            text: None,
        })
    }

    /// Image payload as a data URL, if this part carries one
    pub fn image_data_url(&self) -> Option<String> {
        self.inline_data
            .as_ref()
            .filter(|inline| inline.mime_type.starts_with("image/"))
            .map(|inline| format!("data:{};base64,{}", inline.mime_type, inline.data))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn part_keeps_payload_verbatim() {
        let part = Part::from_data_url("data:image/jpeg;base64,AAEC").unwrap();
        let inline = part.inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.data, "AAEC");
        assert_eq!(part.image_data_url().as_deref(), Some("data:image/jpeg;base64,AAEC"));
    }

    #[test]
    fn non_image_inline_data_is_not_an_image() {
        let part = Part {
            inline_data: Some(InlineData {
                mime_type: "application/pdf".to_string(),
                data: "AAAA".to_string(),
            }),
            text: None,
        };
        assert_eq!(part.image_data_url(), None);
    }

    #[test]
    fn bad_data_url_is_rejected() {
        assert!(matches!(
            Part::from_data_url("image/png,AAAA"),
            Err(EditorError::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn serializes_only_present_fields() {
        let json = serde_json::to_string(&Part::text("hi")).unwrap();
        assert_eq!(json, r#"{"text":"hi"}"#);
    }
}
