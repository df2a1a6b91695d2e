//! Conversions between `data:` URL strings and raw encoded bytes.
//!
//! Webview hosts hand images around as data URLs; the core works on bytes.

use crate::core::errors::EditorError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

pub const PNG_MIME: &str = "image/png";

/// A parsed `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn parse(value: &str) -> Result<Self, EditorError> {
        let (mime_type, payload) = split_data_url(value)?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes: BASE64.decode(payload)?,
        })
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Split a data URL into its MIME type and base64 payload without decoding.
pub fn split_data_url(value: &str) -> Result<(&str, &str), EditorError> {
    let (header, payload) = value
        .split_once(',')
        .ok_or_else(|| EditorError::InvalidDataUrl("missing ',' separator".into()))?;
    let mime_type = header
        .strip_prefix("data:")
        .and_then(|rest| rest.strip_suffix(";base64"))
        .filter(|mime| !mime.is_empty())
        .ok_or_else(|| EditorError::InvalidDataUrl(format!("unsupported header '{}'", header)))?;
    if payload.is_empty() {
        return Err(EditorError::InvalidDataUrl("empty payload".into()));
    }
    Ok((mime_type, payload))
}

pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

pub fn encode_png_data_url(bytes: &[u8]) -> String {
    encode_data_url(PNG_MIME, bytes)
}
