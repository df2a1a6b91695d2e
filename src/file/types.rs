//! Artifacts handed back to the host

use crate::core::adapters::encode_png_data_url;
use serde::{Deserialize, Serialize};

/// A finished composite, ready for download or upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Suggested download name
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// PNG-encoded pixels
    pub png: Vec<u8>,
}

impl ExportedImage {
    pub fn to_data_url(&self) -> String {
        encode_png_data_url(&self.png)
    }
}

/// IPC form of an exported image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}

impl From<&ExportedImage> for ExportPayload {
    fn from(image: &ExportedImage) -> Self {
        Self {
            file_name: image.file_name.clone(),
            width: image.width,
            height: image.height,
            data_url: image.to_data_url(),
        }
    }
}
