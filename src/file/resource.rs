//! Immutable decoded rasters handed to the editor by the host.

use crate::core::adapters::DataUrl;
use crate::core::errors::EditorError;
use image::RgbaImage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(u64);

impl SourceId {
    fn next() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// A decoded RGBA raster. Cloning shares the pixels.
#[derive(Debug, Clone)]
pub struct ImageResource {
    id: SourceId,
    pixels: Arc<RgbaImage>,
}

impl ImageResource {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            id: SourceId::next(),
            pixels: Arc::new(pixels),
        }
    }

    /// Decode any format the `image` crate recognises.
    pub fn decode(bytes: &[u8]) -> Result<Self, EditorError> {
        if bytes.is_empty() {
            return Err(EditorError::Decode("empty byte stream".to_string()));
        }
        let decoded =
            image::load_from_memory(bytes).map_err(|e| EditorError::Decode(e.to_string()))?;
        Ok(Self::from_rgba(decoded.into_rgba8()))
    }

    pub fn from_data_url(value: &str) -> Result<Self, EditorError> {
        let url = DataUrl::parse(value)?;
        if !url.is_image() {
            return Err(EditorError::InvalidDataUrl(format!(
                "expected an image MIME type, got '{}'",
                url.mime_type
            )));
        }
        Self::decode(&url.bytes)
    }

    /// Decode on the blocking pool so the caller's event turn is not held.
    pub async fn decode_async(bytes: Vec<u8>) -> Result<Self, EditorError> {
        tokio::task::spawn_blocking(move || Self::decode(&bytes))
            .await
            .map_err(|e| EditorError::Decode(format!("decode task failed: {}", e)))?
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
