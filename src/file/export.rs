//! Composite exporter: re-render the current view and encode it as PNG.

use super::types::ExportedImage;
use super::ImageResource;
use crate::core::errors::EditorError;
use crate::core::geometry::SurfaceSize;
use crate::render::{compose, ViewState};
use image::{ImageFormat, RgbaImage};

/// Lossless PNG encoding of an RGBA buffer.
pub fn encode_png(pixels: &RgbaImage) -> Result<Vec<u8>, EditorError> {
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(EditorError::EmptySurface {
            width: pixels.width(),
            height: pixels.height(),
        });
    }
    let mut cursor = std::io::Cursor::new(Vec::new());
    pixels
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| EditorError::Encode(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Render `image` under `view` onto a fresh surface of `size` and encode it.
///
/// Never reads the on-screen surface, so the result does not depend on
/// when the last redraw happened.
pub fn export_composite(
    image: &ImageResource,
    view: &ViewState,
    size: SurfaceSize,
    file_name: &str,
) -> Result<ExportedImage, EditorError> {
    let pixels = compose(image, view, size);
    let png = encode_png(&pixels)?;
    tracing::debug!(
        "Exported {}x{} composite ({} bytes, rotation {})",
        size.width,
        size.height,
        png.len(),
        view.rotation_degrees()
    );
    Ok(ExportedImage {
        file_name: file_name.to_string(),
        width: size.width,
        height: size.height,
        png,
    })
}
