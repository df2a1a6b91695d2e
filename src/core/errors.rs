use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Image encode error: {0}")]
    Encode(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No image is loaded")]
    NoImage,

    #[error("Draw a mask on the image before inpainting")]
    MissingMask,

    #[error("Surface has no pixels ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("The {0} tool does not use the AI service")]
    NotAnAiTool(String),

    #[error("AI response error: {0}")]
    AiResponse(String),
}

impl From<EditorError> for String {
    fn from(e: EditorError) -> Self {
        e.to_string()
    }
}
