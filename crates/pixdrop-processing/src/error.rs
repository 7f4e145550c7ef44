use thiserror::Error;

/// Errors raised while planning an upload
#[derive(Debug, Error)]
pub enum TransformError {
    /// The requested or detected output format has no entry in the format table
    #[error("Unsupported output format {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid base64 buffer: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl TransformError {
    pub fn missing_source() -> Self {
        TransformError::InvalidInput("Either localPath or buffer must be provided".to_string())
    }
}
