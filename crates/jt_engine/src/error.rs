//! Unified error types for jt_engine

use thiserror::Error;

/// Main error type for jt_engine operations
#[derive(Debug, Error)]
pub enum JtError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Envelope Errors ===
    #[error("Invalid JT file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("JT file contains no entries")]
    EmptyEnvelope,

    #[error("Unsupported dataType: {data_type} (expected 0 or 1)")]
    UnsupportedDataType { data_type: i64 },

    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Unsupported color type tag: {tag} (expected 1 or 2)")]
    UnsupportedTypeTag { tag: i64 },

    // === Codec Errors ===
    #[error("Payload length mismatch: expected {expected} bytes, got {actual}")]
    DecodeLength { expected: usize, actual: usize },

    #[error("Invalid dimensions {width}x{height}: {message}")]
    InvalidDimensions { width: i32, height: i32, message: String },

    #[error("Color {color} at {position} is not a member of the 3-bit palette")]
    NonPaletteColor { color: String, position: String },

    #[error("Operation requires {expected} color mode")]
    ColorModeMismatch { expected: &'static str },

    #[error("Document has no frames")]
    NoFrames,

    #[error("Frame {index} has size {actual}, expected {expected}")]
    FrameSizeMismatch { index: usize, actual: String, expected: String },

    // === Editor Errors ===
    #[error("Frame index {index} out of range (document has {count} frames)")]
    FrameOutOfRange { index: usize, count: usize },

    #[error("Cannot remove the last remaining frame")]
    LastFrame,

    // === External Errors ===
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for jt_engine operations
pub type Result<T> = std::result::Result<T, JtError>;

impl JtError {
    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }

    pub(crate) fn invalid_dimensions(size: crate::Size, message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width: size.width,
            height: size.height,
            message: message.into(),
        }
    }
}
