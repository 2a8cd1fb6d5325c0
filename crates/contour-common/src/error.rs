//! Error types for the contour pipeline.

use thiserror::Error;

/// Result type alias using ContourError.
pub type ContourResult<T> = Result<T, ContourError>;

/// Errors raised before the worker pool starts.
///
/// Once the pipeline is running no phase can fail: every sample and every
/// glyph stamp yields a defined value. All variants here are therefore fatal
/// and abort the run without producing an output image.
#[derive(Debug, Error)]
pub enum ContourError {
    // === Configuration Errors ===
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("invalid glyph table: {0}")]
    GlyphTable(String),

    // === Resource Errors ===
    #[error("failed to allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(String),

    #[error("decode error: {0}")]
    Decode(String),
}

impl ContourError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an InvalidImage error.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Create a GlyphTable error.
    pub fn glyph_table(msg: impl Into<String>) -> Self {
        Self::GlyphTable(msg.into())
    }

    /// Create a Decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<serde_yaml::Error> for ContourError {
    fn from(err: serde_yaml::Error) -> Self {
        ContourError::InvalidConfig(format!("YAML error: {}", err))
    }
}
