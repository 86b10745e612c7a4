//! Error types for the gore pipeline.

use thiserror::Error;

/// Result type alias using GoreError.
pub type GoreResult<T> = Result<T, GoreError>;

/// Errors that can abort a gore computation.
///
/// Numerical domain overshoot and out-of-bounds sampling have no variant:
/// they are clamped or filled with background where they occur.
#[derive(Debug, Error)]
pub enum GoreError {
    // === Configuration Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    #[error("Degenerate projection: {0}")]
    DegenerateProjection(String),

    #[error("Unsupported projection: {0}")]
    UnsupportedProjection(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Image has zero area ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    // === Pipeline Invariant Errors ===
    #[error("Buffer shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    // === Boundary Errors ===
    #[error("Image error: {0}")]
    Image(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl GoreError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a DegenerateProjection error.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateProjection(msg.into())
    }

    /// Create a ShapeMismatch error from two `(width, height)` pairs.
    pub fn shape_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// True for errors caused by the caller's parameters rather than a defect.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            GoreError::InvalidConfig { .. }
                | GoreError::DegenerateProjection(_)
                | GoreError::UnsupportedProjection(_)
                | GoreError::InvalidColor(_)
                | GoreError::EmptyImage { .. }
        )
    }
}

impl From<std::io::Error> for GoreError {
    fn from(err: std::io::Error) -> Self {
        GoreError::Io(err.to_string())
    }
}

impl From<image::ImageError> for GoreError {
    fn from(err: image::ImageError) -> Self {
        GoreError::Image(err.to_string())
    }
}

impl From<serde_yaml::Error> for GoreError {
    fn from(err: serde_yaml::Error) -> Self {
        GoreError::ConfigFile(err.to_string())
    }
}
