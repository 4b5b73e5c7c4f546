//! Error types shared across compositor crates.

use std::path::PathBuf;

/// Top-level error type for compositor operations.
#[derive(Debug, thiserror::Error)]
pub enum CompositorError {
    #[error("Invalid image dimension: {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },

    #[error("Image error: {message}")]
    Image { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Settings store error: {message}")]
    Store { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using CompositorError.
pub type CompositorResult<T> = Result<T, CompositorError>;

impl CompositorError {
    pub fn invalid_dimension(width: f64, height: f64) -> Self {
        Self::InvalidDimension { width, height }
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_message() {
        let err = CompositorError::invalid_dimension(0.0, 120.0);
        assert_eq!(err.to_string(), "Invalid image dimension: 0x120");
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CompositorError = io.into();
        assert_eq!(err.to_string(), "missing");
    }
}
