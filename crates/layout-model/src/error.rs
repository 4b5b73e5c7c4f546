//! Layout model errors.

use std::path::PathBuf;

/// Errors raised by the layout model.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// An image or box had a zero, negative, or non-finite size.
    #[error("invalid dimension {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
