//! Crate-level error type and `Result` alias.
//! Tiling failures (`EmptyForeground`, `Dimension`, `ShapeMismatch`) are raised before any
//! output is produced; I/O, codec and manifest errors are converted from their sources.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No foreground content detected in {height}x{width} image")]
    EmptyForeground { height: usize, width: usize },

    #[error("Dimension error: {reason}")]
    Dimension { reason: String },

    #[error("Shape mismatch: {reason}")]
    ShapeMismatch { reason: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    pub(crate) fn dimension(reason: impl Into<String>) -> Self {
        Error::Dimension {
            reason: reason.into(),
        }
    }

    pub(crate) fn shape_mismatch(reason: impl Into<String>) -> Self {
        Error::ShapeMismatch {
            reason: reason.into(),
        }
    }
}
