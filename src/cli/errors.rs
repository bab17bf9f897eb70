use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Tile size must be greater than 0, got: {size}")]
    ZeroSize { size: usize },

    #[error("Invalid JPEG quality: {quality}. Must be between 1 and 100")]
    InvalidQuality { quality: u8 },

    #[error("Processor '{processor}' requires --threshold")]
    MissingThreshold { processor: String },

    #[error("Input not found: {path}")]
    MissingInput { path: String },

    #[error(transparent)]
    Library(#[from] tileslice::Error),
}
