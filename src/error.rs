//! Error types for the photo book tools library

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the photo book tools library
#[derive(Error, Debug)]
pub enum Error {
    /// Layout parameters that cannot produce a valid layout
    #[error("Invalid layout spec: {0}")]
    InvalidSpec(String),

    /// Crop box that is empty or inverted after clamping to the image
    #[error("Degenerate crop: {0}")]
    DegenerateCrop(String),

    /// IO error while reading or writing a preferences file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed preferences file
    #[error("Preferences error: {0}")]
    Preferences(#[from] serde_json::Error),
}
