/*!
 * Error types for the tweeseg application.
 *
 * The segmentation core has exactly one hard failure: a document that
 * defines the same passage twice. Everything else (unbalanced markup,
 * oversized constructs, empty input) is absorbed into the output shape.
 * Application-level errors wrap the core error together with file and
 * configuration failures, using the thiserror crate.
 */

use thiserror::Error;

/// Errors raised by the segmentation core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// A document defines the same passage name more than once
    #[error("Duplicate passage '{name}' in {filepath}")]
    DuplicatePassage {
        /// Path of the offending document
        filepath: String,
        /// The passage name that appears twice
        name: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Structural error from the segmentation core
    #[error("Segmentation error: {0}")]
    Segment(#[from] SegmentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<SegmentError>() {
            Ok(segment_error) => Self::Segment(segment_error),
            Err(other) => Self::Unknown(other.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
