//! Error types for primus-analytics
//!
//! Errors only surface while building configuration or installing logging.
//! Tracking itself never fails.

use thiserror::Error;

/// Main error type for the primus-analytics library
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for primus-analytics
pub type Result<T> = std::result::Result<T, Error>;
