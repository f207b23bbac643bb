//! Error types for librato-annotate

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, sending or interpreting an annotation
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting was never supplied and has no usable fallback
    #[error("{0}")]
    Config(String),

    /// A properties file could not be read
    #[error("failed to read properties file {path}: {source}")]
    PropertiesFile {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The configured API base URL is not a valid URL
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Payload could not be encoded as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Librato answered with something that is neither success nor an error body
    #[error("Librato API error: {0}")]
    Api(String),

    /// Librato rejected the annotation and the task halts on failure
    #[error("{0}")]
    Submission(String),
}

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build the error for a required field that is not set
    pub(crate) fn not_set(field: &str) -> Self {
        Self::Config(format!("{field} is not set"))
    }
}
