//! Error types for octoboard-core

use thiserror::Error;

/// Main error type for the octoboard-core library.
///
/// Analytics functions never return this for data-shape reasons; malformed
/// records degrade to defaults instead. Errors are limited to configuration
/// loading and the text-completion client.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Text-completion endpoint error
    #[error("completion error: {0}")]
    Completion(String),
}

/// Result type alias for octoboard-core
pub type Result<T> = std::result::Result<T, Error>;
