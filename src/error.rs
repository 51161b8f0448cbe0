//! Custom error types for pubmed-fetcher.
//!
//! All library functions return `Result<T, FetchError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for pubmed-fetcher operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// E-utilities endpoint returned a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `FetchError`
pub type Result<T> = std::result::Result<T, FetchError>;
