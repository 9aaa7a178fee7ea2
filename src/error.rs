//! Error types for the Spotify and background-removal clients.

use reqwest::StatusCode;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    #[error("Unexpected status: {0}")]
    Status(StatusCode),
}

impl Error {
    /// Whether the Spotify API reported the requested resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status(status) if *status == StatusCode::NOT_FOUND)
    }
}
