//! Error types for the alerts client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during alerts client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection refused, timeout, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the backend.
    #[error("API error ({status}) at {url}")]
    Api { status: u16, url: String },

    /// Snapshot payload could not be decoded.
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Invalid URL supplied to the client builder.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Whether this error is a transport-level failure, as opposed to
    /// a well-formed but unsuccessful or undecodable response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
