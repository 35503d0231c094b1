//! Error types for the heaven client

use heaven_core::DocumentError;
use heaven_core::domain::reloader::ConfigError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the heaven client
///
/// Non-success HTTP statuses are deliberately absent: the heaven endpoints
/// answer with plain text or HTML fragments that are used as-is whatever
/// the status code.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// A base URL or page path could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Reloader configuration was rejected
    #[error("Invalid reloader configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl ClientError {
    /// Check if this error happened while talking to the server
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }

    /// Check if the request timed out (only possible with a client timeout)
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestFailed(e) if e.is_timeout())
    }
}

/// Failure of a single reloader tick
#[derive(Debug, Error)]
pub enum TickError {
    #[error("failed to fetch page: {0}")]
    Fetch(#[source] ClientError),

    #[error("failed to update document: {0}")]
    Document(#[from] DocumentError),
}
