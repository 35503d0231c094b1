//! Heaven HTTP Client
//!
//! A small client for the heaven web service covering what the port status
//! page does from the browser: aborting the job running on a port, and
//! periodically reloading the port status fragment into a document.
//!
//! # Example
//!
//! ```no_run
//! use heaven_client::HeavenClient;
//! use heaven_core::MemoryDocument;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> heaven_client::Result<()> {
//!     let client = HeavenClient::new("http://localhost:3000");
//!
//!     // Fire and forget
//!     client.abort_job_detached(42);
//!
//!     // Reload #portstatus from portstatus.html every second
//!     let document = Arc::new(MemoryDocument::with_element("portstatus"));
//!     let reloader = client.create_reloader("portstatus", "portstatus.html", document)?;
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     let stats = reloader.shutdown().await;
//!     println!("applied {} updates", stats.updates_applied);
//!     Ok(())
//! }
//! ```

mod aborter;
pub mod error;
mod pages;
pub mod reloader;

// Re-export commonly used types
pub use aborter::AbortReceipt;
pub use error::{ClientError, Result, TickError};
pub use heaven_core::domain::job::JobId;
pub use pages::PageFetcher;
pub use reloader::{Reloader, ReloaderHandle};

use reqwest::{Client, Url};

/// HTTP client for the heaven web service
#[derive(Debug, Clone)]
pub struct HeavenClient {
    /// Base URL of the service (e.g., "http://localhost:3000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HeavenClient {
    /// Create a new heaven client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the heaven web service
    ///
    /// # Example
    /// ```
    /// use heaven_client::HeavenClient;
    ///
    /// let client = HeavenClient::new("http://localhost:3000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new heaven client with a custom HTTP client
    ///
    /// Requests carry no timeout by default; use this to configure one, or
    /// proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use heaven_client::HeavenClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HeavenClient::with_client("http://localhost:3000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a page or endpoint path into a request URL
    ///
    /// Absolute `http(s)://` URLs are used as-is. Relative paths resolve
    /// against the base URL treated as a directory, so `portstatus.html`
    /// lands below it while `/port/1/abort` lands at the host root.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", path, e)));
        }

        let base = Url::parse(&format!("{}/", self.base_url))
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        base.join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HeavenClient::new("http://localhost:3000");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = HeavenClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = HeavenClient::with_client("http://localhost:3000", http_client);
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_resolve_relative_page() {
        let client = HeavenClient::new("http://localhost:3000");
        let url = client.resolve("portstatus.html").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/portstatus.html");
    }

    #[test]
    fn test_resolve_under_sub_path() {
        let client = HeavenClient::new("http://heaven.lan/ui/");
        assert_eq!(
            client.resolve("portstatus.html").unwrap().as_str(),
            "http://heaven.lan/ui/portstatus.html"
        );
        assert_eq!(
            client.resolve("/port/42/abort").unwrap().as_str(),
            "http://heaven.lan/port/42/abort"
        );
    }

    #[test]
    fn test_resolve_absolute_url() {
        let client = HeavenClient::new("http://localhost:3000");
        let url = client.resolve("http://other:8080/status.html").unwrap();
        assert_eq!(url.as_str(), "http://other:8080/status.html");
    }

    #[test]
    fn test_resolve_invalid_base() {
        let client = HeavenClient::new("not a url");
        let err = client.resolve("portstatus.html").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
