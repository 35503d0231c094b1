//! Configuration module
//!
//! Handles CLI configuration: where the heaven web service lives and how
//! long a request may take.

use anyhow::{Context, Result};
use heaven_client::HeavenClient;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the heaven web service
    pub base_url: String,

    /// Timeout applied to every request; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("url must start with http:// or https://");
        }

        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds a client for the configured service
    pub fn client(&self) -> Result<HeavenClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to build HTTP client")?;

        Ok(HeavenClient::with_client(&self.base_url, http_client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> Config {
        Config {
            base_url: url.to_string(),
            request_timeout: None,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = config("http://localhost:3000");
        assert!(config.validate().is_ok());

        config.base_url = String::new();
        assert!(config.validate().is_err());

        config.base_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://heaven.lan".to_string();
        assert!(config.validate().is_ok());

        config.request_timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());

        config.request_timeout = Some(Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_uses_base_url() {
        let client = config("http://localhost:3000/").client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
