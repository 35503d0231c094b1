//! Page fetching
//!
//! Pages are HTML fragments rendered by the heaven web service. They are
//! consumed as raw text: no parsing, no sanitising.

use async_trait::async_trait;
use tracing::debug;

use crate::HeavenClient;
use crate::error::Result;

/// Source of page text for the reloader
///
/// Implemented by [`HeavenClient`]; tests substitute their own.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the full body of `page` as text
    async fn fetch_page(&self, page: &str) -> Result<String>;
}

impl HeavenClient {
    /// Fetch a page and return its body as text
    ///
    /// Non-success statuses are not errors: an error page body is returned
    /// just like a regular one.
    pub async fn fetch_page(&self, page: &str) -> Result<String> {
        let url = self.resolve(page)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Page {} answered with status {}", page, status);
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HeavenClient {
    async fn fetch_page(&self, page: &str) -> Result<String> {
        HeavenClient::fetch_page(self, page).await
    }
}
