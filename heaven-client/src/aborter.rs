//! Job abort endpoint

use heaven_core::domain::job::JobId;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::HeavenClient;
use crate::error::Result;

/// What the server answered to an abort request
///
/// The status is reported, not judged: a 500 still yields a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbortReceipt {
    pub job: JobId,
    pub status: u16,
    pub body: String,
}

impl AbortReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl HeavenClient {
    /// Abort the job with the given identifier
    ///
    /// Issues exactly one `GET /port/{job}/abort`. Only transport failures,
    /// including a failed body read, are errors; whatever status the server answers with ends up in the
    /// receipt.
    ///
    /// # Example
    /// ```no_run
    /// # use heaven_client::HeavenClient;
    /// # async fn example() -> heaven_client::Result<()> {
    /// let client = HeavenClient::new("http://localhost:3000");
    /// let receipt = client.abort_job("rack1-p04").await?;
    /// println!("{} -> {}", receipt.job, receipt.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn abort_job(&self, job: impl Into<JobId>) -> Result<AbortReceipt> {
        let job = job.into();
        let url = self.resolve(&job.abort_path())?;

        debug!("Aborting job {} via {}", job, url);
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(AbortReceipt { job, status, body })
    }

    /// Abort a job without waiting for the outcome
    ///
    /// The request runs on a spawned task and its result is discarded; a
    /// failure is only logged. Must be called from within a tokio runtime.
    /// The returned handle can be awaited to learn when the request is done,
    /// or dropped.
    pub fn abort_job_detached(&self, job: impl Into<JobId>) -> JoinHandle<()> {
        let client = self.clone();
        let job = job.into();

        tokio::spawn(async move {
            match client.abort_job(job.clone()).await {
                Ok(receipt) if receipt.is_success() => {
                    debug!("Abort of job {} acknowledged", job);
                }
                Ok(receipt) => {
                    warn!(
                        "Abort of job {} answered with status {}",
                        job, receipt.status
                    );
                }
                Err(e) => {
                    warn!("Failed to abort job {}: {}", job, e);
                }
            }
        })
    }
}
