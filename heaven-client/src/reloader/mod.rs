//! Status reloader
//!
//! Periodically fetches a page and replaces the content of one document
//! element with it. Each tick runs on its own task so the timer keeps its
//! cadence regardless of how long a fetch takes; with
//! [`TickPolicy::Overlap`] several ticks can be in flight at once and write
//! in the order their responses arrive.

mod handle;

pub use handle::ReloaderHandle;

use heaven_core::Document;
use heaven_core::domain::reloader::{ReloaderConfig, TickPolicy};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::HeavenClient;
use crate::error::{Result, TickError};
use crate::pages::PageFetcher;
use handle::StatsCounters;

/// Recurring fetch-and-replace of one document element
pub struct Reloader {
    config: ReloaderConfig,
    fetcher: Arc<dyn PageFetcher>,
    document: Arc<dyn Document>,
    stats: Arc<StatsCounters>,
    in_flight: Arc<AtomicBool>,
}

impl Reloader {
    /// Creates a reloader; nothing happens until it is spawned
    pub fn new(
        config: ReloaderConfig,
        fetcher: Arc<dyn PageFetcher>,
        document: Arc<dyn Document>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fetcher,
            document,
            stats: Arc::new(StatsCounters::default()),
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Starts the timer on the current tokio runtime
    ///
    /// The first tick fires one interval from now.
    pub fn spawn(self) -> ReloaderHandle {
        let token = CancellationToken::new();
        let stats = Arc::clone(&self.stats);
        let task = tokio::spawn(self.run(token.clone()));
        ReloaderHandle::new(token, stats, task)
    }

    async fn run(self, token: CancellationToken) {
        info!(
            "Starting reloader for #{} from {} (interval: {:?}, policy: {:?})",
            self.config.container_id, self.config.page, self.config.interval, self.config.policy
        );

        let first_tick = Instant::now() + self.config.interval;
        let mut ticker = time::interval_at(first_tick, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("Reloader for #{} stopped", self.config.container_id);
                    break;
                }
                _ = ticker.tick() => {
                    self.on_tick(&token);
                }
            }
        }
    }

    fn on_tick(&self, token: &CancellationToken) {
        let guard = match self.config.policy {
            TickPolicy::Overlap => None,
            TickPolicy::SkipWhileInFlight => match InFlightGuard::acquire(&self.in_flight) {
                Some(guard) => Some(guard),
                None => {
                    debug!(
                        "Previous reload of #{} still in flight, skipping tick",
                        self.config.container_id
                    );
                    StatsCounters::bump(&self.stats.ticks_skipped);
                    return;
                }
            },
        };

        StatsCounters::bump(&self.stats.ticks_fired);

        let fetcher = Arc::clone(&self.fetcher);
        let document = Arc::clone(&self.document);
        let stats = Arc::clone(&self.stats);
        let container_id = self.config.container_id.clone();
        let page = self.config.page.clone();
        let token = token.child_token();

        tokio::spawn(async move {
            let _guard = guard;
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Abandoning in-flight reload of #{}", container_id);
                }
                result = reload_once(fetcher.as_ref(), document.as_ref(), &container_id, &page) => {
                    match result {
                        Ok(()) => {
                            debug!("Reloaded #{} from {}", container_id, page);
                            stats.record_update();
                        }
                        Err(TickError::Fetch(e)) => {
                            warn!("Failed to fetch {}: {}", page, e);
                            StatsCounters::bump(&stats.fetch_failures);
                        }
                        Err(TickError::Document(e)) => {
                            warn!("Failed to update #{}: {}", container_id, e);
                            StatsCounters::bump(&stats.document_failures);
                        }
                    }
                }
            }
        });
    }
}

/// Fetches `page` once and writes its text into element `container_id`
///
/// The document is only touched once the whole body has been read.
pub async fn reload_once(
    fetcher: &dyn PageFetcher,
    document: &dyn Document,
    container_id: &str,
    page: &str,
) -> std::result::Result<(), TickError> {
    let text = fetcher.fetch_page(page).await.map_err(TickError::Fetch)?;
    document.replace_inner(container_id, &text).await?;
    Ok(())
}

/// Marks a tick as in flight until dropped
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(Arc::clone(flag)))
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl HeavenClient {
    /// Reload element `container_id` from `page` every second
    ///
    /// Shorthand for a [`Reloader`] with the default interval and the
    /// overlapping tick policy, fetching through this client.
    pub fn create_reloader(
        &self,
        container_id: impl Into<String>,
        page: impl Into<String>,
        document: Arc<dyn Document>,
    ) -> Result<ReloaderHandle> {
        self.spawn_reloader(ReloaderConfig::new(container_id, page), document)
    }

    /// Spawn a reloader with a full configuration, fetching through this client
    pub fn spawn_reloader(
        &self,
        config: ReloaderConfig,
        document: Arc<dyn Document>,
    ) -> Result<ReloaderHandle> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(self.clone());
        Ok(Reloader::new(config, fetcher, document)?.spawn())
    }
}
