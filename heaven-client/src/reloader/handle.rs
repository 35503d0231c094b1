//! Handle to a running reloader

use chrono::{DateTime, Utc};
use heaven_core::domain::reloader::ReloaderStats;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Counters shared between the timer loop, its ticks, and the handle
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    pub(crate) ticks_fired: AtomicU64,
    pub(crate) ticks_skipped: AtomicU64,
    pub(crate) updates_applied: AtomicU64,
    pub(crate) fetch_failures: AtomicU64,
    pub(crate) document_failures: AtomicU64,
    last_update_at: Mutex<Option<DateTime<Utc>>>,
}

impl StatsCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_update(&self) {
        Self::bump(&self.updates_applied);
        let mut last = self
            .last_update_at
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = Some(Utc::now());
    }

    pub(crate) fn snapshot(&self) -> ReloaderStats {
        let last_update_at = *self
            .last_update_at
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        ReloaderStats {
            ticks_fired: self.ticks_fired.load(Ordering::Relaxed),
            ticks_skipped: self.ticks_skipped.load(Ordering::Relaxed),
            updates_applied: self.updates_applied.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            document_failures: self.document_failures.load(Ordering::Relaxed),
            last_update_at,
        }
    }
}

/// Control handle of a spawned reloader
///
/// Dropping the handle does not stop the reloader: it keeps ticking until
/// [`cancel`](Self::cancel) is called or the runtime shuts down.
#[derive(Debug)]
pub struct ReloaderHandle {
    token: CancellationToken,
    stats: Arc<StatsCounters>,
    task: JoinHandle<()>,
}

impl ReloaderHandle {
    pub(crate) fn new(
        token: CancellationToken,
        stats: Arc<StatsCounters>,
        task: JoinHandle<()>,
    ) -> Self {
        Self { token, stats, task }
    }

    /// Stops the timer and abandons in-flight fetches
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token that cancels this reloader when triggered
    ///
    /// Useful to tie the reloader to a wider shutdown signal.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn stats(&self) -> ReloaderStats {
        self.stats.snapshot()
    }

    /// Cancels the reloader and waits for its timer loop to exit
    pub async fn shutdown(self) -> ReloaderStats {
        self.token.cancel();
        if let Err(e) = self.task.await {
            warn!("Reloader task panicked: {}", e);
        }
        self.stats.snapshot()
    }

    /// Lets the reloader run for the rest of the runtime's lifetime
    pub fn detach(self) {}
}
