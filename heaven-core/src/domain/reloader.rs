//! Reloader domain types
//!
//! Configuration and statistics for the status reloader: the recurring
//! fetch-a-page-and-replace-a-container behaviour behind the port status view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Interval used by the port status view
pub const DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_millis(1000);

/// Container the port status fragment is rendered into
pub const DEFAULT_CONTAINER_ID: &str = "portstatus";

/// Page serving the port status fragment
pub const DEFAULT_STATUS_PAGE: &str = "portstatus.html";

/// What a tick does when the previous tick is still fetching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPolicy {
    /// Start a new fetch on every tick. Overlapping ticks write in the order
    /// their responses arrive, so the last response to complete wins.
    #[default]
    Overlap,
    /// Skip the tick entirely while an earlier fetch-and-update is in flight.
    SkipWhileInFlight,
}

/// Reloader configuration
///
/// Captured once when the reloader is created and reused on every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloaderConfig {
    /// Identifier of the element whose content gets replaced
    pub container_id: String,
    /// Page fetched on every tick, relative to the service base URL
    pub page: String,
    /// Time between ticks; the first tick fires one interval after start
    pub interval: Duration,
    pub policy: TickPolicy,
}

/// Reasons a reloader configuration is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("container id cannot be empty")]
    EmptyContainerId,

    #[error("page cannot be empty")]
    EmptyPage,

    #[error("reload interval must be greater than 0")]
    ZeroInterval,
}

impl ReloaderConfig {
    /// Creates a configuration with the default interval and policy
    pub fn new(container_id: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            page: page.into(),
            interval: DEFAULT_RELOAD_INTERVAL,
            policy: TickPolicy::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_policy(mut self, policy: TickPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.container_id.is_empty() {
            return Err(ConfigError::EmptyContainerId);
        }

        if self.page.is_empty() {
            return Err(ConfigError::EmptyPage);
        }

        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(())
    }
}

impl Default for ReloaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_ID, DEFAULT_STATUS_PAGE)
    }
}

/// Point-in-time counters of a running reloader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloaderStats {
    /// Ticks that started a fetch
    pub ticks_fired: u64,
    /// Ticks dropped because a fetch was still in flight
    pub ticks_skipped: u64,
    /// Fetches whose text was written into the container
    pub updates_applied: u64,
    /// Fetches that failed at the transport level
    pub fetch_failures: u64,
    /// Fetches whose text could not be written (e.g. missing element)
    pub document_failures: u64,
    pub last_update_at: Option<DateTime<Utc>>,
}
