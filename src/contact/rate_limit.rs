//! Per-client rate limiting
//!
//! Sliding window: a key may record at most `max_requests` hits within any
//! `window`. [`InMemoryRateLimitStore`] only sees the traffic of its own
//! process; deployments running several instances plug in a shared store
//! through [`RateLimitStore`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

pub const DEFAULT_MAX_REQUESTS: u32 = 3;
pub const DEFAULT_WINDOW_SECS: u64 = 60 * 60;

#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record a hit for `key` at `now` if the key is under its limit.
    /// Returns `false`, recording nothing, once the limit is reached.
    async fn check_and_record(&self, key: &str, now: DateTime<Utc>) -> bool;

    /// Drop hits that left the window; returns the number of keys removed
    async fn prune(&self, now: DateTime<Utc>) -> usize;
}

pub struct InMemoryRateLimitStore {
    /// Hit timestamps per key
    requests: DashMap<String, Vec<DateTime<Utc>>>,
    window: chrono::Duration,
    max_requests: u32,
}

impl InMemoryRateLimitStore {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            requests: DashMap::new(),
            window: chrono::Duration::from_std(window)
                .unwrap_or_else(|_| chrono::Duration::days(365 * 100)),
            max_requests,
        }
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.requests.len()
    }

    fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for InMemoryRateLimitStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, Duration::from_secs(DEFAULT_WINDOW_SECS))
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_record(&self, key: &str, now: DateTime<Utc>) -> bool {
        let cutoff = self.cutoff(now);
        let mut entry = self.requests.entry(key.to_string()).or_default();

        entry.retain(|&ts| ts > cutoff);

        if entry.len() >= self.max_requests as usize {
            return false;
        }

        entry.push(now);
        true
    }

    async fn prune(&self, now: DateTime<Utc>) -> usize {
        let cutoff = self.cutoff(now);
        let before = self.requests.len();

        self.requests.retain(|_, hits| {
            hits.retain(|&ts| ts > cutoff);
            !hits.is_empty()
        });

        let removed = before.saturating_sub(self.requests.len());
        debug!("Pruned {} rate limit keys", removed);
        removed
    }
}

/// Prune `store` every `interval` for as long as the runtime lives
#[cfg(feature = "server")]
pub fn spawn_prune_task(
    store: std::sync::Arc<dyn RateLimitStore>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            store.prune(Utc::now()).await;
        }
    })
}
