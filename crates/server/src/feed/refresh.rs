//! Refresh policy for the item cache.
//!
//! Items are served from the cache. When the stored `last_update` is older
//! than the update interval, one upstream fetch replaces the cached batch
//! before reading.
//!
//! The stale check and the refresh run under one async mutex, so concurrent
//! requests that all see stale data cause a single upstream call. Callers
//! that waited on the lock re-check staleness before fetching.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use regal_client::FilmSource;
use regal_core::cache::items::RefreshStats;
use regal_core::{CacheDb, Error, Item};
use tokio::sync::Mutex;

/// Cached items plus the time they were last refreshed.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub items: Vec<Item>,
    pub last_build: DateTime<Utc>,
}

/// Serves items from the cache, refreshing from a `FilmSource` when stale.
pub struct FeedService {
    cache: CacheDb,
    source: Arc<dyn FilmSource>,
    interval: Duration,
    refresh_lock: Mutex<()>,
}

impl FeedService {
    pub fn new(cache: CacheDb, source: Arc<dyn FilmSource>, interval: Duration) -> Self {
        Self { cache, source, interval, refresh_lock: Mutex::new(()) }
    }

    /// Time of the last refresh.
    ///
    /// With no recorded refresh this is two intervals ago, which always reads as stale.
    pub async fn last_update(&self) -> Result<DateTime<Utc>, Error> {
        Ok(self
            .cache
            .last_update()
            .await?
            .unwrap_or_else(|| Utc::now() - self.interval * 2))
    }

    /// Whether the cache is older than the interval at `now`.
    pub async fn is_stale(&self, now: DateTime<Utc>) -> Result<bool, Error> {
        Ok(self.last_update().await? < now - self.interval)
    }

    /// Fetch upstream and replace the cached batch. Caller holds `refresh_lock`.
    ///
    /// On error nothing in the cache changes.
    async fn refresh_locked(&self) -> Result<RefreshStats, Error> {
        let films = self.source.fetch_films().await.inspect_err(|e| {
            tracing::warn!(error = %e, "upstream fetch failed; cache left unchanged");
        })?;

        let stats = self.cache.apply_refresh(films, Utc::now(), self.interval).await?;
        tracing::info!(
            inserted = stats.inserted,
            pruned = stats.pruned,
            interval_secs = self.interval.num_seconds(),
            "cache refreshed"
        );
        Ok(stats)
    }

    /// Up to `count` most recent items, refreshing first if stale.
    pub async fn fetch(&self, count: usize) -> Result<Vec<Item>, Error> {
        if self.is_stale(Utc::now()).await? {
            let _guard = self.refresh_lock.lock().await;
            if self.is_stale(Utc::now()).await? {
                self.refresh_locked().await?;
            } else {
                tracing::debug!("cache refreshed by a concurrent request");
            }
        }

        self.cache.recent_items(count).await
    }

    /// Items for one feed render together with the build time.
    pub async fn snapshot(&self, count: usize) -> Result<FeedSnapshot, Error> {
        let items = self.fetch(count).await?;
        let last_build = self.last_update().await?;
        Ok(FeedSnapshot { items, last_build })
    }
}
