//! Cache-or-fetch refresh policy

use crate::CacheStore;
use chrono::{DateTime, Duration, Utc};
use epdash_core::{WeatherSnapshot, WeatherSource};
use tracing::{debug, error, info, warn};

/// Default freshness window: one hour
pub const DEFAULT_REFRESH_INTERVAL_SECS: i64 = 3600;

/// Decides, per cycle, whether the cached snapshot is reused or the
/// provider is invoked.
///
/// The interval is fixed configuration, never derived from the provider.
/// When a refresh is attempted and fails the policy returns `None` rather
/// than serving a snapshot that is already past its window.
pub struct RefreshPolicy {
    store: CacheStore,
    source: Box<dyn WeatherSource>,
    max_age: Duration,
}

impl RefreshPolicy {
    pub fn new(store: CacheStore, source: Box<dyn WeatherSource>, max_age: Duration) -> Self {
        Self {
            store,
            source,
            max_age,
        }
    }

    /// Resolve the snapshot to display for the cycle at `now`.
    ///
    /// Fast path: a fresh cache entry, no network. Slow path: fetch from
    /// the source and persist best-effort. `None` means the display shows
    /// no weather this cycle.
    pub async fn resolve(&self, now: DateTime<Utc>) -> Option<WeatherSnapshot> {
        if let Some(entry) = self.store.load() {
            if entry.is_fresh(now, self.max_age) {
                debug!(
                    fetched_at = %entry.fetched_at,
                    "Serving cached snapshot"
                );
                return Some(entry.snapshot);
            }
            debug!(fetched_at = %entry.fetched_at, "Cache entry expired");
        }

        info!(source = self.source.name(), "Fetching fresh weather data");
        match self.source.fetch().await {
            Ok(snapshot) => {
                // A failed save only means the next cycle refetches.
                if let Err(e) = self.store.save(&snapshot, now) {
                    warn!("{}", e);
                }
                Some(snapshot)
            }
            Err(e) => {
                error!("Weather fetch failed: {:#}", e);
                None
            }
        }
    }
}
