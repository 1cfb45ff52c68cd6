//! File-backed snapshot cache

use crate::{WeatherError, WeatherResult};
use chrono::{DateTime, Duration, Utc};
use epdash_core::WeatherSnapshot;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A persisted snapshot paired with the instant it was fetched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub fetched_at: DateTime<Utc>,
    pub snapshot: WeatherSnapshot,
}

impl CacheEntry {
    /// Freshness is a pure function of wall-clock time: an entry is fresh
    /// iff `now - fetched_at < max_age`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.fetched_at < max_age
    }
}

/// Durable store for the last fetched snapshot.
///
/// A single JSON record at a fixed path, fully overwritten on each save.
/// The entry survives process restarts, so a restart inside the freshness
/// window does not force a refetch.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the persisted entry, if any.
    ///
    /// An absent file, an unreadable file and malformed content all behave
    /// identically: `None`. Corruption is logged and treated as a miss,
    /// never propagated.
    pub fn load(&self) -> Option<CacheEntry> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), "No readable cache: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                let err = WeatherError::CacheCorrupt(e.to_string());
                warn!(path = %self.path.display(), "{}", err);
                None
            }
        }
    }

    /// Persist a snapshot with its fetch instant, replacing prior state.
    ///
    /// The record is written to a sibling temp file and renamed over the
    /// target, so a reader never observes a partial write.
    pub fn save(&self, snapshot: &WeatherSnapshot, at: DateTime<Utc>) -> WeatherResult<()> {
        let entry = CacheEntry {
            fetched_at: at,
            snapshot: snapshot.clone(),
        };
        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| WeatherError::CacheWriteFailed(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| WeatherError::CacheWriteFailed(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| WeatherError::CacheWriteFailed(e.to_string()))?;

        debug!(path = %self.path.display(), "Cache entry written");
        Ok(())
    }
}
