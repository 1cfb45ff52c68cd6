//! Weather caching and refresh policy
//!
//! This crate owns the temporal logic of the dashboard: a file-backed
//! snapshot cache, the Open-Meteo provider, and the policy deciding when
//! the cache is reused and when a live fetch happens.

pub mod cache;
pub mod provider;
pub mod refresh;

pub use cache::{CacheEntry, CacheStore};
pub use provider::OpenMeteoProvider;
pub use refresh::{RefreshPolicy, DEFAULT_REFRESH_INTERVAL_SECS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Provider returned bad response: {0}")]
    ProviderBadResponse(String),

    #[error("Cache corrupt: {0}")]
    CacheCorrupt(String),

    #[error("Cache write failed: {0}")]
    CacheWriteFailed(String),
}

pub type WeatherResult<T> = Result<T, WeatherError>;

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            WeatherError::ProviderUnavailable(err.to_string())
        } else {
            WeatherError::ProviderBadResponse(err.to_string())
        }
    }
}
