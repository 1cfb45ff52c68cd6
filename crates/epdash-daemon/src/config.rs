//! Daemon configuration from environment variables

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct DashConfig {
    /// Forecast latitude (default: Melbourne)
    pub latitude: f64,

    /// Forecast longitude (default: Melbourne)
    pub longitude: f64,

    /// Location label shown on the panel
    pub location: String,

    /// Path of the persisted weather cache
    pub cache_path: String,

    /// Freshness window in seconds (default: 3600)
    pub refresh_interval: i64,

    /// Provider HTTP timeout in seconds (default: 10)
    pub http_timeout: u64,
}

impl DashConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let latitude = env::var("EPDASH_LATITUDE")
            .unwrap_or_else(|_| "-37.8136".to_string())
            .parse()
            .context("Invalid EPDASH_LATITUDE")?;

        let longitude = env::var("EPDASH_LONGITUDE")
            .unwrap_or_else(|_| "144.9631".to_string())
            .parse()
            .context("Invalid EPDASH_LONGITUDE")?;

        let location = env::var("EPDASH_LOCATION").unwrap_or_else(|_| "Melbourne".to_string());

        let cache_path =
            env::var("EPDASH_CACHE_PATH").unwrap_or_else(|_| "weather_cache.json".to_string());

        let refresh_interval = env::var("EPDASH_REFRESH_INTERVAL")
            .unwrap_or_else(|_| epdash_weather::DEFAULT_REFRESH_INTERVAL_SECS.to_string())
            .parse()
            .context("Invalid EPDASH_REFRESH_INTERVAL")?;

        let http_timeout = env::var("EPDASH_HTTP_TIMEOUT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("Invalid EPDASH_HTTP_TIMEOUT")?;

        Ok(Self {
            latitude,
            longitude,
            location,
            cache_path,
            refresh_interval,
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DashConfig::from_env().unwrap();

        assert_eq!(config.latitude, -37.8136);
        assert_eq!(config.longitude, 144.9631);
        assert_eq!(config.location, "Melbourne");
        assert_eq!(config.cache_path, "weather_cache.json");
        assert_eq!(config.refresh_interval, 3600);
        assert_eq!(config.http_timeout, 10);
    }
}
