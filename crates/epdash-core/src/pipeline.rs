use anyhow::Result;

use crate::WeatherSnapshot;

/// A source of live weather data.
///
/// The production implementation issues one HTTP request to a forecast
/// service; tests substitute canned or failing sources.
#[async_trait::async_trait]
pub trait WeatherSource: Send + Sync {
    /// Source name/identifier
    fn name(&self) -> &str;

    /// Fetch a fresh snapshot from the remote service
    async fn fetch(&self) -> Result<WeatherSnapshot>;
}
