//! Open-Meteo forecast provider

use crate::{WeatherError, WeatherResult};
use chrono::{Local, NaiveDateTime, Timelike};
use epdash_core::{condition_label, WeatherSnapshot, WeatherSource};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Time format used by Open-Meteo for sunrise/sunset stamps
const API_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Weather provider backed by the Open-Meteo forecast API.
///
/// Issues a single GET per fetch with a bounded timeout so a hung request
/// cannot stall the display loop.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
    location: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentBlock,
    daily: DailyBlock,
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
    uv_index_max: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    apparent_temperature: Vec<f64>,
}

impl OpenMeteoProvider {
    pub fn new(
        latitude: f64,
        longitude: f64,
        location: String,
        timeout: Duration,
    ) -> WeatherResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            latitude,
            longitude,
            location,
        })
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch and normalize one snapshot, picking the apparent temperature
    /// for the given hour of day from the hourly block.
    pub async fn fetch_snapshot(&self, hour: usize) -> WeatherResult<WeatherSnapshot> {
        let url = format!("{}/v1/forecast", self.base_url);
        debug!(%url, "Requesting forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current_weather", "true".to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,sunrise,sunset,uv_index_max"
                        .to_string(),
                ),
                ("hourly", "apparent_temperature".to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::ProviderBadResponse(format!("HTTP {}", status)));
        }

        let payload: ForecastResponse = response.json().await?;
        normalize(payload, hour, &self.location)
    }
}

fn parse_time_of_day(raw: &str) -> WeatherResult<chrono::NaiveTime> {
    NaiveDateTime::parse_from_str(raw, API_TIME_FORMAT)
        .map(|dt| dt.time())
        .map_err(|e| WeatherError::ProviderBadResponse(format!("bad time '{}': {}", raw, e)))
}

fn normalize(
    payload: ForecastResponse,
    hour: usize,
    location: &str,
) -> WeatherResult<WeatherSnapshot> {
    let daily = &payload.daily;
    let (high, low, sunrise, sunset, uv) = match (
        daily.temperature_2m_max.first(),
        daily.temperature_2m_min.first(),
        daily.sunrise.first(),
        daily.sunset.first(),
        daily.uv_index_max.first(),
    ) {
        (Some(high), Some(low), Some(sunrise), Some(sunset), Some(uv)) => {
            (*high, *low, sunrise, sunset, *uv)
        }
        _ => {
            return Err(WeatherError::ProviderBadResponse(
                "daily block missing or empty".to_string(),
            ))
        }
    };

    let current = &payload.current_weather;

    // Hour-of-day index into the hourly block; fall back to the current
    // temperature when the block is short.
    let feels_like = payload
        .hourly
        .apparent_temperature
        .get(hour)
        .copied()
        .unwrap_or(current.temperature);

    Ok(WeatherSnapshot {
        temperature: current.temperature.round() as i32,
        feels_like: feels_like.round() as i32,
        high: high.round() as i32,
        low: low.round() as i32,
        description: condition_label(current.weathercode).to_string(),
        wind_speed: current.windspeed.round() as i32,
        uv_index: uv.round() as i32,
        sunrise: parse_time_of_day(sunrise)?,
        sunset: parse_time_of_day(sunset)?,
        location: location.to_string(),
    })
}

#[async_trait::async_trait]
impl WeatherSource for OpenMeteoProvider {
    fn name(&self) -> &str {
        "open-meteo"
    }

    async fn fetch(&self) -> anyhow::Result<WeatherSnapshot> {
        let hour = Local::now().hour() as usize;
        Ok(self.fetch_snapshot(hour).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXTURE: &str = r#"{
        "current_weather": {
            "temperature": 17.6,
            "windspeed": 13.8,
            "weathercode": 2,
            "time": "2024-01-06T19:00"
        },
        "daily": {
            "time": ["2024-01-06"],
            "temperature_2m_max": [21.8],
            "temperature_2m_min": [11.2],
            "sunrise": ["2024-01-06T06:05"],
            "sunset": ["2024-01-06T20:43"],
            "uv_index_max": [7.2]
        },
        "hourly": {
            "time": ["2024-01-06T00:00"],
            "apparent_temperature": [10.1, 10.0, 9.8, 9.5, 9.4, 9.6, 10.2,
                11.5, 12.9, 14.0, 15.1, 15.9, 16.4, 16.8, 16.9, 16.7, 16.2,
                15.5, 14.8, 14.2, 13.5, 12.8, 12.1, 11.6]
        }
    }"#;

    async fn provider_for(server: &MockServer) -> OpenMeteoProvider {
        OpenMeteoProvider::new(
            -37.8136,
            144.9631,
            "Melbourne".to_string(),
            Duration::from_secs(10),
        )
        .unwrap()
        .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn parses_full_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(FIXTURE, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = provider_for(&server).await.fetch_snapshot(19).await.unwrap();

        assert_eq!(snapshot.temperature, 18);
        assert_eq!(snapshot.feels_like, 14); // hourly[19] = 14.2
        assert_eq!(snapshot.high, 22);
        assert_eq!(snapshot.low, 11);
        assert_eq!(snapshot.description, "Partly cloudy");
        assert_eq!(snapshot.wind_speed, 14);
        assert_eq!(snapshot.uv_index, 7);
        assert_eq!(snapshot.sunrise.to_string(), "06:05:00");
        assert_eq!(snapshot.sunset.to_string(), "20:43:00");
        assert_eq!(snapshot.location, "Melbourne");
    }

    #[tokio::test]
    async fn short_hourly_block_falls_back_to_current_temperature() {
        let server = MockServer::start().await;
        let body = r#"{
            "current_weather": {"temperature": 17.6, "windspeed": 13.8, "weathercode": 2},
            "daily": {
                "temperature_2m_max": [21.8],
                "temperature_2m_min": [11.2],
                "sunrise": ["2024-01-06T06:05"],
                "sunset": ["2024-01-06T20:43"],
                "uv_index_max": [7.2]
            },
            "hourly": {"apparent_temperature": []}
        }"#;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let snapshot = provider_for(&server).await.fetch_snapshot(19).await.unwrap();
        assert_eq!(snapshot.feels_like, 18);
    }

    #[tokio::test]
    async fn http_error_is_bad_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = provider_for(&server).await.fetch_snapshot(0).await.unwrap_err();
        assert!(matches!(err, WeatherError::ProviderBadResponse(_)));
    }

    #[tokio::test]
    async fn empty_daily_block_is_bad_response() {
        let server = MockServer::start().await;
        let body = FIXTURE
            .replace("[21.8]", "[]")
            .replace("[11.2]", "[]");
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let err = provider_for(&server).await.fetch_snapshot(0).await.unwrap_err();
        assert!(matches!(err, WeatherError::ProviderBadResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        // A dropped MockServer shuts down asynchronously, so its port can
        // still accept for a moment; bind-then-drop a plain listener to get
        // a port that refuses connections deterministically.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let provider = OpenMeteoProvider::new(
            -37.8136,
            144.9631,
            "Melbourne".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
        .with_base_url(uri);

        let err = provider.fetch_snapshot(0).await.unwrap_err();
        assert!(matches!(err, WeatherError::ProviderUnavailable(_)));
    }
}
