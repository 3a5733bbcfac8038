use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ForecastProvider, WeatherError};
use crate::conditions::condition_for;
use crate::format::REPORT_TIMEZONE;
use crate::model::{Coordinate, WeatherSnapshot};

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Current-conditions fields requested from the forecast endpoint.
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code";
/// Daily aggregate fields requested from the forecast endpoint.
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,uv_index_max";

/// Open-Meteo forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    base_url: String,
}

impl OpenMeteoProvider {
    /// Client pointed at the production Open-Meteo API.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: &str) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_forecast(&self, coord: &Coordinate) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        let latitude = coord.latitude.to_string();
        let longitude = coord.longitude.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", REPORT_TIMEZONE.name()),
                ("forecast_days", "1"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = res.text().await?;
        let parsed: ForecastResponse = serde_json::from_str(&body)?;

        // Daily arrays are indexed at [0] for "today"; with forecast_days=1
        // they should hold exactly one entry each.
        let (Some(&max), Some(&min), Some(&uv)) = (
            parsed.daily.temperature_2m_max.first(),
            parsed.daily.temperature_2m_min.first(),
            parsed.daily.uv_index_max.first(),
        ) else {
            return Err(WeatherError::EmptyForecast);
        };

        let code = parsed.current.weather_code;

        Ok(WeatherSnapshot {
            temperature: parsed.current.temperature_2m.round() as i32,
            temperature_max: max.round() as i32,
            temperature_min: min.round() as i32,
            humidity: parsed.current.relative_humidity_2m.round() as i32,
            uv_index: uv.round() as i32,
            weather_code: code,
            condition: condition_for(code).to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    uv_index_max: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: OmCurrent,
    daily: OmDaily,
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch(&self, coord: &Coordinate) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(
            latitude = coord.latitude,
            longitude = coord.longitude,
            "requesting forecast"
        );
        self.fetch_forecast(coord).await
    }
}
