use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::{Coordinate, WeatherSnapshot};
use crate::retry::RetryPolicy;

pub mod open_meteo;

/// Failure of one forecast fetch attempt.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Provider answered with a non-success HTTP status.
    #[error("weather API returned {status}: {status_text}")]
    Status { status: u16, status_text: String },

    /// Provider answered 200 but the daily arrays were empty, so there is
    /// no "today" entry to build a snapshot from.
    #[error("weather API response contained no daily forecast data")]
    EmptyForecast,

    /// Response body did not match the expected shape.
    #[error("failed to parse weather response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Network, timeout, or body-read failure.
    #[error("failed to fetch weather: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A source of weather snapshots for a coordinate.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, coord: &Coordinate) -> Result<WeatherSnapshot, WeatherError>;
}

/// Fetch through the given provider with bounded retry.
///
/// Every failure kind is retried identically; after the attempt cap only the
/// last error is returned.
pub async fn fetch_with_retry(
    provider: &dyn ForecastProvider,
    coord: &Coordinate,
    policy: &RetryPolicy,
) -> Result<WeatherSnapshot, WeatherError> {
    policy.run("weather fetch", || provider.fetch(coord)).await
}
