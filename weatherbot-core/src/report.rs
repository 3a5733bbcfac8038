//! One scheduled run: fetch, format, broadcast, report.

use chrono::Utc;

use crate::config::Config;
use crate::format::{format_failure, format_report};
use crate::model::BroadcastResult;
use crate::provider::{ForecastProvider, fetch_with_retry};
use crate::retry::RetryPolicy;
use crate::telegram::TelegramClient;

/// Run one report cycle end to end.
///
/// A failed fetch downgrades to the fallback message rather than aborting;
/// delivery failures are collected and logged. This function never errors —
/// every run completes and hands back the per-recipient partition.
pub async fn run_report(
    config: &Config,
    provider: &dyn ForecastProvider,
    telegram: &TelegramClient,
    policy: &RetryPolicy,
) -> BroadcastResult {
    let location = &config.location;

    tracing::info!(location = %location.name, "fetching weather");

    let text = match fetch_with_retry(provider, &location.coordinate, policy).await {
        Ok(snapshot) => {
            tracing::info!(
                temperature = snapshot.temperature,
                weather_code = snapshot.weather_code,
                condition = %snapshot.condition,
                "weather data fetched"
            );
            format_report(&snapshot, &location.name, Utc::now())
        }
        Err(err) => {
            tracing::error!(error = %err, "weather fetch failed, sending fallback message");
            format_failure(&location.name, &err.to_string())
        }
    };

    let result = telegram
        .broadcast(&config.telegram.chat_ids, &text, policy)
        .await;

    tracing::info!(
        sent = result.successful.len(),
        failed = result.failed.len(),
        "report run complete"
    );
    for failure in &result.failed {
        tracing::error!(chat_id = %failure.chat_id, error = %failure.error, "delivery failed");
    }

    result
}
