//! Daily job registration and process shutdown.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use weatherbot_core::{Config, OpenMeteoProvider, RetryPolicy, TelegramClient, run_report};

/// Register the daily report job and start the scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. An invalid cron expression or scheduler
/// failure aborts startup.
pub async fn start(
    config: Arc<Config>,
    provider: Arc<OpenMeteoProvider>,
    telegram: Arc<TelegramClient>,
) -> anyhow::Result<JobScheduler> {
    let cron = daily_cron(config.schedule.hour, config.schedule.minute);
    let timezone = config.schedule.timezone;

    let mut scheduler = JobScheduler::new().await?;

    let job_config = Arc::clone(&config);
    let job = Job::new_async_tz(cron.as_str(), timezone, move |_uuid, _lock| {
        let config = Arc::clone(&job_config);
        let provider = Arc::clone(&provider);
        let telegram = Arc::clone(&telegram);

        Box::pin(async move {
            tracing::info!("starting scheduled weather report run");
            run_report(&config, provider.as_ref(), &telegram, &RetryPolicy::default()).await;
        })
    })?;

    let job_id = scheduler.add(job).await?;
    scheduler.start().await?;

    match scheduler.next_tick_for_job(job_id).await {
        Ok(Some(next)) => tracing::info!(
            cron = %cron,
            timezone = %timezone,
            next_run = %next.with_timezone(&timezone).format("%Y-%m-%d %H:%M:%S"),
            "registered daily report job"
        ),
        _ => tracing::info!(cron = %cron, timezone = %timezone, "registered daily report job"),
    }

    Ok(scheduler)
}

/// Six-field cron expression firing once daily at `hour:minute`.
fn daily_cron(hour: u8, minute: u8) -> String {
    format!("0 {minute} {hour} * * *")
}

/// Resolves when the process receives SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_cron_places_minute_and_hour() {
        assert_eq!(daily_cron(6, 45), "0 45 6 * * *");
        assert_eq!(daily_cron(0, 0), "0 0 0 * * *");
        assert_eq!(daily_cron(23, 59), "0 59 23 * * *");
    }
}
