use std::sync::Arc;

use clap::Parser;

use weatherbot_core::{Config, OpenMeteoProvider, RetryPolicy, TelegramClient, run_report};

use crate::scheduler;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbot", version, about = "Daily Telegram weather report bot")]
pub struct Cli {
    /// Send one report immediately at startup, before the first scheduled run.
    #[arg(long, env = "SEND_ON_STARTUP")]
    pub send_on_startup: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Arc::new(Config::from_env()?);

        tracing::info!(
            location = %config.location.name,
            recipients = config.telegram.chat_ids.len(),
            hour = config.schedule.hour,
            minute = config.schedule.minute,
            timezone = %config.schedule.timezone,
            "configuration loaded"
        );

        let provider = Arc::new(OpenMeteoProvider::new()?);
        let telegram = Arc::new(TelegramClient::new(config.telegram.bot_token.clone())?);

        // The handle must stay alive until shutdown — dropping it stops the job.
        let _scheduler = scheduler::start(
            Arc::clone(&config),
            Arc::clone(&provider),
            Arc::clone(&telegram),
        )
        .await?;

        if self.send_on_startup {
            tracing::info!("sending startup report");
            run_report(&config, provider.as_ref(), &telegram, &RetryPolicy::default()).await;
        }

        tracing::info!("bot is running, press Ctrl+C to stop");
        scheduler::shutdown_signal().await;
        tracing::info!("shutting down");

        Ok(())
    }
}
