//! Binary crate for the daily weather report bot.
//!
//! This crate focuses on:
//! - Process bootstrap (env file, logging)
//! - Registering the daily report job
//! - Graceful shutdown on SIGINT/SIGTERM

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod scheduler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
