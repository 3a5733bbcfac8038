//! Telegram Bot API client and recipient fan-out.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{BroadcastResult, DeliveryFailure};
use crate::retry::RetryPolicy;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause between consecutive recipients to stay clear of Telegram's
/// per-bot rate limits.
const INTER_SEND_DELAY: Duration = Duration::from_millis(100);

/// Failure of one send attempt.
#[derive(Debug, Error)]
pub enum SendError {
    /// Telegram answered but reported `ok: false`.
    #[error("telegram rejected message: {0}")]
    Rejected(String),

    /// Network, timeout, or body-decoding failure.
    #[error("failed to send Telegram message: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the Bot API `sendMessage` endpoint.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
    bot_token: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramClient {
    /// Client pointed at the production Bot API.
    pub fn new(bot_token: String) -> Result<Self, SendError> {
        Self::with_base_url(bot_token, DEFAULT_BASE_URL)
    }

    /// Client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(bot_token: String, base_url: &str) -> Result<Self, SendError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token,
        })
    }

    /// Send one message to one chat, without retry.
    ///
    /// The response envelope is parsed regardless of HTTP status — Telegram
    /// pairs non-2xx statuses with an `ok: false` body whose description is
    /// the useful part.
    pub async fn send_once(&self, chat_id: &str, text: &str) -> Result<(), SendError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);

        let res = self
            .http
            .post(&url)
            .json(&SendMessageRequest {
                chat_id,
                text,
                parse_mode: "HTML",
            })
            .send()
            .await?;

        let body: SendMessageResponse = res.json().await?;

        if !body.ok {
            return Err(SendError::Rejected(
                body.description
                    .unwrap_or_else(|| "Unknown Telegram error".to_string()),
            ));
        }

        Ok(())
    }

    /// Send one message with bounded retry; returns the last error once the
    /// attempt cap is exhausted.
    pub async fn send_with_retry(
        &self,
        chat_id: &str,
        text: &str,
        policy: &RetryPolicy,
    ) -> Result<(), SendError> {
        policy
            .run("telegram send", || self.send_once(chat_id, text))
            .await
    }

    /// Deliver `text` to every chat in order, one at a time.
    ///
    /// One recipient's failure never blocks the rest; the full
    /// success/failure partition is returned regardless of how many failed.
    pub async fn broadcast(
        &self,
        chat_ids: &[String],
        text: &str,
        policy: &RetryPolicy,
    ) -> BroadcastResult {
        let mut result = BroadcastResult::default();

        for (index, chat_id) in chat_ids.iter().enumerate() {
            match self.send_with_retry(chat_id, text, policy).await {
                Ok(()) => {
                    tracing::info!(chat_id = %chat_id, "message sent");
                    result.successful.push(chat_id.clone());
                }
                Err(err) => {
                    tracing::error!(chat_id = %chat_id, error = %err, "message delivery failed");
                    result.failed.push(DeliveryFailure {
                        chat_id: chat_id.clone(),
                        error: err.to_string(),
                    });
                }
            }

            if index + 1 < chat_ids.len() {
                tokio::time::sleep(INTER_SEND_DELAY).await;
            }
        }

        result
    }
}
