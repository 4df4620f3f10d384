//! Outbound transport client.
//!
//! Implements the `ChatTransport` port over the bot API: prompts become
//! messages with one-option-per-row reply keyboards, calendars become
//! inline keyboards keyed by callback payloads.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::domain::foundation::ChatId;
use crate::domain::survey::{CalendarGrid, Reply};
use crate::ports::{ChatTransport, TransportError};

/// Configuration for the bot API client.
#[derive(Debug, Clone)]
pub struct TelegramApiConfig {
    /// API host, e.g. "https://api.telegram.org".
    pub api_base: String,

    /// The bot credential issued by the transport.
    pub bot_token: SecretString,

    /// Bound on each send call.
    pub request_timeout: Duration,
}

/// Minimal bot API response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Production `ChatTransport` implementation.
pub struct TelegramApi {
    config: TelegramApiConfig,
    http: reqwest::Client,
}

impl TelegramApi {
    pub fn new(config: TelegramApiConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token.expose_secret(),
            method
        )
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> Result<(), TransportError> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("transport request failed: {e}");
                TransportError::Transport(e.to_string())
            })?;

        let parsed: ApiResponse = response.json().await.map_err(|e| {
            tracing::error!("unexpected transport response shape: {e}");
            TransportError::Transport(e.to_string())
        })?;

        if !parsed.ok {
            let description = parsed.description.unwrap_or_else(|| "unknown error".to_string());
            tracing::error!(%description, "transport rejected the send");
            return Err(TransportError::Api(description));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramApi {
    async fn send_reply(&self, chat: ChatId, reply: &Reply) -> Result<(), TransportError> {
        let mut body = json!({
            "chat_id": chat.as_i64(),
            "text": reply.text(),
            "parse_mode": "Markdown",
        });

        match reply {
            Reply::Prompt { options, .. } | Reply::Notice { options, .. } => {
                if !options.is_empty() {
                    body["reply_markup"] = reply_keyboard(options);
                }
            }
            Reply::Calendar { grid, .. } => {
                body["reply_markup"] = inline_keyboard(grid);
            }
        }

        self.call("sendMessage", body).await
    }
}

impl std::fmt::Debug for TelegramApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramApi")
            .field("api_base", &self.config.api_base)
            .finish_non_exhaustive()
    }
}

/// One tappable option per row, sized to content.
fn reply_keyboard(options: &[String]) -> serde_json::Value {
    let rows: Vec<Vec<serde_json::Value>> = options
        .iter()
        .map(|option| vec![json!({ "text": option })])
        .collect();
    json!({ "keyboard": rows, "resize_keyboard": true })
}

/// The calendar grid as an inline keyboard with callback payloads.
fn inline_keyboard(grid: &CalendarGrid) -> serde_json::Value {
    let rows: Vec<Vec<serde_json::Value>> = grid
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| json!({ "text": button.label, "callback_data": button.payload }))
                .collect()
        })
        .collect();
    json!({ "inline_keyboard": rows })
}
