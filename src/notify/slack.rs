//! Slack Web API notifier.
//!
//! # Responsibilities
//! - Keep a single board message up to date in one channel
//! - Thread alerts under that board message
//! - Remember the board message across restarts
//!
//! # Design Decisions
//! - `chat.update` first; on any failure fall back to `chat.postMessage`
//! - Slack reports most failures as HTTP 200 with `ok: false`, so both are checked

use serde::Deserialize;
use serde_json::{json, Value};

use crate::board::Board;
use crate::notify::store::BoardHandleStore;
use crate::notify::{Notifier, NotifyError};

#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Posts the board and alerts to a Slack channel.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    client: reqwest::Client,
    api_base: String,
    token: String,
    channel: String,
    store: BoardHandleStore,
}

impl SlackNotifier {
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        token: impl Into<String>,
        channel: impl Into<String>,
        store: BoardHandleStore,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            channel: channel.into(),
            store,
        }
    }

    pub fn store(&self) -> &BoardHandleStore {
        &self.store
    }

    async fn call(&self, method: &str, body: Value) -> Result<SlackResponse, NotifyError> {
        let response = self
            .client
            .post(format!("{}/{}", self.api_base, method))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: SlackResponse = response.json().await?;
        if !parsed.ok {
            return Err(NotifyError::Api {
                method: method.to_string(),
                error: parsed.error.unwrap_or_else(|| "unknown_error".to_string()),
            });
        }
        Ok(parsed)
    }

    async fn post_board(&self, board: &Board) -> Result<(), NotifyError> {
        let response = self
            .call(
                "chat.postMessage",
                json!({
                    "channel": self.channel,
                    "text": board.text,
                    "blocks": board.blocks,
                }),
            )
            .await?;

        let handle = response
            .ts
            .ok_or_else(|| NotifyError::MissingHandle("chat.postMessage".to_string()))?;
        self.store.save(&handle)?;
        tracing::info!(ts = %handle, "Posted new board message");
        Ok(())
    }
}

impl Notifier for SlackNotifier {
    async fn upsert_board(&self, board: &Board) -> Result<(), NotifyError> {
        let Some(handle) = self.store.load() else {
            return self.post_board(board).await;
        };

        let updated = self
            .call(
                "chat.update",
                json!({
                    "channel": self.channel,
                    "ts": handle,
                    "text": board.text,
                    "blocks": board.blocks,
                }),
            )
            .await;

        match updated {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(ts = %handle, error = %e, "Board update failed, posting a new board");
                self.post_board(board).await
            }
        }
    }

    async fn post_alert(&self, text: &str) -> Result<(), NotifyError> {
        let handle = self.store.load().ok_or(NotifyError::NoBoard)?;
        self.call(
            "chat.postMessage",
            json!({
                "channel": self.channel,
                "text": text,
                "thread_ts": handle,
            }),
        )
        .await?;
        Ok(())
    }
}
