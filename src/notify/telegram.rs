// src/notify/telegram.rs
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::Notifier;

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Telegram Bot API delivery. One attempt per message; a failed send is the
/// orchestrator's problem to log, not ours to retry.
#[derive(Clone)]
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    client: Client,
    timeout: Duration,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            token,
            chat_id,
            client: Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build from TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(ENV_BOT_TOKEN).context("TELEGRAM_BOT_TOKEN not set")?;
        let chat_id = std::env::var(ENV_CHAT_ID).context("TELEGRAM_CHAT_ID not set")?;
        Ok(Self::new(token, chat_id))
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            disable_web_page_preview: true,
        };

        let rsp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .context("telegram sendMessage request")?;

        rsp.error_for_status()
            .map_err(|e| anyhow!("telegram sendMessage HTTP error: {e}"))?;
        Ok(())
    }
}
