//! Telegram message transport.
//!
//! Implements the [`MessageSink`] seam over the Telegram Bot API
//! `sendMessage` endpoint: one HTTP POST per report block with a form body of
//! `chat_id` and `text`. A failure maps to `IndexError::Transport`; the
//! report dispatcher logs it and keeps sending the remaining blocks.
use std::time::Duration;

use index_common::report::MessageSink;
use index_common::{IndexError, Result};
use log::debug;

/// Base URL of the Telegram Bot API.
const TG_BASE: &str = "https://api.telegram.org";
/// Bounded timeout for one send-message request.
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocking Telegram Bot API client bound to one chat.
pub struct TelegramSender {
    http: reqwest::blocking::Client,
    url: String,
    chat_id: String,
}

impl TelegramSender {
    /// Build a sender for the given bot token and destination chat.
    pub fn new(bot_token: &str, chat_id: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| IndexError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            url: format!("{}/bot{}/sendMessage", TG_BASE, bot_token),
            chat_id: chat_id.to_string(),
        })
    }
}

impl MessageSink for TelegramSender {
    fn send(&self, text: &str) -> Result<()> {
        self.http
            .post(&self.url)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| IndexError::Transport(e.to_string()))?;
        debug!("Sent {} characters to chat {}", text.chars().count(), self.chat_id);
        Ok(())
    }
}
