//! Environment configuration for the UI-Index bot.
//!
//! Three secrets are required: the provider API key, the Telegram bot token,
//! and the destination chat id. All are read once at process entry into a
//! `BotConfig` that is passed down by reference; a missing or empty variable
//! is a fatal startup error raised before any network activity.
use index_common::{IndexError, Result};

/// Environment variable holding the market-data provider API key.
pub const ENV_API_KEY: &str = "CMC_API_KEY";
/// Environment variable holding the Telegram bot token.
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the destination chat id.
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Secrets and identifiers loaded from the process environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// API key sent to the market-data provider.
    pub api_key: String,
    /// Telegram bot token used to build the send-message URL.
    pub bot_token: String,
    /// Telegram chat id the report is delivered to.
    pub chat_id: String,
}

impl BotConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary lookup function.
    ///
    /// `from_env` delegates here; tests supply a map-backed lookup instead of
    /// touching the process environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            api_key: required(&get, ENV_API_KEY)?,
            bot_token: required(&get, ENV_BOT_TOKEN)?,
            chat_id: required(&get, ENV_CHAT_ID)?,
        })
    }
}

/// Fetch one required variable, rejecting absent or blank values.
fn required(get: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<String> {
    match get(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(IndexError::MissingEnv(name)),
    }
}
