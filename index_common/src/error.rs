//! Error types shared between the core crate and the bot binary.
//!
//! The `IndexError` enum unifies the failure cases of one tick: missing
//! configuration, provider request failures, response decoding, and message
//! transport errors, allowing crates to propagate a single error type.
use thiserror::Error;

/// Unified error type shared by the core crate and the bot binary.
#[derive(Error, Debug)]
pub enum IndexError {
    /// A required environment variable is absent or empty. Fatal at startup,
    /// before any network activity.
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    /// The market-data provider request failed (network, timeout, non-2xx).
    /// Aborts the current tick; no partial report is sent.
    #[error("Provider request failed: {0}")]
    Provider(String),

    /// Failure while decoding a JSON body via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A single message send to the transport failed. Logged and swallowed
    /// by the dispatcher; never aborts remaining sends.
    #[error("Transport send failed: {0}")]
    Transport(String),
}
