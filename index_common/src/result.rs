//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `IndexError`, so functions can simply return `Result<T>`.
use crate::error::IndexError;

/// Workspace-wide `Result` alias with `IndexError` as the default error.
pub type Result<T, E = IndexError> = std::result::Result<T, E>;
