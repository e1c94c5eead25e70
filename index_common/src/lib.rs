//!
//! Common types and core pipeline logic shared by the UI-Index bot.
//!
//! This crate aggregates:
//! - `error` — unified error type `IndexError` used across the workspace.
//! - `result` — handy `Result<T, IndexError>` alias.
//! - `model` — raw and rated asset records exchanged between pipeline stages.
//! - `engine` — UI Index computation and asset classification.
//! - `report` — report rendering, message chunking, and the dispatch seam.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod model;
pub mod engine;
pub mod report;

pub use error::IndexError;
pub use result::Result;
