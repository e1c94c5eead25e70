//! Data model shared by the pipeline stages.
pub mod asset;
