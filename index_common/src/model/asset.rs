//! Asset records exchanged between the fetcher, the ratio engine, and the
//! reporter.
//!
//! A `RawAsset` is one listing exactly as fetched: the numeric fields are kept
//! as raw JSON values because the provider serves them as numbers, strings, or
//! nulls depending on the asset. Parsing into `Decimal` happens in the engine,
//! where a failure demotes the asset to the invalid list instead of failing
//! the tick.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// One asset listing as fetched from the provider, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAsset {
    /// Symbol identifier (e.g. `BTC`).
    pub symbol: String,
    /// Last price in the quote currency; number, string, or absent.
    pub price: Option<Value>,
    /// 24-hour trading volume in the quote currency; number, string, or absent.
    pub volume_24h: Option<Value>,
    /// Market capitalization in the quote currency; number, string, or absent.
    pub market_cap: Option<Value>,
}

/// A validated asset with its computed UI Index (market cap / 24h volume).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedAsset {
    /// Symbol identifier.
    pub symbol: String,
    /// Parsed price in the quote currency.
    pub price: Decimal,
    /// UI Index rounded to 2 fractional digits, half-even.
    pub ui_index: Decimal,
}

/// Classification of one fetch response: every fetched asset lands in exactly
/// one of the pinned, low-index, invalid, or (silently dropped) excluded sets.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    /// Reference assets, kept in provider response order, never filtered.
    pub pinned: Vec<RatedAsset>,
    /// Assets with UI Index below the threshold, sorted ascending by index.
    pub low_index: Vec<RatedAsset>,
    /// Symbols with unparseable or non-positive inputs.
    pub invalid: Vec<String>,
    /// Total number of assets in the fetch response.
    pub total_checked: usize,
}
