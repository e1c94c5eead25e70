//! Market-data provider HTTP client.
//!
//! This module wraps the provider's `listings/latest` REST endpoint: top
//! assets by market cap, converted into one quote currency, authenticated by
//! a static API-key header. The response nests the numeric fields per quote
//! currency; `flatten_listings` lifts the requested currency's sub-record
//! into flat `RawAsset` values for the engine. Any request or decode failure
//! aborts the current cycle — there is no retry within a cycle.
use std::collections::HashMap;
use std::time::Duration;

use index_common::model::asset::RawAsset;
use index_common::{IndexError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Base URL of the provider REST API.
const CMC_BASE: &str = "https://pro-api.coinmarketcap.com/v1";
/// Bounded timeout for the listings request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Top-level body of the listings endpoint.
#[derive(Debug, Deserialize)]
struct ListingsResponse {
    #[serde(default)]
    data: Vec<Listing>,
}

/// One asset record with its per-quote-currency sub-records.
#[derive(Debug, Deserialize)]
struct Listing {
    symbol: String,
    #[serde(default)]
    quote: HashMap<String, QuoteFields>,
}

/// Numeric fields of one quote-currency sub-record. Kept as raw JSON values;
/// the engine parses them and demotes failures to the invalid list.
#[derive(Debug, Deserialize)]
struct QuoteFields {
    price: Option<Value>,
    volume_24h: Option<Value>,
    market_cap: Option<Value>,
}

/// Blocking HTTP client for the market-data provider.
pub struct CmcClient {
    http: reqwest::blocking::Client,
    api_key: String,
}

impl CmcClient {
    /// Build a client with the bounded request timeout.
    pub fn new(api_key: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| IndexError::Provider(e.to_string()))?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
        })
    }

    /// Fetch the top `limit` assets converted to `convert`.
    ///
    /// A network failure, timeout, or non-2xx status maps to
    /// `IndexError::Provider` and aborts the caller's cycle.
    pub fn fetch_listings(&self, limit: u32, convert: &str) -> Result<Vec<RawAsset>> {
        let url = format!("{}/cryptocurrency/listings/latest", CMC_BASE);
        let response = self
            .http
            .get(&url)
            .header("Accepts", "application/json")
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .query(&[("limit", limit.to_string()), ("convert", convert.to_string())])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| IndexError::Provider(e.to_string()))?;

        let text = response
            .text()
            .map_err(|e| IndexError::Provider(e.to_string()))?;
        let body: ListingsResponse = serde_json::from_str(&text)?;
        Ok(flatten_listings(body, convert))
    }
}

/// Lift the requested quote currency's fields into flat `RawAsset` records.
///
/// An asset without a sub-record for `convert` still appears in the output,
/// with absent fields, so the engine counts and reports it as invalid.
fn flatten_listings(body: ListingsResponse, convert: &str) -> Vec<RawAsset> {
    body.data
        .into_iter()
        .map(|listing| {
            let Listing { symbol, mut quote } = listing;
            match quote.remove(convert) {
                Some(fields) => RawAsset {
                    symbol,
                    price: fields.price,
                    volume_24h: fields.volume_24h,
                    market_cap: fields.market_cap,
                },
                None => RawAsset {
                    symbol,
                    price: None,
                    volume_24h: None,
                    market_cap: None,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_the_requested_quote_currency() {
        let body: ListingsResponse = serde_json::from_value(json!({
            "status": {"error_code": 0},
            "data": [
                {
                    "symbol": "BTC",
                    "name": "Bitcoin",
                    "quote": {
                        "USDT": {
                            "price": 65000.1234,
                            "volume_24h": "31000000000",
                            "market_cap": 1.28e12,
                            "percent_change_24h": -1.2
                        }
                    }
                },
                {
                    "symbol": "NEW",
                    "quote": {}
                }
            ]
        }))
        .unwrap();

        let assets = flatten_listings(body, "USDT");
        assert_eq!(assets.len(), 2);

        assert_eq!(assets[0].symbol, "BTC");
        assert_eq!(assets[0].price, Some(json!(65000.1234)));
        assert_eq!(assets[0].volume_24h, Some(json!("31000000000")));

        // No USDT sub-record: fields stay absent, the engine reports it invalid.
        assert_eq!(assets[1].symbol, "NEW");
        assert!(assets[1].price.is_none());
        assert!(assets[1].volume_24h.is_none());
        assert!(assets[1].market_cap.is_none());
    }

    #[test]
    fn tolerates_null_numeric_fields() {
        let body: ListingsResponse = serde_json::from_value(json!({
            "data": [
                {
                    "symbol": "ODD",
                    "quote": {"USDT": {"price": null, "volume_24h": 5, "market_cap": null}}
                }
            ]
        }))
        .unwrap();

        let assets = flatten_listings(body, "USDT");
        // serde collapses JSON null into None for Option fields.
        assert!(assets[0].price.is_none());
        assert!(assets[0].market_cap.is_none());
        assert_eq!(assets[0].volume_24h, Some(json!(5)));
    }
}
