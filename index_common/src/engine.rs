//! UI Index computation and asset classification.
//!
//! The engine takes the raw listings exactly as fetched and produces a
//! `Classified` result: pinned reference assets, low-index assets sorted
//! ascending, and the symbols that could not be rated. Per-asset problems
//! never fail the tick — an asset with unparseable or non-positive inputs is
//! recorded as invalid and processing continues.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::model::asset::{Classified, RatedAsset, RawAsset};

/// Reference symbols that are always reported first and never filtered by
/// the threshold, in provider response order.
pub const PINNED_SYMBOLS: &[&str] = &["BTC", "USDT"];

/// Parse a raw provider field into a `Decimal`.
///
/// The provider serves numeric fields as JSON numbers or as strings; both are
/// accepted, including scientific notation for very small prices. Any other
/// shape (absent, null, bool, ...) yields `None`.
fn parse_decimal(value: Option<&Value>) -> Option<Decimal> {
    let text = match value? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Classify a fetch response against `threshold`.
///
/// Every asset lands in exactly one bucket:
/// - *pinned* — symbol in [`PINNED_SYMBOLS`], provider order preserved;
/// - *low index* — UI Index strictly below `threshold`, sorted ascending
///   (stable, so ties keep provider order);
/// - *invalid* — a field failed to parse, volume ≤ 0, or market cap ≤ 0;
/// - excluded — valid but at or above the threshold, dropped silently.
///
/// The UI Index is `market_cap / volume_24h` rounded to 2 fractional digits
/// with banker's rounding. The volume > 0 check above rules out division by
/// zero; an overflowing division demotes the asset to invalid.
pub fn classify(assets: &[RawAsset], threshold: Decimal) -> Classified {
    let mut out = Classified {
        total_checked: assets.len(),
        ..Default::default()
    };

    for asset in assets {
        let parsed = (
            parse_decimal(asset.price.as_ref()),
            parse_decimal(asset.volume_24h.as_ref()),
            parse_decimal(asset.market_cap.as_ref()),
        );
        let (Some(price), Some(volume), Some(market_cap)) = parsed else {
            out.invalid.push(asset.symbol.clone());
            continue;
        };

        if volume <= Decimal::ZERO || market_cap <= Decimal::ZERO {
            out.invalid.push(asset.symbol.clone());
            continue;
        }

        let Some(ratio) = market_cap.checked_div(volume) else {
            out.invalid.push(asset.symbol.clone());
            continue;
        };
        let mut ui_index = ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        // Keep a fixed 2-digit scale so whole-number ratios render as "2.00".
        ui_index.rescale(2);

        let rated = RatedAsset {
            symbol: asset.symbol.clone(),
            price,
            ui_index,
        };

        if PINNED_SYMBOLS.contains(&asset.symbol.as_str()) {
            out.pinned.push(rated);
        } else if ui_index < threshold {
            out.low_index.push(rated);
        }
    }

    // Stable sort: ties keep provider response order.
    out.low_index.sort_by(|a, b| a.ui_index.cmp(&b.ui_index));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn raw(symbol: &str, price: Value, volume: Value, market_cap: Value) -> RawAsset {
        RawAsset {
            symbol: symbol.to_string(),
            price: Some(price),
            volume_24h: Some(volume),
            market_cap: Some(market_cap),
        }
    }

    #[test]
    fn classifies_pinned_low_and_invalid() {
        let assets = vec![
            raw("BTC", json!(2.0), json!(50), json!(100)),
            raw("XYZ", json!(1.0), json!(5), json!(10)),
            raw("BAD", json!(1.0), json!(0), json!(10)),
        ];
        let out = classify(&assets, d("5"));

        assert_eq!(out.total_checked, 3);
        assert_eq!(out.pinned.len(), 1);
        assert_eq!(out.pinned[0].symbol, "BTC");
        assert_eq!(out.pinned[0].ui_index, d("2.00"));
        assert_eq!(out.low_index.len(), 1);
        assert_eq!(out.low_index[0].symbol, "XYZ");
        assert_eq!(out.low_index[0].ui_index, d("2.00"));
        assert_eq!(out.invalid, vec!["BAD".to_string()]);
    }

    #[test]
    fn high_index_is_excluded_silently() {
        let assets = vec![raw("THIN", json!(1.0), json!(0.003), json!(1))];
        let out = classify(&assets, d("5"));

        // UI = 1 / 0.003 = 333.33..., at/above the threshold: dropped.
        assert_eq!(out.total_checked, 1);
        assert!(out.pinned.is_empty());
        assert!(out.low_index.is_empty());
        assert!(out.invalid.is_empty());
    }

    #[test]
    fn rounds_half_to_even() {
        let out = classify(
            &[
                raw("AAA", json!(1.0), json!(200), json!(25)),
                raw("BBB", json!(1.0), json!(200), json!(27)),
            ],
            d("5"),
        );
        // 0.125 rounds down to 0.12, 0.135 rounds up to 0.14.
        assert_eq!(out.low_index[0].ui_index, d("0.12"));
        assert_eq!(out.low_index[1].ui_index, d("0.14"));
    }

    #[test]
    fn low_index_sorted_ascending_with_stable_ties() {
        let assets = vec![
            raw("CCC", json!(1.0), json!(10), json!(30)),
            raw("AAA", json!(1.0), json!(10), json!(10)),
            raw("BBB", json!(1.0), json!(10), json!(10)),
        ];
        let out = classify(&assets, d("5"));

        let symbols: Vec<&str> = out.low_index.iter().map(|a| a.symbol.as_str()).collect();
        // AAA and BBB tie at 1.00 and keep response order; CCC (3.00) goes last.
        assert_eq!(symbols, vec!["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn pinned_takes_precedence_over_threshold() {
        let assets = vec![raw("BTC", json!(1.0), json!(1), json!(1000))];
        let out = classify(&assets, d("5"));

        assert_eq!(out.pinned.len(), 1);
        assert_eq!(out.pinned[0].ui_index, d("1000.00"));
        assert!(out.low_index.is_empty());
    }

    #[test]
    fn unparseable_fields_are_invalid() {
        let assets = vec![
            raw("STR", json!("not-a-number"), json!(10), json!(10)),
            raw("NUL", json!(null), json!(10), json!(10)),
            raw("BOOL", json!(1.0), json!(true), json!(10)),
            RawAsset {
                symbol: "NONE".to_string(),
                price: None,
                volume_24h: Some(json!(10)),
                market_cap: Some(json!(10)),
            },
        ];
        let out = classify(&assets, d("5"));

        assert_eq!(out.invalid, vec!["STR", "NUL", "BOOL", "NONE"]);
        assert!(out.low_index.is_empty());
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let assets = vec![raw("STR", json!("1.50"), json!("100"), json!("200"))];
        let out = classify(&assets, d("5"));

        assert_eq!(out.low_index.len(), 1);
        assert_eq!(out.low_index[0].price, d("1.50"));
        assert_eq!(out.low_index[0].ui_index, d("2.00"));
    }

    #[test]
    fn non_positive_values_are_invalid() {
        let assets = vec![
            raw("NEGMC", json!(1.0), json!(10), json!(-5)),
            raw("NEGVOL", json!(1.0), json!(-10), json!(5)),
            raw("ZEROMC", json!(1.0), json!(10), json!(0)),
        ];
        let out = classify(&assets, d("5"));

        assert_eq!(out.invalid, vec!["NEGMC", "NEGVOL", "ZEROMC"]);
    }

    #[test]
    fn scientific_notation_prices_parse() {
        let assets = vec![raw("TINY", json!(2.5e-8), json!(10), json!(20))];
        let out = classify(&assets, d("5"));

        assert_eq!(out.low_index.len(), 1);
        assert_eq!(out.low_index[0].ui_index, d("2.00"));
    }
}
