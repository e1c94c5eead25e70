//! Report rendering, message chunking, and dispatch.
//!
//! The reporter turns a `Classified` result into plain-text blocks sized for
//! the messaging transport and pushes them through the [`MessageSink`] seam:
//!
//! - one numbered line per reported asset, pinned group first, then a
//!   decorative separator, then the low-index group sorted ascending;
//! - lines are packed into blocks that stay under a conservative character
//!   budget (the transport's hard limit is around 4096 characters);
//! - an extra block lists invalid symbols when there are any, and a closing
//!   summary block carries the run counters and a UTC timestamp.
//!
//! A failed send is logged and swallowed so the remaining blocks still go out.

use chrono::{DateTime, Utc};
use log::error;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::asset::{Classified, RatedAsset};
use crate::result::Result;

/// Conservative per-message character budget, well under the transport's
/// ~4096-character hard limit.
pub const MESSAGE_BUDGET: usize = 1800;

/// Decorative line between the pinned group and the low-index group.
pub const SEPARATOR: &str = "─────────────";

/// Timestamp format used in the closing summary block.
const RUN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Destination for rendered report blocks (e.g. a messaging-bot API).
///
/// Implementations perform one network send per call. The dispatcher treats a
/// send failure as non-fatal, so implementations should return the error
/// rather than panic or retry.
pub trait MessageSink {
    /// Send one plain-text block to the configured destination.
    fn send(&self, text: &str) -> Result<()>;
}

/// Render one numbered asset line with fixed-width columns.
///
/// The price is shown with 2 fractional digits; the UI Index keeps the 2-digit
/// scale assigned by the engine.
fn asset_line(counter: usize, asset: &RatedAsset) -> String {
    let mut price = asset
        .price
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    price.rescale(2);
    let price = price.to_string();
    format!(
        "{}. {:<7} | {:>12} | {}",
        counter, asset.symbol, price, asset.ui_index
    )
}

/// Render the main report body: pinned lines, separator, low-index lines.
///
/// The line counter starts at 1, increments only over asset lines (the
/// separator is not numbered), and runs across the whole report rather than
/// per block.
pub fn render_lines(classified: &Classified) -> Vec<String> {
    let mut lines = Vec::with_capacity(classified.pinned.len() + classified.low_index.len() + 1);
    let mut counter = 1usize;

    for asset in &classified.pinned {
        lines.push(asset_line(counter, asset));
        counter += 1;
    }
    lines.push(SEPARATOR.to_string());
    for asset in &classified.low_index {
        lines.push(asset_line(counter, asset));
        counter += 1;
    }
    lines
}

/// Pack rendered lines into blocks that stay under `budget` characters.
///
/// Before a line is appended, the buffer is flushed as one block if adding the
/// line (plus its newline) would exceed the budget. The remainder is flushed
/// at the end, so the concatenation of all blocks equals the full report.
pub fn chunk_lines(lines: &[String], budget: usize) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut buf = String::new();

    for line in lines {
        if !buf.is_empty() && buf.chars().count() + line.chars().count() + 1 > budget {
            blocks.push(std::mem::take(&mut buf));
        }
        buf.push_str(line);
        buf.push('\n');
    }
    if !buf.is_empty() {
        blocks.push(buf);
    }
    blocks
}

/// Render the invalid-assets block, or `None` when every asset was rated.
pub fn invalid_block(invalid: &[String]) -> Option<String> {
    if invalid.is_empty() {
        return None;
    }
    let mut text = String::from("Invalid or incomplete assets:\n");
    for symbol in invalid {
        text.push_str(symbol);
        text.push('\n');
    }
    text.push_str(&format!("Count: {}", invalid.len()));
    Some(text)
}

/// Render the closing summary block with the run counters and timestamp.
pub fn summary_block(
    classified: &Classified,
    threshold: Decimal,
    run_time: DateTime<Utc>,
) -> String {
    format!(
        "Analysis finished\n\
         Assets checked: {}\n\
         UI Index < {}: {}\n\
         Invalid: {}\n\
         Run time: {}\n\
         Data: CoinMarketCap",
        classified.total_checked,
        threshold,
        classified.low_index.len(),
        classified.invalid.len(),
        run_time.format(RUN_TIME_FORMAT),
    )
}

/// Assemble the full ordered block sequence for one report.
///
/// Order: chunked main body, a "none found" notice when the low-index set is
/// empty, the invalid-assets block when present, and the closing summary.
pub fn build_report(
    classified: &Classified,
    threshold: Decimal,
    run_time: DateTime<Utc>,
) -> Vec<String> {
    let mut blocks = chunk_lines(&render_lines(classified), MESSAGE_BUDGET);

    if classified.low_index.is_empty() {
        blocks.push(format!(
            "No assets with UI Index below {} were found.",
            threshold
        ));
    }
    if let Some(block) = invalid_block(&classified.invalid) {
        blocks.push(block);
    }
    blocks.push(summary_block(classified, threshold, run_time));
    blocks
}

/// Dispatch blocks in order through `sink`.
///
/// A failed send is logged and the remaining blocks are still dispatched;
/// the number of successfully sent blocks is returned.
pub fn dispatch_report(sink: &dyn MessageSink, blocks: &[String]) -> usize {
    let mut sent = 0usize;
    for block in blocks {
        match sink.send(block) {
            Ok(()) => sent += 1,
            Err(e) => error!("Failed to send report block: {}", e),
        }
    }
    sent
}
