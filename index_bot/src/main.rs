//! UI-Index Bot — fetches top cryptocurrency listings from a market-data
//! provider, computes the UI Index (market cap / 24h volume) per asset, and
//! delivers a filtered, formatted report to a Telegram chat.
//!
//! One cycle (a "tick") runs three stages in a straight line:
//!
//! - `CmcClient` — fetches a bounded list of top assets converted to one
//!   quote currency over blocking HTTP.
//! - `index_common::engine` — parses the numeric fields as decimals,
//!   computes the UI Index with banker's rounding, and classifies every
//!   asset as pinned, low-index, invalid, or excluded.
//! - `index_common::report` — renders fixed-width text lines, packs them
//!   into transport-sized blocks, and dispatches them through the
//!   `TelegramSender`.
//!
//! Scheduling and error isolation:
//! - `--once` runs a single tick and exits with its result; the default mode
//!   loops forever, sleeping `--interval-secs` between ticks.
//! - A provider failure aborts the tick with no partial report; in loop mode
//!   it is logged and the next tick proceeds on schedule.
//! - Per-asset problems never fail a tick (they land in the invalid list)
//!   and a failed block send never stops the remaining sends.
//! - Missing configuration terminates the process before any network I/O.
//! - Ctrl+C sets a shutdown flag that is polled between sleep slices.
//!
//! Usage example (CLI):
//! ```bash
//! CMC_API_KEY=... TELEGRAM_BOT_TOKEN=... TELEGRAM_CHAT_ID=... \
//!     index_bot --limit 200 --threshold 5 --once
//! ```
#![warn(missing_docs)]
mod args;
mod config;
mod provider;
mod sender;

use crate::args::Args;
use crate::config::BotConfig;
use crate::provider::CmcClient;
use crate::sender::TelegramSender;
use chrono::Utc;
use clap::Parser;
use index_common::report::MessageSink;
use index_common::{IndexError, Result, engine, report};
use log::{error, info};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

/// Run one complete fetch-compute-report cycle.
///
/// Returns an error only for provider/decode failures; rendering and
/// dispatch handle their own per-asset and per-send problems.
fn run_tick(args: &Args, provider: &CmcClient, sink: &dyn MessageSink) -> Result<()> {
    let assets = provider.fetch_listings(args.limit, &args.convert)?;
    info!("Fetched {} listings from the provider", assets.len());

    let classified = engine::classify(&assets, args.threshold);
    info!(
        "Classified {} assets: {} pinned, {} low-index, {} invalid",
        classified.total_checked,
        classified.pinned.len(),
        classified.low_index.len(),
        classified.invalid.len()
    );

    let blocks = report::build_report(&classified, args.threshold, Utc::now());
    let sent = report::dispatch_report(sink, &blocks);
    info!("Dispatched {}/{} report blocks", sent, blocks.len());
    Ok(())
}

/// Sleep for `total`, waking every second to honor the shutdown flag.
fn sleep_interruptible(total: Duration, shutdown: &AtomicBool) {
    const SLICE: Duration = Duration::from_secs(1);
    let deadline = Instant::now() + total;

    while !shutdown.load(Ordering::Relaxed) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        thread::sleep(SLICE.min(remaining));
    }
}

fn main() -> Result<(), IndexError> {
    init_logger();
    let args = Args::parse();

    // Fatal before any network activity.
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(e);
        }
    };

    let provider = CmcClient::new(&config.api_key)?;
    let sender = TelegramSender::new(&config.bot_token, &config.chat_id)?;

    if args.once {
        info!("Running a single cycle (limit={}, threshold={})", args.limit, args.threshold);
        return run_tick(&args, &provider, &sender);
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down bot...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl+C handler");
    }

    info!(
        "Bot is running: one cycle every {} seconds. Press Ctrl+C to exit.",
        args.interval_secs
    );
    while !shutdown.load(Ordering::Relaxed) {
        if let Err(e) = run_tick(&args, &provider, &sender) {
            error!("Cycle failed: {}", e);
        }
        sleep_interruptible(Duration::from_secs(args.interval_secs), &shutdown);
    }
    info!("Bot stopped.");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
