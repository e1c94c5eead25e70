//! Command-line arguments for the UI-Index bot.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use rust_decimal::Decimal;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of top assets (by market cap) to fetch from the provider.
    #[clap(long, default_value_t = 600)]
    pub limit: u32,

    /// Quote currency the provider converts prices/volumes/market caps into.
    #[clap(long, default_value = "USDT")]
    pub convert: String,

    /// UI Index cutoff: assets strictly below this value are reported.
    #[clap(long, default_value = "5")]
    pub threshold: Decimal,

    /// Run a single fetch-compute-report cycle and exit.
    #[clap(long)]
    pub once: bool,

    /// Seconds to sleep between cycles in the long-running mode.
    #[clap(long, default_value_t = 18000)]
    pub interval_secs: u64,
}
