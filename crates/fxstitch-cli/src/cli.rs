//! CLI argument definitions for fxstitch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `symbols` | List available currency codes and long names |
//! | `latest` | Fetch the current rate snapshot for a base currency |
//! | `timeseries` | Fetch and stitch a daily rate series over a span |
//!
//! # Examples
//!
//! ```bash
//! # List every currency the API knows about
//! fxstitch symbols
//!
//! # Spot rates
//! fxstitch latest --base GBP --symbols EUR,USD
//!
//! # Two years of daily rates, stitched from two upstream windows
//! fxstitch timeseries --base GBP --symbols EUR --period 2y --pretty
//!
//! # Explicit dates, with the best-months ranking appended
//! fxstitch timeseries --base GBP --symbols EUR \
//!     --start 2019-03-01 --end 2022-03-01 --best-months
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Fixer exchange-rate retrieval with multi-year timeseries stitching.
#[derive(Debug, Parser)]
#[command(name = "fxstitch", version, about)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Fixer API key. Falls back to --config, then FXSTITCH_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Path to a JSON config file of the shape {"api_key": "..."}.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available currency symbols and their long names.
    Symbols,
    /// Fetch the latest rate snapshot.
    Latest(LatestArgs),
    /// Fetch a daily rate series, stitching spans wider than one year.
    Timeseries(TimeseriesArgs),
}

#[derive(Debug, Args)]
pub struct LatestArgs {
    /// Base three-letter currency code.
    #[arg(long)]
    pub base: String,

    /// Comma-separated target currency codes.
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TimeseriesArgs {
    /// Base three-letter currency code.
    #[arg(long)]
    pub base: String,

    /// Comma-separated target currency codes.
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Symbolic period ending today: 1y, 2y, 3y, or 5y.
    ///
    /// Takes precedence over --start/--end when both are given.
    #[arg(long)]
    pub period: Option<String>,

    /// Start date, YYYY-MM-DD.
    #[arg(long)]
    pub start: Option<String>,

    /// End date, YYYY-MM-DD.
    #[arg(long)]
    pub end: Option<String>,

    /// Append a per-symbol ranking of months by average rate.
    #[arg(long, default_value_t = false)]
    pub best_months: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}
