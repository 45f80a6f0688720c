//! Command-line arguments for the market client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use market_common::net::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the market-data API.
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Pages the client can paint.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ticker tape, home lists, movers, top-20 table and news, refreshed periodically.
    Board {
        /// Seconds between market-data refreshes.
        #[clap(long, default_value_t = 30)]
        interval_secs: u64,

        /// Render a single pass and exit.
        #[clap(long)]
        once: bool,

        /// Re-fetch the news on every refresh instead of once per session.
        #[clap(long)]
        reload_news: bool,
    },
    /// Trade plan for a ticker.
    Analyze {
        /// Ticker to analyse (e.g. `BTC` or `BTC-USD`).
        ticker: String,
    },
    /// Plan and profit/loss projection for an investment in a coin.
    Coin {
        /// Coin ticker.
        ticker: String,
        /// Amount to invest, in dollars.
        #[clap(allow_negative_numbers = true)]
        investment: f64,
    },
    /// Current recommendations.
    Recommend,
    /// Latest news headlines.
    News,
    /// Toggle tickers on the watchlist.
    Watch {
        /// Tickers to toggle.
        tickers: Vec<String>,

        /// Path to a text file with tickers to toggle.
        /// Tickers may be separated by commas, spaces, or new lines.
        #[clap(long)]
        path: Option<String>,
    },
}
