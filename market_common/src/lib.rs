//!
//! Common types and utilities for the market board client.
//!
//! This crate aggregates:
//! - `error` — unified error type `MarketError` used across the workspace.
//! - `result` — handy `Result<T, MarketError>` alias.
//! - `quote` — `AssetQuote`, the market snapshot and price formatting.
//! - `ranking` — top-N, ranking, best/worst and gainers/losers views.
//! - `symbol` — validated ticker symbols and watchlist file parsing.
//! - `api` — payloads of the analysis, recommendation, news and watchlist endpoints.
//! - `net` — endpoint paths and URL helpers.
#![warn(missing_docs)]
pub mod api;
pub mod error;
pub mod net;
pub mod quote;
pub mod ranking;
pub mod result;
pub mod symbol;

pub use error::MarketError;
pub use quote::{AssetQuote, MarketSnapshot};
pub use result::Result;
pub use symbol::Symbol;
