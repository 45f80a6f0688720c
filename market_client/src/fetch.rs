//! HTTP access to the market-data API.
//!
//! `MarketApi` wraps a blocking `reqwest` client with a per-request timeout. Every
//! call takes a [`CancelToken`]: a token cancelled before the call short-circuits,
//! and a token cancelled while the request was in flight discards the response.
//! Failures are reported once to the caller; nothing is retried.
use std::time::Duration;

use log::{debug, error};
use market_common::api::{
    CoinAnalysis, CoinAnalysisRequest, NewsFeed, Recommendation, TradeAnalysisRequest,
    TradePlan, WatchlistToggle,
};
use market_common::net::{self, endpoint_url};
use market_common::{MarketError, MarketSnapshot, Result, Symbol};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cancel::CancelToken;

/// Anything that can produce a market snapshot.
pub trait QuoteSource {
    /// Fetches the current crypto and ETF quotes.
    fn fetch_quotes(&self, cancel: &CancelToken) -> Result<MarketSnapshot>;
}

/// Sources the board polls: market quotes plus the news popup.
pub trait BoardSource: QuoteSource + Send + Sync + 'static {
    /// Fetches the latest headlines.
    fn fetch_news(&self, cancel: &CancelToken) -> Result<NewsFeed>;
}

/// Client for the market-data API.
pub struct MarketApi {
    client: Client,
    base_url: String,
}

impl MarketApi {
    /// Creates a client for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim().to_string(),
        })
    }

    /// Trade plan for `symbol`.
    pub fn analyze_trade(&self, symbol: &Symbol, cancel: &CancelToken) -> Result<TradePlan> {
        let body = TradeAnalysisRequest::new(symbol);
        self.post(net::TRADE_ANALYSIS, Some(&body), cancel)
    }

    /// Coin analysis for an already validated request.
    pub fn analyze_coin(
        &self,
        request: &CoinAnalysisRequest,
        cancel: &CancelToken,
    ) -> Result<CoinAnalysis> {
        self.post(net::COIN_ANALYSIS, Some(request), cancel)
    }

    pub fn recommendations(&self, cancel: &CancelToken) -> Result<Vec<Recommendation>> {
        self.get(net::RECOMMENDATIONS, cancel)
    }

    pub fn news(&self, cancel: &CancelToken) -> Result<NewsFeed> {
        self.get(net::NEWS, cancel)
    }

    /// Adds `symbol` to the watchlist or removes it if already present.
    pub fn toggle_watchlist(
        &self,
        symbol: &Symbol,
        cancel: &CancelToken,
    ) -> Result<WatchlistToggle> {
        self.post::<(), _>(&net::watchlist_path(symbol.as_str()), None, cancel)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, cancel: &CancelToken) -> Result<T> {
        let request = self.client.get(endpoint_url(&self.base_url, path));
        self.execute(path, request, cancel)
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        cancel: &CancelToken,
    ) -> Result<T> {
        let mut request = self.client.post(endpoint_url(&self.base_url, path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(path, request, cancel)
    }

    fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
        cancel: &CancelToken,
    ) -> Result<T> {
        if cancel.is_cancelled() {
            return Err(MarketError::Cancelled(path.to_string()));
        }
        debug!("Requesting {}", path);

        let response = request.send().map_err(|e| request_error(path, e))?;
        let status = response.status();
        if !status.is_success() {
            error!("{} answered with status {}", path, status);
            return Err(MarketError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().map_err(|e| request_error(path, e))?;

        if cancel.is_cancelled() {
            debug!("Discarding response of cancelled request {}", path);
            return Err(MarketError::Cancelled(path.to_string()));
        }
        let value = serde_json::from_str(&body)
            .map_err(|e| MarketError::Malformed(format!("{}: {}", path, e)))?;
        debug!("{} answered with {} bytes", path, body.len());
        Ok(value)
    }
}

impl QuoteSource for MarketApi {
    fn fetch_quotes(&self, cancel: &CancelToken) -> Result<MarketSnapshot> {
        self.get(net::MARKET_DATA, cancel)
    }
}

impl BoardSource for MarketApi {
    fn fetch_news(&self, cancel: &CancelToken) -> Result<NewsFeed> {
        self.news(cancel)
    }
}

fn request_error(path: &str, err: reqwest::Error) -> MarketError {
    if err.is_timeout() {
        MarketError::Timeout(path.to_string())
    } else if err.is_decode() {
        MarketError::Malformed(format!("{}: {}", path, err))
    } else {
        MarketError::Transport(format!("{}: {}", path, err))
    }
}
