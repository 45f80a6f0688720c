//! Endpoint paths of the market-data API and small URL helpers.

/// Base URL used when none is given on the command line.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// GET: `{ crypto: [...], etf: [...] }`.
pub const MARKET_DATA: &str = "/get_market_data";
/// POST `{ ticker }`: trade plan.
pub const TRADE_ANALYSIS: &str = "/analyze_trade";
/// POST `{ ticker, investment }`: user coin analysis.
pub const COIN_ANALYSIS: &str = "/analyze_user_coin";
/// GET: recommendation list.
pub const RECOMMENDATIONS: &str = "/get_recommendations";
/// GET: `{ news: [...] }`.
pub const NEWS: &str = "/api/news";
/// Watchlist toggle prefix; the ticker is appended as a path segment.
pub const WATCHLIST_TOGGLE: &str = "/api/toggle_watchlist";

/// Joins a base URL and an endpoint path without doubling the slash.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Path of the watchlist toggle endpoint for one ticker.
pub fn watchlist_path(ticker: &str) -> String {
    format!("{}/{}", WATCHLIST_TOGGLE, ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_double_slash() {
        assert_eq!(
            endpoint_url("http://localhost:5000/", MARKET_DATA),
            "http://localhost:5000/get_market_data"
        );
        assert_eq!(
            endpoint_url("http://localhost:5000", NEWS),
            "http://localhost:5000/api/news"
        );
    }

    #[test]
    fn watchlist_path_appends_ticker() {
        assert_eq!(watchlist_path("BTC"), "/api/toggle_watchlist/BTC");
    }
}
