//! Request and response payloads of the analysis, recommendation, news and
//! watchlist endpoints.
//!
//! The analysis endpoints are opaque services that mix numbers and preformatted
//! strings freely, so plan and math values are kept as display text (see
//! [`de_text`]).
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};

use crate::error::MarketError;
use crate::symbol::Symbol;

/// Deserializes any JSON scalar into display text; `null` becomes an empty string.
pub fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Body of the trade analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct TradeAnalysisRequest {
    /// Ticker to analyse.
    pub ticker: String,
}

impl TradeAnalysisRequest {
    /// Builds a request for `symbol`.
    pub fn new(symbol: &Symbol) -> Self {
        Self {
            ticker: symbol.to_string(),
        }
    }
}

/// Trade plan returned by the trade analysis endpoint.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TradePlan {
    #[serde(default, deserialize_with = "de_text")]
    pub sentiment: String,
    #[serde(default, deserialize_with = "de_text")]
    pub entry: String,
    #[serde(default, deserialize_with = "de_text")]
    pub stop: String,
    #[serde(default, deserialize_with = "de_text")]
    pub target: String,
    #[serde(default, deserialize_with = "de_text")]
    pub reason: String,
    /// Set when the service could not analyse the ticker.
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of the user coin analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinAnalysisRequest {
    /// Ticker to analyse.
    pub ticker: String,
    /// Amount the user plans to invest.
    pub investment: f64,
}

impl CoinAnalysisRequest {
    /// Validates user input before anything is sent.
    ///
    /// The ticker must be a valid [`Symbol`] and the investment a finite, positive
    /// amount.
    pub fn new(ticker: &str, investment: f64) -> Result<Self, MarketError> {
        let symbol: Symbol = ticker.parse()?;
        if !investment.is_finite() || investment <= 0.0 {
            return Err(MarketError::InvalidInput(format!(
                "investment must be a positive amount, got {}",
                investment
            )));
        }
        Ok(Self {
            ticker: symbol.to_string(),
            investment,
        })
    }
}

/// Entry, stop and target levels of a plan.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlanLevels {
    #[serde(default, deserialize_with = "de_text")]
    pub entry: String,
    #[serde(default, deserialize_with = "de_text")]
    pub stop: String,
    #[serde(default, deserialize_with = "de_text")]
    pub target: String,
}

/// Profit/loss projection for the user's investment.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlanMath {
    #[serde(default, deserialize_with = "de_text")]
    pub potential_profit: String,
    #[serde(default, deserialize_with = "de_text")]
    pub potential_loss: String,
    #[serde(default, deserialize_with = "de_text")]
    pub roi: String,
}

/// Response of the user coin analysis endpoint.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoinAnalysis {
    #[serde(default)]
    pub ticker: String,
    #[serde(default, deserialize_with = "de_text")]
    pub current_price: String,
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub plan: PlanLevels,
    #[serde(default)]
    pub math: PlanMath,
    /// Set when the service could not analyse the coin; other fields are then empty.
    #[serde(default)]
    pub error: Option<String>,
}

/// One entry of the recommendations list.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recommendation {
    pub ticker: String,
    #[serde(default, deserialize_with = "de_text")]
    pub price: String,
    #[serde(default, deserialize_with = "de_text")]
    pub change_5d: String,
    #[serde(default, deserialize_with = "de_text")]
    pub target: String,
    #[serde(default, deserialize_with = "de_text")]
    pub stop: String,
    #[serde(default, deserialize_with = "de_text")]
    pub roi: String,
    #[serde(default)]
    pub tag: String,
}

/// Response of the news endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewsFeed {
    /// Latest headlines, newest first.
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

/// A single headline.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub published: String,
}

/// Outcome reported by the watchlist toggle endpoint.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WatchlistStatus {
    Added,
    Removed,
    Error,
    #[serde(other)]
    Unknown,
}

impl WatchlistStatus {
    /// `true` for statuses that changed the watchlist.
    pub fn is_success(self) -> bool {
        matches!(self, WatchlistStatus::Added | WatchlistStatus::Removed)
    }
}

/// Response of the watchlist toggle endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatchlistToggle {
    /// What happened to the ticker.
    pub status: WatchlistStatus,
    /// Human-readable message from the server.
    #[serde(default)]
    pub message: String,
    /// Optional action hint (e.g. which button label to show next).
    #[serde(default)]
    pub action: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_request_validates_input() {
        let ok = CoinAnalysisRequest::new(" btc ", 250.0).unwrap();
        assert_eq!(ok.ticker, "BTC");
        assert_eq!(ok.investment, 250.0);

        assert!(matches!(
            CoinAnalysisRequest::new("", 250.0),
            Err(MarketError::InvalidInput(_))
        ));
        assert!(matches!(
            CoinAnalysisRequest::new("ETH", 0.0),
            Err(MarketError::InvalidInput(_))
        ));
        assert!(matches!(
            CoinAnalysisRequest::new("ETH", -10.0),
            Err(MarketError::InvalidInput(_))
        ));
        assert!(CoinAnalysisRequest::new("ETH", f64::NAN).is_err());
    }

    #[test]
    fn coin_analysis_mixes_numbers_and_text() {
        let body = r#"{
            "ticker": "SOL",
            "verdict": "Buy",
            "explanation": "Momentum and volume.",
            "plan": {"entry": "$142.10", "stop": 135.0, "target": "$156.31"},
            "math": {"potential_profit": "$70.35", "potential_loss": null, "roi": "10.0%"}
        }"#;
        let analysis: CoinAnalysis = serde_json::from_str(body).unwrap();
        assert_eq!(analysis.plan.stop, "135.0");
        assert_eq!(analysis.math.potential_loss, "");
        assert!(analysis.error.is_none());
    }

    #[test]
    fn coin_analysis_error_only_body() {
        let analysis: CoinAnalysis =
            serde_json::from_str(r#"{"error": "Coin not found"}"#).unwrap();
        assert_eq!(analysis.error.as_deref(), Some("Coin not found"));
    }

    #[test]
    fn watchlist_status_parses_known_and_unknown() {
        let toggle: WatchlistToggle =
            serde_json::from_str(r#"{"status": "added", "message": "BTC added"}"#).unwrap();
        assert_eq!(toggle.status, WatchlistStatus::Added);
        assert!(toggle.status.is_success());

        let toggle: WatchlistToggle =
            serde_json::from_str(r#"{"status": "pending", "message": "?"}"#).unwrap();
        assert_eq!(toggle.status, WatchlistStatus::Unknown);
        assert!(!toggle.status.is_success());
        assert_eq!(WatchlistStatus::Removed.to_string(), "removed");
    }

    #[test]
    fn recommendations_decode_from_array() {
        let body = r#"[{"ticker": "PEPE", "price": "$0.00001234", "change_5d": "+18.2%",
            "target": "$0.00001543", "stop": "$0.00001111",
            "roi": "High Risk", "tag": "Momentum"}]"#;
        let recs: Vec<Recommendation> = serde_json::from_str(body).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].change_5d, "+18.2%");
    }
}
