//! Views and how they turn into region lines.
//!
//! Each view borrows the data it shows and produces the full content of a region.
//! Regions are cleared before a view is written, so rendering the same view again
//! never duplicates lines.
use chrono::DateTime;
use market_common::api::{
    CoinAnalysis, NewsItem, Recommendation, TradePlan, WatchlistToggle,
};
use market_common::quote::smart_format;
use market_common::ranking::Extremes;
use market_common::{AssetQuote, Symbol};

/// Shown for fields the server left empty.
const MISSING: &str = "-";

/// Something that can be written into a region.
pub trait Render {
    /// Full content of the region, one entry per line.
    fn lines(&self) -> Vec<String>;
}

fn or_missing(value: &str) -> &str {
    if value.trim().is_empty() { MISSING } else { value }
}

fn quote_line(quote: &AssetQuote) -> String {
    format!(
        "{:<8} {:>16}  {}",
        quote.symbol,
        smart_format(quote.price),
        quote.arrow_change()
    )
}

/// Inline message: errors, empty states.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice(pub String);

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Notice(message.into())
    }
}

impl Render for Notice {
    fn lines(&self) -> Vec<String> {
        vec![self.0.clone()]
    }
}

/// Scrolling tape of every quote on one line.
pub struct TickerTape<'a>(pub &'a [AssetQuote]);

impl Render for TickerTape<'_> {
    fn lines(&self) -> Vec<String> {
        if self.0.is_empty() {
            return vec!["No quotes available".to_string()];
        }
        let items: Vec<String> = self
            .0
            .iter()
            .map(|q| format!("{} {} {}", q.symbol, smart_format(q.price), q.signed_change()))
            .collect();
        vec![items.join("  |  ")]
    }
}

/// Plain list of quotes.
pub struct QuoteList<'a>(pub &'a [AssetQuote]);

impl Render for QuoteList<'_> {
    fn lines(&self) -> Vec<String> {
        if self.0.is_empty() {
            return vec!["No quotes available".to_string()];
        }
        self.0.iter().map(quote_line).collect()
    }
}

/// Numbered table; row numbers follow the order given, not a market-cap rank.
pub struct QuoteTable<'a>(pub &'a [AssetQuote]);

impl Render for QuoteTable<'_> {
    fn lines(&self) -> Vec<String> {
        if self.0.is_empty() {
            return vec!["No quotes available".to_string()];
        }
        let mut lines = vec![format!("{:>3}  {:<8} {:>16}  {}", "#", "Symbol", "Price", "Change")];
        lines.extend(
            self.0
                .iter()
                .enumerate()
                .map(|(i, q)| format!("{:>3}  {}", i + 1, quote_line(q))),
        );
        lines
    }
}

/// Gainers or losers, already in display order.
pub struct MoversList<'a>(pub &'a [&'a AssetQuote]);

impl Render for MoversList<'_> {
    fn lines(&self) -> Vec<String> {
        if self.0.is_empty() {
            return vec!["No movers".to_string()];
        }
        self.0.iter().map(|q| quote_line(q)).collect()
    }
}

/// Best and worst performer summary.
pub struct ExtremesLine<'a>(pub Option<Extremes<'a>>);

impl Render for ExtremesLine<'_> {
    fn lines(&self) -> Vec<String> {
        match &self.0 {
            Some(e) => vec![format!(
                "Best: {} {}  |  Worst: {} {}",
                e.best.symbol,
                e.best.signed_change(),
                e.worst.symbol,
                e.worst.signed_change()
            )],
            None => vec!["No market data".to_string()],
        }
    }
}

/// Trade plan for one ticker.
pub struct TradePlanPanel<'a> {
    pub symbol: &'a Symbol,
    pub plan: &'a TradePlan,
}

impl Render for TradePlanPanel<'_> {
    fn lines(&self) -> Vec<String> {
        if let Some(err) = &self.plan.error {
            return vec![format!("{}: analysis failed: {}", self.symbol, err)];
        }
        vec![
            format!("{} trade plan", self.symbol),
            format!("Sentiment: {}", or_missing(&self.plan.sentiment)),
            format!("Entry:     {}", or_missing(&self.plan.entry)),
            format!("Stop:      {}", or_missing(&self.plan.stop)),
            format!("Target:    {}", or_missing(&self.plan.target)),
            format!("Reason:    {}", or_missing(&self.plan.reason)),
        ]
    }
}

/// Verdict, plan and projection for the user's investment.
pub struct CoinAnalysisPanel<'a>(pub &'a CoinAnalysis);

impl Render for CoinAnalysisPanel<'_> {
    fn lines(&self) -> Vec<String> {
        let a = self.0;
        if let Some(err) = &a.error {
            return vec![format!("Error: {}", err)];
        }
        let mut headline = format!("{}: {}", or_missing(&a.ticker), or_missing(&a.verdict));
        if let Some(risk) = &a.risk_level {
            headline.push_str(&format!(" (risk: {})", risk));
        }
        let mut lines = vec![headline];
        if !a.current_price.is_empty() {
            lines.push(format!("Price: {}", a.current_price));
        }
        lines.push(or_missing(&a.explanation).to_string());
        lines.push(format!(
            "Entry {}  Stop {}  Target {}",
            or_missing(&a.plan.entry),
            or_missing(&a.plan.stop),
            or_missing(&a.plan.target)
        ));
        lines.push(format!(
            "Potential profit {}  Potential loss {}  ROI {}",
            or_missing(&a.math.potential_profit),
            or_missing(&a.math.potential_loss),
            or_missing(&a.math.roi)
        ));
        lines
    }
}

/// Recommendation cards as table rows.
pub struct RecommendationGrid<'a>(pub &'a [Recommendation]);

impl Render for RecommendationGrid<'_> {
    fn lines(&self) -> Vec<String> {
        if self.0.is_empty() {
            return vec!["No recommendations right now".to_string()];
        }
        let mut lines = vec![format!(
            "{:<8} {:>14} {:>8} {:>14} {:>14}  {:<12} {}",
            "Ticker", "Price", "5d", "Target", "Stop", "ROI", "Tag"
        )];
        lines.extend(self.0.iter().map(|r| {
            format!(
                "{:<8} {:>14} {:>8} {:>14} {:>14}  {:<12} {}",
                r.ticker,
                or_missing(&r.price),
                or_missing(&r.change_5d),
                or_missing(&r.target),
                or_missing(&r.stop),
                or_missing(&r.roi),
                r.tag
            )
        }));
        lines
    }
}

/// Normalises RFC 2822/3339 dates to `YYYY-MM-DD HH:MM`; anything else is kept.
pub fn display_date(published: &str) -> String {
    let trimmed = published.trim();
    DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| or_missing(trimmed).to_string())
}

/// News popup content.
pub struct NewsPanel<'a>(pub &'a [NewsItem]);

impl Render for NewsPanel<'_> {
    fn lines(&self) -> Vec<String> {
        if self.0.is_empty() {
            return vec!["No news available".to_string()];
        }
        self.0
            .iter()
            .flat_map(|item| {
                [
                    format!("• {}", item.title),
                    format!("  {}  {}", display_date(&item.published), item.link),
                ]
            })
            .collect()
    }
}

/// Kind of a toast notification.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

/// One-line notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Failure,
            message: message.into(),
        }
    }

    /// Toast for a watchlist toggle outcome.
    pub fn from_watchlist(symbol: &Symbol, toggle: &WatchlistToggle) -> Self {
        let message = if toggle.message.is_empty() {
            format!("{}: {}", symbol, toggle.status)
        } else {
            toggle.message.clone()
        };
        if toggle.status.is_success() {
            Self::success(message)
        } else {
            Self::failure(message)
        }
    }
}

impl Render for Toast {
    fn lines(&self) -> Vec<String> {
        let mark = match self.kind {
            ToastKind::Success => '✔',
            ToastKind::Failure => '✖',
        };
        vec![format!("{} {}", mark, self.message)]
    }
}
