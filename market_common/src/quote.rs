//! Asset quotes as delivered by the market-data endpoint.
//!
//! An `AssetQuote` carries a symbol, a price and a signed percent change. The
//! endpoint is loose about the price type: it may send a JSON number or an already
//! formatted string like `"$91,234.50"`, so prices go through [`de_price`].
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MarketError;

/// Market quote for a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    /// Short identifier (e.g., `BTC`, `SPY`).
    pub symbol: String,
    /// Last price.
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    /// Signed percent change.
    pub change: f64,
}

/// Response of the market-data endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Crypto assets in server order.
    #[serde(default)]
    pub crypto: Vec<AssetQuote>,
    /// ETF assets in server order.
    #[serde(default)]
    pub etf: Vec<AssetQuote>,
}

impl MarketSnapshot {
    /// Crypto followed by ETF, the order used by the ticker tape.
    pub fn combined(&self) -> Vec<AssetQuote> {
        self.crypto.iter().chain(self.etf.iter()).cloned().collect()
    }

    /// Returns `true` when neither list has a quote.
    pub fn is_empty(&self) -> bool {
        self.crypto.is_empty() && self.etf.is_empty()
    }
}

/// Direction of a percent change; zero counts as up.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Arrow glyph shown next to the change.
    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '▲',
            Direction::Down => '▼',
        }
    }
}

impl AssetQuote {
    /// Creates a quote; mostly useful for tests and fixtures.
    pub fn new(symbol: &str, price: f64, change: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            price,
            change,
        }
    }

    /// Direction derived from the sign of `change`.
    pub fn direction(&self) -> Direction {
        if self.change >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// Change with an explicit sign, e.g. `+2.50%` or `-1.20%`.
    pub fn signed_change(&self) -> String {
        format!("{:+.2}%", self.change)
    }

    /// Change with the direction arrow, e.g. `▲ 2.50%` or `▼ 1.20%`.
    pub fn arrow_change(&self) -> String {
        format!("{} {:.2}%", self.direction().glyph(), self.change.abs())
    }
}

/// Formats a price the way the site does: eight decimals below one dollar,
/// two decimals with thousands separators otherwise.
pub fn smart_format(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs < 1.0 {
        return format!("{}${:.8}", sign, abs);
    }
    let fixed = format!("{:.2}", abs);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parses a display price such as `"$91,234.50"` back into a number.
pub fn parse_price(raw: &str) -> Result<f64, MarketError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| MarketError::Malformed(format!("invalid price '{}'", raw)))
}

/// Accepts a price either as a JSON number or as a formatted string.
pub fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => Ok(n),
        RawPrice::Text(s) => parse_price(&s).map_err(serde::de::Error::custom),
    }
}
