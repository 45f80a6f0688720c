//! User-supplied ticker symbols and watchlist file parsing.
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MarketError;

/// Suffix the site accepts on input and strips before calling the API.
const QUOTE_CURRENCY_SUFFIX: &str = "-USD";

/// Trait providing file parsing for symbols.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, spaces or new lines; empty entries are
    /// skipped. Returns an error if any entry is not a valid symbol.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Symbol>, MarketError>;
}

/// Validated, upper-cased ticker symbol such as `BTC` or `SPY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = MarketError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let upper = raw.trim().to_ascii_uppercase();
        let base = upper.strip_suffix(QUOTE_CURRENCY_SUFFIX).unwrap_or(&upper);
        if base.is_empty() {
            return Err(MarketError::InvalidInput("ticker is required".to_string()));
        }
        if let Some(bad) = base
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
        {
            return Err(MarketError::InvalidInput(format!(
                "ticker '{}' contains '{}'",
                raw.trim(),
                bad
            )));
        }
        Ok(Symbol(base.to_string()))
    }
}

impl TryFrom<String> for Symbol {
    type Error = MarketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl SymbolParser for Symbol {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, MarketError> {
        let mut symbols = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(MarketError::Io)?;
            for entry in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if entry.is_empty() {
                    continue;
                }
                match entry.parse::<Self>() {
                    Ok(symbol) => symbols.push(symbol),
                    Err(e) => return Err(MarketError::ParseSymbolsFile(e.to_string())),
                }
            }
        }
        Ok(symbols)
    }
}
