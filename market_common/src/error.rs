//! Error types shared between the market client and its data model.
//!
//! The `MarketError` enum unifies transport, decoding, validation and rendering
//! failures so every layer can propagate a single error type. Every variant is
//! meant to end up as a user-visible notice; none of them is retried.
use std::io;

use thiserror::Error;

/// Unified error type for the workspace.
#[derive(Error, Debug)]
pub enum MarketError {
    /// I/O error originating from the standard library (files, sockets, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The request never produced a response (connection refused, DNS, reset...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("Endpoint {endpoint} answered with status {status}")]
    Status {
        /// Endpoint path that was requested.
        endpoint: String,
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The request was cancelled before its result could be used.
    #[error("Request to {0} was cancelled")]
    Cancelled(String),

    /// User input rejected before any request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error while parsing a watchlist file into `Symbol` values.
    #[error("Parse symbols file error: {0}")]
    ParseSymbolsFile(String),

    /// Rendering targeted a view that the page never registered.
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),
}

impl MarketError {
    /// Returns `true` for errors caused by the network or the remote endpoint,
    /// as opposed to local input or rendering problems.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            MarketError::Transport(_)
                | MarketError::Status { .. }
                | MarketError::Timeout(_)
                | MarketError::Malformed(_)
                | MarketError::SerdeJson(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_are_classified() {
        assert!(MarketError::Timeout("/api/news".into()).is_remote());
        assert!(
            MarketError::Status {
                endpoint: "/get_market_data".into(),
                status: 502
            }
            .is_remote()
        );
        assert!(!MarketError::InvalidInput("ticker".into()).is_remote());
        assert!(!MarketError::Cancelled("/api/news".into()).is_remote());
    }

    #[test]
    fn status_message_names_endpoint() {
        let err = MarketError::Status {
            endpoint: "/api/news".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "Endpoint /api/news answered with status 404");
    }
}
