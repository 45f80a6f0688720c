//! Market Client — fetches market data, trade analysis, recommendations, news and
//! watchlist actions from the market-data API and paints them into the named
//! regions of a terminal board.
//!
//! Usage example (CLI):
//! ```bash
//! market_client --base-url http://127.0.0.1:5000 board --interval-secs 30
//! market_client coin SOL 250
//! market_client watch --path ./watchlist.txt
//! ```
//!
//! The watchlist file should contain symbols separated by commas, spaces, or new
//! lines. See `market_common::symbol` for details.
#![warn(missing_docs)]
mod args;
mod board;
mod cancel;
mod fetch;
mod presenter;
mod view;

use crate::args::{Args, Command};
use crate::board::{BoardOptions, paint};
use crate::cancel::CancelToken;
use crate::fetch::MarketApi;
use crate::presenter::MarketDataPresenter;
use crate::view::render::Toast;
use crate::view::state::NewsState;
use crate::view::{Page, ViewName};
use clap::Parser;
use crossbeam_channel::bounded;
use log::{info, warn};
use market_common::api::CoinAnalysisRequest;
use market_common::symbol::SymbolParser;
use market_common::{MarketError, Result, Symbol};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<(), MarketError> {
    init_logger();
    let args = Args::parse();
    let root = CancelToken::new();
    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    {
        let root = root.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            root.cancel();
            let _ = shutdown_tx.try_send(());
        })
        .map_err(|e| MarketError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let timeout = Duration::from_secs(args.timeout_secs.max(1));
    let api = Arc::new(MarketApi::new(&args.base_url, timeout)?);
    info!("Using market API at {}", args.base_url);

    match args.command {
        Command::Board {
            interval_secs,
            once,
            reload_news,
        } => {
            let options = BoardOptions {
                interval: Duration::from_secs(interval_secs.max(1)),
                once,
                clear_screen: !once,
                reload_news,
            };
            board::run(api, root, shutdown_rx, options)?;
        }
        Command::Analyze { ticker } => {
            let mut presenter = MarketDataPresenter::new(Page::Analyze);
            match ticker.parse::<Symbol>() {
                Ok(symbol) => {
                    let result = api.analyze_trade(&symbol, &root.child());
                    presenter.show_trade_plan(&symbol, result)?;
                }
                Err(e) => presenter.show_error(ViewName::Analysis, "Trade analysis", &e)?,
            }
            paint(presenter.registry(), false)?;
        }
        Command::Coin { ticker, investment } => {
            let mut presenter = MarketDataPresenter::new(Page::Coin);
            let result = CoinAnalysisRequest::new(&ticker, investment)
                .and_then(|request| api.analyze_coin(&request, &root.child()));
            presenter.show_coin_analysis(result)?;
            paint(presenter.registry(), false)?;
        }
        Command::Recommend => {
            let mut presenter = MarketDataPresenter::new(Page::Recommend);
            presenter.show_recommendations(api.recommendations(&root.child()))?;
            paint(presenter.registry(), false)?;
        }
        Command::News => {
            let mut presenter = MarketDataPresenter::new(Page::News);
            let mut state = NewsState::new();
            if state.needs_fetch(false) {
                let result = api.news(&root.child());
                presenter.show_news(&mut state, result)?;
            }
            paint(presenter.registry(), false)?;
        }
        Command::Watch { tickers, path } => {
            let mut presenter = MarketDataPresenter::new(Page::Watch);
            for entry in watch_entries(&tickers, path.as_deref())? {
                if root.is_cancelled() {
                    break;
                }
                match entry {
                    Ok(symbol) => {
                        let result = api.toggle_watchlist(&symbol, &root.child());
                        presenter.show_watchlist(&symbol, result)?;
                    }
                    Err(e) => {
                        warn!("Skipping ticker: {}", e);
                        presenter
                            .registry_mut()
                            .render(ViewName::Toast, &Toast::failure(e.to_string()))?;
                    }
                }
                paint(presenter.registry(), false)?;
            }
        }
    }
    Ok(())
}

/// Tickers given on the command line followed by those of the watchlist file.
///
/// Command-line entries are validated one by one so a typo only skips that entry;
/// a watchlist file that cannot be read or parsed fails the whole command.
fn watch_entries(tickers: &[String], path: Option<&str>) -> Result<Vec<Result<Symbol>>> {
    let mut entries: Vec<Result<Symbol>> = tickers.iter().map(|t| t.parse::<Symbol>()).collect();

    if let Some(raw) = path {
        let file_path = normalize_path(raw);
        if !is_file_exist(&file_path) {
            return Err(MarketError::InvalidInput(format!(
                "watchlist file {} does not exist",
                file_path.display()
            )));
        }
        let file = File::open(&file_path)?;
        let symbols = Symbol::parse_from_file(BufReader::new(file))?;
        info!("Watchlist file symbols: {:?}", symbols);
        entries.extend(symbols.into_iter().map(Ok));
    }

    if entries.is_empty() {
        return Err(MarketError::InvalidInput(
            "no tickers given; pass tickers or --path".to_string(),
        ));
    }
    Ok(entries)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn normalize_strips_quotes_and_whitespace() {
        assert_eq!(normalize_path("  \"C:\\list.txt\" "), PathBuf::from("C:\\list.txt"));
        assert_eq!(normalize_path("./list.txt"), PathBuf::from("./list.txt"));
    }

    #[test]
    fn watch_entries_keeps_bad_cli_tickers_as_errors() {
        let entries = watch_entries(&["btc".into(), "b/d".into()], None).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].as_ref().unwrap().as_str(), "BTC");
        assert!(entries[1].is_err());
    }

    #[test]
    fn watch_entries_requires_something() {
        assert!(matches!(watch_entries(&[], None), Err(MarketError::InvalidInput(_))));
        assert!(matches!(
            watch_entries(&[], Some("/definitely/not/here.txt")),
            Err(MarketError::InvalidInput(_))
        ));
    }

    #[test]
    fn watch_entries_reads_file() {
        let path = std::env::temp_dir().join(format!("watchlist-{}.txt", std::process::id()));
        let mut file = File::create(&path).unwrap();
        writeln!(file, "sol, ada\nlink").unwrap();
        drop(file);

        let entries = watch_entries(&["btc".into()], path.to_str()).unwrap();
        let names: Vec<String> = entries
            .into_iter()
            .map(|e| e.unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["BTC", "SOL", "ADA", "LINK"]);
        std::fs::remove_file(path).unwrap();
    }
}
