//! Periodic board refresh.
//!
//! Each fetch runs on its own thread and reports back over a channel; the loop owns
//! the presenter and is the only thread that touches the regions. Fetches finish in
//! any order. When a new market poll starts, the previous one is cancelled and its
//! generation retired, so a slow stale response cannot overwrite fresher data even if
//! it was already on its way back.
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, never, select, tick, unbounded};
use log::{debug, info};
use market_common::api::NewsFeed;
use market_common::{MarketError, MarketSnapshot, Result};

use crate::cancel::CancelToken;
use crate::fetch::BoardSource;
use crate::presenter::MarketDataPresenter;
use crate::view::state::NewsState;
use crate::view::{Page, ViewRegistry};

/// ANSI sequence that clears the terminal and moves the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Result of one background fetch.
pub enum Update {
    /// Market data endpoint finished for poll `generation`.
    Market {
        generation: u64,
        result: Result<MarketSnapshot>,
    },
    /// News endpoint finished.
    News(Result<NewsFeed>),
}

/// Runs `job` on a new thread and sends its result to `tx`.
fn spawn_fetch<F>(tx: &Sender<Update>, job: F)
where
    F: FnOnce() -> Update + Send + 'static,
{
    let tx = tx.clone();
    thread::spawn(move || {
        if tx.send(job()).is_err() {
            debug!("Board closed before the fetch finished");
        }
    });
}

fn start_market_fetch<S: BoardSource>(
    source: &Arc<S>,
    root: &CancelToken,
    tx: &Sender<Update>,
    generation: u64,
) -> CancelToken {
    let token = root.child();
    let source = Arc::clone(source);
    let job_token = token.clone();
    spawn_fetch(tx, move || Update::Market {
        generation,
        result: MarketDataPresenter::fetch_quotes(source.as_ref(), &job_token),
    });
    token
}

fn start_news_fetch<S: BoardSource>(source: &Arc<S>, root: &CancelToken, tx: &Sender<Update>) {
    let token = root.child();
    let source = Arc::clone(source);
    spawn_fetch(tx, move || Update::News(source.fetch_news(&token)));
}

/// Writes the whole board to stdout, optionally clearing the screen first.
pub fn paint(registry: &ViewRegistry, clear: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if clear {
        write!(out, "{}", CLEAR_SCREEN)?;
    }
    write!(out, "{}", registry)?;
    out.flush()?;
    Ok(())
}

/// Board refresh settings.
pub struct BoardOptions {
    /// Time between market-data polls.
    pub interval: Duration,
    /// Render one pass and return.
    pub once: bool,
    /// Clear the terminal before each repaint.
    pub clear_screen: bool,
    /// Re-fetch the news on every poll instead of loading it once.
    pub reload_news: bool,
}

/// Runs the board until `shutdown_rx` fires, or after the first complete pass when
/// `once` is set. Returns the final state of the regions.
pub fn run<S: BoardSource>(
    source: Arc<S>,
    root: CancelToken,
    shutdown_rx: Receiver<()>,
    options: BoardOptions,
) -> Result<ViewRegistry> {
    let mut presenter = MarketDataPresenter::new(Page::Board);
    let mut news = NewsState::new();
    let (tx, rx) = unbounded::<Update>();

    let mut generation = 0u64;
    let mut in_flight = start_market_fetch(&source, &root, &tx, generation);
    let mut pending = 1usize;
    if news.needs_fetch(false) {
        start_news_fetch(&source, &root, &tx);
        pending += 1;
    }

    let ticker = if options.once {
        never::<Instant>()
    } else {
        tick(options.interval)
    };
    info!("Board running, refresh every {:?}", options.interval);

    loop {
        select! {
            recv(rx) -> msg => {
                let update = msg.map_err(|e| MarketError::ChannelRecv(e.to_string()))?;
                pending = pending.saturating_sub(1);
                match update {
                    Update::Market { generation: polled, .. } if polled != generation => {
                        debug!("Dropped market poll {} superseded by {}", polled, generation);
                    }
                    Update::Market { result, .. } => presenter.show_market(result),
                    Update::News(result) => presenter.show_news(&mut news, result)?,
                }
                if options.once {
                    if pending == 0 {
                        paint(presenter.registry(), options.clear_screen)?;
                        break;
                    }
                } else {
                    paint(presenter.registry(), options.clear_screen)?;
                }
            },
            recv(ticker) -> _ => {
                in_flight.cancel();
                generation += 1;
                in_flight = start_market_fetch(&source, &root, &tx, generation);
                pending += 1;
                if news.needs_fetch(options.reload_news) {
                    start_news_fetch(&source, &root, &tx);
                    pending += 1;
                }
            },
            recv(shutdown_rx) -> _ => {
                info!("Shutting down board...");
                root.cancel();
                break;
            },
        }
    }
    Ok(presenter.registry().clone())
}
