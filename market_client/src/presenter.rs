//! The market data presenter: fetch results in, rendered regions out.
//!
//! Fetching and rendering are split so fetches can run on worker threads while the
//! presenter, owned by a single thread, stays the only writer of the regions. Every
//! failure ends up as a notice in the affected region or as a toast; market-data
//! failures leave the previously rendered quotes in place.
use chrono::Local;
use log::{debug, error, info, warn};
use market_common::api::{CoinAnalysis, NewsFeed, Recommendation, TradePlan, WatchlistToggle};
use market_common::ranking::{best_and_worst, gainers_and_losers, top_n};
use market_common::{MarketError, MarketSnapshot, Result, Symbol};

use crate::cancel::CancelToken;
use crate::fetch::QuoteSource;
use crate::view::render::{
    CoinAnalysisPanel, ExtremesLine, MoversList, NewsPanel, Notice, QuoteList, QuoteTable,
    RecommendationGrid, TickerTape, Toast, TradePlanPanel,
};
use crate::view::state::NewsState;
use crate::view::{Page, ViewName, ViewRegistry};

/// Quotes shown in each home list.
pub const HOME_LIST_LEN: usize = 5;
/// Rows of the top table. Server order, not a market-cap rank.
pub const TOP_TABLE_LEN: usize = 20;
/// Entries in each of the gainers and losers panels.
pub const MOVERS_LEN: usize = 3;

/// Owns the regions of one page and renders fetch results into them.
pub struct MarketDataPresenter {
    registry: ViewRegistry,
}

impl MarketDataPresenter {
    pub fn new(page: Page) -> Self {
        Self {
            registry: ViewRegistry::for_page(page),
        }
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ViewRegistry {
        &mut self.registry
    }

    /// Fetches the market snapshot from `source`. Errors are returned, not retried.
    pub fn fetch_quotes<S: QuoteSource + ?Sized>(
        source: &S,
        cancel: &CancelToken,
    ) -> Result<MarketSnapshot> {
        let snapshot = source.fetch_quotes(cancel)?;
        debug!(
            "Fetched {} crypto and {} ETF quotes",
            snapshot.crypto.len(),
            snapshot.etf.len()
        );
        Ok(snapshot)
    }

    /// Renders every market view this page shows.
    pub fn show_market(&mut self, result: Result<MarketSnapshot>) {
        match result {
            Ok(snapshot) => self.render_market(&snapshot),
            Err(MarketError::Cancelled(path)) => debug!("Dropped cancelled fetch of {}", path),
            Err(e) => {
                error!("Market data refresh failed: {}", e);
                let toast = Toast::failure(format!("Market data unavailable: {}", e));
                self.registry.render_if_shown(ViewName::Toast, &toast);
            }
        }
    }

    fn render_market(&mut self, snapshot: &MarketSnapshot) {
        let combined = snapshot.combined();
        let movers = gainers_and_losers(&snapshot.crypto, MOVERS_LEN);
        let r = &mut self.registry;

        r.render_if_shown(ViewName::TickerTape, &TickerTape(&combined));
        r.render_if_shown(ViewName::HomeCrypto, &QuoteList(top_n(&snapshot.crypto, HOME_LIST_LEN)));
        r.render_if_shown(ViewName::HomeEtf, &QuoteList(top_n(&snapshot.etf, HOME_LIST_LEN)));
        r.render_if_shown(ViewName::BestWorst, &ExtremesLine(best_and_worst(&combined)));
        r.render_if_shown(ViewName::Gainers, &MoversList(&movers.gainers));
        r.render_if_shown(ViewName::Losers, &MoversList(&movers.losers));
        r.render_if_shown(ViewName::Top20, &QuoteTable(top_n(&snapshot.crypto, TOP_TABLE_LEN)));
        r.render_if_shown(ViewName::EtfList, &QuoteList(&snapshot.etf));
        r.render_if_shown(
            ViewName::Toast,
            &Toast::success(format!("Market data updated at {}", Local::now().format("%H:%M:%S"))),
        );
        info!("Rendered {} quotes", combined.len());
    }

    /// Writes `err` into `view` as an inline notice. Cancelled requests leave the
    /// region untouched.
    pub fn show_error(&mut self, view: ViewName, what: &str, err: &MarketError) -> Result<()> {
        if let MarketError::Cancelled(path) = err {
            debug!("Dropped cancelled request {}", path);
            return Ok(());
        }
        warn!("{} failed: {}", what, err);
        self.registry
            .render(view, &Notice::new(format!("{} failed: {}", what, err)))
    }

    pub fn show_trade_plan(&mut self, symbol: &Symbol, result: Result<TradePlan>) -> Result<()> {
        match result {
            Ok(plan) => self
                .registry
                .render(ViewName::Analysis, &TradePlanPanel { symbol, plan: &plan }),
            Err(e) => self.show_error(ViewName::Analysis, "Trade analysis", &e),
        }
    }

    pub fn show_coin_analysis(&mut self, result: Result<CoinAnalysis>) -> Result<()> {
        match result {
            Ok(analysis) => self
                .registry
                .render(ViewName::CoinAnalysis, &CoinAnalysisPanel(&analysis)),
            Err(e) => self.show_error(ViewName::CoinAnalysis, "Coin analysis", &e),
        }
    }

    pub fn show_recommendations(&mut self, result: Result<Vec<Recommendation>>) -> Result<()> {
        match result {
            Ok(recs) => self
                .registry
                .render(ViewName::Recommendations, &RecommendationGrid(&recs)),
            Err(e) => self.show_error(ViewName::Recommendations, "Recommendations", &e),
        }
    }

    /// Renders the news popup and records that it has content.
    pub fn show_news(&mut self, state: &mut NewsState, result: Result<NewsFeed>) -> Result<()> {
        match result {
            Ok(feed) => {
                self.registry.render(ViewName::News, &NewsPanel(&feed.news))?;
                state.mark_loaded();
                debug!("News loaded at {:?}", state.loaded_at());
                Ok(())
            }
            Err(e) => self.show_error(ViewName::News, "Loading news", &e),
        }
    }

    pub fn show_watchlist(
        &mut self,
        symbol: &Symbol,
        result: Result<WatchlistToggle>,
    ) -> Result<()> {
        let toast = match result {
            Ok(toggle) => Toast::from_watchlist(symbol, &toggle),
            Err(MarketError::Cancelled(_)) => return Ok(()),
            Err(e) => {
                warn!("Watchlist toggle for {} failed: {}", symbol, e);
                Toast::failure(format!("{}: watchlist update failed: {}", symbol, e))
            }
        };
        self.registry.render(ViewName::Toast, &toast)
    }
}
