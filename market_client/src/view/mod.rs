//! Named render regions of the board.
//!
//! A page declares the views it shows once, at start-up, and gets a `ViewRegistry`
//! holding one `Region` per view. Renderers never look regions up by free-form
//! strings: they address them through `ViewName`, and addressing a view the page did
//! not register is an error.
//!
//! - `render` — turning views (quote lists, panels, toasts) into region lines.
//! - `state` — per-view state that outlives a single render (e.g. news loaded once).
pub mod render;
pub mod state;

use std::fmt;

use market_common::{MarketError, Result};
use strum_macros::{Display, EnumIter};

use crate::view::render::Render;

/// Text shown by a region that has not been rendered yet.
pub const LOADING: &str = "Loading...";

/// Logical UI regions.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ViewName {
    TickerTape,
    HomeCrypto,
    HomeEtf,
    BestWorst,
    Gainers,
    Losers,
    Top20,
    EtfList,
    Analysis,
    CoinAnalysis,
    Recommendations,
    News,
    Toast,
}

/// Pages and the regions each of them shows, in display order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Board,
    Analyze,
    Coin,
    Recommend,
    News,
    Watch,
}

impl Page {
    pub fn views(self) -> &'static [ViewName] {
        use ViewName::*;
        match self {
            Page::Board => &[
                TickerTape, HomeCrypto, HomeEtf, BestWorst, Gainers, Losers, Top20, EtfList,
                News, Toast,
            ],
            Page::Analyze => &[Analysis],
            Page::Coin => &[CoinAnalysis],
            Page::Recommend => &[Recommendations],
            Page::News => &[News],
            Page::Watch => &[Toast],
        }
    }
}

/// One independently cleared text area.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: ViewName,
    lines: Vec<String>,
}

impl Region {
    fn new(name: ViewName) -> Self {
        Self {
            name,
            lines: vec![LOADING.to_string()],
        }
    }

    pub fn name(&self) -> ViewName {
        self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replaces the whole content of the region with `view`.
    pub fn render<V: Render + ?Sized>(&mut self, view: &V) {
        self.lines.clear();
        self.lines.extend(view.lines());
    }
}

/// Regions of one page, resolved once at initialisation.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRegistry {
    regions: Vec<Region>,
}

impl ViewRegistry {
    /// Registers `views` in order; duplicates are registered once.
    pub fn new(views: &[ViewName]) -> Self {
        let mut regions: Vec<Region> = Vec::with_capacity(views.len());
        for name in views {
            if !regions.iter().any(|r| r.name == *name) {
                regions.push(Region::new(*name));
            }
        }
        Self { regions }
    }

    pub fn for_page(page: Page) -> Self {
        Self::new(page.views())
    }

    pub fn region(&self, name: ViewName) -> Result<&Region> {
        self.regions
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| MarketError::UnknownView(name.to_string()))
    }

    pub fn region_mut(&mut self, name: ViewName) -> Result<&mut Region> {
        self.regions
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| MarketError::UnknownView(name.to_string()))
    }

    /// Renders `view` into the region registered as `name`.
    pub fn render<V: Render + ?Sized>(&mut self, name: ViewName, view: &V) -> Result<()> {
        self.region_mut(name)?.render(view);
        Ok(())
    }

    /// Renders into `name` only if this page shows it.
    pub fn render_if_shown<V: Render + ?Sized>(&mut self, name: ViewName, view: &V) {
        if let Ok(region) = self.region_mut(name) {
            region.render(view);
        }
    }
}

impl fmt::Display for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for region in &self.regions {
            writeln!(f, "── {} ──", region.name())?;
            for line in region.lines() {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::render::{Notice, QuoteList};
    use market_common::AssetQuote;
    use strum::IntoEnumIterator;

    #[test]
    fn regions_start_loading() {
        let registry = ViewRegistry::for_page(Page::Board);
        let region = registry.region(ViewName::TickerTape).unwrap();
        assert_eq!(region.lines(), [LOADING.to_string()]);
    }

    #[test]
    fn unknown_view_is_an_error() {
        let mut registry = ViewRegistry::for_page(Page::News);
        let err = registry
            .render(ViewName::Top20, &Notice::new("x"))
            .unwrap_err();
        assert!(matches!(
            err,
            MarketError::UnknownView(ref v) if *v == ViewName::Top20.to_string()
        ));
    }

    #[test]
    fn render_if_shown_skips_unregistered() {
        let mut registry = ViewRegistry::for_page(Page::News);
        let before = registry.clone();
        registry.render_if_shown(ViewName::Gainers, &Notice::new("x"));
        assert_eq!(registry, before);
    }

    #[test]
    fn rendering_twice_equals_rendering_once() {
        let quotes = vec![
            AssetQuote::new("BTC", 91234.5, 2.5),
            AssetQuote::new("ETH", 3100.0, -1.2),
        ];
        let mut once = ViewRegistry::for_page(Page::Board);
        once.render(ViewName::HomeCrypto, &QuoteList(&quotes)).unwrap();

        let mut twice = ViewRegistry::for_page(Page::Board);
        twice.render(ViewName::HomeCrypto, &QuoteList(&quotes)).unwrap();
        twice.render(ViewName::HomeCrypto, &QuoteList(&quotes)).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.region(ViewName::HomeCrypto).unwrap().lines().len(), 2);
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn duplicate_views_register_once() {
        let registry = ViewRegistry::new(&[ViewName::Toast, ViewName::Toast]);
        assert_eq!(registry.to_string().matches("── toast ──").count(), 1);
    }

    #[test]
    fn every_view_belongs_to_a_page() {
        let pages = [
            Page::Board,
            Page::Analyze,
            Page::Coin,
            Page::Recommend,
            Page::News,
            Page::Watch,
        ];
        for view in ViewName::iter() {
            assert!(pages.iter().any(|p| p.views().contains(&view)), "{} unused", view);
        }
    }
}
