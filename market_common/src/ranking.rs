//! Derived views over a list of quotes.
//!
//! All functions borrow the input and return fresh views; nothing is cached, so
//! every refresh recomputes from the latest fetch. Ranking uses a stable sort with
//! `f64::total_cmp`, which makes the output deterministic even for ties.
use std::cmp::Ordering;

use crate::quote::AssetQuote;

/// Best and worst quote of a non-empty list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes<'a> {
    /// Highest `change`; the earliest one on ties.
    pub best: &'a AssetQuote,
    /// Lowest `change`; the latest one on ties.
    pub worst: &'a AssetQuote,
}

/// Top gainers and losers of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct Movers<'a> {
    /// Highest changes first.
    pub gainers: Vec<&'a AssetQuote>,
    /// Lowest changes first ("worst-first").
    pub losers: Vec<&'a AssetQuote>,
}

fn by_change_desc(a: &&AssetQuote, b: &&AssetQuote) -> Ordering {
    b.change.total_cmp(&a.change)
}

/// First `n` quotes in source order. Shorter input is returned whole.
pub fn top_n(quotes: &[AssetQuote], n: usize) -> &[AssetQuote] {
    &quotes[..n.min(quotes.len())]
}

/// Quotes sorted by `change` descending; ties keep their source order.
pub fn rank_by_change(quotes: &[AssetQuote]) -> Vec<&AssetQuote> {
    let mut ranked: Vec<&AssetQuote> = quotes.iter().collect();
    ranked.sort_by(by_change_desc);
    ranked
}

/// Best and worst quote, or `None` when there is nothing to compare.
pub fn best_and_worst(quotes: &[AssetQuote]) -> Option<Extremes<'_>> {
    let ranked = rank_by_change(quotes);
    let best = *ranked.first()?;
    let worst = *ranked.last()?;
    Some(Extremes { best, worst })
}

/// Top `k` gainers and top `k` losers. Losers are sorted ascending with ties in
/// source order. With fewer than `2 * k` quotes the two lists overlap.
pub fn gainers_and_losers(quotes: &[AssetQuote], k: usize) -> Movers<'_> {
    let ranked = rank_by_change(quotes);
    let take = k.min(ranked.len());
    let gainers = ranked[..take].to_vec();
    let mut losers = ranked[ranked.len() - take..].to_vec();
    losers.sort_by(|a, b| a.change.total_cmp(&b.change));
    Movers { gainers, losers }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(symbol: &str, change: f64) -> AssetQuote {
        AssetQuote::new(symbol, 1.0, change)
    }

    fn symbols(view: &[&AssetQuote]) -> Vec<String> {
        view.iter().map(|q| q.symbol.clone()).collect()
    }

    #[test]
    fn ranks_btc_xrp_eth() {
        let quotes = vec![q("BTC", 2.5), q("ETH", -1.2), q("XRP", 0.3)];
        let ranked = rank_by_change(&quotes);
        assert_eq!(symbols(&ranked), vec!["BTC", "XRP", "ETH"]);

        let extremes = best_and_worst(&quotes).unwrap();
        assert_eq!(extremes.best.symbol, "BTC");
        assert_eq!(extremes.worst.symbol, "ETH");
    }

    #[test]
    fn best_and_worst_picks_max_and_min() {
        let quotes = vec![q("A", 5.0), q("B", -2.0), q("C", 1.0)];
        let extremes = best_and_worst(&quotes).unwrap();
        assert_eq!(extremes.best.symbol, "A");
        assert_eq!(extremes.worst.symbol, "B");
    }

    #[test]
    fn single_quote_is_both_best_and_worst() {
        let quotes = vec![q("SOL", 0.7)];
        let extremes = best_and_worst(&quotes).unwrap();
        assert_eq!(extremes.best, extremes.worst);
    }

    #[test]
    fn empty_input_has_no_extremes() {
        assert!(best_and_worst(&[]).is_none());
        assert!(top_n(&[], 5).is_empty());
        let movers = gainers_and_losers(&[], 3);
        assert!(movers.gainers.is_empty() && movers.losers.is_empty());
    }

    #[test]
    fn top_n_keeps_source_order_and_tolerates_short_input() {
        let quotes = vec![q("ETH", -1.0), q("BTC", 3.0), q("SOL", 0.2)];
        assert_eq!(top_n(&quotes, 5).len(), 3);
        let top2: Vec<&str> = top_n(&quotes, 2).iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(top2, vec!["ETH", "BTC"]);
        assert!(top_n(&quotes, 0).is_empty());
    }

    #[test]
    fn ties_keep_source_order() {
        let quotes = vec![q("A", 1.0), q("B", 2.0), q("C", 1.0), q("D", 1.0)];
        let ranked = rank_by_change(&quotes);
        assert_eq!(symbols(&ranked), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn ranking_is_sorted_permutation() {
        let changes = [3.1, -0.5, 0.0, 12.4, -7.7, 0.0, 2.2, -0.5, 9.9, 1.1, -3.3];
        let quotes: Vec<AssetQuote> = changes
            .iter()
            .enumerate()
            .map(|(i, c)| q(&format!("S{}", i), *c))
            .collect();
        let ranked = rank_by_change(&quotes);

        assert!(ranked.windows(2).all(|w| w[0].change >= w[1].change));

        let mut before: Vec<String> = quotes.iter().map(|q| q.symbol.clone()).collect();
        let mut after = symbols(&ranked);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn ten_quotes_give_three_disjoint_gainers_and_losers() {
        let quotes: Vec<AssetQuote> = (0..10)
            .map(|i| q(&format!("C{}", i), i as f64 - 4.5))
            .collect();
        let movers = gainers_and_losers(&quotes, 3);
        assert_eq!(symbols(&movers.gainers), vec!["C9", "C8", "C7"]);
        assert_eq!(symbols(&movers.losers), vec!["C0", "C1", "C2"]);
        assert!(movers
            .gainers
            .iter()
            .all(|g| !movers.losers.iter().any(|l| l.symbol == g.symbol)));
    }

    #[test]
    fn tied_losers_keep_source_order() {
        let quotes = vec![q("A", 5.0), q("X", -1.0), q("Y", -1.0), q("Z", -2.0)];
        let movers = gainers_and_losers(&quotes, 3);
        assert_eq!(symbols(&movers.losers), vec!["Z", "X", "Y"]);
        assert_eq!(symbols(&movers.gainers), vec!["A", "X", "Y"]);
    }

    #[test]
    fn short_lists_overlap() {
        let quotes = vec![q("A", 1.0), q("B", -1.0), q("C", 0.5), q("D", 0.1)];
        let movers = gainers_and_losers(&quotes, 3);
        assert_eq!(symbols(&movers.gainers), vec!["A", "C", "D"]);
        assert_eq!(symbols(&movers.losers), vec!["B", "D", "C"]);
    }
}
