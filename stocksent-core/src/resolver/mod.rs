//! Free-text → allow-listed ticker resolution.

pub mod fuzzy;

use serde::Serialize;

use crate::domain::{Ticker, TickerList};

/// Minimum weighted similarity (0..=100) for a match to be accepted.
pub const MATCH_THRESHOLD: u8 = 75;

/// A successful resolution: the allow-list entry and its similarity score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub ticker: Ticker,
    pub score: u8,
}

/// Resolves company names or ticker symbols against a fixed allow-list.
#[derive(Debug, Clone)]
pub struct TickerResolver {
    tickers: TickerList,
    threshold: u8,
}

impl TickerResolver {
    pub fn new(tickers: TickerList) -> Self {
        Self {
            tickers,
            threshold: MATCH_THRESHOLD,
        }
    }

    pub fn tickers(&self) -> &TickerList {
        &self.tickers
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Highest-scoring entry regardless of threshold. Ties go to the
    /// earliest entry.
    pub fn best_match(&self, query: &str) -> Option<Resolution> {
        let mut best: Option<(usize, u8)> = None;
        for (i, symbol) in self.tickers.symbols().iter().enumerate() {
            let score = fuzzy::weighted_ratio(query, symbol);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }
        let (index, score) = best?;
        Some(Resolution {
            ticker: self.tickers.ticker_at(index)?,
            score,
        })
    }

    /// Best entry if it meets the threshold, otherwise `None`.
    pub fn resolve(&self, query: &str) -> Option<Resolution> {
        self.best_match(query).filter(|r| r.score >= self.threshold)
    }

    /// Every entry with its score, best first (stable for ties).
    pub fn rank(&self, query: &str) -> Vec<(String, u8)> {
        let mut ranked: Vec<(String, u8)> = self
            .tickers
            .symbols()
            .iter()
            .map(|s| (s.clone(), fuzzy::weighted_ratio(query, s)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl Default for TickerResolver {
    fn default() -> Self {
        Self::new(TickerList::default_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_symbol_resolves_with_full_score() {
        let r = TickerResolver::default();
        let res = r.resolve("aapl").unwrap();
        assert_eq!(res.ticker.as_str(), "AAPL");
        assert_eq!(res.score, 100);
    }

    #[test]
    fn exchange_qualified_symbol_resolves() {
        let r = TickerResolver::default();
        let res = r.resolve("infy.ns").unwrap();
        assert_eq!(res.ticker.as_str(), "INFY.NS");
        assert_eq!(res.score, 100);
    }

    #[test]
    fn close_spelling_resolves() {
        let r = TickerResolver::default();
        let res = r.resolve("Tesla").unwrap();
        assert_eq!(res.ticker.as_str(), "TSLA");
        assert!(res.score >= MATCH_THRESHOLD);
    }

    #[test]
    fn company_names_resolve_to_their_symbols() {
        let r = TickerResolver::default();
        let cases = [("Amazon", "AMZN", 80), ("Nvidia", "NVDA", 80), ("Tesla", "TSLA", 89)];
        for (query, symbol, score) in cases {
            let res = r.resolve(query).unwrap();
            assert_eq!(res.ticker.as_str(), symbol, "{query}");
            assert_eq!(res.score, score, "{query}");
        }
    }

    #[test]
    fn distant_company_names_stay_below_threshold() {
        let r = TickerResolver::default();
        for (query, symbol, score) in [("Apple", "AAPL", 67), ("Netflix", "NFLX", 73)] {
            assert!(r.resolve(query).is_none(), "{query}");
            let best = r.best_match(query).unwrap();
            assert_eq!(best.ticker.as_str(), symbol, "{query}");
            assert_eq!(best.score, score, "{query}");
        }
    }

    #[test]
    fn unrelated_input_does_not_resolve() {
        let r = TickerResolver::default();
        assert!(r.resolve("qwertyuiop").is_none());
        assert!(r.resolve("").is_none());
        assert!(r.resolve("   ").is_none());
    }

    #[test]
    fn best_match_ignores_threshold() {
        let r = TickerResolver::default();
        let res = r.best_match("qwertyuiop").unwrap();
        assert!(res.score < MATCH_THRESHOLD);
    }

    #[test]
    fn ties_prefer_earlier_entry() {
        let r = TickerResolver::new(TickerList::new(["ABCD", "ABCE"]));
        // both are one substitution away from "abcx"
        let res = r.best_match("abcx").unwrap();
        assert_eq!(res.ticker.as_str(), "ABCD");
    }

    #[test]
    fn rank_is_sorted_descending() {
        let r = TickerResolver::default();
        let ranked = r.rank("NFLX");
        assert_eq!(ranked[0], ("NFLX".to_string(), 100));
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
