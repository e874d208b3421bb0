//! Ticker allow-list.
//!
//! The allow-list is the only place a [`Ticker`] can come from, so every
//! ticker that reaches a provider is known to be a member of it.

use serde::Serialize;
use std::fmt;

/// Built-in allow-list used when no configuration overrides it.
pub const DEFAULT_TICKERS: &[&str] = &[
    "AAPL",
    "MSFT",
    "GOOG",
    "AMZN",
    "TSLA",
    "META",
    "HDB",
    "HDFCBANK.NS",
    "VODAFONE",
    "BABA",
    "SPY",
    "NFLX",
    "BA",
    "DIS",
    "NVDA",
    "JPM",
    "WMT",
    "HSBC",
    "TCS.NS",
    "INFY.NS",
    "STX",
];

/// A symbol drawn from the allow-list, possibly exchange-qualified (`TCS.NS`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub(crate) fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Immutable, ordered allow-list of recognised tickers.
///
/// Order matters: when two entries score the same during resolution the
/// earlier one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TickerList {
    symbols: Vec<String>,
}

impl TickerList {
    /// Build an allow-list, upper-casing and trimming every entry.
    /// Blank entries and case-insensitive duplicates are dropped.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for s in symbols {
            let sym = s.as_ref().trim().to_uppercase();
            if sym.is_empty() || out.contains(&sym) {
                continue;
            }
            out.push(sym);
        }
        Self { symbols: out }
    }

    pub fn default_list() -> Self {
        Self::new(DEFAULT_TICKERS.iter().copied())
    }

    /// Look up an exact (case-insensitive) member.
    pub fn get(&self, symbol: &str) -> Option<Ticker> {
        let wanted = symbol.trim().to_uppercase();
        self.symbols
            .iter()
            .find(|s| **s == wanted)
            .map(|s| Ticker::new(s.clone()))
    }

    /// Mint the ticker at a given position.
    pub fn ticker_at(&self, index: usize) -> Option<Ticker> {
        self.symbols.get(index).map(|s| Ticker::new(s.clone()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for TickerList {
    fn default() -> Self {
        Self::default_list()
    }
}
