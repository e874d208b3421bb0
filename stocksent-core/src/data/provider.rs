//! Provider traits and structured error types.
//!
//! The two traits are the only seam between the pipeline and the network, so
//! the pipeline and predictor can be exercised with in-memory fakes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Lookback, PriceSeries, Ticker};

/// Structured error types for provider calls.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("provider returned HTTP {status} for {context}")]
    HttpStatus { status: u16, context: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider rejected request: {0}")]
    Rejected(String),

    #[error("missing API key for {provider}")]
    MissingApiKey { provider: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl DataError {
    /// Map a transport error from reqwest into the provider taxonomy.
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DataError::ResponseFormatChanged(e.to_string())
        } else {
            DataError::NetworkUnreachable(e.to_string())
        }
    }
}

/// Where a series or headline batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    YahooFinance,
    NewsApi,
    Synthetic,
}

/// Source of daily closing prices.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    fn source(&self) -> DataSource;

    /// Daily closes for `ticker` inside `window`. An empty series is a valid
    /// answer; callers decide what "no rows" means.
    fn fetch_closes(&self, ticker: &Ticker, window: Lookback) -> Result<PriceSeries, DataError>;
}

/// Source of recent headline text.
///
/// Implementations never fail: any provider or transport error degrades to an
/// empty list.
pub trait NewsProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    fn source(&self) -> DataSource;

    /// Up to [`HEADLINE_LIMIT`] headlines, most recent first.
    fn fetch_headlines(&self, query: &str) -> Vec<String>;
}

/// Maximum number of headlines scored per query.
pub const HEADLINE_LIMIT: usize = 5;
