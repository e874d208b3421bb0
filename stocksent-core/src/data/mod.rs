//! Market data and news providers.

pub mod newsapi;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HttpConfig;

pub use newsapi::NewsApiProvider;
pub use provider::{DataError, DataSource, MarketDataProvider, NewsProvider, HEADLINE_LIMIT};
pub use synthetic::{SampleNews, SyntheticMarketData};
pub use yahoo::YahooProvider;

/// Blocking HTTP client shared by the live providers.
pub(crate) fn build_client(http: &HttpConfig) -> Result<Client, DataError> {
    Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .user_agent(http.user_agent.as_str())
        .build()
        .map_err(|e| DataError::ClientBuild(e.to_string()))
}
