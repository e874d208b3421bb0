//! StockSent core: ticker resolution, providers, sentiment and prediction.
//!
//! - Domain types (tickers, close series, headlines, predictions)
//! - Fuzzy ticker resolver over a fixed allow-list
//! - Market data and news providers behind traits, plus offline stand-ins
//! - VADER headline scoring and the two-signal trend predictor
//! - The query pipeline both front-ends drive

pub mod config;
pub mod data;
pub mod domain;
pub mod logging;
pub mod pipeline;
pub mod predictor;
pub mod resolver;
pub mod sentiment;

pub use config::AppConfig;
pub use pipeline::{AnalysisReport, ErrorCategory, Pipeline, PipelineError, ProviderMode};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types crossing the front-end boundary are
    /// Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Ticker>();
        require_sync::<domain::Ticker>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::Prediction>();
        require_sync::<domain::Prediction>();
        require_send::<resolver::TickerResolver>();
        require_sync::<resolver::TickerResolver>();
        require_send::<AnalysisReport>();
        require_sync::<AnalysisReport>();
        require_send::<PipelineError>();
        require_sync::<PipelineError>();
        require_send::<AppConfig>();
        require_sync::<AppConfig>();

        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::NewsApiProvider>();
        require_sync::<data::NewsApiProvider>();
    }
}
