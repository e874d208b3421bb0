//! One query, end to end: resolve → prices → headlines → scores → prediction.
//!
//! Runs synchronously on the calling thread. A query aborts early when no
//! ticker matches or the market provider returns nothing usable; news
//! problems never abort, they only leave the headline list empty.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::data::{
    DataError, DataSource, MarketDataProvider, NewsApiProvider, NewsProvider, SampleNews,
    SyntheticMarketData, YahooProvider,
};
use crate::domain::{Headline, Lookback, Prediction, PriceSeries};
use crate::predictor::predict_trend;
use crate::resolver::{Resolution, TickerResolver};
use crate::sentiment::SentimentScorer;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no matching ticker found for '{query}'")]
    NoMatch { query: String },

    #[error("no price data found for {ticker}")]
    NoPriceData { ticker: String },

    #[error("market data for {ticker}: {source}")]
    Market {
        ticker: String,
        #[source]
        source: DataError,
    },

    #[error("internal error while analyzing '{query}': {message}")]
    Internal { query: String, message: String },
}

impl PipelineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PipelineError::NoMatch { .. } => ErrorCategory::Match,
            PipelineError::NoPriceData { .. } => ErrorCategory::Data,
            PipelineError::Market { .. } => ErrorCategory::Network,
            PipelineError::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Coarse error class shown in front-end error lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Match,
    Data,
    Network,
    Internal,
}

impl ErrorCategory {
    /// Short tag for error lists.
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Match => "MATCH",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Network => "NET",
            ErrorCategory::Internal => "BUG",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which provider pair [`Pipeline::from_config`] wires up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    Live,
    Offline,
}

/// Pipeline stages, reported as they start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    FetchingPrices,
    FetchingNews,
    Scoring,
    Predicting,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Resolving => "Resolving ticker",
            Stage::FetchingPrices => "Fetching prices",
            Stage::FetchingNews => "Fetching news",
            Stage::Scoring => "Scoring headlines",
            Stage::Predicting => "Predicting trend",
        }
    }
}

pub trait AnalysisProgress {
    fn on_stage(&self, stage: Stage);
}

/// Ignores progress.
pub struct NoProgress;

impl AnalysisProgress for NoProgress {
    fn on_stage(&self, _stage: Stage) {}
}

/// Everything one query produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub query: String,
    pub resolution: Resolution,
    pub window: Lookback,
    pub prices: PriceSeries,
    pub price_source: DataSource,
    pub headlines: Vec<Headline>,
    pub news_source: DataSource,
    pub prediction: Prediction,
}

impl AnalysisReport {
    /// True when either input did not come from a real provider.
    pub fn is_synthetic(&self) -> bool {
        self.price_source == DataSource::Synthetic || self.news_source == DataSource::Synthetic
    }
}

pub struct Pipeline {
    resolver: TickerResolver,
    market: Box<dyn MarketDataProvider>,
    news: Box<dyn NewsProvider>,
    scorer: SentimentScorer,
    as_of: Option<NaiveDate>,
}

impl Pipeline {
    pub fn new(
        resolver: TickerResolver,
        market: Box<dyn MarketDataProvider>,
        news: Box<dyn NewsProvider>,
    ) -> Self {
        Self {
            resolver,
            market,
            news,
            scorer: SentimentScorer::new(),
            as_of: None,
        }
    }

    /// Pin the lookback end date instead of using today (UTC).
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn from_config(config: &AppConfig, mode: ProviderMode) -> Result<Self, DataError> {
        let resolver = TickerResolver::new(config.ticker_list());
        let pipeline = match mode {
            ProviderMode::Live => {
                if !config.has_api_key() {
                    warn!("no news API key configured; headlines will be empty");
                }
                Self::new(
                    resolver,
                    Box::new(YahooProvider::new(&config.http, &config.market)?),
                    Box::new(NewsApiProvider::new(&config.http, &config.news)?),
                )
            }
            ProviderMode::Offline => Self::new(
                resolver,
                Box::new(SyntheticMarketData::new()),
                Box::new(SampleNews),
            ),
        };
        Ok(pipeline)
    }

    pub fn resolver(&self) -> &TickerResolver {
        &self.resolver
    }

    pub fn run(&self, query: &str) -> Result<AnalysisReport, PipelineError> {
        self.run_with_progress(query, &NoProgress)
    }

    /// [`Pipeline::run`], with a panic anywhere in the query turned into
    /// [`PipelineError::Internal`]. Interactive loops use this to keep going.
    pub fn run_catching(&self, query: &str) -> Result<AnalysisReport, PipelineError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.run(query))).unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            error!(query, %message, "analysis panicked");
            Err(PipelineError::Internal {
                query: query.trim().to_string(),
                message,
            })
        })
    }

    pub fn run_with_progress(
        &self,
        query: &str,
        progress: &dyn AnalysisProgress,
    ) -> Result<AnalysisReport, PipelineError> {
        let query = query.trim();

        progress.on_stage(Stage::Resolving);
        let resolution = self
            .resolver
            .resolve(query)
            .ok_or_else(|| PipelineError::NoMatch {
                query: query.to_string(),
            })?;
        let ticker = resolution.ticker.clone();
        info!(query, %ticker, score = resolution.score, "resolved ticker");

        progress.on_stage(Stage::FetchingPrices);
        let window = Lookback::one_month_to(self.as_of.unwrap_or_else(|| Utc::now().date_naive()));
        let prices = self
            .market
            .fetch_closes(&ticker, window)
            .map_err(|source| PipelineError::Market {
                ticker: ticker.to_string(),
                source,
            })?;
        if prices.is_empty() {
            return Err(PipelineError::NoPriceData {
                ticker: ticker.to_string(),
            });
        }

        // News is searched with the user's own wording, not the symbol.
        progress.on_stage(Stage::FetchingNews);
        let titles = self.news.fetch_headlines(query);

        progress.on_stage(Stage::Scoring);
        let scores = self.scorer.score_all(&titles);
        let headlines: Vec<Headline> = titles
            .into_iter()
            .zip(scores.iter().copied())
            .map(|(title, score)| Headline { title, score })
            .collect();

        progress.on_stage(Stage::Predicting);
        let prediction = predict_trend(&prices, &scores);
        info!(%ticker, label = %prediction.label, "prediction ready");

        Ok(AnalysisReport {
            query: query.to_string(),
            resolution,
            window,
            prices,
            price_source: self.market.source(),
            headlines,
            news_source: self.news.source(),
            prediction,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("market", &self.market.name())
            .field("news", &self.news.name())
            .field("as_of", &self.as_of)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder(RefCell<Vec<Stage>>);

    impl AnalysisProgress for Recorder {
        fn on_stage(&self, stage: Stage) {
            self.0.borrow_mut().push(stage);
        }
    }

    fn offline() -> Pipeline {
        Pipeline::from_config(&AppConfig::default(), ProviderMode::Offline)
            .unwrap()
            .with_as_of(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap())
    }

    #[test]
    fn offline_run_reports_all_stages() {
        let rec = Recorder(RefCell::new(Vec::new()));
        let report = offline().run_with_progress("Tesla", &rec).unwrap();
        assert_eq!(report.resolution.ticker.as_str(), "TSLA");
        assert_eq!(report.headlines.len(), 5);
        assert!(report.is_synthetic());
        assert_eq!(
            *rec.0.borrow(),
            vec![
                Stage::Resolving,
                Stage::FetchingPrices,
                Stage::FetchingNews,
                Stage::Scoring,
                Stage::Predicting,
            ]
        );
    }

    #[test]
    fn no_match_stops_after_resolving() {
        let rec = Recorder(RefCell::new(Vec::new()));
        let err = offline().run_with_progress("qqqqqq", &rec).unwrap_err();
        assert!(matches!(err, PipelineError::NoMatch { .. }));
        assert_eq!(err.category(), ErrorCategory::Match);
        assert_eq!(err.category().to_string(), "MATCH");
        assert_eq!(*rec.0.borrow(), vec![Stage::Resolving]);
    }

    #[test]
    fn run_catching_passes_ordinary_results_through() {
        let p = offline();
        assert!(p.run_catching("MSFT").is_ok());
        let err = p.run_catching("qqqqqq").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Match);
    }

    #[test]
    fn panic_payloads_become_messages() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("index out of bounds"));
        assert_eq!(panic_message(owned.as_ref()), "index out of bounds");
        let borrowed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(borrowed.as_ref()), "boom");
        let other: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }

    #[test]
    fn report_serializes_to_json() {
        let report = offline().run("AAPL").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["resolution"]["ticker"], "AAPL");
        assert_eq!(json["price_source"], "synthetic");
        assert!(json["prediction"]["label"].is_string());
    }
}
