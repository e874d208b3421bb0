//! Yahoo Finance market data provider.
//!
//! Fetches daily closes from Yahoo's v8 chart API. One request per call, no
//! retries: a failure is reported to the caller, which aborts the query.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes, which surface as [`DataError::ResponseFormatChanged`].

use chrono::{NaiveDate, NaiveTime};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use super::provider::{DataError, DataSource, MarketDataProvider};
use crate::config::{HttpConfig, MarketConfig};
use crate::domain::{Lookback, PricePoint, PriceSeries, Ticker};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

pub struct YahooProvider {
    client: Client,
    endpoint: String,
}

impl YahooProvider {
    pub fn new(http: &HttpConfig, market: &MarketConfig) -> Result<Self, DataError> {
        Ok(Self {
            client: super::build_client(http)?,
            endpoint: market.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Build the chart API URL for a symbol and date range.
    fn chart_url(endpoint: &str, symbol: &str, window: Lookback) -> String {
        let start_ts = day_start_ts(window.start);
        let end_ts = day_start_ts(window.end) + 86_399;
        format!("{endpoint}/{symbol}?period1={start_ts}&period2={end_ts}&interval=1d")
    }

    /// Parse the chart API response into close rows. Days with no close
    /// (holidays, halted sessions) are skipped.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<PricePoint>, DataError> {
        let result = match resp.chart.result {
            Some(result) => result,
            None => {
                return Err(match resp.chart.error {
                    Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    },
                    Some(err) => DataError::Rejected(format!("{}: {}", err.code, err.description)),
                    None => DataError::ResponseFormatChanged("empty result with no error".into()),
                });
            }
        };

        let Some(data) = result.into_iter().next() else {
            return Ok(Vec::new());
        };

        // Yahoo omits timestamps entirely when the range has no sessions.
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            if let Some(close) = quote.close.get(i).copied().flatten() {
                points.push(PricePoint { date, close });
            }
        }

        Ok(points)
    }
}

fn day_start_ts(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn source(&self) -> DataSource {
        DataSource::YahooFinance
    }

    fn fetch_closes(&self, ticker: &Ticker, window: Lookback) -> Result<PriceSeries, DataError> {
        let symbol = ticker.as_str();
        let url = Self::chart_url(&self.endpoint, symbol, window);
        debug!(%url, "requesting chart data");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(DataError::from_transport)?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                context: symbol.to_string(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        let points = Self::parse_response(symbol, chart)?;
        info!(ticker = symbol, rows = points.len(), "fetched closes");
        Ok(PriceSeries::new(ticker.clone(), points))
    }
}
