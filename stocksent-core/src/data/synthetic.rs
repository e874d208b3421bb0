//! Offline providers for demos and tests.
//!
//! Results produced from these providers are tagged `DataSource::Synthetic`
//! and say nothing about the real market.

use chrono::{Datelike, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataSource, MarketDataProvider, NewsProvider, HEADLINE_LIMIT};
use crate::domain::{Lookback, PricePoint, PriceSeries, Ticker};

/// Seeded random-walk closes over the weekdays of the window.
///
/// The seed is derived from the symbol, so the same ticker always produces the
/// same series for the same window.
#[derive(Debug, Clone)]
pub struct SyntheticMarketData {
    daily_vol: f64,
}

impl SyntheticMarketData {
    pub fn new() -> Self {
        Self { daily_vol: 0.015 }
    }

    fn seed_for(symbol: &str) -> u64 {
        // FNV-1a
        symbol.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
            (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        })
    }
}

impl Default for SyntheticMarketData {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for SyntheticMarketData {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch_closes(&self, ticker: &Ticker, window: Lookback) -> Result<PriceSeries, DataError> {
        let mut rng = StdRng::seed_from_u64(Self::seed_for(ticker.as_str()));
        let mut close: f64 = rng.gen_range(20.0..500.0);

        let points: Vec<PricePoint> = window
            .start
            .iter_days()
            .take_while(|d| *d <= window.end)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .map(|date| {
                let shock: f64 = rng.gen_range(-1.0..1.0) * self.daily_vol;
                close = (close * (1.0 + shock)).max(0.01);
                PricePoint {
                    date,
                    close: (close * 100.0).round() / 100.0,
                }
            })
            .collect();

        Ok(PriceSeries::new(ticker.clone(), points))
    }
}

const SAMPLE_TEMPLATES: [&str; HEADLINE_LIMIT] = [
    "{} shares rally after strong quarterly earnings beat expectations",
    "Analysts warn {} faces tough competition and slowing growth",
    "{} announces new product line at annual event",
    "Investors cheer as {} raises full-year guidance",
    "{} hit with lawsuit over alleged patent infringement",
];

/// Fixed headlines that mention the query.
#[derive(Debug, Clone, Default)]
pub struct SampleNews;

impl NewsProvider for SampleNews {
    fn name(&self) -> &str {
        "sample_news"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch_headlines(&self, query: &str) -> Vec<String> {
        let subject = query.trim();
        if subject.is_empty() {
            return Vec::new();
        }
        SAMPLE_TEMPLATES
            .iter()
            .map(|t| t.replace("{}", subject))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TickerList;
    use chrono::NaiveDate;

    fn window() -> Lookback {
        Lookback::one_month_to(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap())
    }

    #[test]
    fn synthetic_series_is_deterministic() {
        let t = TickerList::default_list().get("AAPL").unwrap();
        let p = SyntheticMarketData::new();
        let a = p.fetch_closes(&t, window()).unwrap();
        let b = p.fetch_closes(&t, window()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn synthetic_series_skips_weekends_and_stays_in_window() {
        let t = TickerList::default_list().get("MSFT").unwrap();
        let s = SyntheticMarketData::new().fetch_closes(&t, window()).unwrap();
        assert!(s.len() >= 20);
        for p in s.points() {
            assert!(window().contains(p.date));
            assert!(!matches!(p.date.weekday(), Weekday::Sat | Weekday::Sun));
            assert!(p.close > 0.0);
        }
    }

    #[test]
    fn different_tickers_get_different_series() {
        let list = TickerList::default_list();
        let p = SyntheticMarketData::new();
        let a = p.fetch_closes(&list.get("AAPL").unwrap(), window()).unwrap();
        let b = p.fetch_closes(&list.get("NVDA").unwrap(), window()).unwrap();
        assert_ne!(a.closes(), b.closes());
    }

    #[test]
    fn sample_news_mentions_query() {
        let h = SampleNews.fetch_headlines("Tesla");
        assert_eq!(h.len(), HEADLINE_LIMIT);
        assert!(h.iter().all(|t| t.contains("Tesla")));
        assert!(SampleNews.fetch_headlines("  ").is_empty());
    }
}
