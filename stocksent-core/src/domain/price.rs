//! Daily close series over the lookback window.

use chrono::{Months, NaiveDate};
use serde::Serialize;

use super::ticker::Ticker;

/// Fixed historical span a query covers: one calendar month ending on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lookback {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Lookback {
    /// One calendar month ending on `end` (inclusive). Month-end overflow
    /// clamps to the last day of the previous month.
    pub fn one_month_to(end: NaiveDate) -> Self {
        let start = end
            .checked_sub_months(Months::new(1))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One (date, closing price) row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Ordered close prices for one ticker. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: Ticker,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting rows by date and dropping non-finite closes.
    pub fn new(ticker: Ticker, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close.is_finite());
        points.sort_by_key(|p| p.date);
        Self { ticker, points }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_close(&self) -> Option<f64> {
        self.points.first().map(|p| p.close)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Last close minus first close; `None` for an empty series.
    pub fn net_change(&self) -> Option<f64> {
        Some(self.last_close()? - self.first_close()?)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// (min, max) close, `None` for an empty series.
    pub fn close_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let min = self.points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
        let max = self
            .points
            .iter()
            .map(|p| p.close)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}
