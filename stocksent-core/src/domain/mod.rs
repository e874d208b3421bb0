//! Domain types: tickers, price series, headlines, predictions.

pub mod prediction;
pub mod price;
pub mod ticker;

pub use prediction::{Headline, Prediction, TrendLabel};
pub use price::{Lookback, PricePoint, PriceSeries};
pub use ticker::{Ticker, TickerList, DEFAULT_TICKERS};
