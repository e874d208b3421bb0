//! Fuses the price trend with average headline sentiment into a label.

use crate::domain::{Prediction, PriceSeries, TrendLabel};

/// Average sentiment must exceed this (with a rising price) for a positive call.
pub const POSITIVE_THRESHOLD: f64 = 0.2;

/// Average sentiment must fall below this (with a falling price) for a
/// negative call.
pub const NEGATIVE_THRESHOLD: f64 = -0.2;

pub const NO_HEADLINES_RATIONALE: &str = "No news headlines available to evaluate sentiment.";
pub const NO_PRICES_RATIONALE: &str = "No price data available to evaluate the trend.";

/// Predict the trend label for a close series and its headline scores.
///
/// Both signals must agree for a directional call; anything else is neutral.
pub fn predict_trend(prices: &PriceSeries, scores: &[f64]) -> Prediction {
    if scores.is_empty() {
        return insufficient(NO_HEADLINES_RATIONALE);
    }
    let Some(price_diff) = prices.net_change() else {
        return insufficient(NO_PRICES_RATIONALE);
    };
    let avg = scores.iter().sum::<f64>() / scores.len() as f64;

    let (label, rationale) = if price_diff > 0.0 && avg > POSITIVE_THRESHOLD {
        (
            TrendLabel::Positive,
            format!("Price increased by {price_diff:.2} and sentiment is positive ({avg:.2})"),
        )
    } else if price_diff < 0.0 && avg < NEGATIVE_THRESHOLD {
        (
            TrendLabel::Negative,
            format!("Price dropped by {price_diff:.2} and sentiment is negative ({avg:.2})"),
        )
    } else {
        (
            TrendLabel::Neutral,
            format!("Price changed by {price_diff:.2}, sentiment is {avg:.2}"),
        )
    };

    Prediction {
        label,
        rationale,
        price_diff: Some(price_diff),
        avg_sentiment: Some(avg),
    }
}

fn insufficient(rationale: &str) -> Prediction {
    Prediction {
        label: TrendLabel::InsufficientData,
        rationale: rationale.to_string(),
        price_diff: None,
        avg_sentiment: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, TickerList};
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Days::new(i as u64),
                close,
            })
            .collect();
        PriceSeries::new(TickerList::default_list().get("AAPL").unwrap(), points)
    }

    #[test]
    fn rising_price_and_positive_news() {
        let p = predict_trend(&series(&[100.0, 103.0, 105.5]), &[0.5, 0.3, 0.4]);
        assert_eq!(p.label, TrendLabel::Positive);
        assert_eq!(
            p.rationale,
            "Price increased by 5.50 and sentiment is positive (0.40)"
        );
        assert_eq!(p.price_diff, Some(5.5));
    }

    #[test]
    fn falling_price_and_negative_news() {
        let p = predict_trend(&series(&[200.0, 190.0, 187.25]), &[-0.6, -0.4]);
        assert_eq!(p.label, TrendLabel::Negative);
        assert_eq!(
            p.rationale,
            "Price dropped by -12.75 and sentiment is negative (-0.50)"
        );
    }

    #[test]
    fn disagreement_is_neutral() {
        let p = predict_trend(&series(&[100.0, 110.0]), &[-0.5]);
        assert_eq!(p.label, TrendLabel::Neutral);
        assert_eq!(p.rationale, "Price changed by 10.00, sentiment is -0.50");
    }

    #[test]
    fn two_point_series() {
        let p = predict_trend(&series(&[100.0, 105.0]), &[0.3, 0.4]);
        assert_eq!(p.label, TrendLabel::Positive);
        assert_eq!(p.price_diff, Some(5.0));
        assert!((p.avg_sentiment.unwrap() - 0.35).abs() < 1e-12);

        let p = predict_trend(&series(&[100.0, 90.0]), &[-0.5, -0.4]);
        assert_eq!(p.label, TrendLabel::Negative);
        assert_eq!(p.price_diff, Some(-10.0));
        assert!((p.avg_sentiment.unwrap() + 0.45).abs() < 1e-12);

        let p = predict_trend(&series(&[100.0, 100.0]), &[0.5, 0.5]);
        assert_eq!(p.label, TrendLabel::Neutral);
    }

    #[test]
    fn thresholds_are_strict() {
        let p = predict_trend(&series(&[100.0, 101.0]), &[0.2]);
        assert_eq!(p.label, TrendLabel::Neutral);
        let p = predict_trend(&series(&[101.0, 100.0]), &[-0.2]);
        assert_eq!(p.label, TrendLabel::Neutral);
    }

    #[test]
    fn flat_price_is_neutral_even_with_strong_sentiment() {
        let p = predict_trend(&series(&[50.0, 60.0, 50.0]), &[0.9]);
        assert_eq!(p.label, TrendLabel::Neutral);
        assert_eq!(p.rationale, "Price changed by 0.00, sentiment is 0.90");
    }

    #[test]
    fn no_scores_is_insufficient() {
        let p = predict_trend(&series(&[100.0, 120.0]), &[]);
        assert_eq!(p.label, TrendLabel::InsufficientData);
        assert_eq!(p.rationale, NO_HEADLINES_RATIONALE);
        assert_eq!(p.price_diff, None);
        assert_eq!(p.avg_sentiment, None);
    }

    #[test]
    fn no_prices_is_insufficient() {
        let p = predict_trend(&series(&[]), &[0.5]);
        assert_eq!(p.label, TrendLabel::InsufficientData);
        assert_eq!(p.rationale, NO_PRICES_RATIONALE);
    }
}
