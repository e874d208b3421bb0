//! Plain-text rendering of analysis results.

use std::fmt::Write;

use stocksent_core::domain::{Headline, Prediction, PriceSeries};
use stocksent_core::AnalysisReport;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One glyph per close, scaled between the series min and max.
pub fn sparkline(closes: &[f64]) -> String {
    let (min, max) = closes
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
            (lo.min(c), hi.max(c))
        });
    let span = max - min;
    closes
        .iter()
        .map(|&c| {
            if span <= f64::EPSILON {
                SPARK_LEVELS[SPARK_LEVELS.len() / 2]
            } else {
                let idx = ((c - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

pub fn price_section(prices: &PriceSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Stock Price (last 1 month) ---");
    match (prices.first_date(), prices.last_date(), prices.close_range()) {
        (Some(first), Some(last), Some((lo, hi))) => {
            let _ = writeln!(out, "Period:   {first} to {last} ({} closes)", prices.len());
            let _ = writeln!(out, "Trend:    {}", sparkline(&prices.closes()));
            let _ = writeln!(
                out,
                "Close:    {:.2} -> {:.2} (low {lo:.2}, high {hi:.2})",
                prices.first_close().unwrap_or_default(),
                prices.last_close().unwrap_or_default(),
            );
        }
        _ => {
            let _ = writeln!(out, "No stock data found.");
        }
    }
    out
}

pub fn headlines_section(headlines: &[Headline]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Latest News & Sentiment ---");
    if headlines.is_empty() {
        let _ = writeln!(out, "No recent news found.");
        return out;
    }
    for (i, h) in headlines.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, h.title);
        let _ = writeln!(out, "   Sentiment Score: {:.2}", h.score);
    }
    out
}

pub fn prediction_section(prediction: &Prediction) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Prediction Based on Trend & Sentiment ---");
    let _ = writeln!(
        out,
        "Prediction: {} {}",
        prediction.label.marker(),
        prediction.label
    );
    let _ = writeln!(out, "Reason:     {}", prediction.rationale);
    out
}

pub fn report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Using Ticker: {} (match score {})",
        report.resolution.ticker, report.resolution.score
    );
    out.push('\n');
    out.push_str(&price_section(&report.prices));
    out.push('\n');
    out.push_str(&headlines_section(&report.headlines));
    out.push('\n');
    out.push_str(&prediction_section(&report.prediction));
    if report.is_synthetic() {
        out.push('\n');
        out.push_str("WARNING: Results based on SYNTHETIC data\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocksent_core::domain::TrendLabel;

    #[test]
    fn sparkline_spans_levels() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0]), "▁▅█");
        assert_eq!(sparkline(&[5.0, 5.0]), "▅▅");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn empty_headlines_say_so() {
        assert!(headlines_section(&[]).contains("No recent news found."));
    }

    #[test]
    fn headlines_are_numbered_with_scores() {
        let text = headlines_section(&[
            Headline { title: "Up".into(), score: 0.5 },
            Headline { title: "Down".into(), score: -0.25 },
        ]);
        assert!(text.contains("1. Up"));
        assert!(text.contains("   Sentiment Score: 0.50\n"));
        assert!(text.contains("2. Down"));
        assert!(text.contains("   Sentiment Score: -0.25\n"));
    }

    #[test]
    fn prediction_shows_label_and_reason() {
        let text = prediction_section(&Prediction {
            label: TrendLabel::Neutral,
            rationale: "Price changed by 1.00, sentiment is 0.10".into(),
            price_diff: Some(1.0),
            avg_sentiment: Some(0.1),
        });
        assert!(text.contains("Prediction: ■ Neutral"));
        assert!(text.contains("Reason:     Price changed by 1.00, sentiment is 0.10"));
    }
}
