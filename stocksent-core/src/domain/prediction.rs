//! Headlines, their scores, and the fused trend label.

use serde::Serialize;
use std::fmt;

/// A news headline with its polarity score in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub title: String,
    pub score: f64,
}

/// Coarse trend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Positive,
    Negative,
    Neutral,
    InsufficientData,
}

impl TrendLabel {
    pub fn label(self) -> &'static str {
        match self {
            TrendLabel::Positive => "Positive",
            TrendLabel::Negative => "Negative",
            TrendLabel::Neutral => "Neutral",
            TrendLabel::InsufficientData => "Not enough data",
        }
    }

    /// Single-glyph marker for terminal output.
    pub fn marker(self) -> &'static str {
        match self {
            TrendLabel::Positive => "▲",
            TrendLabel::Negative => "▼",
            TrendLabel::Neutral => "■",
            TrendLabel::InsufficientData => "?",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label plus rationale, with the inputs it was derived from when available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: TrendLabel,
    pub rationale: String,
    pub price_diff: Option<f64>,
    pub avg_sentiment: Option<f64>,
}
