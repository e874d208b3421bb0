//! Headline polarity scoring with VADER.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores text with the VADER compound metric in [-1.0, 1.0].
///
/// Pure and deterministic: the same text always yields the same score.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound score for one piece of text. Blank text scores 0.0.
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }

    /// Scores in the same order as `texts`.
    pub fn score_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<f64> {
        texts.iter().map(|t| self.score(t.as_ref())).collect()
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer").finish_non_exhaustive()
    }
}
