//! Parrot/neon theme tokens.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights)
//! - **Positive**: Neon green (rising prices, positive sentiment)
//! - **Negative**: Hot pink (falling prices, negative sentiment, errors)
//! - **Warning**: Neon orange (alerts)
//! - **Neutral**: Cool purple (neutral calls, secondary info)
//! - **Muted**: Steel blue (hints, secondary text)

use ratatui::style::{Color, Modifier, Style};

use stocksent_core::domain::TrendLabel;
use stocksent_core::predictor::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;

/// Semantic colors for values whose color depends on their sign or label.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            positive: POSITIVE,
            negative: NEGATIVE,
            warning: WARNING,
            neutral: NEUTRAL,
            text_primary: TEXT_PRIMARY,
        }
    }

    /// Green for a gain, pink for a loss.
    pub fn change_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    /// Color for a headline score, banded by the prediction thresholds.
    pub fn sentiment_color(&self, score: f64) -> Color {
        match score {
            s if s > POSITIVE_THRESHOLD => self.positive,
            s if s < NEGATIVE_THRESHOLD => self.negative,
            _ => self.neutral,
        }
    }

    pub fn label_color(&self, label: TrendLabel) -> Color {
        match label {
            TrendLabel::Positive => self.positive,
            TrendLabel::Negative => self.negative,
            TrendLabel::Neutral => self.neutral,
            TrendLabel::InsufficientData => self.warning,
        }
    }
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(Theme::default().text_primary)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
