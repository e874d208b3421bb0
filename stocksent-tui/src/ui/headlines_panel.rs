//! Headline list with per-headline sentiment scores.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::{self, Theme};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(report) = &app.report else {
        f.render_widget(
            Paragraph::new(Span::styled("Headlines appear here.", theme::muted())),
            area,
        );
        return;
    };

    if report.headlines.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No recent news found.", theme::warning())),
            area,
        );
        return;
    }

    let palette = Theme::default();
    let lines: Vec<Line> = report
        .headlines
        .iter()
        .map(|h| {
            Line::from(vec![
                Span::styled(
                    format!("{:+.2} ", h.score),
                    Style::default().fg(palette.sentiment_color(h.score)),
                ),
                Span::styled(h.title.as_str(), theme::text()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
