//! Prediction card: label, rationale, and the two inputs.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::{self, Theme};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(report) = &app.report else {
        f.render_widget(
            Paragraph::new(Span::styled("Awaiting a query.", theme::muted())),
            area,
        );
        return;
    };

    let palette = Theme::default();
    let p = &report.prediction;
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", p.label.marker(), p.label),
            Style::default()
                .fg(palette.label_color(p.label))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(p.rationale.as_str(), theme::text())),
    ];

    if let Some(diff) = p.price_diff {
        lines.push(Line::from(vec![
            Span::styled("Price change: ", theme::muted()),
            Span::styled(
                format!("{diff:+.2}"),
                Style::default().fg(palette.change_color(diff)),
            ),
        ]));
    }
    if let Some(avg) = p.avg_sentiment {
        lines.push(Line::from(vec![
            Span::styled("Avg sentiment: ", theme::muted()),
            Span::styled(
                format!("{avg:+.2}"),
                Style::default().fg(palette.sentiment_color(avg)),
            ),
        ]));
    }
    if report.is_synthetic() {
        lines.push(Line::from(Span::styled(
            "SYNTHETIC data (offline mode)",
            theme::warning(),
        )));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
