//! Overlay widgets: welcome, help, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use stocksent_core::resolver::MATCH_THRESHOLD;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Startup welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to StockSent ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Type a company name or ticker (AAPL, Tesla, infy.ns)",
            theme::muted(),
        )),
        Line::from(Span::styled("  2. Press Enter to analyze", theme::muted())),
        Line::from(Span::styled(
            "  3. Read the one-month chart, headlines and prediction",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to dismiss...",
            theme::neutral(),
        )),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Key bindings and how the prediction is made.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:>8}  "), theme::accent()),
            Span::styled(what, theme::muted()),
        ])
    };

    let text = vec![
        Line::from(Span::styled("Keys", theme::accent_bold())),
        key("Enter", "analyze the query in the input box"),
        key("Esc", "clear input; quit when input is empty"),
        key("F1", "toggle this help"),
        key("F2", "error history"),
        key("Ctrl-C", "quit"),
        Line::from(""),
        Line::from(Span::styled("Prediction", theme::accent_bold())),
        Line::from(Span::styled(
            format!(
                "  Queries are fuzzy-matched to a fixed ticker list (score >= {MATCH_THRESHOLD})."
            ),
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  Positive: price rose over the month and average headline sentiment > 0.2.",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  Negative: price fell and average sentiment < -0.2.",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  Anything else is Neutral; no headlines means not enough data.",
            theme::muted(),
        )),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [Up/Down]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(inner.height as usize)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
