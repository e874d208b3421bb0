//! Close-price line chart for the current report.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use stocksent_core::domain::PriceSeries;

use crate::app::AppState;
use crate::theme::{self, Theme};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.report {
        Some(report) if !report.prices.is_empty() => render_chart(f, area, &report.prices),
        _ => render_empty(f, area),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("No query yet.", theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Type a company name or ticker above and press Enter.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, prices: &PriceSeries) {
    let Some((min_y, max_y)) = prices.close_range() else {
        return render_empty(f, area);
    };
    let padding = ((max_y - min_y).abs() * 0.05).max(0.01);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = prices.len().saturating_sub(1) as f64;

    let data: Vec<(f64, f64)> = prices
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.close))
        .collect();

    let color = Theme::default().change_color(prices.net_change().unwrap_or(0.0));
    let name = prices.ticker().to_string();
    let dataset = Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(color))
        .graph_type(GraphType::Line)
        .data(&data);

    let first = prices
        .first_date()
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_default();
    let last = prices
        .last_date()
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_default();

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Close", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
