//! Top-level UI layout: query box, chart, headlines and prediction, status bar.

pub mod chart_panel;
pub mod headlines_panel;
pub mod overlays;
pub mod prediction_panel;
pub mod query_bar;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(9),
            Constraint::Length(1),
        ])
        .split(f.area());

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[2]);

    query_bar::render(f, rows[0], app);

    let chart_title = match &app.report {
        Some(r) if r.is_synthetic() => {
            format!(" {} · last 1 month · SYNTHETIC ", r.resolution.ticker)
        }
        Some(r) => format!(" {} · last 1 month ", r.resolution.ticker),
        None => " Stock Price ".to_string(),
    };
    let inner = panel(f, rows[1], &chart_title);
    chart_panel::render(f, inner, app);

    let inner = panel(f, bottom[0], " Latest News & Sentiment ");
    headlines_panel::render(f, inner, app);

    let inner = panel(f, bottom[1], " Prediction ");
    prediction_panel::render(f, inner, app);

    status_bar::render(f, rows[3], app);

    let main_area = Rect {
        height: f.area().height.saturating_sub(1),
        ..f.area()
    };
    match app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw a bordered panel and return its inner area.
fn panel(f: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(title.to_string())
        .title_style(theme::panel_title(false));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
