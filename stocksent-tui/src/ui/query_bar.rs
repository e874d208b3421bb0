//! Query input box.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(app.overlay == crate::app::Overlay::None))
        .title(" Enter Stock Ticker or Company Name (e.g., AAPL, TSLA, MSFT) ")
        .title_style(theme::panel_title(true));

    let line = if app.input.is_empty() {
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled("_", theme::accent()),
            Span::styled("  type a query and press Enter", theme::muted()),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(app.input.as_str(), theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ])
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}
