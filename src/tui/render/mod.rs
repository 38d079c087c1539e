pub mod alert_popup;
pub mod confirm_popup;
pub mod detail_view;
pub mod form_popup;
pub mod grid_view;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod selector_popup;
pub mod status_row;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode, View};

/// Draw the current view, then any overlay on top of it.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    match app.view {
        View::Grid => grid_view::render_grid_view(frame, app, chunks[1]),
        View::Detail => detail_view::render_detail_view(frame, app, chunks[1]),
    }

    status_row::render_status_row(frame, app, chunks[2]);

    // Overlays, topmost last
    match app.mode {
        Mode::Selector => selector_popup::render_selector_popup(frame, app, area),
        Mode::Form => form_popup::render_form_popup(frame, app, area),
        Mode::Confirm => confirm_popup::render_confirm_popup(frame, app, area),
        Mode::Navigate => {}
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
    if app.alert.is_some() {
        alert_popup::render_alert_popup(frame, app, area);
    }
}
