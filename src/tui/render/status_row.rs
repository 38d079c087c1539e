use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};
use crate::util::unicode;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(message) = app.status_message.as_deref() {
        let color = if message.starts_with("error:") {
            app.theme.red
        } else {
            app.theme.green
        };
        Line::from(Span::styled(
            unicode::fit_to_width(&format!(" {}", message), width),
            Style::default().fg(color).bg(bg),
        ))
    } else if app.config.ui.show_key_hints {
        Line::from(Span::styled(
            unicode::fit_to_width(key_hints(app), width),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn key_hints(app: &App) -> &'static str {
    match (app.mode, app.view) {
        (Mode::Navigate, View::Grid) if app.is_admin() => {
            " hl scroll  Enter open  f filter  A add ODS  n new  ? help"
        }
        (Mode::Navigate, View::Grid) => " hl scroll  Enter open  f filter  L log in  ? help",
        (Mode::Navigate, View::Detail) => " Tab pane  jk move  Esc back  ? help",
        (Mode::Selector, _) => " jk move  Enter choose  Esc close",
        (Mode::Form, _) => " Tab next field  Enter save  Esc cancel",
        (Mode::Confirm, _) => " y confirm  n cancel",
    }
}
