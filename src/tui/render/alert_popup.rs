use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::{centered_rect_fixed, wrap_text};

/// Blocking message box; any of Enter, Esc or Space dismisses it
pub fn render_alert_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = app.alert.as_deref() else {
        return;
    };
    let bg = app.theme.background;
    let popup_w: u16 = 48;
    let body = wrap_text(" ", message, popup_w as usize - 3);
    let overlay = centered_rect_fixed(popup_w, body.len() as u16 + 4, area);
    frame.render_widget(Clear, overlay);

    let mut lines: Vec<Line> = body
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(app.theme.text_bright).bg(bg))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter ok",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Notice ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}
