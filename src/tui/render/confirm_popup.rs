use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::{centered_rect_fixed, wrap_text};

/// Yes/no prompt for a pending delete
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(action) = app.confirm.as_ref() else {
        return;
    };
    let bg = app.theme.background;
    let popup_w: u16 = 50;
    let body = wrap_text(" ", &action.prompt(), popup_w as usize - 3);
    let popup_h = body.len() as u16 + 4;
    let overlay = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay);

    let mut lines: Vec<Line> = body
        .into_iter()
        .map(|l| {
            Line::from(Span::styled(
                l,
                Style::default().fg(app.theme.text_bright).bg(bg),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    let key = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    lines.push(Line::from(vec![
        Span::styled(" y", key),
        Span::styled(" delete  ", dim),
        Span::styled("n", key),
        Span::styled(" keep", dim),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Confirm ",
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}
