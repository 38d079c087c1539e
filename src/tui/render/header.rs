use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

use super::helpers::spans_width;

/// Title bar: app name and location on the left, filter and login on the right.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut left = vec![Span::styled(
        " ODS Grid",
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if let (View::Detail, Some(d)) = (app.view, app.detail.as_ref()) {
        left.push(Span::styled(
            format!(" \u{203A} {}", d.project.title),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    let mut right = Vec::new();
    if app.page.filter.is_active() {
        right.push(Span::styled(
            format!("filter: {} ODS  ", app.page.filter.applied.len()),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }
    let who = match app.auth.session() {
        Some(s) if s.is_admin() => format!("{} (admin) ", s.user.email),
        Some(s) => format!("{} ", s.user.email),
        None => "not logged in ".to_string(),
    };
    right.push(Span::styled(who, Style::default().fg(app.theme.dim).bg(bg)));

    let used = spans_width(&left) + spans_width(&right);
    let mut spans = left;
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        spans.extend(right);
    }

    let separator = Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    );
    let paragraph = Paragraph::new(vec![Line::from(spans), Line::from(separator)])
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
