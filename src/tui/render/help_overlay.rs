use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, View};

const GRID_KEYS: &[(&str, &str)] = &[
    (" \u{2191}\u{2193}/jk", "Move between sections"),
    (" \u{2190}\u{2192}/hl", "Scroll the section's projects"),
    (" Enter", "Open project"),
    (" f", "Filter by ODS"),
    (" a", "Show all sections"),
    (" r", "Reload from server"),
    (" L", "Log in / log out"),
    (" q", "Quit"),
];

const GRID_ADMIN_KEYS: &[(&str, &str)] = &[
    (" A", "Add ODS section"),
    (" n / e", "New / edit project"),
    (" x / X", "Delete project / section"),
];

const DETAIL_KEYS: &[(&str, &str)] = &[
    (" Tab", "Switch impact / research"),
    (" \u{2191}\u{2193}/jk", "Move between records"),
    (" r", "Reload records"),
    (" Esc", "Back to the grid"),
    (" q", "Quit"),
];

const DETAIL_ADMIN_KEYS: &[(&str, &str)] = &[
    (" n / e", "New / edit record"),
    (" x", "Delete record"),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let (keys, admin_keys) = match app.view {
        View::Grid => (GRID_KEYS, GRID_ADMIN_KEYS),
        View::Detail => (DETAIL_KEYS, DETAIL_ADMIN_KEYS),
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));
    for (key, desc) in keys {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Admin", header_style)));
    for (key, desc) in admin_keys {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " ? or Esc to close",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let padded_key = format!("{:<12}", key);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use crate::tui::input::handle_key;
    use crate::tui::input::test_support::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn help_follows_the_view() {
        let (mut app, _tmp) = app_with(1, false);
        handle_key(&mut app, ch('?'));
        let output = render_app(&app);
        assert!(has_line(&output, "Filter by ODS"));
        assert!(has_line(&output, "Delete project / section"));

        handle_key(&mut app, key(KeyCode::Esc));
        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, ch('?'));
        let output = render_app(&app);
        assert!(has_line(&output, "Switch impact / research"));
        assert!(!has_line(&output, "Filter by ODS"));
    }
}
