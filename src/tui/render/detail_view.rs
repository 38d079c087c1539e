use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::grid::resolve_asset_url;
use crate::tui::app::{App, DetailPane, DetailScreen};
use crate::util::unicode;

/// Render one project with its impact and research panes
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = app.detail.as_ref() else {
        let empty = Paragraph::new(" Project not found")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);
    render_summary(frame, app, detail, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_impact(frame, app, detail, panes[0]);
    render_research(frame, app, detail, panes[1]);
}

fn render_summary(frame: &mut Frame, app: &App, detail: &DetailScreen, area: Rect) {
    let bg = app.theme.background;
    let width = area.width.saturating_sub(2) as usize;
    let project = &detail.project;
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);

    let image = if project.image.is_empty() {
        "none".to_string()
    } else {
        resolve_asset_url(app.config.asset_base(), &project.image)
    };
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", unicode::truncate_to_width(&project.title, width)),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" Category  ", label),
            Span::styled(project.category.clone(), text),
        ]),
        Line::from(vec![
            Span::styled(" About     ", label),
            Span::styled(
                unicode::truncate_to_width(
                    project.description.as_deref().unwrap_or(""),
                    width.saturating_sub(10),
                ),
                text,
            ),
        ]),
        Line::from(vec![
            Span::styled(" Image     ", label),
            Span::styled(image, text),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn pane_block(app: &App, title: String, active: bool) -> Block<'static> {
    let bg = app.theme.background;
    let border = if active {
        app.theme.selection_border
    } else {
        app.theme.dim
    };
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg))
}

/// Two lines per record; the cursor row is marked when the pane is active.
fn record_lines(
    app: &App,
    entries: Vec<(String, String)>,
    cursor: usize,
    active: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    if entries.is_empty() {
        return vec![Line::from(Span::styled(
            " Nothing recorded yet.",
            Style::default().fg(app.theme.dim).bg(bg),
        ))];
    }
    let mut lines = Vec::new();
    for (i, (head, sub)) in entries.into_iter().enumerate() {
        let here = active && i == cursor;
        let marker = if here { "\u{25B8} " } else { "  " };
        let head_style = if here {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text_bright).bg(bg)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(unicode::truncate_to_width(&head, width.saturating_sub(2)), head_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", unicode::truncate_to_width(&sub, width.saturating_sub(4))),
            Style::default().fg(app.theme.text).bg(bg),
        )));
    }
    lines
}

fn render_impact(frame: &mut Frame, app: &App, detail: &DetailScreen, area: Rect) {
    let active = detail.pane == DetailPane::Impact;
    let entries = detail
        .impact
        .items
        .iter()
        .map(|i| (i.title.clone(), i.description.clone()))
        .collect();
    let width = area.width.saturating_sub(2) as usize;
    let lines = record_lines(app, entries, detail.impact_cursor, active, width);
    let title = format!(" Impact ({}) ", detail.impact.items.len());
    frame.render_widget(
        Paragraph::new(lines).block(pane_block(app, title, active)),
        area,
    );
}

fn render_research(frame: &mut Frame, app: &App, detail: &DetailScreen, area: Rect) {
    let active = detail.pane == DetailPane::Research;
    let entries = detail
        .research
        .items
        .iter()
        .map(|r| {
            (
                r.title.clone(),
                format!("{}  \u{00A9} {}", r.link, r.copyright_label()),
            )
        })
        .collect();
    let width = area.width.saturating_sub(2) as usize;
    let lines = record_lines(app, entries, detail.research_cursor, active, width);
    let title = format!(" Research ({}) ", detail.research.items.len());
    frame.render_widget(
        Paragraph::new(lines).block(pane_block(app, title, active)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    use crate::tui::input::handle_key;
    use crate::tui::input::test_support::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_project_and_empty_panes() {
        let (mut app, _tmp) = app_with(1, false);
        handle_key(&mut app, key(KeyCode::Enter));
        let output = render_to_string(TERM_W, 16, |frame, area| {
            render_detail_view(frame, &app, area);
        });
        assert!(output.starts_with(" Proyecto 1"));
        assert!(has_line(&output, " Image     none"));
        assert!(has_line(&output, "Impact (0)"));
        assert!(has_line(&output, "Research (0)"));
        assert!(has_line(&output, "Nothing recorded yet."));
    }

    #[test]
    fn research_shows_copyright_label() {
        let (mut app, _tmp) = app_with(1, true);
        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, ch('n'));
        type_str(&mut app, "Informe");
        handle_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "http://x.org");
        handle_key(&mut app, key(KeyCode::Enter));

        let output = render_to_string(TERM_W, 16, |frame, area| {
            render_detail_view(frame, &app, area);
        });
        assert!(has_line(&output, "\u{25B8} Informe"));
        assert!(has_line(&output, "http://x.org  \u{00A9} CC"));
    }
}
