use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::category;
use crate::ops::selector::SelectorMode;
use crate::tui::app::App;
use crate::tui::theme::parse_hex_color;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// The 17-entry category list, with checkboxes in filter mode
pub fn render_selector_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(selector) = app.selector.as_ref() else {
        return;
    };
    let all = category::all();
    let popup_w: u16 = 52;
    let popup_h = all.len() as u16 + 4;
    let overlay = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay);

    let bg = app.theme.background;
    let filtering = selector.mode == SelectorMode::Filter;
    let inner_w = overlay.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::with_capacity(all.len() + 2);
    for (i, c) in all.iter().enumerate() {
        let here = i == selector.cursor;
        let row_bg = if here { app.theme.selection_bg } else { bg };
        let mut spans = vec![Span::styled(
            if here { "\u{25B8}" } else { " " },
            Style::default().fg(app.theme.highlight).bg(row_bg),
        )];
        if filtering {
            let mark = if app.page.filter.pending.contains(&c.id) {
                "[x] "
            } else {
                "[ ] "
            };
            spans.push(Span::styled(
                mark,
                Style::default().fg(app.theme.text_bright).bg(row_bg),
            ));
        } else {
            spans.push(Span::styled(" ", Style::default().bg(row_bg)));
        }
        let color = parse_hex_color(c.color_hex).unwrap_or(app.theme.text);
        spans.push(Span::styled(
            format!("{:>2} {} ", c.id, c.icon.glyph()),
            Style::default().fg(color).bg(row_bg),
        ));
        let used = super::helpers::spans_width(&spans);
        let mut title_style = Style::default().fg(app.theme.text).bg(row_bg);
        if here {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(
            unicode::fit_to_width(c.title, inner_w.saturating_sub(used)),
            title_style,
        ));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    let hint = if filtering {
        " Space toggle  Enter apply  c clear  Esc close"
    } else {
        " Enter add section  Esc close"
    };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let title = if filtering {
        " Filter by ODS "
    } else {
        " Add ODS section "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}
