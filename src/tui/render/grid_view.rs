use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::Project;
use crate::ops::carousel::{Carousel, cards_per_view};
use crate::ops::grid::{SectionStyle, SectionView};
use crate::tui::app::App;
use crate::util::unicode;

/// Rows per section band: title, five card rows, spacer.
const BAND_H: u16 = 7;
const CARD_H: u16 = 5;
/// Cells reserved on each side of the card row for the arrows.
const ARROW_W: u16 = 2;

/// Render the section bands with their project carousels
pub fn render_grid_view(frame: &mut Frame, app: &App, area: Rect) {
    let sections = app.visible_sections();
    if sections.is_empty() {
        render_empty(frame, app, area);
        return;
    }

    let fit = (area.height / BAND_H).max(1) as usize;
    let first = app.section_cursor.saturating_sub(fit - 1);

    for (slot, (i, view)) in sections.iter().enumerate().skip(first).take(fit).enumerate() {
        let y = area.y + slot as u16 * BAND_H;
        let height = BAND_H.min(area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let band = Rect::new(area.x, y, area.width, height);
        render_band(frame, app, view, i == app.section_cursor, band);
    }
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let message = if !app.page.sections.is_empty() {
        "No sections match the filter. Press a to show all."
    } else if app.is_admin() {
        "No sections yet. Press A to add an ODS."
    } else {
        "No sections to show."
    };
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ])
    .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn render_band(frame: &mut Frame, app: &App, view: &SectionView, selected: bool, area: Rect) {
    let bg = app.theme.background;
    let style = SectionStyle::derive(&view.section);
    let color = app.theme.section_color(&style);

    let marker = if selected { "\u{25B8} " } else { "  " };
    let count = match view.projects.len() {
        1 => " (1 project)".to_string(),
        n => format!(" ({} projects)", n),
    };
    let title = Line::from(vec![
        Span::styled(marker, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            format!("{} {}", style.icon.glyph(), view.section.name),
            Style::default()
                .fg(color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)),
    ]);
    frame.render_widget(
        Paragraph::new(title).style(Style::default().bg(bg)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    if area.height < 2 {
        return;
    }
    let row = Rect::new(
        area.x,
        area.y + 1,
        area.width,
        CARD_H.min(area.height - 1),
    );
    if view.projects.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "    No projects in this section.",
                Style::default().fg(app.theme.dim).bg(bg),
            )),
            Rect::new(row.x, row.y, row.width, 1),
        );
        return;
    }

    let carousel = app.carousel(&view.section.id);
    render_arrows(frame, app, &carousel, row);
    render_cards(frame, app, view, &style, &carousel, selected, row);
}

/// Arrows appear only when the carousel can move that way.
fn render_arrows(frame: &mut Frame, app: &App, carousel: &Carousel, row: Rect) {
    if row.width < ARROW_W * 2 {
        return;
    }
    let style = Style::default().fg(app.theme.highlight).bg(app.theme.background);
    let y = row.y + row.height / 2;
    if carousel.can_prev() {
        frame.render_widget(
            Paragraph::new(Span::styled("\u{2039}", style)),
            Rect::new(row.x, y, 1, 1),
        );
    }
    if carousel.can_next() {
        frame.render_widget(
            Paragraph::new(Span::styled("\u{203A}", style)),
            Rect::new(row.right() - 1, y, 1, 1),
        );
    }
}

fn render_cards(
    frame: &mut Frame,
    app: &App,
    view: &SectionView,
    style: &SectionStyle,
    carousel: &Carousel,
    selected: bool,
    row: Rect,
) {
    let card_w = app.config.ui.card_width.max(8);
    let gap = app.config.ui.card_gap;
    let inner = Rect::new(
        row.x + ARROW_W,
        row.y,
        row.width.saturating_sub(ARROW_W * 2),
        row.height,
    );
    let count = cards_per_view(inner.width, card_w, gap);
    let stride = card_w as usize + gap as usize;
    let origin = carousel.scroll_offset(card_w, gap);

    for (i, project) in view
        .projects
        .iter()
        .enumerate()
        .skip(carousel.index())
        .take(count)
    {
        let left = (i * stride).saturating_sub(origin);
        if left >= inner.width as usize {
            break;
        }
        let x = inner.x + left as u16;
        let width = card_w.min(inner.right() - x);
        let current = selected && i == carousel.index();
        render_card(
            frame,
            app,
            project,
            style,
            current,
            Rect::new(x, inner.y, width, inner.height),
        );
    }
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    project: &Project,
    style: &SectionStyle,
    current: bool,
    area: Rect,
) {
    let bg = if current {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let border = if current {
        app.theme.selection_border
    } else {
        app.theme.dim
    };
    let text_w = area.width.saturating_sub(2) as usize;

    let category = style.card_category(project);
    let description = project.description.as_deref().unwrap_or("");
    let lines = vec![
        Line::from(Span::styled(
            unicode::truncate_to_width(&project.title, text_w),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            unicode::truncate_to_width(category, text_w),
            Style::default().fg(app.theme.section_color(style)).bg(bg),
        )),
        Line::from(Span::styled(
            unicode::truncate_to_width(description, text_w),
            Style::default().fg(app.theme.text).bg(bg),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
