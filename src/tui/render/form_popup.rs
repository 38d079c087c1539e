use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::App;
use crate::tui::form::TextField;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

const POPUP_W: u16 = 60;
const LABEL_W: usize = 13;

/// Text input form: one labelled row per field, cursor on the focused one
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.form.as_ref() else {
        return;
    };
    let popup_h = form.fields.len() as u16 * 2 + 3;
    let overlay = centered_rect_fixed(POPUP_W, popup_h, area);
    frame.render_widget(Clear, overlay);

    let bg = app.theme.background;
    let inner_w = overlay.width.saturating_sub(2) as usize;
    let value_w = inner_w.saturating_sub(LABEL_W + 2).max(1);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_at = None;
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        let value_bg = if focused {
            app.theme.selection_bg
        } else {
            bg
        };
        let (visible, cursor_col) = scroll_value(field, value_w);
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}", unicode::fit_to_width(field.label, LABEL_W)),
                label_style,
            ),
            Span::styled(
                unicode::fit_to_width(&visible, value_w),
                Style::default().fg(app.theme.text_bright).bg(value_bg),
            ),
        ]));
        lines.push(Line::from(""));
        if focused {
            let x = overlay.x + 1 + 1 + LABEL_W as u16 + cursor_col as u16;
            let y = overlay.y + 1 + (i as u16) * 2;
            cursor_at = Some(Position::new(x, y));
        }
    }
    lines.push(Line::from(Span::styled(
        " Tab next  Enter save  Esc cancel",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", form.title),
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay);

    // No cursor while another overlay covers the form
    if app.alert.is_none() && !app.show_help {
        if let Some(pos) = cursor_at {
            if overlay.contains(pos) {
                frame.set_cursor_position(pos);
            }
        }
    }
}

/// Drop leading graphemes until the cursor fits in `width` cells.
/// Returns the visible text and the cursor column within it.
fn scroll_value(field: &TextField, width: usize) -> (String, usize) {
    let text = field.display();
    let mut cursor = field.display_cursor();
    if cursor < width {
        return (text, cursor);
    }
    let mut start = 0;
    for g in text.graphemes(true) {
        if cursor < width {
            break;
        }
        cursor -= g.width();
        start += g.len();
    }
    (text[start..].to_string(), cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_support::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn login_form_masks_password() {
        let (mut app, _tmp) = app_with(0, false);
        handle_key(&mut app, ch('L'));
        type_str(&mut app, "ana@ods.org");
        handle_key(&mut app, key(crossterm::event::KeyCode::Tab));
        type_str(&mut app, "secret");
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_form_popup(frame, &app, area);
        });
        assert!(has_line(&output, " Log in "));
        assert!(has_line(&output, "ana@ods.org"));
        assert!(has_line(&output, "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}"));
        assert!(!output.contains("secret"));
    }

    #[test]
    fn long_values_scroll_to_keep_cursor_visible() {
        let mut field = TextField::new("Title", "");
        for c in "abcdefghij".chars() {
            field.insert(c);
        }
        let (visible, col) = scroll_value(&field, 4);
        assert_eq!(visible, "hij");
        assert_eq!(col, 3);

        field.home();
        let (visible, col) = scroll_value(&field, 4);
        assert_eq!(visible, "abcdefghij");
        assert_eq!(col, 0);
    }
}
