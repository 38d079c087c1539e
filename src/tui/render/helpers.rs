use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::util::unicode;

/// Rectangle of `width` x `height` centered in `area`, clipped to it.
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Word-wrap `text` into lines of at most `max_width` cells.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_w = unicode::display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut width = indent_w;

    for word in text.split_whitespace() {
        let ww = unicode::display_width(word);
        if width > indent_w && width + 1 + ww > max_width {
            lines.push(std::mem::replace(&mut current, indent.to_string()));
            width = indent_w;
        }
        if width > indent_w {
            current.push(' ');
            width += 1;
        }
        current.push_str(word);
        width += ww;
    }
    if width > indent_w || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
