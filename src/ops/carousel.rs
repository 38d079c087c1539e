/// Position of the "current card" in a horizontally sliding row.
///
/// The index always stays within `0..len` (or 0 for an empty row). `next`
/// is enabled while a card exists after the current one, so the final card
/// is reachable after `len - 1` advances and further advances do nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Carousel { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn can_prev(&self) -> bool {
        self.index > 0
    }

    pub fn can_next(&self) -> bool {
        self.index + 1 < self.len
    }

    /// Step back one card. Returns whether the index moved.
    pub fn prev(&mut self) -> bool {
        if self.can_prev() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one card. Returns whether the index moved.
    pub fn next(&mut self) -> bool {
        if self.can_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Update the row length after a refetch, clamping the index.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.index = self.index.min(len.saturating_sub(1));
    }

    /// Scroll position of the current card for fixed-size cards.
    pub fn scroll_offset(&self, card_width: u16, gap: u16) -> usize {
        self.index * (card_width as usize + gap as usize)
    }
}

/// How many whole cards fit in `viewport` cells.
pub fn cards_per_view(viewport: u16, card_width: u16, gap: u16) -> usize {
    if card_width == 0 {
        return 0;
    }
    let stride = card_width as usize + gap as usize;
    // The last card needs no trailing gap.
    ((viewport as usize + gap as usize) / stride).max(1)
}
