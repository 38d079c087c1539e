use indexmap::IndexSet;

use crate::model::category::{self, Category};

/// What the category selector is being used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorMode {
    /// Pick one category to create a section for.
    Create,
    /// Toggle categories in the caller's filter selection.
    Filter,
}

/// Cursor over the category catalog. The selector holds no selection of its
/// own; choosing a category hands it back to the caller, who decides what
/// to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorState {
    pub mode: SelectorMode,
    pub cursor: usize,
}

impl SelectorState {
    pub fn new(mode: SelectorMode) -> Self {
        SelectorState { mode, cursor: 0 }
    }

    pub fn highlighted(&self) -> &'static Category {
        let all = category::all();
        &all[self.cursor.min(all.len() - 1)]
    }

    pub fn move_by(&mut self, delta: isize) {
        let last = category::all().len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
    }

    pub fn move_to_first(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_last(&mut self) {
        self.cursor = category::all().len() - 1;
    }

    /// Hand the highlighted category to `on_select`.
    pub fn choose<F: FnOnce(&'static Category)>(&self, on_select: F) {
        on_select(self.highlighted());
    }
}

/// Flip membership of `id` in `set`. Applying it twice restores the set.
pub fn toggle_id(set: &mut IndexSet<u8>, id: u8) {
    if !set.shift_remove(&id) {
        set.insert(id);
    }
}

/// Category filter owned by the grid page.
///
/// `pending` is what the selector edits; `applied` drives the visible
/// sections. Toggling never changes `applied`; only `apply` and `clear` do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub pending: IndexSet<u8>,
    pub applied: IndexSet<u8>,
}

impl FilterState {
    /// Start editing from the currently applied filter.
    pub fn begin_edit(&mut self) {
        self.pending = self.applied.clone();
    }

    pub fn toggle(&mut self, id: u8) {
        toggle_id(&mut self.pending, id);
    }

    pub fn apply(&mut self) {
        self.applied = self.pending.clone();
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.applied.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.applied.is_empty()
    }
}
