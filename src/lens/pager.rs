//! A cursor over an in-memory list, moved one step at a time.

/// List plus cursor; `0 <= cursor < len` whenever the list is non-empty.
#[derive(Debug, Clone)]
pub struct Pager<T = String> {
    items: Vec<T>,
    cursor: usize,
}

impl<T> Default for Pager<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
        }
    }
}

impl<T> Pager<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, cursor: 0 }
    }

    /// Replace the list and move the cursor back to the start
    pub fn reset(&mut self, items: Vec<T>) {
        self.items = items;
        self.cursor = 0;
    }

    /// Drop all items
    pub fn clear(&mut self) {
        self.reset(Vec::new());
    }

    /// Item under the cursor, `None` when the list is empty
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    /// Step forward; no-op on the last item
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Step back; no-op on the first item
    pub fn retreat(&mut self) -> bool {
        if self.has_previous() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.items.len()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0 && !self.items.is_empty()
    }

    /// Zero-based cursor position
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
