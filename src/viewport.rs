//! Visible window over a long list.
//!
//! Positions here are *logical slots*: when a list has a pseudo
//! "select all" entry it occupies slot 0 and every item is shifted by one.

use std::ops::Range;

/// Scroll state for a list rendered in at most `size` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Rows shown at once, `0` shows everything
    size: usize,
    /// First visible logical slot
    start: usize,
    /// Render "N items above/below" counters instead of bare arrows
    show_counters: bool,
}

impl Viewport {
    #[must_use]
    pub fn new(size: usize, show_counters: bool) -> Self {
        Self {
            size,
            start: 0,
            show_counters,
        }
    }

    /// A viewport that never scrolls.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(0, true)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn show_counters(&self) -> bool {
        self.show_counters
    }

    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.size > 0
    }

    /// Shift the window by the least amount that keeps `cursor_slot` visible.
    pub fn follow(&mut self, cursor_slot: Option<usize>, total: usize) {
        if !self.is_bounded() || total <= self.size {
            self.start = 0;
            return;
        }

        let max_start = total - self.size;
        if let Some(slot) = cursor_slot {
            if slot < self.start {
                self.start = slot;
            } else if slot >= self.start + self.size {
                self.start = slot + 1 - self.size;
            }
        }
        self.start = self.start.min(max_start);
    }

    /// Logical slots currently on screen.
    #[must_use]
    pub fn visible_range(&self, total: usize) -> Range<usize> {
        if !self.is_bounded() {
            return 0..total;
        }
        let start = self.start.min(total);
        start..(start + self.size).min(total)
    }

    /// Slots hidden above the window.
    #[must_use]
    pub fn hidden_above(&self, total: usize) -> usize {
        self.visible_range(total).start
    }

    /// Slots hidden below the window.
    #[must_use]
    pub fn hidden_below(&self, total: usize) -> usize {
        total - self.visible_range(total).end
    }
}

/// Logical slot of a list position given whether a pseudo entry leads the list.
///
/// `None` stands for the pseudo entry itself.
#[must_use]
pub fn logical_slot(item_index: Option<usize>, has_pseudo: bool) -> usize {
    match (item_index, has_pseudo) {
        (None, _) => 0,
        (Some(index), true) => index + 1,
        (Some(index), false) => index,
    }
}
