//! Compact membership set over an ordinal item range.
//!
//! Lists of up to [`BITSET_CAPACITY`] items are tracked in a single `u32`
//! word. Longer lists fall back to an ordered set of indices. The backing is
//! chosen once at construction and both answer every query identically.

use crate::constants::BITSET_CAPACITY;
use std::collections::BTreeSet;

/// Selected item indices for a list of fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSet {
    /// One bit per item, bit `i` set when item `i` is selected
    Word(u32),
    /// Ordinal-keyed fallback for lists longer than the word width
    Ordinal(BTreeSet<usize>),
}

impl SelectionSet {
    /// Create an empty set sized for `item_count` items.
    #[must_use]
    pub fn with_capacity(item_count: usize) -> Self {
        if item_count <= BITSET_CAPACITY {
            SelectionSet::Word(0)
        } else {
            SelectionSet::Ordinal(BTreeSet::new())
        }
    }

    /// Whether the compact word backing is in use.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        matches!(self, SelectionSet::Word(_))
    }

    #[must_use]
    pub fn is_set(&self, index: usize) -> bool {
        match self {
            SelectionSet::Word(bits) => index < BITSET_CAPACITY && bits & (1u32 << index) != 0,
            SelectionSet::Ordinal(set) => set.contains(&index),
        }
    }

    /// Mark `index` as selected. Returns whether membership changed.
    pub fn set(&mut self, index: usize) -> bool {
        match self {
            SelectionSet::Word(bits) => {
                if index >= BITSET_CAPACITY {
                    return false;
                }
                let before = *bits;
                *bits |= 1u32 << index;
                before != *bits
            }
            SelectionSet::Ordinal(set) => set.insert(index),
        }
    }

    /// Unmark `index`. Returns whether membership changed.
    pub fn clear(&mut self, index: usize) -> bool {
        match self {
            SelectionSet::Word(bits) => {
                if index >= BITSET_CAPACITY {
                    return false;
                }
                let before = *bits;
                *bits &= !(1u32 << index);
                before != *bits
            }
            SelectionSet::Ordinal(set) => set.remove(&index),
        }
    }

    /// Flip membership of `index` and return the new state.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.is_set(index) {
            self.clear(index);
            false
        } else {
            self.set(index)
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            SelectionSet::Word(bits) => bits.count_ones() as usize,
            SelectionSet::Ordinal(set) => set.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn clear_all(&mut self) {
        match self {
            SelectionSet::Word(bits) => *bits = 0,
            SelectionSet::Ordinal(set) => set.clear(),
        }
    }

    /// Replace the contents with the first `n` indices.
    pub fn set_all(&mut self, n: usize) {
        match self {
            SelectionSet::Word(bits) => {
                *bits = match n {
                    0 => 0,
                    n if n >= BITSET_CAPACITY => u32::MAX,
                    n => (1u32 << n) - 1,
                };
            }
            SelectionSet::Ordinal(set) => {
                set.clear();
                set.extend(0..n);
            }
        }
    }

    /// Selected indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let upper = match self {
            SelectionSet::Word(_) => BITSET_CAPACITY,
            SelectionSet::Ordinal(set) => set.iter().next_back().map_or(0, |last| last + 1),
        };
        (0..upper).filter(move |index| self.is_set(*index))
    }
}
