//! Tracking of label positions that were already used on a physical sheet.
//!
//! Label sheets are often fed through a printer more than once; the labels that
//! were peeled off last time must be skipped. The [`SlotRegistry`] remembers, for
//! each page that has not yet been started, which slots are gone.

use crate::error::LabelError;
use std::collections::{BTreeMap, BTreeSet};

/// One (row, column) grid position on a page. Both are 1-based; row 1 is the top
/// row and column 1 the leftmost column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub row: usize,
    pub column: usize,
}

impl Slot {
    pub fn new(row: usize, column: usize) -> Slot {
        Slot { row, column }
    }
}

impl From<(usize, usize)> for Slot {
    fn from((row, column): (usize, usize)) -> Self {
        Slot { row, column }
    }
}

/// The set of pre-consumed slots for every page that has been registered
#[derive(Debug, Clone)]
pub struct SlotRegistry {
    rows: usize,
    columns: usize,
    used: BTreeMap<usize, BTreeSet<Slot>>,
}

impl SlotRegistry {
    /// Create an empty registry for a grid of the given size
    pub fn new(rows: usize, columns: usize) -> SlotRegistry {
        SlotRegistry {
            rows,
            columns,
            used: BTreeMap::new(),
        }
    }

    /// Mark slots on `page` as already used. `current_page` is the page the layout is
    /// currently on (0 before anything was placed); pages up to and including it can no
    /// longer be changed, and pages count from 1. Every slot is checked before any is
    /// recorded, so a failed call leaves the registry untouched.
    pub fn mark<I, S>(&mut self, page: usize, slots: I, current_page: usize) -> Result<(), LabelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Slot>,
    {
        if page == 0 {
            return Err(LabelError::InvalidPageNumber(page));
        }
        if page <= current_page {
            return Err(LabelError::PageAlreadyStarted(page));
        }

        let slots: Vec<Slot> = slots.into_iter().map(Into::into).collect();
        if let Some(bad) = slots.iter().find(|slot| !self.contains(**slot)) {
            return Err(LabelError::IndexOutOfRange {
                row: bad.row,
                column: bad.column,
            });
        }

        self.used.entry(page).or_default().extend(slots);
        Ok(())
    }

    /// Whether the slot lies within the grid
    pub fn contains(&self, slot: Slot) -> bool {
        (1..=self.rows).contains(&slot.row) && (1..=self.columns).contains(&slot.column)
    }

    /// Whether the slot on the page is marked as used
    pub fn is_consumed(&self, page: usize, slot: Slot) -> bool {
        self.used
            .get(&page)
            .is_some_and(|slots| slots.contains(&slot))
    }

    /// Remove the slot from the registry, returning whether it was marked as used.
    /// A slot is reported at most once.
    pub fn take(&mut self, page: usize, slot: Slot) -> bool {
        let Some(slots) = self.used.get_mut(&page) else {
            return false;
        };
        let taken = slots.remove(&slot);
        if slots.is_empty() {
            self.used.remove(&page);
        }
        taken
    }

    /// The slots on the page that are still marked as used, in reading order
    pub fn remaining(&self, page: usize) -> Vec<Slot> {
        self.used
            .get(&page)
            .map(|slots| slots.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_and_takes_slots_once() {
        let mut registry = SlotRegistry::new(8, 2);
        registry.mark(1, [(1, 1), (2, 2)], 0).unwrap();
        registry.mark(1, [(4, 2)], 0).unwrap();

        assert!(registry.is_consumed(1, Slot::new(2, 2)));
        assert!(!registry.is_consumed(2, Slot::new(2, 2)));
        assert!(registry.take(1, Slot::new(2, 2)));
        assert!(!registry.take(1, Slot::new(2, 2)));
        assert_eq!(registry.remaining(1), vec![Slot::new(1, 1), Slot::new(4, 2)]);
    }

    #[test]
    fn rejects_started_pages() {
        let mut registry = SlotRegistry::new(8, 2);
        assert!(matches!(
            registry.mark(2, [(1, 1)], 2),
            Err(LabelError::PageAlreadyStarted(2))
        ));
        assert!(matches!(
            registry.mark(1, [(1, 1)], 3),
            Err(LabelError::PageAlreadyStarted(1))
        ));
    }

    #[test]
    fn rejects_page_zero() {
        let mut registry = SlotRegistry::new(8, 2);
        assert!(matches!(
            registry.mark(0, [(1, 1)], 0),
            Err(LabelError::InvalidPageNumber(0))
        ));
        assert!(registry.remaining(0).is_empty());
        registry.mark(4, [(1, 1)], 3).unwrap();
    }

    #[test]
    fn out_of_range_marks_record_nothing() {
        let mut registry = SlotRegistry::new(8, 2);
        let result = registry.mark(1, [(1, 1), (9, 1)], 0);
        assert!(matches!(
            result,
            Err(LabelError::IndexOutOfRange { row: 9, column: 1 })
        ));
        assert!(registry.remaining(1).is_empty());

        assert!(matches!(
            registry.mark(1, [(1, 0)], 0),
            Err(LabelError::IndexOutOfRange { row: 1, column: 0 })
        ));
        assert!(matches!(
            registry.mark(1, [(1, 3)], 0),
            Err(LabelError::IndexOutOfRange { row: 1, column: 3 })
        ));
    }
}
