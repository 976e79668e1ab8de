//! The layout cursor walks the label grid in reading order, page after page.

use crate::rect::Rect;
use crate::slots::{Slot, SlotRegistry};
use crate::specification::SheetSpec;
use crate::units::*;

/// A slot on a specific page
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub page: usize,
    pub slot: Slot,
}

/// The result of moving the cursor to the next unused slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// Where the cursor ended up
    pub position: Position,
    /// Pre-consumed slots passed over on the way, in the order they were passed
    pub skipped: Vec<Position>,
}

/// The position of the layout within the grid. The cursor starts before the first page
/// (page 0) and only ever moves forwards.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    rows: usize,
    columns: usize,
    row: usize,
    column: usize,
    page: usize,
}

impl LayoutCursor {
    pub fn new(rows: usize, columns: usize) -> LayoutCursor {
        LayoutCursor {
            rows,
            columns,
            row: 1,
            column: 0,
            page: 0,
        }
    }

    /// The page the cursor is on; 0 if nothing has been laid out yet
    pub fn page(&self) -> usize {
        self.page
    }

    /// The current position, if the cursor has started
    pub fn position(&self) -> Option<Position> {
        (self.page > 0).then(|| Position {
            page: self.page,
            slot: Slot::new(self.row, self.column),
        })
    }

    /// Move to the next slot, starting a new page after the last slot of a page
    pub fn advance_raw(&mut self) -> Position {
        if self.page == 0 || (self.row == self.rows && self.column == self.columns) {
            self.page += 1;
            self.row = 1;
            self.column = 1;
        } else if self.column == self.columns {
            self.row += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Position {
            page: self.page,
            slot: Slot::new(self.row, self.column),
        }
    }

    /// Move to the next slot that is not marked as used in the registry, removing the
    /// used slots passed over from it. Only slots registered by the caller are skipped,
    /// so a page can cost at most `rows * columns` steps before a new page begins.
    pub fn advance_unused(&mut self, registry: &mut SlotRegistry) -> Advance {
        let mut skipped = Vec::new();
        let mut position = self.advance_raw();
        while registry.take(position.page, position.slot) {
            log::trace!(
                "skipping used label at row {}, column {} on page {}",
                position.slot.row,
                position.slot.column,
                position.page
            );
            skipped.push(position);
            position = self.advance_raw();
        }
        Advance { position, skipped }
    }
}

/// The rectangles of one label slot on the page, in points with the origin at the
/// bottom-left of the sheet
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlotRect {
    /// The whole label
    pub label: Rect,
    /// The area inside the padding, available for drawing
    pub drawable: Rect,
}

/// Compute where a slot lies on the sheet
pub fn rectangle_for(spec: &SheetSpec, slot: Slot) -> SlotRect {
    let column = (slot.column - 1) as f64;
    let row = slot.row as f64;

    let left = spec.left_margin() + (spec.label_width() + spec.column_gap()) * column;
    let bottom = spec.sheet_height()
        - spec.top_margin()
        - spec.label_height() * row
        - spec.row_gap() * (row - 1.0);

    let padding = spec.padding();
    let label = Rect::from_origin(
        left.into(),
        bottom.into(),
        spec.label_width().into(),
        spec.label_height().into(),
    );
    let drawable = Rect::from_origin(
        (left + padding.left).into(),
        (bottom + padding.bottom).into(),
        (spec.label_width() - padding.horizontal()).into(),
        (spec.label_height() - padding.vertical()).into(),
    );

    SlotRect { label, drawable }
}
