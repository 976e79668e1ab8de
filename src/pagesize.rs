//! Pre-defined sheet sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height,
//! in millimetres so they can be handed straight to a [`SheetSpec`](crate::SheetSpec).
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between
//! portrait and landscape.
//!
//! # Example
//!
//! ```
//! use pdf_labels::pagesize::{A4, LETTER, PageOrientation};
//! use pdf_labels::{Mm, SheetSpec};
//!
//! let spec = SheetSpec::builder(A4, 2, 8, Mm(90.0), Mm(25.0)).build().unwrap();
//! assert_eq!(spec.sheet_width(), Mm(210.0));
//!
//! let landscape = LETTER.landscape();
//! assert!(landscape.0 > landscape.1);
//! ```

use crate::units::Mm;

/// Sheet dimensions as (width, height) in millimetres.
pub type PageSize = (Mm, Mm);

// iso a-series
pub const A3: PageSize = (Mm(297.0), Mm(420.0));
pub const A4: PageSize = (Mm(210.0), Mm(297.0));
pub const A5: PageSize = (Mm(148.0), Mm(210.0));
pub const A6: PageSize = (Mm(105.0), Mm(148.0));

// north american sizes
pub const LETTER: PageSize = (Mm(8.5 * 25.4), Mm(11.0 * 25.4));
pub const HALF_LETTER: PageSize = (Mm(5.5 * 25.4), Mm(8.5 * 25.4));
pub const LEGAL: PageSize = (Mm(8.5 * 25.4), Mm(14.0 * 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}
