//! Lay out items on sheets of adhesive labels and write them to PDF.
//!
//! A [`SheetSpec`] describes the physical sheet: its size, the grid of labels, and the
//! margins and gaps between them, any of which may be left for the solver to work out.
//! A [`Sheet`] then places items on as many sheets as needed, calling a
//! [`LabelRenderer`] to draw each one.
//!
//! ```
//! use pdf_labels::pagesize::A4;
//! use pdf_labels::pdf_writer::Content;
//! use pdf_labels::{FormXObject, Mm, Pt, Repeat, Sheet, SheetOptions, SheetSpec};
//!
//! let spec = SheetSpec::builder(A4, 2, 8, Mm(90.0), Mm(25.0))
//!     .corner_radius(Mm(2.0))
//!     .build()?;
//!
//! let renderer = |label: &mut FormXObject, width: Pt, height: Pt, _: &&str| {
//!     let mut content = Content::new();
//!     content.rect(0.0, 0.0, *width, *height);
//!     content.stroke();
//!     label.add_content(content);
//! };
//!
//! let mut sheet = Sheet::new(spec, renderer, SheetOptions::new());
//! sheet.mark_used(1, [(1, 1), (1, 2)])?;
//! sheet.add_labels(["first", "second"], Repeat::each(10))?;
//! assert_eq!(sheet.pages_used(), 2);
//!
//! let mut pdf = Vec::new();
//! sheet.save(&mut pdf)?;
//! # Ok::<(), pdf_labels::LabelError>(())
//! ```

mod colour;
pub use colour::*;

mod content;

mod cursor;
pub use cursor::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod form_xobject;
pub use form_xobject::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod outline;
pub use outline::*;

mod padding;
pub use padding::*;

mod page;
pub use page::*;

/// Common sheet sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod renderer;
pub use renderer::*;

mod repeat;
pub use repeat::*;

mod sheet;
pub use sheet::*;

mod slots;
pub use slots::*;

mod specification;
pub use specification::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
