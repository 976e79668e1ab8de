use crate::units::Mm;
use thiserror::Error;

/// One of the two axes of a sheet
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// Left to right: columns, label width, left/right margins and the column gap
    Horizontal,
    /// Top to bottom: rows, label height, top/bottom margins and the row gap
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("width"),
            Axis::Vertical => f.write_str("height"),
        }
    }
}

/// Reasons a sheet specification can be rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionError {
    #[error("{0} must be greater than zero")]
    /// A required dimension or count was zero or negative
    NotPositive(&'static str),

    #[error("{0} cannot be less than zero")]
    /// An optional margin, padding or radius was negative
    Negative(&'static str),

    #[error("labels are too large to fit the {0} of the sheet")]
    /// The labels alone are larger than the sheet
    DoesNotFit(Axis),

    #[error("{0} is too large for the labels to fit on the sheet")]
    /// An explicitly given margin or gap pushed the labels off the sheet
    MarginTooLarge(&'static str),

    #[error("not all {axis} is used by the given margins and gaps; {leftover} left over")]
    /// Every margin on an axis was given but they do not use up the sheet
    NotFullyUsed { axis: Axis, leftover: Mm },

    #[error("corner radius cannot be more than half the label width or height")]
    CornerRadiusTooLarge,

    #[error("sum of the {0} padding must be less than the label {0}")]
    PaddingTooLarge(Axis),

    #[error("padding radius must be zero if there is no padding")]
    PaddingRadiusWithoutPadding,
}

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("invalid dimension: {0}")]
    /// The sheet specification is inconsistent
    InvalidDimension(#[from] DimensionError),

    #[error("page {0} has already started, cannot mark used labels now")]
    /// Used slots were registered for a page the layout has already reached
    PageAlreadyStarted(usize),

    #[error("label position row {row}, column {column} is outside the sheet")]
    /// A slot coordinate lies outside the grid
    IndexOutOfRange { row: usize, column: usize },

    #[error("page {0} is not a valid page number")]
    /// Output was requested for a page outside `1..=pages_used`, or used labels were
    /// marked on page 0
    InvalidPageNumber(usize),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// A sheet specification could not be parsed
    Json(#[from] serde_json::Error),
}
