//! Sheet specifications.
//!
//! A [`SheetSpec`] describes the physical sheet: its size, the size of the label grid,
//! the labels themselves, and the margins and gaps around and between them. Only the
//! sheet size, grid size and label size are required. Any margin or gap that is not
//! given is computed by dividing the space left over on its axis equally amongst all
//! the margins and gaps that were not given. If every margin and gap on an axis is
//! given, they must use up the space exactly.
//!
//! # Example
//!
//! ```
//! use pdf_labels::{Mm, SheetSpec, pagesize};
//!
//! // an A4 sheet of 2x8 labels, each 90mm x 25mm with 2mm rounded corners
//! let spec = SheetSpec::builder(pagesize::A4, 2, 8, Mm(90.0), Mm(25.0))
//!     .corner_radius(Mm(2.0))
//!     .build()
//!     .unwrap();
//!
//! // 30mm of spare width is split between the two margins and the single column gap
//! assert_eq!(spec.left_margin(), Mm(10.0));
//! assert_eq!(spec.column_gap(), Mm(10.0));
//! ```

use crate::error::{Axis, DimensionError, LabelError};
use crate::outline::RoundedRect;
use crate::padding::Padding;
use crate::pagesize::PageSize;
use crate::slots::Slot;
use crate::units::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A residue smaller than this (in millimetres) left over once the trailing margin of an
/// axis has been subtracted is treated as rounding noise in the given values, and is
/// absorbed into that margin.
const SNAP_TOLERANCE: f64 = 0.01;

/// An image or drawing placed behind the labels on every drawn page, stretched to
/// cover the whole sheet. Useful to preview labels on pre-printed stationery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// A raster image loaded from disk the first time a page needs it
    File(PathBuf),
    /// A prepared PDF content stream, drawn in a coordinate space of `width` by `height`
    Drawing {
        width: f32,
        height: f32,
        content: Vec<u8>,
    },
}

/// The margins and gaps of an axis, as named in error messages
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Margin {
    Left,
    ColumnGap,
    Right,
    Top,
    RowGap,
    Bottom,
}

/// The user-supplied description of a sheet. Margins and gaps left as `None` are
/// computed when the specification is solved. This is also the configuration format
/// read by [`SheetSpec::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetConfig {
    pub sheet_width: Mm,
    pub sheet_height: Mm,
    pub columns: usize,
    pub rows: usize,
    pub label_width: Mm,
    pub label_height: Mm,
    #[serde(default)]
    pub left_margin: Option<Mm>,
    #[serde(default)]
    pub column_gap: Option<Mm>,
    #[serde(default)]
    pub right_margin: Option<Mm>,
    #[serde(default)]
    pub top_margin: Option<Mm>,
    #[serde(default)]
    pub row_gap: Option<Mm>,
    #[serde(default)]
    pub bottom_margin: Option<Mm>,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub corner_radius: Mm,
    #[serde(default)]
    pub padding_radius: Mm,
    #[serde(default)]
    pub background: Option<Background>,
}

impl SheetConfig {
    /// A configuration with only the required fields set
    pub fn new(
        size: PageSize,
        columns: usize,
        rows: usize,
        label_width: Mm,
        label_height: Mm,
    ) -> SheetConfig {
        SheetConfig {
            sheet_width: size.0,
            sheet_height: size.1,
            columns,
            rows,
            label_width,
            label_height,
            left_margin: None,
            column_gap: None,
            right_margin: None,
            top_margin: None,
            row_gap: None,
            bottom_margin: None,
            padding: Padding::empty(),
            corner_radius: Mm::ZERO,
            padding_radius: Mm::ZERO,
            background: None,
        }
    }
}

/// Solved margins of one axis
#[derive(Debug, Copy, Clone, PartialEq)]
struct AxisLayout {
    leading: Mm,
    gap: Mm,
    trailing: Mm,
}

/// Everything needed to solve one axis of the sheet
struct AxisInput {
    axis: Axis,
    sheet: Mm,
    label: Mm,
    count: usize,
    leading: Option<Mm>,
    gap: Option<Mm>,
    trailing: Option<Mm>,
    names: [&'static str; 3],
}

fn solve_axis(input: AxisInput) -> Result<AxisLayout, DimensionError> {
    let gaps = input.count - 1;
    let mut space = input.sheet - input.label * input.count as f64;
    if space < Mm::ZERO {
        return Err(DimensionError::DoesNotFit(input.axis));
    }

    // the number of equal shares unspecified margins and gaps split the space into
    let mut shares = input.count + 1;

    if let Some(leading) = input.leading {
        space -= leading;
        if space < Mm::ZERO {
            return Err(DimensionError::MarginTooLarge(input.names[0]));
        }
        shares -= 1;
    }

    if let Some(gap) = input.gap {
        space -= gap * gaps as f64;
        if space < Mm::ZERO {
            return Err(DimensionError::MarginTooLarge(input.names[1]));
        }
        shares -= gaps;
    }

    let mut trailing = input.trailing;
    if let Some(margin) = trailing.as_mut() {
        space -= *margin;
        if space.abs() < Mm(SNAP_TOLERANCE) {
            *margin += space;
            space = Mm::ZERO;
        }
        if space < Mm::ZERO {
            return Err(DimensionError::MarginTooLarge(input.names[2]));
        }
        shares -= 1;
    }

    if shares == 0 {
        if space != Mm::ZERO {
            return Err(DimensionError::NotFullyUsed {
                axis: input.axis,
                leftover: space,
            });
        }
        return Ok(AxisLayout {
            leading: input.leading.unwrap_or(Mm::ZERO),
            gap: input.gap.unwrap_or(Mm::ZERO),
            trailing: trailing.unwrap_or(Mm::ZERO),
        });
    }

    let auto = space / shares as f64;
    Ok(AxisLayout {
        leading: input.leading.unwrap_or(auto),
        gap: input.gap.unwrap_or(auto),
        trailing: trailing.unwrap_or(auto),
    })
}

fn positive(value: Mm, name: &'static str) -> Result<(), DimensionError> {
    // written this way round so that NaN is rejected too
    if value.0 > 0.0 {
        Ok(())
    } else {
        Err(DimensionError::NotPositive(name))
    }
}

fn non_negative(value: Option<Mm>, name: &'static str) -> Result<(), DimensionError> {
    match value {
        Some(value) if !(value.0 >= 0.0) => Err(DimensionError::Negative(name)),
        _ => Ok(()),
    }
}

fn solve(config: &SheetConfig) -> Result<(AxisLayout, AxisLayout), DimensionError> {
    positive(config.sheet_width, "sheet width")?;
    positive(config.sheet_height, "sheet height")?;
    if config.columns == 0 {
        return Err(DimensionError::NotPositive("columns"));
    }
    if config.rows == 0 {
        return Err(DimensionError::NotPositive("rows"));
    }
    positive(config.label_width, "label width")?;
    positive(config.label_height, "label height")?;

    non_negative(config.left_margin, "left margin")?;
    non_negative(config.column_gap, "column gap")?;
    non_negative(config.right_margin, "right margin")?;
    non_negative(config.top_margin, "top margin")?;
    non_negative(config.row_gap, "row gap")?;
    non_negative(config.bottom_margin, "bottom margin")?;
    non_negative(Some(config.padding.left), "left padding")?;
    non_negative(Some(config.padding.right), "right padding")?;
    non_negative(Some(config.padding.top), "top padding")?;
    non_negative(Some(config.padding.bottom), "bottom padding")?;
    non_negative(Some(config.corner_radius), "corner radius")?;

    if config.corner_radius > config.label_width / 2.0
        || config.corner_radius > config.label_height / 2.0
    {
        return Err(DimensionError::CornerRadiusTooLarge);
    }

    if config.padding.is_empty() {
        if config.padding_radius != Mm::ZERO {
            return Err(DimensionError::PaddingRadiusWithoutPadding);
        }
    } else {
        if config.padding.horizontal() >= config.label_width {
            return Err(DimensionError::PaddingTooLarge(Axis::Horizontal));
        }
        if config.padding.vertical() >= config.label_height {
            return Err(DimensionError::PaddingTooLarge(Axis::Vertical));
        }
        non_negative(Some(config.padding_radius), "padding radius")?;
    }

    if let Some(Background::Drawing { width, height, .. }) = &config.background {
        positive(Mm(*width as f64), "background width")?;
        positive(Mm(*height as f64), "background height")?;
    }

    let horizontal = solve_axis(AxisInput {
        axis: Axis::Horizontal,
        sheet: config.sheet_width,
        label: config.label_width,
        count: config.columns,
        leading: config.left_margin,
        gap: config.column_gap,
        trailing: config.right_margin,
        names: ["left margin", "column gap", "right margin"],
    })?;
    let vertical = solve_axis(AxisInput {
        axis: Axis::Vertical,
        sheet: config.sheet_height,
        label: config.label_height,
        count: config.rows,
        leading: config.top_margin,
        gap: config.row_gap,
        trailing: config.bottom_margin,
        names: ["top margin", "row gap", "bottom margin"],
    })?;

    Ok((horizontal, vertical))
}

/// How [`SheetSpec::bounding_boxes`] expresses positions
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoxMode {
    /// As a fraction of the sheet width (left, right) or height (top, bottom)
    Fraction,
    /// In millimetres
    Actual,
}

/// The edges of a label, measured from the top-left corner of the sheet
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// A validated, fully solved sheet specification. All margins and gaps are known, and
/// on each axis the labels, margins and gaps add up to the size of the sheet.
///
/// The specification can be changed after construction with the `set_*` methods (or
/// [`SheetSpec::update`]). Every change re-solves the whole sheet; a change that would
/// leave the sheet inconsistent is rejected and the specification keeps its previous
/// state, including which margins were computed automatically.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSpec {
    config: SheetConfig,
    horizontal: AxisLayout,
    vertical: AxisLayout,
}

impl SheetSpec {
    /// Validate and solve a sheet configuration
    pub fn new(config: SheetConfig) -> Result<SheetSpec, DimensionError> {
        let (horizontal, vertical) = solve(&config)?;
        Ok(SheetSpec {
            config,
            horizontal,
            vertical,
        })
    }

    /// Start building a specification from its required fields
    pub fn builder(
        size: PageSize,
        columns: usize,
        rows: usize,
        label_width: Mm,
        label_height: Mm,
    ) -> SheetSpecBuilder {
        SheetSpecBuilder {
            config: SheetConfig::new(size, columns, rows, label_width, label_height),
        }
    }

    /// Parse a [`SheetConfig`] from JSON and solve it. Dimensions are in millimetres.
    pub fn from_json(json: &str) -> Result<SheetSpec, LabelError> {
        let config: SheetConfig = serde_json::from_str(json)?;
        Ok(SheetSpec::new(config)?)
    }

    /// The configuration this specification was solved from. Margins that were
    /// computed automatically are `None` here.
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Apply an arbitrary change to the configuration and re-solve. On failure the
    /// specification is left exactly as it was.
    pub fn update<F>(&mut self, change: F) -> Result<(), DimensionError>
    where
        F: FnOnce(&mut SheetConfig),
    {
        let mut config = self.config.clone();
        change(&mut config);
        *self = SheetSpec::new(config)?;
        Ok(())
    }

    pub fn sheet_width(&self) -> Mm {
        self.config.sheet_width
    }

    pub fn sheet_height(&self) -> Mm {
        self.config.sheet_height
    }

    pub fn columns(&self) -> usize {
        self.config.columns
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn label_width(&self) -> Mm {
        self.config.label_width
    }

    pub fn label_height(&self) -> Mm {
        self.config.label_height
    }

    pub fn left_margin(&self) -> Mm {
        self.horizontal.leading
    }

    pub fn column_gap(&self) -> Mm {
        self.horizontal.gap
    }

    pub fn right_margin(&self) -> Mm {
        self.horizontal.trailing
    }

    pub fn top_margin(&self) -> Mm {
        self.vertical.leading
    }

    pub fn row_gap(&self) -> Mm {
        self.vertical.gap
    }

    pub fn bottom_margin(&self) -> Mm {
        self.vertical.trailing
    }

    pub fn padding(&self) -> Padding {
        self.config.padding
    }

    pub fn corner_radius(&self) -> Mm {
        self.config.corner_radius
    }

    pub fn padding_radius(&self) -> Mm {
        self.config.padding_radius
    }

    pub fn background(&self) -> Option<&Background> {
        self.config.background.as_ref()
    }

    /// Whether the margin or gap was computed rather than given
    pub fn is_auto(&self, margin: Margin) -> bool {
        match margin {
            Margin::Left => self.config.left_margin.is_none(),
            Margin::ColumnGap => self.config.column_gap.is_none(),
            Margin::Right => self.config.right_margin.is_none(),
            Margin::Top => self.config.top_margin.is_none(),
            Margin::RowGap => self.config.row_gap.is_none(),
            Margin::Bottom => self.config.bottom_margin.is_none(),
        }
    }

    pub fn set_sheet_width(&mut self, value: Mm) -> Result<(), DimensionError> {
        self.update(|c| c.sheet_width = value)
    }

    pub fn set_sheet_height(&mut self, value: Mm) -> Result<(), DimensionError> {
        self.update(|c| c.sheet_height = value)
    }

    pub fn set_columns(&mut self, value: usize) -> Result<(), DimensionError> {
        self.update(|c| c.columns = value)
    }

    pub fn set_rows(&mut self, value: usize) -> Result<(), DimensionError> {
        self.update(|c| c.rows = value)
    }

    pub fn set_label_width(&mut self, value: Mm) -> Result<(), DimensionError> {
        self.update(|c| c.label_width = value)
    }

    pub fn set_label_height(&mut self, value: Mm) -> Result<(), DimensionError> {
        self.update(|c| c.label_height = value)
    }

    /// Set a margin or gap. `None` makes it automatic again.
    pub fn set_margin(&mut self, margin: Margin, value: Option<Mm>) -> Result<(), DimensionError> {
        self.update(|c| match margin {
            Margin::Left => c.left_margin = value,
            Margin::ColumnGap => c.column_gap = value,
            Margin::Right => c.right_margin = value,
            Margin::Top => c.top_margin = value,
            Margin::RowGap => c.row_gap = value,
            Margin::Bottom => c.bottom_margin = value,
        })
    }

    pub fn set_padding(&mut self, value: Padding) -> Result<(), DimensionError> {
        self.update(|c| c.padding = value)
    }

    pub fn set_corner_radius(&mut self, value: Mm) -> Result<(), DimensionError> {
        self.update(|c| c.corner_radius = value)
    }

    pub fn set_padding_radius(&mut self, value: Mm) -> Result<(), DimensionError> {
        self.update(|c| c.padding_radius = value)
    }

    pub fn set_background(&mut self, value: Option<Background>) -> Result<(), DimensionError> {
        self.update(|c| c.background = value)
    }

    /// The outline of a label, relative to its own lower-left corner
    pub fn label_outline(&self) -> RoundedRect {
        RoundedRect::new(
            Pt(0.0),
            Pt(0.0),
            self.label_width().into(),
            self.label_height().into(),
            self.corner_radius().into(),
        )
    }

    /// The outline of the padded drawing area, relative to the lower-left corner of
    /// the label
    pub fn drawable_outline(&self) -> RoundedRect {
        let padding = self.padding();
        RoundedRect::new(
            padding.left.into(),
            padding.bottom.into(),
            (self.label_width() - padding.horizontal()).into(),
            (self.label_height() - padding.vertical()).into(),
            self.padding_radius().into(),
        )
    }

    /// The position of every label on a sheet, keyed by slot. Positions are measured
    /// from the top-left corner of the sheet.
    pub fn bounding_boxes(&self, mode: BoxMode) -> BTreeMap<Slot, BoundingBox> {
        let mut boxes = BTreeMap::new();
        for row in 1..=self.rows() {
            let top = self.top_margin() + (self.label_height() + self.row_gap()) * (row - 1) as f64;
            let bottom = top + self.label_height();

            for column in 1..=self.columns() {
                let left = self.left_margin()
                    + (self.label_width() + self.column_gap()) * (column - 1) as f64;
                let right = left + self.label_width();

                let bbox = match mode {
                    BoxMode::Fraction => BoundingBox {
                        top: top / self.sheet_height(),
                        bottom: bottom / self.sheet_height(),
                        left: left / self.sheet_width(),
                        right: right / self.sheet_width(),
                    },
                    BoxMode::Actual => BoundingBox {
                        top: top.0,
                        bottom: bottom.0,
                        left: left.0,
                        right: right.0,
                    },
                };
                boxes.insert(Slot::new(row, column), bbox);
            }
        }
        boxes
    }

    /// [`SheetSpec::bounding_boxes`] as a JSON object keyed by `"{row}x{column}"`
    pub fn bounding_boxes_json(&self, mode: BoxMode) -> Result<String, serde_json::Error> {
        let boxes: BTreeMap<String, BoundingBox> = self
            .bounding_boxes(mode)
            .into_iter()
            .map(|(slot, bbox)| (format!("{}x{}", slot.row, slot.column), bbox))
            .collect();
        serde_json::to_string(&boxes)
    }
}

/// Builder for [`SheetSpec`], started with [`SheetSpec::builder`]
#[derive(Debug, Clone)]
pub struct SheetSpecBuilder {
    config: SheetConfig,
}

impl SheetSpecBuilder {
    pub fn left_margin(mut self, value: Mm) -> Self {
        self.config.left_margin = Some(value);
        self
    }

    pub fn column_gap(mut self, value: Mm) -> Self {
        self.config.column_gap = Some(value);
        self
    }

    pub fn right_margin(mut self, value: Mm) -> Self {
        self.config.right_margin = Some(value);
        self
    }

    pub fn top_margin(mut self, value: Mm) -> Self {
        self.config.top_margin = Some(value);
        self
    }

    pub fn row_gap(mut self, value: Mm) -> Self {
        self.config.row_gap = Some(value);
        self
    }

    pub fn bottom_margin(mut self, value: Mm) -> Self {
        self.config.bottom_margin = Some(value);
        self
    }

    pub fn padding(mut self, value: Padding) -> Self {
        self.config.padding = value;
        self
    }

    pub fn corner_radius(mut self, value: Mm) -> Self {
        self.config.corner_radius = value;
        self
    }

    pub fn padding_radius(mut self, value: Mm) -> Self {
        self.config.padding_radius = value;
        self
    }

    pub fn background(mut self, value: Background) -> Self {
        self.config.background = Some(value);
        self
    }

    pub fn build(self) -> Result<SheetSpec, DimensionError> {
        SheetSpec::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A4;
    use proptest::prelude::*;

    fn a4_2x8() -> SheetSpecBuilder {
        SheetSpec::builder(A4, 2, 8, Mm(90.0), Mm(25.0))
    }

    fn close(a: Mm, b: Mm) -> bool {
        (a - b).abs() < Mm(1e-6)
    }

    #[test]
    fn auto_margins_split_space_equally() {
        let spec = a4_2x8().build().unwrap();
        assert_eq!(spec.left_margin(), Mm(10.0));
        assert_eq!(spec.column_gap(), Mm(10.0));
        assert_eq!(spec.right_margin(), Mm(10.0));
        assert_eq!(spec.top_margin(), Mm(97.0 / 9.0));
        assert_eq!(spec.row_gap(), Mm(97.0 / 9.0));
        assert!(spec.is_auto(Margin::Left));
    }

    #[test]
    fn given_margins_leave_the_rest_to_auto() {
        let spec = a4_2x8()
            .left_margin(Mm(5.0))
            .top_margin(Mm(20.0))
            .bottom_margin(Mm(20.0))
            .build()
            .unwrap();
        assert_eq!(spec.left_margin(), Mm(5.0));
        assert_eq!(spec.column_gap(), Mm(12.5));
        assert_eq!(spec.right_margin(), Mm(12.5));
        assert!(close(spec.row_gap(), Mm(57.0 / 7.0)));
        assert!(!spec.is_auto(Margin::Top));
        assert!(spec.is_auto(Margin::RowGap));
    }

    #[test]
    fn labels_that_do_not_fit_are_rejected_first() {
        let err = SheetSpec::builder((Mm(100.0), Mm(100.0)), 2, 2, Mm(60.0), Mm(60.0))
            .left_margin(Mm(500.0))
            .build()
            .unwrap_err();
        assert_eq!(err, DimensionError::DoesNotFit(Axis::Horizontal));
    }

    #[test]
    fn required_dimensions_must_be_positive() {
        let err = SheetSpec::builder((Mm(0.0), Mm(100.0)), 1, 1, Mm(10.0), Mm(10.0))
            .build()
            .unwrap_err();
        assert_eq!(err, DimensionError::NotPositive("sheet width"));

        let err = SheetSpec::builder(A4, 2, 0, Mm(10.0), Mm(10.0))
            .build()
            .unwrap_err();
        assert_eq!(err, DimensionError::NotPositive("rows"));

        let err = SheetSpec::builder(A4, 2, 2, Mm(f64::NAN), Mm(10.0))
            .build()
            .unwrap_err();
        assert_eq!(err, DimensionError::NotPositive("label width"));

        let err = a4_2x8()
            .background(Background::Drawing {
                width: 0.0,
                height: 842.0,
                content: Vec::new(),
            })
            .build()
            .unwrap_err();
        assert_eq!(err, DimensionError::NotPositive("background width"));
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let err = a4_2x8().column_gap(Mm(31.0)).build().unwrap_err();
        assert_eq!(err, DimensionError::MarginTooLarge("column gap"));

        let err = a4_2x8().left_margin(Mm(-1.0)).build().unwrap_err();
        assert_eq!(err, DimensionError::Negative("left margin"));
    }

    #[test]
    fn fully_specified_axis_must_use_all_space() {
        let err = a4_2x8()
            .left_margin(Mm(10.0))
            .column_gap(Mm(5.0))
            .right_margin(Mm(10.0))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            DimensionError::NotFullyUsed {
                axis: Axis::Horizontal,
                ..
            }
        ));

        let spec = a4_2x8()
            .left_margin(Mm(10.0))
            .column_gap(Mm(10.0))
            .right_margin(Mm(10.0))
            .build()
            .unwrap();
        assert_eq!(spec.right_margin(), Mm(10.0));
    }

    #[test]
    fn trailing_margin_absorbs_rounding_residue() {
        // 0.1 + 0.2 style residue, and a deliberate 0.005mm shortfall
        let spec = a4_2x8()
            .left_margin(Mm(10.0))
            .column_gap(Mm(10.0))
            .right_margin(Mm(10.005))
            .build()
            .unwrap();
        assert!(close(spec.right_margin(), Mm(10.0)));

        let spec = a4_2x8()
            .left_margin(Mm(10.0))
            .column_gap(Mm(10.0))
            .right_margin(Mm(9.995))
            .build()
            .unwrap();
        assert!(close(spec.right_margin(), Mm(10.0)));

        let err = a4_2x8()
            .left_margin(Mm(10.0))
            .column_gap(Mm(10.0))
            .right_margin(Mm(10.02))
            .build()
            .unwrap_err();
        assert_eq!(err, DimensionError::MarginTooLarge("right margin"));
    }

    #[test]
    fn corner_and_padding_rules() {
        assert_eq!(
            a4_2x8().corner_radius(Mm(12.6)).build().unwrap_err(),
            DimensionError::CornerRadiusTooLarge
        );
        assert!(a4_2x8().corner_radius(Mm(12.5)).build().is_ok());

        assert_eq!(
            a4_2x8().padding_radius(Mm(1.0)).build().unwrap_err(),
            DimensionError::PaddingRadiusWithoutPadding
        );
        assert_eq!(
            a4_2x8()
                .padding(Padding::symmetric(Mm(12.5), Mm(1.0)))
                .build()
                .unwrap_err(),
            DimensionError::PaddingTooLarge(Axis::Vertical)
        );
        assert_eq!(
            a4_2x8()
                .padding(Padding::symmetric(Mm(1.0), Mm(45.0)))
                .build()
                .unwrap_err(),
            DimensionError::PaddingTooLarge(Axis::Horizontal)
        );
        assert!(a4_2x8()
            .padding(Padding::all(Mm(2.0)))
            .padding_radius(Mm(1.0))
            .build()
            .is_ok());
    }

    #[test]
    fn failed_update_rolls_back() {
        let mut spec = a4_2x8().build().unwrap();
        let before = spec.clone();

        let err = spec.set_margin(Margin::Left, Some(Mm(40.0))).unwrap_err();
        assert_eq!(err, DimensionError::MarginTooLarge("left margin"));
        assert_eq!(spec, before);
        assert!(spec.is_auto(Margin::Left));

        spec.set_margin(Margin::Left, Some(Mm(4.0))).unwrap();
        assert_eq!(spec.left_margin(), Mm(4.0));
        assert_eq!(spec.right_margin(), Mm(13.0));

        let explicit = spec.clone();
        assert!(spec.set_label_width(Mm(110.0)).is_err());
        assert_eq!(spec, explicit);
        assert!(!spec.is_auto(Margin::Left));

        spec.set_margin(Margin::Left, None).unwrap();
        assert_eq!(spec.left_margin(), Mm(10.0));
    }

    #[test]
    fn setters_resolve_everything() {
        let mut spec = a4_2x8().build().unwrap();
        spec.set_columns(1).unwrap();
        assert_eq!(spec.left_margin(), Mm(60.0));
        assert_eq!(spec.right_margin(), Mm(60.0));
        spec.set_sheet_width(Mm(100.0)).unwrap();
        assert_eq!(spec.left_margin(), Mm(5.0));
        assert!(spec.set_rows(12).is_err());
        assert_eq!(spec.rows(), 8);
    }

    #[test]
    fn bounding_boxes_are_measured_from_the_top_left() {
        let spec = a4_2x8()
            .top_margin(Mm(10.0))
            .row_gap(Mm(5.0))
            .build()
            .unwrap();
        let boxes = spec.bounding_boxes(BoxMode::Actual);
        assert_eq!(boxes.len(), 16);
        let bbox = boxes[&Slot::new(2, 2)];
        assert_eq!(bbox.left, 110.0);
        assert_eq!(bbox.right, 200.0);
        assert_eq!(bbox.top, 40.0);
        assert_eq!(bbox.bottom, 65.0);

        let fractions = spec.bounding_boxes(BoxMode::Fraction);
        assert_eq!(fractions[&Slot::new(1, 1)].left, 10.0 / 210.0);
        assert_eq!(fractions, spec.bounding_boxes(BoxMode::Fraction));
    }

    #[test]
    fn bounding_boxes_serialize_to_json() {
        let spec = SheetSpec::builder((Mm(100.0), Mm(50.0)), 1, 1, Mm(80.0), Mm(30.0))
            .build()
            .unwrap();
        let json = spec.bounding_boxes_json(BoxMode::Actual).unwrap();
        assert_eq!(
            json,
            r#"{"1x1":{"top":10.0,"bottom":40.0,"left":10.0,"right":90.0}}"#
        );
    }

    #[test]
    fn specs_load_from_json() {
        let spec = SheetSpec::from_json(
            r#"{
                "sheet_width": 210, "sheet_height": 297,
                "columns": 2, "rows": 8,
                "label_width": 90, "label_height": 25,
                "corner_radius": 2,
                "left_margin": 15
            }"#,
        )
        .unwrap();
        assert_eq!(spec.left_margin(), Mm(15.0));
        assert_eq!(spec.column_gap(), Mm(7.5));

        let err = SheetSpec::from_json(
            r#"{"sheet_width": 100, "sheet_height": 100, "columns": 2, "rows": 2,
                "label_width": 60, "label_height": 60}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LabelError::InvalidDimension(DimensionError::DoesNotFit(Axis::Horizontal))
        ));
        assert!(matches!(
            SheetSpec::from_json(r#"{"sheet_width": 1}"#),
            Err(LabelError::Json(_))
        ));
    }

    proptest! {
        #[test]
        fn axes_always_sum_to_the_sheet(
            columns in 1usize..12,
            rows in 1usize..20,
            label_width in 1.0f64..40.0,
            label_height in 1.0f64..20.0,
            left in proptest::option::of(0.0f64..5.0),
            gap in proptest::option::of(0.0f64..2.0),
            top in proptest::option::of(0.0f64..5.0),
        ) {
            let mut config = SheetConfig::new(
                (Mm(500.0), Mm(500.0)),
                columns,
                rows,
                Mm(label_width),
                Mm(label_height),
            );
            config.left_margin = left.map(Mm);
            config.column_gap = gap.map(Mm);
            config.top_margin = top.map(Mm);
            let spec = SheetSpec::new(config).unwrap();

            let width = spec.left_margin()
                + spec.column_gap() * (columns - 1) as f64
                + spec.right_margin()
                + spec.label_width() * columns as f64;
            let height = spec.top_margin()
                + spec.row_gap() * (rows - 1) as f64
                + spec.bottom_margin()
                + spec.label_height() * rows as f64;
            prop_assert!(close(width, spec.sheet_width()));
            prop_assert!(close(height, spec.sheet_height()));
        }

        #[test]
        fn unspecified_axis_splits_into_count_plus_one(
            columns in 1usize..12,
            label_width in 1.0f64..40.0,
        ) {
            let spec = SheetSpec::builder((Mm(500.0), Mm(100.0)), columns, 1, Mm(label_width), Mm(10.0))
                .build()
                .unwrap();
            let share = (Mm(500.0) - Mm(label_width) * columns as f64) / (columns + 1) as f64;
            prop_assert!(close(spec.left_margin(), share));
            prop_assert!(close(spec.right_margin(), share));
            if columns > 1 {
                prop_assert!(close(spec.column_gap(), share));
            }
        }
    }
}
