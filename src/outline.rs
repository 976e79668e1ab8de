//! Label outlines.
//!
//! A label is a rectangle with optionally rounded corners. The same outline is used
//! as a clip path when placing label content, as the stroked border, and as the
//! filled shape when a missing label is shaded.

use crate::units::*;
use std::io::Write;

/// Distance of the Bézier control points from a corner, as a fraction of the radius,
/// for a cubic approximation of a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// A rectangle with rounded corners, positioned by its lower-left corner
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RoundedRect {
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
    pub radius: Pt,
}

impl RoundedRect {
    pub fn new(x: Pt, y: Pt, width: Pt, height: Pt, radius: Pt) -> RoundedRect {
        RoundedRect {
            x,
            y,
            width,
            height,
            radius,
        }
    }

    /// Append the path of the outline to a content stream. The path is closed but
    /// not painted; follow it with a painting or clipping operator.
    #[allow(clippy::write_with_newline)]
    pub fn write_path(&self, content: &mut Vec<u8>) -> Result<(), std::io::Error> {
        let (x, y, w, h) = (*self.x, *self.y, *self.width, *self.height);
        let r = *self.radius;

        if r <= 0.0 {
            return write!(content, "{x} {y} {w} {h} re\n");
        }

        let k = r * KAPPA;
        let (right, top) = (x + w, y + h);

        write!(content, "{} {} m\n", x + r, y)?;
        write!(content, "{} {} l\n", right - r, y)?;
        write!(
            content,
            "{} {} {} {} {} {} c\n",
            right - r + k,
            y,
            right,
            y + r - k,
            right,
            y + r
        )?;
        write!(content, "{} {} l\n", right, top - r)?;
        write!(
            content,
            "{} {} {} {} {} {} c\n",
            right,
            top - r + k,
            right - r + k,
            top,
            right - r,
            top
        )?;
        write!(content, "{} {} l\n", x + r, top)?;
        write!(
            content,
            "{} {} {} {} {} {} c\n",
            x + r - k,
            top,
            x,
            top - r + k,
            x,
            top - r
        )?;
        write!(content, "{} {} l\n", x, y + r)?;
        write!(
            content,
            "{} {} {} {} {} {} c\n",
            x,
            y + r - k,
            x + r - k,
            y,
            x + r,
            y
        )?;
        write!(content, "h\n")
    }
}
