use crate::units::Mm;
use serde::{Deserialize, Serialize};

/// Padding is the inset between the edge of a label and the area the
/// [`LabelRenderer`](crate::LabelRenderer) gets to draw on. Anything drawn
/// outside of the padded area is clipped away when the label is placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: Mm,
    pub right: Mm,
    pub bottom: Mm,
    pub left: Mm,
}

impl Padding {
    /// Create padding by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS padding)
    pub fn trbl(top: Mm, right: Mm, bottom: Mm, left: Mm) -> Padding {
        Padding {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create padding where all values are equal
    pub fn all<D: Into<Mm>>(value: D) -> Padding {
        let value: Mm = value.into();
        Padding {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create padding by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) insets
    pub fn symmetric(vertical: Mm, horizontal: Mm) -> Padding {
        Padding {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create padding where all values are 0.0
    pub fn empty() -> Padding {
        Padding::all(Mm::ZERO)
    }

    /// Combined left and right padding
    pub fn horizontal(&self) -> Mm {
        self.left + self.right
    }

    /// Combined top and bottom padding
    pub fn vertical(&self) -> Mm {
        self.top + self.bottom
    }

    /// Whether there is no padding on any side
    pub fn is_empty(&self) -> bool {
        self.horizontal() + self.vertical() == Mm::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_sides() {
        let p = Padding::symmetric(Mm(1.0), Mm(2.0));
        assert_eq!(p.horizontal(), Mm(4.0));
        assert_eq!(p.vertical(), Mm(2.0));
        assert_eq!(Padding::trbl(Mm(1.0), Mm(2.0), Mm(3.0), Mm(4.0)).left, Mm(4.0));
        assert!(Padding::empty().is_empty());
        assert!(!Padding::all(Mm(0.5)).is_empty());
    }
}
