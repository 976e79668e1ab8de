//! 2D transformation matrices for placing labels and backgrounds on a page.

use crate::units::*;
use std::io::Write;

/// A transformation matrix for positioning Form XObjects on a page.
///
/// Uses the standard PDF transformation matrix where (0,0) is at the bottom-left.
/// The matrix is represented as [a, b, c, d, e, f] corresponding to:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// Transforms are chained with [`then`](Transform::then); operations are applied in
/// the order they're chained.
///
/// ```
/// use pdf_labels::{Transform, Pt};
///
/// // stretch a background drawing over the page, then move it into place
/// let transform = Transform::scale(0.5, 2.0).then(Transform::translate(Pt(72.0), Pt(0.0)));
/// assert_eq!(transform.e, 72.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a translation transform
    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            e: *x,
            f: *y,
            ..Transform::identity()
        }
    }

    /// Create a scaling transform
    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform {
            a: sx,
            d: sy,
            ..Transform::identity()
        }
    }

    /// Combine this transform with another (self * other)
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Write the `cm` operator applying this transform to a content stream
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write(&self, content: &mut Vec<u8>) -> Result<(), std::io::Error> {
        write!(
            content,
            "{} {} {} {} {} {} cm\n",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_then_translate() {
        let t = Transform::scale(2.0, 3.0).then(Transform::translate(Pt(10.0), Pt(20.0)));
        assert_eq!((t.a, t.d, t.e, t.f), (2.0, 3.0, 10.0, 20.0));

        let mut out = Vec::new();
        Transform::translate(Pt(1.5), Pt(2.0)).write(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 0 0 1 1.5 2 cm\n");
    }
}
