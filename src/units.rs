//! Units of measurement.
//!
//! Sheet specifications are given in millimetres ([`Mm`]), while everything that ends
//! up in the PDF is expressed in points ([`Pt`], 1/72 of an inch).

use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// Number of points in one millimetre
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// A length in millimetres. Sheet geometry is solved in this unit, using 64-bit floats so
/// that margins computed by division over many rows and columns still sum back to the
/// sheet size well within a micrometre.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display("{_0}mm")]
#[serde(transparent)]
pub struct Mm(pub f64);

/// A length in PDF points
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    Display,
    From,
    Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

impl Mm {
    pub const ZERO: Mm = Mm(0.0);

    /// The absolute value of the length
    pub fn abs(self) -> Mm {
        Mm(self.0.abs())
    }
}

impl Mul<f64> for Mm {
    type Output = Mm;

    fn mul(self, rhs: f64) -> Mm {
        Mm(self.0 * rhs)
    }
}

impl Div<f64> for Mm {
    type Output = Mm;

    fn div(self, rhs: f64) -> Mm {
        Mm(self.0 / rhs)
    }
}

impl Div<Mm> for Mm {
    type Output = f64;

    fn div(self, rhs: Mm) -> f64 {
        self.0 / rhs.0
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt((mm.0 * PT_PER_MM) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetres_convert_to_points() {
        let pt: Pt = Mm(25.4).into();
        assert!((pt.0 - 72.0).abs() < 1e-4);
        let pt: Pt = Mm(210.0).into();
        assert!((pt.0 - 595.2756).abs() < 1e-3);
    }

    #[test]
    fn arithmetic_stays_in_unit() {
        let total: Mm = [Mm(1.5), Mm(2.5), Mm(6.0)].into_iter().sum();
        assert_eq!(total, Mm(10.0));
        assert_eq!(total / 4.0, Mm(2.5));
        assert_eq!(total * 2.0 - Mm(5.0), Mm(15.0));
        assert_eq!(Mm(5.0) / Mm(20.0), 0.25);
        assert_eq!(format!("{}", Mm(3.5)), "3.5mm");
    }
}
