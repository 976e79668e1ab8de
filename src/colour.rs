use std::io::Write;

/// A colour, expressed in RGB, CMYK or grey colour spaces. Used for label borders
/// and for shading labels that are missing from the sheet.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Write the operator setting this as the fill colour
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_fill(&self, content: &mut Vec<u8>) -> Result<(), std::io::Error> {
        match *self {
            Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
            Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
            Colour::Grey { g } => write!(content, "{g} g\n"),
        }
    }

    /// Write the operator setting this as the stroke colour
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_stroke(&self, content: &mut Vec<u8>) -> Result<(), std::io::Error> {
        match *self {
            Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
            Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} K\n"),
            Colour::Grey { g } => write!(content, "{g} G\n"),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// The default shade for labels missing from a partially used sheet
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 0.85 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_fill_and_stroke_operators() {
        let mut out = Vec::new();
        colours::BLACK.write_stroke(&mut out).unwrap();
        Colour::new_rgb(1.0, 0.5, 0.0).write_fill(&mut out).unwrap();
        Colour::new_cmyk(0.0, 0.0, 0.0, 1.0).write_fill(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0 G\n1 0.5 0 rg\n0 0 0 1 k\n"
        );
        assert_eq!(Colour::new_rgb_bytes(255, 0, 0), colours::RED);
    }
}
