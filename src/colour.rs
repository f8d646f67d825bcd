/// A colour for text and rules, expressed in one of the PDF device colour spaces
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
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space from 0-255 components, the way
    /// document configuration usually specifies brand colours
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// The content-stream operator that sets this colour for filling (text)
    pub(crate) fn fill_operator(&self) -> String {
        match *self {
            Colour::RGB { r, g, b } => format!("{r} {g} {b} rg"),
            Colour::CMYK { c, m, y, k } => format!("{c} {m} {y} {k} k"),
            Colour::Grey { g } => format!("{g} g"),
        }
    }

    /// The content-stream operator that sets this colour for stroking (rules)
    pub(crate) fn stroke_operator(&self) -> String {
        match *self {
            Colour::RGB { r, g, b } => format!("{r} {g} {b} RG"),
            Colour::CMYK { c, m, y, k } => format!("{c} {m} {y} {k} K"),
            Colour::Grey { g } => format!("{g} G"),
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

/// Colours that business documents reach for most often
pub mod colours {
    use super::Colour;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// The light grey used for table separators
    pub const RULE_GREY: Colour = Colour::Grey { g: 0.75 };
    /// The default hyperlink blue of the document templates
    pub const LINK_BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_match_the_colour_space() {
        assert_eq!(colours::BLACK.fill_operator(), "0 g");
        assert_eq!(Colour::new_rgb(1.0, 0.5, 0.0).stroke_operator(), "1 0.5 0 RG");
        assert_eq!(
            Colour::CMYK {
                c: 0.0,
                m: 0.0,
                y: 0.0,
                k: 1.0
            }
            .fill_operator(),
            "0 0 0 1 k"
        );
        assert_eq!(Colour::new_rgb_bytes(255, 0, 0), Colour::new_rgb(1.0, 0.0, 0.0));
    }
}
