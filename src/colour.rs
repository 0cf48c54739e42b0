use std::io::Write;

/// The fill colour text is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` hex string
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Write the non-stroking colour operator for this colour
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_fill<W: Write>(&self, content: &mut W) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
            Colour::Grey { g } => write!(content, "{g} g\n"),
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

pub mod colours {
    use super::Colour;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(
            Colour::from_hex("#ff0000"),
            Some(Colour::RGB {
                r: 1.0,
                g: 0.0,
                b: 0.0
            })
        );
        assert!(Colour::from_hex("00ff00").is_some());
        assert_eq!(Colour::from_hex("#fff"), None);
        assert_eq!(Colour::from_hex("#gg0000"), None);
    }

    #[test]
    fn fill_operators() {
        let mut out = Vec::new();
        colours::BLACK.write_fill(&mut out).unwrap();
        Colour::RGB {
            r: 1.0,
            g: 0.5,
            b: 0.0,
        }
        .write_fill(&mut out)
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 g\n1 0.5 0 rg\n");
    }
}
