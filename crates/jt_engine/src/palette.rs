use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{JtError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn get_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` or `rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(JtError::generic(format!("Invalid hex color: {hex}")));
        }
        let r = u8::from_str_radix(&digits[0..2], 16).map_err(JtError::generic)?;
        let g = u8::from_str_radix(&digits[2..4], 16).map_err(JtError::generic)?;
        let b = u8::from_str_radix(&digits[4..6], 16).map_err(JtError::generic)?;
        Ok(Color::new(r, g, b))
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Color::new(value.0, value.1, value.2)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(value: Color) -> (u8, u8, u8) {
        (value.r, value.g, value.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from(value: [u8; 3]) -> Self {
        Color::new(value[0], value[1], value[2])
    }
}

impl From<Color> for [u8; 3] {
    fn from(value: Color) -> [u8; 3] {
        [value.r, value.g, value.b]
    }
}

/// The fixed 8-color panel palette, usable in indexed 3-bit mode.
///
/// The discriminant is the wire code: bit 2 marks full-intensity Blue,
/// bit 1 Green, bit 0 Red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PaletteColor {
    Black = 0b000,
    Red = 0b001,
    Green = 0b010,
    Yellow = 0b011,
    Blue = 0b100,
    Magenta = 0b101,
    Cyan = 0b110,
    White = 0b111,
}

/// All palette entries in enumeration (and code) order.
pub const PALETTE: [PaletteColor; 8] = [
    PaletteColor::Black,
    PaletteColor::Red,
    PaletteColor::Green,
    PaletteColor::Yellow,
    PaletteColor::Blue,
    PaletteColor::Magenta,
    PaletteColor::Cyan,
    PaletteColor::White,
];

impl PaletteColor {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Resolve a 3-bit code. Codes are masked to their low three bits,
    /// so every input resolves to a palette entry.
    pub const fn from_code(code: u8) -> PaletteColor {
        PALETTE[(code & 0b111) as usize]
    }

    /// Exact RGB triple of this entry. This is a direct table lookup, the
    /// palette is defined by these triples rather than derived from the code.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            PaletteColor::Black => (0, 0, 0),
            PaletteColor::Red => (255, 0, 0),
            PaletteColor::Green => (0, 255, 0),
            PaletteColor::Yellow => (255, 255, 0),
            PaletteColor::Blue => (0, 0, 255),
            PaletteColor::Magenta => (255, 0, 255),
            PaletteColor::Cyan => (0, 255, 255),
            PaletteColor::White => (255, 255, 255),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Black => "Black",
            PaletteColor::Red => "Red",
            PaletteColor::Green => "Green",
            PaletteColor::Yellow => "Yellow",
            PaletteColor::Blue => "Blue",
            PaletteColor::Magenta => "Magenta",
            PaletteColor::Cyan => "Cyan",
            PaletteColor::White => "White",
        }
    }

    /// Exact palette membership test, no quantization.
    pub fn from_color(color: Color) -> Option<PaletteColor> {
        PALETTE.iter().copied().find(|p| p.rgb() == color.get_rgb())
    }
}

impl From<PaletteColor> for Color {
    fn from(value: PaletteColor) -> Self {
        let (r, g, b) = value.rgb();
        Color::new(r, g, b)
    }
}

/// Nearest palette entry by Euclidean distance in RGB space.
///
/// Ties are broken by palette enumeration order, the first minimal
/// entry wins.
pub fn quantize(color: Color) -> PaletteColor {
    let mut nearest = PaletteColor::Black;
    let mut nearest_dist = u32::MAX;
    for entry in PALETTE {
        let (r, g, b) = entry.rgb();
        let dr = i32::from(color.r) - i32::from(r);
        let dg = i32::from(color.g) - i32::from(g);
        let db = i32::from(color.b) - i32::from(b);
        let dist = (dr * dr + dg * dg + db * db) as u32;
        if dist < nearest_dist {
            nearest = entry;
            nearest_dist = dist;
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table() {
        assert_eq!(PaletteColor::Black.code(), 0b000);
        assert_eq!(PaletteColor::Red.code(), 0b001);
        assert_eq!(PaletteColor::Green.code(), 0b010);
        assert_eq!(PaletteColor::Yellow.code(), 0b011);
        assert_eq!(PaletteColor::Blue.code(), 0b100);
        assert_eq!(PaletteColor::Magenta.code(), 0b101);
        assert_eq!(PaletteColor::Cyan.code(), 0b110);
        assert_eq!(PaletteColor::White.code(), 0b111);
        for entry in PALETTE {
            assert_eq!(PaletteColor::from_code(entry.code()), entry);
        }
    }

    #[test]
    fn test_quantize_identity_on_palette() {
        for entry in PALETTE {
            assert_eq!(quantize(entry.into()), entry);
        }
    }

    #[test]
    fn test_quantize_idempotent() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(17) {
                    let c = Color::new(r as u8, g as u8, b as u8);
                    let q = quantize(c);
                    assert_eq!(quantize(q.into()), q);
                }
            }
        }
    }

    #[test]
    fn test_quantize_nearest() {
        assert_eq!(quantize(Color::new(200, 10, 30)), PaletteColor::Red);
        assert_eq!(quantize(Color::new(30, 30, 30)), PaletteColor::Black);
        assert_eq!(quantize(Color::new(250, 250, 10)), PaletteColor::Yellow);
        assert_eq!(quantize(Color::new(10, 200, 220)), PaletteColor::Cyan);
    }

    #[test]
    fn test_quantize_channel_midpoints() {
        // The bisector between Black and Red sits at r = 127.5, so integer
        // inputs always resolve without an actual tie.
        assert_eq!(quantize(Color::new(127, 0, 0)), PaletteColor::Black);
        assert_eq!(quantize(Color::new(128, 0, 0)), PaletteColor::Red);
        assert_eq!(quantize(Color::new(127, 127, 127)), PaletteColor::Black);
        assert_eq!(quantize(Color::new(128, 128, 128)), PaletteColor::White);
    }

    #[test]
    fn test_hex_parse() {
        assert_eq!(Color::from_hex("#ff00ff").unwrap(), Color::new(255, 0, 255));
        assert_eq!(Color::from_hex("00FF00").unwrap(), Color::new(0, 255, 0));
        assert!(Color::from_hex("#f0f").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }
}
