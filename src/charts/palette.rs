//! Colors and the chart palette.

use crate::error::{ChartError, Result};
use std::fmt;
use std::str::FromStr;

/// RGBA color as painted on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(ChartError::configuration(format!(
                "color '{}' is not #rrggbb or #rrggbbaa",
                hex
            )));
        }
        // from_str_radix alone would let a leading '+' through
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChartError::configuration(format!(
                "color '{}' has a non-hex digit",
                hex
            )));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| {
                ChartError::configuration(format!("color '{}' has a non-hex digit", hex))
            })
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Default chart colors, cycled by series/slice index.
pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::rgb(0x34, 0x98, 0xdb), // Blue
    Color::rgb(0x2e, 0xcc, 0x71), // Green
    Color::rgb(0xe7, 0x4c, 0x3c), // Red
    Color::rgb(0xf3, 0x9c, 0x12), // Orange
    Color::rgb(0x9b, 0x59, 0xb6), // Purple
    Color::rgb(0x1a, 0xbc, 0x9c), // Teal
    Color::rgb(0x34, 0x49, 0x5e), // Dark Blue Grey
    Color::rgb(0x7f, 0x8c, 0x8d), // Grey
];

/// Ordered, non-empty color list.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(ChartError::configuration("palette must contain at least one color"));
        }
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self> {
        let colors = hex
            .iter()
            .map(|h| Color::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Color for position `index`, wrapping around the palette.
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::from_hex("#3498db").unwrap(), Color::rgb(52, 152, 219));
        assert_eq!(Color::from_hex("ffffff80").unwrap(), Color::rgba(255, 255, 255, 128));
        assert!("#000".parse::<Color>().is_err());
        assert!(Color::from_hex("#zz0000").unwrap_err().is_configuration());
    }

    #[test]
    fn test_sign_is_not_a_hex_digit() {
        assert!(Color::from_hex("#+f+f+f").unwrap_err().is_configuration());
        assert!(Color::from_hex("+fffff").unwrap_err().is_configuration());
        assert!(Color::from_hex("#ff00+f80").unwrap_err().is_configuration());
    }

    #[test]
    fn test_display_roundtrips_hex() {
        let c = Color::rgb(0xe7, 0x4c, 0x3c);
        assert_eq!(c.to_string(), "#e74c3c");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_palette_wraps() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 8);
        assert_eq!(palette.color(0), palette.color(8));
        assert_eq!(palette.color(3), DEFAULT_PALETTE[3]);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = Palette::new(Vec::new()).unwrap_err();
        assert!(err.is_configuration());
        let empty: [&str; 0] = [];
        assert!(Palette::from_hex(&empty).is_err());
    }
}
