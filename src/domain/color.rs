//! Tile colors and the process-wide fallback color.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use thiserror::Error;

/// An RGBA color stored as packed 32-bit ARGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const LIGHT_GRAY: Color = Color(0xFFC0C0C0);
    pub const WHITE: Color = Color(0xFFFFFFFF);
    pub const BLACK: Color = Color(0xFF000000);

    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self((alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    /// Same bits reinterpreted as a signed 32-bit integer, the wire form.
    pub const fn to_i32(self) -> i32 {
        self.0 as i32
    }

    pub const fn from_i32(argb: i32) -> Self {
        Self(argb as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#AARRGGBB` or `#RRGGBB` (alpha defaults to opaque). The `#` is optional.
    pub fn parse_hex(value: &str) -> Result<Self, ColorParseError> {
        let digits = value.trim().trim_start_matches('#');
        let bytes = hex::decode(digits).map_err(|e| ColorParseError {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Self::from_rgba(*r, *g, *b, 0xFF)),
            [a, r, g, b] => Ok(Self::from_rgba(*r, *g, *b, *a)),
            _ => Err(ColorParseError {
                value: value.to_string(),
                reason: format!("expected 6 or 8 hex digits, got {}", digits.len()),
            }),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// Error parsing a hex color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{value}': {reason}")]
pub struct ColorParseError {
    pub value: String,
    pub reason: String,
}

static DEFAULT_COLOR: AtomicU32 = AtomicU32::new(Color::LIGHT_GRAY.argb());

/// Color reported for tiles whose own color is unset.
///
/// Read at query time, so changing it affects every uncolored tile at once.
pub fn default_color() -> Color {
    Color(DEFAULT_COLOR.load(Ordering::Relaxed))
}

pub fn set_default_color(color: Color) {
    DEFAULT_COLOR.store(color.argb(), Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_channels_when_packing_then_argb_layout() {
        let c = Color::from_rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.argb(), 0x78123456);
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn given_opaque_color_when_signed_then_negative_and_reversible() {
        let c = Color::from_argb(0xFF00FF00);
        assert!(c.to_i32() < 0);
        assert_eq!(Color::from_i32(c.to_i32()), c);
    }

    #[test]
    fn given_hex_strings_when_parsing_then_alpha_optional() {
        assert_eq!(Color::parse_hex("#FF8000").unwrap(), Color::from_argb(0xFFFF8000));
        assert_eq!(Color::parse_hex("80FF8000").unwrap(), Color::from_argb(0x80FF8000));
        assert!(Color::parse_hex("#FFF").is_err());
        assert!(Color::parse_hex("#GGGGGG").is_err());
        assert_eq!(Color::from_argb(0x80FF8000).to_string(), "#80FF8000");
    }
}
