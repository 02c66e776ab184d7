//! Hexadecimal color parsing.
//!
//! Colors are given as `#RRGGBB` or `#RGB` strings, case-insensitive, with the leading `#`
//! optional. Shorthand nibbles are doubled, so `#0F0` is the same color as `#00FF00`.

use core::fmt;
use core::str::FromStr;

use image::Rgba;

use crate::error::{RenderError, Result};

/// A validated, fully opaque RGBA color with 8-bit channels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Creates an opaque color from its red, green and blue channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Parses a `#RGB` or `#RRGGBB` hex string.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidColor`] for an empty string, a digit count other than 3
    /// or 6, or any character that is not a hex digit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qirender::color::Color;
    ///
    /// assert_eq!(Color::parse("#F00").unwrap(), Color::rgb(255, 0, 0));
    /// assert_eq!(Color::parse("00ff00").unwrap(), Color::rgb(0, 255, 0));
    /// assert!(Color::parse("notacolor").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.is_empty() {
            return Err(RenderError::invalid_color(input, "empty color"));
        }
        let mut nibbles = [0u8; 6];
        let count = digits.chars().count();
        if count != 3 && count != 6 {
            return Err(RenderError::invalid_color(input, "expected 3 or 6 hex digits"));
        }
        for (slot, c) in nibbles.iter_mut().zip(digits.chars()) {
            *slot = c
                .to_digit(16)
                .ok_or_else(|| RenderError::invalid_color(input, "non-hex character"))? as u8;
        }

        let [r, g, b] = if count == 3 {
            [nibbles[0] * 0x11, nibbles[1] * 0x11, nibbles[2] * 0x11]
        } else {
            [
                (nibbles[0] << 4) | nibbles[1],
                (nibbles[2] << 4) | nibbles[3],
                (nibbles[4] << 4) | nibbles[5],
            ]
        };
        Ok(Color::rgb(r, g, b))
    }

    /// Returns the color as a lowercase `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Returns `true` unless the color carries transparency.
    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }
}

impl FromStr for Color {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}
