use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGBA color for table drawing commands.
///
/// Serialized as a CSS-style hex string (`"#006400"`), which is how table
/// themes are written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// A hex literal that could not be parsed as a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorError {
    literal: String,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color {:?} (expected #RGB or #RRGGBB)", self.literal)
    }
}

impl std::error::Error for ColorError {}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#RRGGBB` or the short `#RGB` form.
    pub fn from_hex(literal: &str) -> Result<Self, ColorError> {
        let err = || ColorError { literal: literal.to_string() };
        let digits = literal.strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match digits.len() {
            6 => Ok(Self::rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb8(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(err()),
        }
    }

    /// Format as `#RRGGBB`. Alpha is dropped.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Playing surface green (#006400).
    pub const FELT: Self = Self::rgb(0.0, 100.0 / 255.0, 0.0);
    /// Rail wood (#654321).
    pub const RAIL: Self = Self::rgb(101.0 / 255.0, 67.0 / 255.0, 33.0 / 255.0);
    /// Cue stick brown (#8B4513).
    pub const CUE_STICK: Self = Self::rgb(139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        Color::from_hex(&literal).map_err(serde::de::Error::custom)
    }
}
