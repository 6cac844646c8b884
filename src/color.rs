//! Base color handling: hex parsing and normalization to shader space.

use serde::Deserialize;
use std::fmt;

use crate::error::{Error, Result};

/// 8-bit RGB triple as accepted from JavaScript (`{ r, g, b }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive, `#` optional).
    /// Short codes are expanded by doubling each digit.
    pub fn from_hex(input: &str) -> Result<Self> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(input.to_owned()));
        }
        let full: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_owned(),
            _ => return Err(Error::InvalidColor(input.to_owned())),
        };
        let value = u32::from_str_radix(&full, 16)
            .map_err(|_| Error::InvalidColor(input.to_owned()))?;
        Ok(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }

    /// Channels scaled to `[0, 1]`, ready for a `vec3` uniform.
    pub fn normalized(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(64, 128, 192)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color as the caller may spell it: a hex string or an explicit triple.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
    Hex(String),
    Rgb(Rgb),
}

impl ColorInput {
    pub fn resolve(&self) -> Result<Rgb> {
        match self {
            ColorInput::Hex(hex) => Rgb::from_hex(hex),
            ColorInput::Rgb(rgb) => Ok(*rgb),
        }
    }
}

impl From<Rgb> for ColorInput {
    fn from(rgb: Rgb) -> Self {
        ColorInput::Rgb(rgb)
    }
}

impl From<&str> for ColorInput {
    fn from(hex: &str) -> Self {
        ColorInput::Hex(hex.to_owned())
    }
}
