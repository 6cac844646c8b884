use serde::Deserialize;

use crate::color::{ColorInput, Rgb};
use crate::error::{Error, Result};

pub const MIN_SPEED: f32 = 0.0;
pub const MIN_SCALE: f32 = 0.01;

/// Construction options as passed from JavaScript. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub base_color: ColorInput,
    pub speed: f32,
    pub scale: f32,
    pub pointer: bool,
    pub scroll_reactive: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_color: ColorInput::Rgb(Rgb::default()),
            speed: 1.0,
            scale: 1.0,
            pointer: true,
            scroll_reactive: true,
        }
    }
}

impl Options {
    /// Decode options from JSON. An empty string or `null` yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let json = json.trim();
        if json.is_empty() || json == "null" {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| Error::InvalidOptions(e.to_string()))
    }

    /// Resolve the color and clamp the numeric fields.
    pub fn resolve(&self) -> Result<Settings> {
        Ok(Settings {
            base_color: self.base_color.resolve()?,
            speed: clamp_speed(self.speed),
            scale: clamp_scale(self.scale),
            pointer: self.pointer,
            scroll_reactive: self.scroll_reactive,
        })
    }
}

/// Validated configuration owned by a running animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub base_color: Rgb,
    pub speed: f32,
    pub scale: f32,
    pub pointer: bool,
    pub scroll_reactive: bool,
}

pub fn clamp_speed(speed: f32) -> f32 {
    speed.max(MIN_SPEED)
}

pub fn clamp_scale(scale: f32) -> f32 {
    scale.max(MIN_SCALE)
}
