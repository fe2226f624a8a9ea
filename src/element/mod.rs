//! Drawable primitives used by the menu.
//!
//! Elements only carry what should be drawn and where. Actual rendering is
//! done by a [`Canvas`] supplied by the host every frame, so the same menu can
//! be drawn by a game overlay or by the terminal demo.

mod rectangle;
mod text;

pub use rectangle::ScaledRectangle;
pub use text::{Alignment, Font, ScaledText};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A position in the 1920x1080 reference space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const ZERO: PointF = PointF { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return this point moved by the given deltas.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A size in the 1920x1080 reference space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    pub const ZERO: SizeF = SizeF {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgba {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Format as `#AARRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Rgba::parse_hex(&value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid color '{value}', expected #RRGGBB or #AARRGGBB"
            ))
        })
    }
}

/// Something that can put elements on screen.
///
/// Implemented by the host integration. The menu sets element properties and
/// asks the canvas to draw them; it never reads anything back.
pub trait Canvas {
    fn draw_text(&mut self, text: &ScaledText);
    fn draw_rectangle(&mut self, rectangle: &ScaledRectangle);
}
