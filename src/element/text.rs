use serde::{Deserialize, Serialize};

use super::{Canvas, PointF, Rgba};

/// Fonts available to menu text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    #[default]
    ChaletLondon,
    HouseScript,
    Monospace,
    ChaletComprimeCologne,
    Pricedown,
}

/// Horizontal anchor of a text element relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A piece of text placed in the reference space.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledText {
    pub position: PointF,
    pub text: String,
    pub scale: f32,
    pub font: Font,
    pub color: Rgba,
    pub alignment: Alignment,
    pub outline: bool,
}

impl ScaledText {
    pub fn new(position: PointF, text: impl Into<String>, scale: f32, font: Font) -> Self {
        Self {
            position,
            text: text.into(),
            scale,
            font,
            color: Rgba::from_rgb(255, 255, 255),
            alignment: Alignment::Left,
            outline: false,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_outline(mut self, outline: bool) -> Self {
        self.outline = outline;
        self
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_text(self);
    }
}
