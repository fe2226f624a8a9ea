use super::{Canvas, PointF, Rgba, SizeF};

/// A filled rectangle placed in the reference space.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledRectangle {
    pub position: PointF,
    pub size: SizeF,
    pub color: Rgba,
}

impl ScaledRectangle {
    pub fn new(position: PointF, size: SizeF) -> Self {
        Self {
            position,
            size,
            color: Rgba::from_argb(255, 0, 0, 0),
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_rectangle(self);
    }
}
