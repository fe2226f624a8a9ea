use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::element::{Alignment, Canvas, PointF, Rgba, ScaledRectangle, ScaledText, SizeF};

/// The space menu coordinates are expressed in.
pub const REFERENCE_RESOLUTION: SizeF = SizeF::new(1920.0, 1080.0);

/// Draws menu elements into a ratatui frame.
///
/// Reference coordinates are scaled onto the frame area, one element per
/// cell range. Text scale and font are ignored, the terminal only has one.
pub struct TerminalCanvas<'a, 'f> {
    frame: &'a mut Frame<'f>,
    area: Rect,
    reference: SizeF,
}

impl<'a, 'f> TerminalCanvas<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>) -> Self {
        let area = frame.area();
        Self {
            frame,
            area,
            reference: REFERENCE_RESOLUTION,
        }
    }

    /// Cell under a reference point, `None` when it falls outside the area.
    fn cell(&self, point: PointF) -> Option<(u16, u16)> {
        cell_in(self.area, self.reference, point)
    }
}

impl Canvas for TerminalCanvas<'_, '_> {
    fn draw_text(&mut self, text: &ScaledText) {
        if text.text.is_empty() {
            return;
        }
        let Some((col, row)) = self.cell(text.position) else {
            return;
        };

        let width = u16::try_from(text.text.width()).unwrap_or(u16::MAX);
        let start = match text.alignment {
            Alignment::Left => col,
            Alignment::Center => col.saturating_sub(width / 2),
            Alignment::Right => col.saturating_sub(width),
        };
        let area = Rect::new(start, row, width, 1).intersection(self.area);
        if area.is_empty() {
            return;
        }

        let mut style = Style::default().fg(to_color(text.color));
        if text.outline {
            style = style.add_modifier(Modifier::BOLD);
        }
        let paragraph = Paragraph::new(Span::styled(text.text.as_str(), style));
        self.frame.render_widget(paragraph, area);
    }

    fn draw_rectangle(&mut self, rectangle: &ScaledRectangle) {
        if rectangle.color.a == 0 {
            return;
        }
        let area = rect_in(self.area, self.reference, rectangle.position, rectangle.size);
        if area.is_empty() {
            return;
        }

        self.frame.render_widget(Clear, area);
        let block = Block::default().style(Style::default().bg(to_color(rectangle.color)));
        self.frame.render_widget(block, area);
    }
}

fn cell_in(area: Rect, reference: SizeF, point: PointF) -> Option<(u16, u16)> {
    let col = area.x as f32 + point.x / reference.width * area.width as f32;
    let row = area.y as f32 + point.y / reference.height * area.height as f32;
    let inside = col >= area.x as f32
        && row >= area.y as f32
        && col < area.right() as f32
        && row < area.bottom() as f32;
    inside.then(|| (col as u16, row as u16))
}

/// Cells covered by a reference rectangle, clipped to the area.
fn rect_in(area: Rect, reference: SizeF, position: PointF, size: SizeF) -> Rect {
    let scale_x = area.width as f32 / reference.width;
    let scale_y = area.height as f32 / reference.height;
    let left = (area.x as f32 + position.x * scale_x).max(area.x as f32);
    let top = (area.y as f32 + position.y * scale_y).max(area.y as f32);
    let right = (area.x as f32 + (position.x + size.width) * scale_x).min(area.right() as f32);
    let bottom = (area.y as f32 + (position.y + size.height) * scale_y).min(area.bottom() as f32);
    if right <= left || bottom <= top {
        return Rect::default();
    }

    let x = left as u16;
    let y = top as u16;
    let width = (right.ceil() as u16).saturating_sub(x).max(1);
    let height = (bottom.ceil() as u16).saturating_sub(y).max(1);
    Rect::new(x, y, width, height).intersection(area)
}

/// Terminal color for an ARGB value, blended over black.
fn to_color(color: Rgba) -> Color {
    let blend = |channel: u8| (u16::from(channel) * u16::from(color.a) / 255) as u8;
    Color::Rgb(blend(color.r), blend(color.g), blend(color.b))
}
