//! Drawing contract the game core renders through.
//!
//! The session never touches the terminal. It issues canvas-style calls against a
//! [`Surface`], and the UI later rasterizes whatever a [`FrameBuffer`] recorded.

use ratatui::style::Color;

use super::entities::Bounds;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub size_px: u16,
}

impl Font {
    /// Canvas default.
    pub const DEFAULT: Font = Font { size_px: 10 };
    /// End-of-game banners.
    pub const BANNER: Font = Font { size_px: 30 };
}

pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn clear(&mut self);
    fn set_fill_color(&mut self, color: Color);
    fn set_font(&mut self, font: Font);
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);
    /// `y` is the text baseline.
    fn fill_text(&mut self, text: &str, x: i32, y: i32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Rect {
        bounds: Bounds,
        color: Color,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Color,
        font: Font,
    },
}

/// Surface that records draw calls issued since the last `clear`.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    fill: Color,
    font: Font,
    ops: Vec<DrawOp>,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            fill: Color::Black,
            font: Font::DEFAULT,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

#[cfg(test)]
impl FrameBuffer {
    pub fn rects(&self) -> impl Iterator<Item = &Bounds> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { bounds, .. } => Some(bounds),
            DrawOp::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rect { .. } => None,
        })
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.clear();
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.ops.push(DrawOp::Rect {
            bounds: Bounds::new(x, y, width, height),
            color: self.fill,
        });
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            color: self.fill,
            font: self.font,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_current_fill_and_font() {
        let mut fb = FrameBuffer::new(100, 50);
        fb.fill_rect(1, 2, 3, 4);
        fb.set_fill_color(Color::White);
        fb.set_font(Font::BANNER);
        fb.fill_text("hi", 5, 6);

        assert_eq!(
            fb.ops(),
            &[
                DrawOp::Rect {
                    bounds: Bounds::new(1, 2, 3, 4),
                    color: Color::Black,
                },
                DrawOp::Text {
                    text: "hi".to_string(),
                    x: 5,
                    y: 6,
                    color: Color::White,
                    font: Font::BANNER,
                },
            ]
        );
    }

    #[test]
    fn clear_drops_ops_but_keeps_state() {
        let mut fb = FrameBuffer::new(100, 50);
        fb.set_fill_color(Color::White);
        fb.fill_rect(0, 0, 10, 10);
        fb.clear();
        assert!(fb.ops().is_empty());

        fb.fill_rect(0, 0, 1, 1);
        assert!(matches!(fb.ops()[0], DrawOp::Rect { color: Color::White, .. }));
        assert_eq!((fb.width(), fb.height()), (100, 50));
    }
}
