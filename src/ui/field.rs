//! Braille rasterizer for the recorded play field.
//!
//! Each terminal cell holds a 2x4 grid of braille dots; surface pixels are scaled
//! onto that dot grid so the whole surface fits the field area.

use std::collections::HashMap;

use ratatui::prelude::*;

use crate::game::entities::Bounds;
use crate::game::surface::{DrawOp, FrameBuffer, Surface};

const BG: Color = Color::Rgb(0, 0, 5);
/// Fonts at least this large render bold.
const BOLD_FONT_PX: u16 = 20;

type DotMap = HashMap<(usize, usize), u8>;

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

fn set_dot(map: &mut DotMap, bx: i32, by: i32, bw: i32, bh: i32) {
    if bx < 0 || by < 0 || bx >= bw || by >= bh {
        return;
    }
    let cx = bx as usize / 2;
    let cy = by as usize / 4;
    let sx = bx as usize % 2;
    let sy = by as usize % 4;
    *map.entry((cx, cy)).or_insert(0) |= braille_bit(sx, sy);
}

fn write_layer(grid: &mut [Vec<(char, Style)>], map: &DotMap, w: usize, h: usize, color: Color) {
    for (&(cx, cy), &bits) in map {
        if cx < w && cy < h && bits != 0 {
            let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
            grid[cy][cx] = (ch, Style::default().fg(color).bg(BG));
        }
    }
}

/// Dots covered by a pixel rect. Any non-empty rect covers at least one dot.
fn fill_bounds(map: &mut DotMap, r: &Bounds, sx: f32, sy: f32, bw: i32, bh: i32) {
    if r.width <= 0 || r.height <= 0 {
        return;
    }
    let x0 = (r.x as f32 * sx).floor() as i32;
    let y0 = (r.y as f32 * sy).floor() as i32;
    let x1 = ((r.right() as f32 * sx).ceil() as i32).max(x0 + 1);
    let y1 = ((r.bottom() as f32 * sy).ceil() as i32).max(y0 + 1);
    for by in y0..y1 {
        for bx in x0..x1 {
            set_dot(map, bx, by, bw, bh);
        }
    }
}

pub fn render_field(fb: &FrameBuffer, width: usize, height: usize) -> Vec<Line<'static>> {
    let w = width;
    let h = height;
    let bw = (w * 2) as i32;
    let bh = (h * 4) as i32;
    let sx = bw as f32 / fb.width().max(1) as f32;
    let sy = bh as f32 / fb.height().max(1) as f32;

    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default().bg(BG)); w]; h];

    // Consecutive rects of one color share a layer so adjacent shapes merge
    // within a cell instead of overwriting each other.
    let mut layer: Option<(Color, DotMap)> = None;
    for op in fb.ops() {
        match op {
            DrawOp::Rect { bounds, color } => {
                if let Some((current, map)) = layer.take() {
                    if current == *color {
                        layer = Some((current, map));
                    } else {
                        write_layer(&mut grid, &map, w, h, current);
                    }
                }
                let (_, map) = layer.get_or_insert_with(|| (*color, DotMap::new()));
                fill_bounds(map, bounds, sx, sy, bw, bh);
            }
            DrawOp::Text {
                text,
                x,
                y,
                color,
                font,
            } => {
                if let Some((current, map)) = layer.take() {
                    write_layer(&mut grid, &map, w, h, current);
                }
                let mut style = Style::default().fg(*color).bg(BG);
                if font.size_px >= BOLD_FONT_PX {
                    style = style.add_modifier(Modifier::BOLD);
                }
                // Baseline sits on the bottom dot row of the cell.
                let col = (*x as f32 * sx / 2.0).max(0.0) as usize;
                let row = ((*y as f32 * sy / 4.0).max(1.0) as usize) - 1;
                if row < h {
                    for (i, ch) in text.chars().enumerate() {
                        if col + i < w {
                            grid[row][col + i] = (ch, style);
                        }
                    }
                }
            }
        }
    }
    if let Some((current, map)) = layer {
        write_layer(&mut grid, &map, w, h, current);
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn empty_buffer_is_blank() {
        let fb = FrameBuffer::new(40, 40);
        let lines = render_field(&fb, 4, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| row_text(l) == "    "));
    }

    #[test]
    fn rect_fills_full_cells() {
        // 8x8 surface onto a 4x2 cell field: one pixel per dot.
        let mut fb = FrameBuffer::new(8, 8);
        fb.set_fill_color(Color::White);
        fb.fill_rect(0, 0, 2, 4);
        let lines = render_field(&fb, 4, 2);
        assert_eq!(row_text(&lines[0]), "\u{28FF}   ");
        assert_eq!(row_text(&lines[1]), "    ");
    }

    #[test]
    fn tiny_rect_still_covers_a_dot() {
        let mut fb = FrameBuffer::new(480, 360);
        fb.fill_rect(0, 0, 1, 1);
        let lines = render_field(&fb, 10, 5);
        assert_eq!(row_text(&lines[0]).chars().next(), Some('\u{2801}'));
    }

    #[test]
    fn adjacent_rects_merge_within_a_cell() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.fill_rect(0, 0, 1, 1);
        fb.fill_rect(1, 0, 1, 1);
        let lines = render_field(&fb, 4, 2);
        assert_eq!(row_text(&lines[0]).chars().next(), Some('\u{2809}'));
    }

    #[test]
    fn text_lands_on_its_baseline_row() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.fill_text("OK", 2, 8);
        let lines = render_field(&fb, 4, 2);
        assert_eq!(row_text(&lines[1]), " OK ");
    }
}
