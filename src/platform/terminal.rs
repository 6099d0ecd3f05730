//! Character-cell canvas
//!
//! Rasterizes the field (960x540 units) onto a grid of terminal cells and
//! writes the grid out with crossterm. Each cell has one glyph, a foreground
//! and a background color.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
};
use glam::Vec2;

use crate::Rgb;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::renderer::palette::blend;
use crate::renderer::{Canvas, Rect, Stroke, TextSurface};

const GLYPH_FILL: char = '█';
const GLYPH_LINE: char = '·';
const GLYPH_THICK: char = '•';

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    fn blank(bg: Rgb) -> Self {
        Self {
            glyph: ' ',
            fg: bg,
            bg,
        }
    }
}

/// Frame buffer of terminal cells covering the whole field
#[derive(Debug, Clone)]
pub struct TermCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl TermCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![Cell::blank([0, 0, 0]); cols as usize * rows as usize],
        }
    }

    /// Match a new terminal size; contents are reset
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols.max(1), rows.max(1)) != (self.cols, self.rows) {
            *self = Self::new(cols, rows);
        }
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    /// Field units covered by one cell
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            FIELD_WIDTH / self.cols as f32,
            FIELD_HEIGHT / self.rows as f32,
        )
    }

    /// Cell containing a field point, if on screen
    pub fn cell_at(&self, p: Vec2) -> Option<(u16, u16)> {
        let cell = self.cell_size();
        let col = (p.x / cell.x).floor();
        let row = (p.y / cell.y).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Field coordinates of a cell's center
    fn cell_center(&self, col: u16, row: u16) -> Vec2 {
        let cell = self.cell_size();
        Vec2::new((col as f32 + 0.5) * cell.x, (row as f32 + 0.5) * cell.y)
    }

    fn set(&mut self, col: u16, row: u16, glyph: char, fg: Rgb) {
        if col < self.cols && row < self.rows {
            let idx = row as usize * self.cols as usize + col as usize;
            let cell = &mut self.cells[idx];
            cell.glyph = glyph;
            cell.fg = fg;
        }
    }

    fn plot(&mut self, p: Vec2, glyph: char, fg: Rgb) {
        if let Some((col, row)) = self.cell_at(p) {
            self.set(col, row, glyph, fg);
        }
    }

    /// Fill every cell whose center passes `inside`; tiny shapes still get their anchor cell
    fn fill_where<F: Fn(Vec2) -> bool>(&mut self, min: Vec2, max: Vec2, anchor: Vec2, color: Rgb, inside: F) {
        let mut filled = false;
        if let (Some(lo), Some(hi)) = (
            self.cell_at(min.max(Vec2::ZERO)),
            self.cell_at(max.min(Vec2::new(FIELD_WIDTH - 0.01, FIELD_HEIGHT - 0.01))),
        ) {
            for row in lo.1..=hi.1 {
                for col in lo.0..=hi.0 {
                    if inside(self.cell_center(col, row)) {
                        self.set(col, row, GLYPH_FILL, color);
                        filled = true;
                    }
                }
            }
        }
        if !filled {
            self.plot(anchor, GLYPH_FILL, color);
        }
    }

    fn stroke_glyph(width: f32) -> char {
        if width > 1.0 { GLYPH_THICK } else { GLYPH_LINE }
    }

    fn polyline(&mut self, points: &[Vec2], closed: bool, color: Rgb, width: f32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, width);
        }
        if closed && points.len() > 2 {
            self.line(points[points.len() - 1], points[0], color, width);
        }
    }

    /// Write the whole grid to the terminal
    pub fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;
        let mut run = String::new();

        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let cell = &self.cells[row as usize * self.cols as usize + col as usize];
                let colors = (cell.fg, cell.bg);
                if current != Some(colors) {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    current = Some(colors);
                }
                run.push(cell.glyph);
            }
            if !run.is_empty() {
                out.queue(Print(&run))?;
                run.clear();
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()
    }
}

fn to_color([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// Even-odd point in polygon test
fn point_in_polygon(p: Vec2, points: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Canvas for TermCanvas {
    fn clear(&mut self, color: Rgb) {
        self.cells.fill(Cell::blank(color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb, width: f32) {
        let cell = self.cell_size();
        let delta = to - from;
        let steps = (delta.x.abs() / cell.x).max(delta.y.abs() / cell.y).ceil().max(1.0) as u32;
        let glyph = Self::stroke_glyph(width);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(from + delta * t, glyph, color);
        }
    }

    fn rect(&mut self, rect: Rect, color: Rgb, stroke: Stroke, _corner_radius: f32) {
        // Corners are smaller than a cell; rounding is not representable
        let min = rect.pos;
        let max = rect.pos + rect.size;
        match stroke {
            Stroke::Fill => self.fill_where(min, max, rect.center(), color, |p| {
                p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
            }),
            Stroke::Outline(width) => {
                let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
                self.polyline(&corners, true, color, width);
            }
        }
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgb, stroke: Stroke) {
        match stroke {
            Stroke::Fill => {
                let r = Vec2::splat(radius);
                self.fill_where(center - r, center + r, center, color, |p| {
                    p.distance_squared(center) <= radius * radius
                });
            }
            Stroke::Outline(width) => {
                let bounds = Rect::centered(center, Vec2::splat(radius * 2.0));
                self.arc(bounds, 0.0, std::f32::consts::TAU, color, width);
            }
        }
    }

    fn polygon(&mut self, points: &[Vec2], color: Rgb, stroke: Stroke) {
        if points.is_empty() {
            return;
        }
        match stroke {
            Stroke::Fill => {
                let min = points.iter().fold(Vec2::splat(f32::MAX), |m, p| m.min(*p));
                let max = points.iter().fold(Vec2::splat(f32::MIN), |m, p| m.max(*p));
                self.fill_where(min, max, points[0], color, |p| point_in_polygon(p, points));
            }
            Stroke::Outline(width) => self.polyline(points, true, color, width),
        }
    }

    fn arc(&mut self, bounds: Rect, start: f32, end: f32, color: Rgb, width: f32) {
        let center = bounds.center();
        let radii = bounds.size * 0.5;
        let cell = self.cell_size();
        // Enough samples to touch every cell along the curve
        let span = (end - start).abs();
        let steps = ((span * radii.max_element()) / cell.min_element()).ceil().max(4.0) as u32;
        let glyph = Self::stroke_glyph(width);
        for i in 0..=steps {
            let theta = start + (end - start) * i as f32 / steps as f32;
            // Counter-clockwise on screen, so y is flipped
            let p = center + Vec2::new(theta.cos() * radii.x, -theta.sin() * radii.y);
            self.plot(p, glyph, color);
        }
    }

    fn render_text(&self, text: &str, font_size: f32, color: Rgb) -> TextSurface {
        let cell = self.cell_size();
        TextSurface {
            text: text.to_string(),
            font_size,
            color,
            extent: Vec2::new(text.chars().count() as f32 * cell.x, cell.y),
        }
    }

    fn blit(&mut self, surface: &TextSurface, pos: Vec2) {
        let cell = self.cell_size();
        let row = (pos.y / cell.y).floor();
        if row < 0.0 || row >= self.rows as f32 {
            return;
        }
        let start = (pos.x / cell.x).floor();
        for (i, ch) in surface.text.chars().enumerate() {
            let col = start + i as f32;
            if col >= 0.0 && col < self.cols as f32 {
                self.set(col as u16, row as u16, ch, surface.color);
            }
        }
    }

    fn wash(&mut self, color: Rgb, alpha: u8) {
        for cell in &mut self.cells {
            cell.fg = blend(color, cell.fg, alpha);
            cell.bg = blend(color, cell.bg, alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = [255, 255, 255];
    const BLACK: Rgb = [0, 0, 0];

    /// 96x54 cells: each cell is 10x10 field units
    fn canvas() -> TermCanvas {
        let mut canvas = TermCanvas::new(96, 54);
        canvas.clear(BLACK);
        canvas
    }

    fn filled(canvas: &TermCanvas) -> usize {
        canvas.cells.iter().filter(|c| c.glyph != ' ').count()
    }

    #[test]
    fn test_cell_mapping() {
        let canvas = canvas();
        assert_eq!(canvas.cell_size(), Vec2::new(10.0, 10.0));
        assert_eq!(canvas.cell_at(Vec2::new(15.0, 25.0)), Some((1, 2)));
        assert_eq!(canvas.cell_at(Vec2::new(-1.0, 5.0)), None);
        assert_eq!(canvas.cell_at(Vec2::new(960.0, 5.0)), None);
    }

    #[test]
    fn test_filled_rect() {
        let mut canvas = canvas();
        canvas.rect(Rect::new(0.0, 0.0, 40.0, 20.0), WHITE, Stroke::Fill, 0.0);
        assert_eq!(filled(&canvas), 8);
        assert_eq!(canvas.cell(3, 1).map(|c| c.glyph), Some(GLYPH_FILL));
        assert_eq!(canvas.cell(4, 1).map(|c| c.glyph), Some(' '));
    }

    #[test]
    fn test_tiny_circle_still_visible() {
        let mut canvas = canvas();
        canvas.circle(Vec2::new(503.0, 207.0), 1.5, WHITE, Stroke::Fill);
        assert_eq!(filled(&canvas), 1);
        assert_eq!(canvas.cell(50, 20).map(|c| c.fg), Some(WHITE));
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = canvas();
        canvas.line(Vec2::new(0.0, 5.0), Vec2::new(95.0, 5.0), WHITE, 1.0);
        assert_eq!(filled(&canvas), 10);
        assert!((0..10).all(|col| canvas.cell(col, 0).map(|c| c.glyph) == Some(GLYPH_LINE)));
    }

    #[test]
    fn test_polygon_fill() {
        let mut canvas = canvas();
        let square = [
            Vec2::new(100.0, 100.0),
            Vec2::new(140.0, 100.0),
            Vec2::new(140.0, 140.0),
            Vec2::new(100.0, 140.0),
        ];
        canvas.polygon(&square, WHITE, Stroke::Fill);
        assert_eq!(filled(&canvas), 16);
        canvas.polygon(&[], WHITE, Stroke::Fill);
    }

    #[test]
    fn test_text_blit_clips_at_edge() {
        let mut canvas = canvas();
        let surface = canvas.render_text("Score: 10", 24.0, WHITE);
        assert_eq!(surface.extent, Vec2::new(90.0, 10.0));
        canvas.blit(&surface, Vec2::new(900.0, 0.0));
        assert_eq!(canvas.cell(90, 0).map(|c| c.glyph), Some('S'));
        assert_eq!(canvas.cell(95, 0).map(|c| c.glyph), Some(':'));
        assert_eq!(filled(&canvas), 6);
    }

    #[test]
    fn test_wash_tints_everything() {
        let mut canvas = canvas();
        canvas.wash([255, 0, 0], 255);
        assert!(canvas.cells.iter().all(|c| c.bg == [255, 0, 0]));
    }

    #[test]
    fn test_flush_writes_rows() {
        let mut canvas = TermCanvas::new(4, 2);
        canvas.clear(BLACK);
        let surface = canvas.render_text("hi", 12.0, WHITE);
        canvas.blit(&surface, Vec2::ZERO);

        let mut out = Vec::new();
        canvas.flush(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("hi"));
    }
}
