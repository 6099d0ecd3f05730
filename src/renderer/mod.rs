//! Presentation layer
//!
//! The simulation never draws. A frame is produced by handing a read-only
//! `GameState` to `scene::draw_frame`, which issues primitive calls on any
//! `Canvas` implementation (terminal raster, recording list, ...).

pub mod draw_list;
pub mod palette;
pub mod scene;

pub use draw_list::{DrawCommand, DrawList};
pub use palette::{PALETTES, Palette};
pub use scene::{FrameOptions, draw_frame};

use glam::Vec2;

use crate::Rgb;

/// Axis-aligned rectangle in field coordinates (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Fill or outline a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    Fill,
    /// Outline with the given line width
    Outline(f32),
}

/// Rendered text sized to its content, ready to blit
#[derive(Debug, Clone, PartialEq)]
pub struct TextSurface {
    pub text: String,
    pub font_size: f32,
    pub color: Rgb,
    /// Width and height in field units
    pub extent: Vec2,
}

/// Drawing primitives supplied by a graphics backend
pub trait Canvas {
    /// Fill the whole target
    fn clear(&mut self, color: Rgb);

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb, width: f32);

    /// Rectangle with optional corner rounding (0 = square corners)
    fn rect(&mut self, rect: Rect, color: Rgb, stroke: Stroke, corner_radius: f32);

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgb, stroke: Stroke);

    fn polygon(&mut self, points: &[Vec2], color: Rgb, stroke: Stroke);

    /// Elliptical arc inscribed in `bounds`, angles in radians
    fn arc(&mut self, bounds: Rect, start: f32, end: f32, color: Rgb, width: f32);

    /// Lay out text into a surface sized to its content
    fn render_text(&self, text: &str, font_size: f32, color: Rgb) -> TextSurface;

    /// Draw a text surface with its top-left corner at `pos`
    fn blit(&mut self, surface: &TextSurface, pos: Vec2);

    /// Translucent full-screen color overlay
    fn wash(&mut self, color: Rgb, alpha: u8);
}
