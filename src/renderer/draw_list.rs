//! Recording canvas
//!
//! Captures primitive calls instead of rasterizing them. Used for headless
//! runs and to inspect what a frame would draw.

use glam::Vec2;

use super::{Canvas, Rect, Stroke, TextSurface};
use crate::Rgb;

/// Glyph advance as a fraction of the font size
const GLYPH_ASPECT: f32 = 0.5;

/// A single recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgb,
        width: f32,
    },
    Rect {
        rect: Rect,
        color: Rgb,
        stroke: Stroke,
        corner_radius: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Rgb,
        stroke: Stroke,
    },
    Arc {
        bounds: Rect,
        start: f32,
        end: f32,
        color: Rgb,
        width: f32,
    },
    Text {
        surface: TextSurface,
        pos: Vec2,
    },
    Wash {
        color: Rgb,
        alpha: u8,
    },
}

/// Ordered list of everything drawn since the last `clear_commands`
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { surface, .. } => Some(surface.text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn rect(&mut self, rect: Rect, color: Rgb, stroke: Stroke, corner_radius: f32) {
        self.commands.push(DrawCommand::Rect {
            rect,
            color,
            stroke,
            corner_radius,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Rgb, stroke: Stroke) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            stroke,
        });
    }

    fn polygon(&mut self, points: &[Vec2], color: Rgb, stroke: Stroke) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            stroke,
        });
    }

    fn arc(&mut self, bounds: Rect, start: f32, end: f32, color: Rgb, width: f32) {
        self.commands.push(DrawCommand::Arc {
            bounds,
            start,
            end,
            color,
            width,
        });
    }

    fn render_text(&self, text: &str, font_size: f32, color: Rgb) -> TextSurface {
        TextSurface {
            text: text.to_string(),
            font_size,
            color,
            extent: Vec2::new(
                text.chars().count() as f32 * font_size * GLYPH_ASPECT,
                font_size,
            ),
        }
    }

    fn blit(&mut self, surface: &TextSurface, pos: Vec2) {
        self.commands.push(DrawCommand::Text {
            surface: surface.clone(),
            pos,
        });
    }

    fn wash(&mut self, color: Rgb, alpha: u8) {
        self.commands.push(DrawCommand::Wash { color, alpha });
    }
}
