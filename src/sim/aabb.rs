//! Axis-aligned bounding boxes for entity collision
//!
//! Every entity is sized by a box centered on its position. Overlap is strict:
//! boxes that only share an edge do not collide.

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// An axis-aligned box stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    /// Square box of side `size`
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, Vec2::splat(size))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether the box lies fully inside the play field
    pub fn inside_field(&self) -> bool {
        self.left() >= 0.0
            && self.top() >= 0.0
            && self.right() <= FIELD_WIDTH
            && self.bottom() <= FIELD_HEIGHT
    }
}

/// Clamp a center so that a box of half extents `half` stays fully inside the field
pub fn clamp_center_to_field(center: Vec2, half: Vec2) -> Vec2 {
    Vec2::new(
        crate::clamp(center.x, half.x, FIELD_WIDTH - half.x),
        crate::clamp(center.y, half.y, FIELD_HEIGHT - half.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::square(Vec2::new(100.0, 100.0), 20.0);
        let b = Aabb::square(Vec2::new(115.0, 100.0), 20.0);
        let c = Aabb::square(Vec2::new(200.0, 100.0), 20.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::square(Vec2::new(100.0, 100.0), 20.0);
        let b = Aabb::square(Vec2::new(120.0, 100.0), 20.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_clamp_center_to_field() {
        let half = Vec2::splat(19.0);
        let clamped = clamp_center_to_field(Vec2::new(-50.0, 1000.0), half);
        assert_eq!(clamped, Vec2::new(19.0, FIELD_HEIGHT - 19.0));
        assert!(Aabb { center: clamped, half }.inside_field());
    }
}
