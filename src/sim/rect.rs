//! Axis-aligned rectangle geometry for entities and hitboxes
//!
//! Screen space: x grows rightward, y grows downward, so `top()` is the
//! smaller y and the ground is a large y value.

use glam::Vec2;

/// An axis-aligned rectangle (top-left origin + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (both positive)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink the rect by `amount` on every side (for forgiving hitboxes).
    /// Degenerate results are clamped to a point at the center.
    pub fn inset(&self, amount: f32) -> Self {
        let shrink = Vec2::splat(amount * 2.0).min(self.size);
        Self {
            pos: self.pos + shrink * 0.5,
            size: self.size - shrink,
        }
    }

    /// AABB overlap test. Strict inequalities: rects that merely share an
    /// edge do not collide, and a rect with no extent (a fully clamped
    /// inset) collides with nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.size.min_element() <= 0.0 || other.size.min_element() <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_rect_intersects_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_rect_touching_edges_do_not_collide() {
        // Right edge of a exactly meets left edge of b
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));

        // Bottom edge of a exactly meets top edge of c
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rect_inset() {
        let r = Rect::new(10.0, 10.0, 30.0, 40.0);
        let h = r.inset(5.0);
        assert_eq!(h.left(), 15.0);
        assert_eq!(h.top(), 15.0);
        assert_eq!(h.size, Vec2::new(20.0, 30.0));
        // Same center
        assert_eq!(h.center(), r.center());
    }

    #[test]
    fn test_rect_inset_degenerate() {
        // Inset larger than half the size collapses to the center point
        let r = Rect::new(0.0, 0.0, 8.0, 8.0);
        let h = r.inset(10.0);
        assert_eq!(h.size, Vec2::ZERO);
        assert_eq!(h.pos, Vec2::new(4.0, 4.0));
        // A point-sized rect collides with nothing, in either direction
        assert!(!h.intersects(&r));
        assert!(!r.intersects(&h));
    }
}
