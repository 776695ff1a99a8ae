//! Axis-aligned rectangle collision
//!
//! Every entity in the playfield is a rectangle, so this is the only
//! collision test the simulation needs. Intervals are half-open:
//! a rectangle covers `[x, x + w) × [y, y + h)`, which means two
//! rectangles that only share an edge do not overlap.

use glam::Vec2;

use crate::consts::{BORDER_THICKNESS, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
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

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Copy of this rectangle moved by `offset`
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            pos: self.pos + offset,
            size: self.size,
        }
    }
}

/// Standard AABB intersection test
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// The four static walls around the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Borders {
    pub top: Rect,
    pub bottom: Rect,
    pub left: Rect,
    pub right: Rect,
}

impl Default for Borders {
    fn default() -> Self {
        Self::for_screen(SCREEN_WIDTH, SCREEN_HEIGHT, BORDER_THICKNESS)
    }
}

impl Borders {
    pub fn for_screen(width: f32, height: f32, thickness: f32) -> Self {
        Self {
            top: Rect::new(0.0, 0.0, width, thickness),
            bottom: Rect::new(0.0, height - thickness, width, thickness),
            left: Rect::new(0.0, 0.0, thickness, height),
            right: Rect::new(width - thickness, 0.0, thickness, height),
        }
    }

    pub fn all(&self) -> [&Rect; 4] {
        [&self.top, &self.bottom, &self.left, &self.right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(overlaps(&a, &b));
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_shared_edge_does_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
        // Nudging past the edge makes them overlap
        assert!(overlaps(&a, &right.translate(Vec2::new(-0.25, 0.0))));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.5, 40.5, 2.0, 3.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_borders_frame_the_screen() {
        let borders = Borders::default();
        assert_eq!(borders.bottom.top(), SCREEN_HEIGHT - BORDER_THICKNESS);
        assert_eq!(borders.right.left(), SCREEN_WIDTH - BORDER_THICKNESS);
        // Corners belong to two borders
        assert!(overlaps(&borders.top, &borders.left));
        // A ship resting on the bottom wall is not touching it
        let ship = Rect::new(384.0, SCREEN_HEIGHT - BORDER_THICKNESS - 32.0, 32.0, 32.0);
        assert!(!overlaps(&ship, &borders.bottom));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..200.0, 0.5f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_rect_overlaps_itself(a in rect_strategy()) {
            prop_assert!(overlaps(&a, &a));
        }

        #[test]
        fn prop_adjacent_rects_never_overlap(a in rect_strategy(), h in 0.5f32..50.0) {
            let neighbour = Rect::new(a.right(), a.top(), 10.0, h);
            prop_assert!(!overlaps(&a, &neighbour));
        }
    }
}
