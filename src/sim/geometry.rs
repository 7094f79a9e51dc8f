//! Axis-aligned rectangle geometry
//!
//! Screen-style coordinates: x grows right, y grows down, so a rectangle's
//! `y` is its top edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle; negative extents are clamped to zero
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Rectangle with its top-left corner at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Open-interval overlap on the horizontal axis (touching edges miss)
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        right > self.x && left < self.right()
    }

    /// Open-interval overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other.x, other.right()) && other.bottom() > self.y && other.y < self.bottom()
    }

    /// Same rectangle with negative extents clamped to zero
    pub fn sanitized(self) -> Self {
        Self::new(self.x, self.y, self.width, self.height)
    }
}

/// Horizontal distance between two center lines
#[inline]
pub fn center_distance(a: f32, b: f32) -> f32 {
    (a - b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_extent_clamped() {
        let rect = Rect::new(10.0, 10.0, -5.0, 3.0);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 3.0);
    }

    #[test]
    fn test_overlap_is_open_interval() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let inside = Rect::new(5.0, 5.0, 2.0, 2.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_center_x() {
        let rect = Rect::new(170.0, 200.0, 280.0, 20.0);
        assert_eq!(rect.center_x(), 310.0);
        assert_eq!(center_distance(300.0, 310.0), 10.0);
    }
}
