//! Axis-aligned boxes and fractional hitboxes
//!
//! Screen space: x grows right, y grows down, so `bottom` is the ground contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size whose bottom edge rests on `ground_y`
    pub fn on_ground(x: f32, ground_y: f32, size: Vec2) -> Self {
        Self::new(x, ground_y - size.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Move vertically so the bottom edge sits at `y`
    #[inline]
    pub fn set_bottom(&mut self, y: f32) {
        self.y = y - self.h;
    }

    /// Zero or negative extent on either axis
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        if self.is_degenerate() {
            0.0
        } else {
            self.w * self.h
        }
    }

    /// Sub-rectangle described by a fractional profile
    pub fn fraction(&self, f: &HitboxFraction) -> Rect {
        Rect::new(
            self.x + self.w * f.x_min,
            self.y + self.h * f.y_min,
            self.w * (f.x_max - f.x_min),
            self.h * (f.y_max - f.y_min),
        )
    }

    /// Overlap rectangle, if the boxes share positive area.
    /// Degenerate boxes never intersect anything.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Area of the overlap rectangle (0 when disjoint or only touching)
    #[inline]
    pub fn overlap_area(&self, other: &Rect) -> f32 {
        self.intersection(other).map(|r| r.area()).unwrap_or(0.0)
    }

    /// Uniform point inside the box
    pub fn point_at(&self, u: f32, v: f32) -> Vec2 {
        Vec2::new(self.x + self.w * u, self.y + self.h * v)
    }
}

/// Fractional sub-rectangle: `[x_min, x_max] x [y_min, y_max]` of a full box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitboxFraction {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl HitboxFraction {
    pub const fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

/// Player collision profile (the sprite has generous transparent margins)
pub const PLAYER_HITBOX: HitboxFraction = HitboxFraction::new(0.3, 0.7, 0.2, 0.9);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        let r = Rect::new(100.0, 200.0, 40.0, 60.0);
        let hb = r.fraction(&PLAYER_HITBOX);
        assert!((hb.x - 112.0).abs() < 1e-4);
        assert!((hb.w - 16.0).abs() < 1e-4);
        assert!((hb.y - 212.0).abs() < 1e-4);
        assert!((hb.h - 42.0).abs() < 1e-4);
    }

    #[test]
    fn test_intersection_and_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.overlap_area(&b), 25.0);

        // Edge contact only
        let c = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersection(&c).is_none());
        assert_eq!(a.overlap_area(&c), 0.0);
    }

    #[test]
    fn test_degenerate_never_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let flat = Rect::new(2.0, 2.0, 0.0, 5.0);
        assert!(a.intersection(&flat).is_none());
        assert!(flat.intersection(&a).is_none());
        assert_eq!(flat.area(), 0.0);
    }

    #[test]
    fn test_on_ground() {
        let r = Rect::on_ground(50.0, 560.0, Vec2::new(40.0, 60.0));
        assert_eq!(r.bottom(), 560.0);
        assert_eq!(r.top(), 500.0);
    }
}
