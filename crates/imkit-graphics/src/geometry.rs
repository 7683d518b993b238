//! Geometric primitives: vectors and rectangles

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// 2D vector used for positions, sizes and offsets.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Returns the vector scaled to unit length, or zero for degenerate input.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle in screen space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    /// Clip rectangle that effectively disables clipping.
    pub const NULL: Rect = Rect {
        x: -8192.0,
        y: -8192.0,
        w: 16384.0,
        h: 16384.0,
    };

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.w
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Exclusive containment test used for hover and click detection.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x && point.x < self.x + self.w && point.y > self.y && point.y < self.y + self.h
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.max_x().min(other.max_x());
        let bottom = self.max_y().min(other.max_y());
        if right <= left || bottom <= top {
            None
        } else {
            Some(Rect::new(left, top, right - left, bottom - top))
        }
    }

    /// Clamps the corner span `(x0, y0)..(x1, y1)` into `self`, never producing a
    /// negative extent.
    pub fn unify(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        let x = self.x.max(x0);
        let y = self.y.max(y0);
        let w = (self.max_x().min(x1) - x).max(0.0);
        let h = (self.max_y().min(y1) - y).max(0.0);
        Rect::new(x, y, w, h)
    }

    pub fn translate(&self, offset: Vec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Shrinks the rectangle by `amount` on every side.
    pub fn shrink(&self, amount: f32) -> Rect {
        let w = self.w.max(2.0 * amount);
        let h = self.h.max(2.0 * amount);
        Rect::new(self.x + amount, self.y + amount, w - 2.0 * amount, h - 2.0 * amount)
    }

    /// Shrinks the rectangle by `pad.x` horizontally and `pad.y` vertically on each side.
    pub fn pad(&self, pad: Vec2) -> Rect {
        let w = self.w.max(2.0 * pad.x);
        let h = self.h.max(2.0 * pad.y);
        Rect::new(self.x + pad.x, self.y + pad.y, w - 2.0 * pad.x, h - 2.0 * pad.y)
    }

    /// Truncates every component toward zero.
    pub fn truncate(&self) -> Rect {
        Rect::new(
            self.x.trunc(),
            self.y.trunc(),
            self.w.trunc(),
            self.h.trunc(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn unify_clamps_to_parent() {
        let parent = Rect::new(0.0, 0.0, 100.0, 50.0);
        let clip = parent.unify(80.0, 40.0, 200.0, 200.0);
        assert_eq!(clip, Rect::new(80.0, 40.0, 20.0, 10.0));

        let outside = parent.unify(150.0, 10.0, 160.0, 20.0);
        assert_eq!(outside.w, 0.0);
    }

    #[test]
    fn contains_excludes_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(5.0, 5.0)));
        assert!(!r.contains(Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn shrink_never_goes_negative() {
        let r = Rect::new(0.0, 0.0, 4.0, 4.0).shrink(3.0);
        assert_eq!(r.w, 0.0);
        assert_eq!(r.h, 0.0);
    }
}
