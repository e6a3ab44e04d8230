//! 2D points and rectangles in widget-local coordinates.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::color::clamp01;

/// A point or offset in widget-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians.
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len > f32::EPSILON {
            self * (1.0 / len)
        } else {
            Vec2::ZERO
        }
    }

    /// Shorten to at most `max` length, keeping direction.
    pub fn clamp_length(self, max: f32) -> Vec2 {
        if self.length_squared() > max * max {
            self.normalized() * max
        } else {
            self
        }
    }

    /// Counter-clockwise rotation by `angle` radians.
    pub fn rotate(self, angle: f32) -> Vec2 {
        let (s, c) = angle.sin_cos();
        Vec2::new(c * self.x - s * self.y, s * self.x + c * self.y)
    }

    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
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

/// Widget bounds as origin (minimum corner) plus size. The y axis points up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size centered on the origin.
    pub fn centered(width: f32, height: f32) -> Self {
        Self::new(-width * 0.5, -height * 0.5, width, height)
    }

    pub fn x_min(&self) -> f32 {
        self.x
    }

    pub fn x_max(&self) -> f32 {
        self.x + self.width
    }

    pub fn y_min(&self) -> f32 {
        self.y
    }

    pub fn y_max(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Radius of the largest disk centered in the rect.
    pub fn inscribed_radius(&self) -> f32 {
        self.width.min(self.height) * 0.5
    }

    /// True when the rect has no area to map onto.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x_min() && p.x <= self.x_max() && p.y >= self.y_min() && p.y <= self.y_max()
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        // max/min rather than f32::clamp so NaN bounds cannot panic.
        Vec2::new(
            p.x.max(self.x_min()).min(self.x_max()),
            p.y.max(self.y_min()).min(self.y_max()),
        )
    }

    /// Point to [0, 1]² coordinates relative to the minimum corner.
    pub fn normalize(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            inverse_lerp(self.x_min(), self.x_max(), p.x),
            inverse_lerp(self.y_min(), self.y_max(), p.y),
        )
    }

    /// Inverse of [`Rect::normalize`].
    pub fn denormalize(&self, uv: Vec2) -> Vec2 {
        Vec2::new(
            lerp(self.x_min(), self.x_max(), clamp01(uv.x)),
            lerp(self.y_min(), self.y_max(), clamp01(uv.y)),
        )
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `v` between `a` and `b`, clamped to [0, 1]. Zero for an empty range.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    if a == b {
        0.0
    } else {
        clamp01((v - a) / (b - a))
    }
}
