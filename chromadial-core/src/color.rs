//! RGB, HSV and CMYK color values with channel clamping helpers.

use serde::{Deserialize, Serialize};

/// Normalized RGBA color, each channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Clamp every channel into [0, 1]. NaN channels become 0.
    pub fn clamped(self) -> Self {
        Self {
            r: clamp01(self.r),
            g: clamp01(self.g),
            b: clamp01(self.b),
            a: clamp01(self.a),
        }
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1].
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = clamp01(t);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub(crate) fn bit_key(&self) -> [u32; 4] {
        [
            self.r.to_bits(),
            self.g.to_bits(),
            self.b.to_bits(),
            self.a.to_bits(),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Hue/saturation/value color. Hue is a fraction of a full turn and wraps modulo 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HsvColor {
    pub h: f32,
    pub s: f32,
    pub v: f32,
    pub a: f32,
}

impl HsvColor {
    pub const fn new(h: f32, s: f32, v: f32, a: f32) -> Self {
        Self { h, s, v, a }
    }

    pub fn with_hue(self, h: f32) -> Self {
        Self { h, ..self }
    }

    pub fn with_saturation(self, s: f32) -> Self {
        Self { s, ..self }
    }

    pub fn with_value(self, v: f32) -> Self {
        Self { v, ..self }
    }
}

impl Default for HsvColor {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// Subtractive CMYK color. Carries no alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CmykColor {
    pub c: f32,
    pub m: f32,
    pub y: f32,
    pub k: f32,
}

impl CmykColor {
    pub const fn new(c: f32, m: f32, y: f32, k: f32) -> Self {
        Self { c, m, y, k }
    }

    pub fn clamped(self) -> Self {
        Self {
            c: clamp01(self.c),
            m: clamp01(self.m),
            y: clamp01(self.y),
            k: clamp01(self.k),
        }
    }
}

/// Clamp into [0, 1], mapping NaN to 0.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Wrap a hue into [0, 1]. Values already inside the closed range are kept as-is
/// so that a hue of exactly 1.0 coming from a slider is not folded to 0.
#[inline]
pub fn wrap_hue(h: f32) -> f32 {
    if !h.is_finite() {
        0.0
    } else if (0.0..=1.0).contains(&h) {
        h
    } else {
        h.rem_euclid(1.0)
    }
}
