//! Barycentric weights and closest-point projection for triangles.

use crate::points::Vec2;

/// Weights of a point relative to triangle (a, b, c).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Barycentric {
    pub fn is_inside(&self) -> bool {
        self.a >= 0.0 && self.b >= 0.0 && self.c >= 0.0
    }
}

/// Barycentric weights of `p`, or `None` if the triangle has no area.
pub fn barycentric(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Option<Barycentric> {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);

    let denom = d00 * d11 - d01 * d01;
    if denom.abs() <= f32::EPSILON * (d00 * d11).max(1.0) {
        return None;
    }

    let inv = 1.0 / denom;
    let wb = (d11 * d20 - d01 * d21) * inv;
    let wc = (d00 * d21 - d01 * d20) * inv;
    Some(Barycentric {
        a: 1.0 - wb - wc,
        b: wb,
        c: wc,
    })
}

/// Projection of `p` onto segment ab, clamped to its endpoints.
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let t = ((p - a).dot(ab) / (ab.length_squared() + 1e-6)).clamp(0.0, 1.0);
    a + ab * t
}

/// Closest point to `p` on the boundary of triangle (a, b, c).
/// Ties go to the earlier edge in the order ab, bc, ca.
pub fn closest_point_on_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    let candidates = [
        closest_point_on_segment(a, b, p),
        closest_point_on_segment(b, c, p),
        closest_point_on_segment(c, a, p),
    ];

    let mut best = candidates[0];
    let mut best_distance = (p - best).length_squared();
    for &q in &candidates[1..] {
        let distance = (p - q).length_squared();
        if distance < best_distance {
            best = q;
            best_distance = distance;
        }
    }
    best
}
