//! Seam-based elliptical mapping between the unit square and the unit disk.
//!
//! The disk is split into four sectors by the diagonals. Within a sector the
//! radius comes from the dominant square coordinate and the angle from the
//! ratio of the minor to the dominant one. Both directions are exact inverses
//! up to float rounding.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::color::clamp01;
use crate::points::Vec2;

const EPSILON: f32 = 1e-6;

/// Sign that treats zero as positive.
fn sign(x: f32) -> f32 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Map a point of [0, 1]² into the unit disk centered on the origin.
/// The square center maps to the disk center.
pub fn square_to_disk(square: Vec2) -> Vec2 {
    let a = (2.0 * square.x - 1.0).clamp(-1.0, 1.0);
    let b = (2.0 * square.y - 1.0).clamp(-1.0, 1.0);

    if a.abs() <= EPSILON && b.abs() <= EPSILON {
        return Vec2::ZERO;
    }

    let (r, theta) = if a.abs() > b.abs() {
        (a, FRAC_PI_4 * (b / a))
    } else {
        (b, FRAC_PI_2 - FRAC_PI_4 * (a / b))
    };

    Vec2::new(theta.cos() * r, theta.sin() * r)
}

/// Map a point of the unit disk back into [0, 1]².
/// The disk center maps to (0.5, 0.5).
pub fn disk_to_square(disk: Vec2) -> Vec2 {
    let x = disk.x.clamp(-1.0, 1.0);
    let y = disk.y.clamp(-1.0, 1.0);
    let (abs_x, abs_y) = (x.abs(), y.abs());

    if abs_x <= EPSILON && abs_y <= EPSILON {
        return Vec2::new(0.5, 0.5);
    }

    let radius = (x * x + y * y).sqrt();
    let (a, b) = if abs_x > abs_y {
        let theta = (y / x).atan();
        let signed_radius = sign(x) * radius;
        (signed_radius, signed_radius * (4.0 * theta / PI))
    } else {
        let signed_radius = sign(y) * radius;
        let theta = (x / signed_radius).clamp(-1.0, 1.0).acos();
        (signed_radius * (2.0 - 4.0 * theta / PI), signed_radius)
    };

    Vec2::new(clamp01(0.5 * (a + 1.0)), clamp01(0.5 * (b + 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_map_to_centers() {
        assert_eq!(square_to_disk(Vec2::new(0.5, 0.5)), Vec2::ZERO);
        assert_eq!(disk_to_square(Vec2::ZERO), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn square_edges_land_on_circle() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            for p in [
                Vec2::new(t, 0.0),
                Vec2::new(t, 1.0),
                Vec2::new(0.0, t),
                Vec2::new(1.0, t),
            ] {
                let d = square_to_disk(p);
                assert!((d.length() - 1.0).abs() < 1e-5, "{p:?} -> {d:?}");
            }
        }
    }

    #[test]
    fn roundtrip_over_square_grid() {
        for i in 0..=20 {
            for j in 0..=20 {
                if i == 10 && j == 10 {
                    continue;
                }
                let p = Vec2::new(i as f32 / 20.0, j as f32 / 20.0);
                let back = disk_to_square(square_to_disk(p));
                assert!(
                    (back.x - p.x).abs() < 1e-4 && (back.y - p.y).abs() < 1e-4,
                    "{p:?} came back as {back:?}"
                );
            }
        }
    }

    #[test]
    fn disk_points_stay_in_square() {
        for i in 0..36 {
            let angle = i as f32 * PI / 18.0;
            for r in [0.1, 0.5, 0.99, 1.0] {
                let sq = disk_to_square(Vec2::from_angle(angle) * r);
                assert!((0.0..=1.0).contains(&sq.x) && (0.0..=1.0).contains(&sq.y));
            }
        }
    }
}
