//! Piecewise-linear interpolation across an evenly spaced color list.

use chromadial_core::{clamp01, Color};

/// Hermite smoothstep on [0, 1].
pub fn smoothstep(t: f32) -> f32 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

/// Color at position `t` along `colors`, stops evenly spaced over [0, 1].
///
/// With `smooth` the position inside each segment is eased with [`smoothstep`].
/// An empty list evaluates to white.
pub fn interpolate_colors(colors: &[Color], t: f32, smooth: bool) -> Color {
    match colors {
        [] => Color::WHITE,
        [only] => *only,
        _ => {
            let t = clamp01(t);
            let segments = colors.len() - 1;
            let scaled = t * segments as f32;
            let index = (scaled.floor() as usize).min(segments - 1);
            let mut local = scaled - index as f32;
            if smooth {
                local = smoothstep(local);
            }
            colors[index].lerp(colors[index + 1], local)
        }
    }
}
