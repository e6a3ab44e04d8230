//! Texture sampling, ignore filtering and color-to-UV reverse search.

use serde::{Deserialize, Serialize};

use crate::color::{clamp01, Color};
use crate::color_space::{manhattan_rgb, manhattan_rgba};
use crate::points::Vec2;
use crate::texture::TextureSource;

/// Sampling and selection-filtering options for Texture and Palette modes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    /// Sample bilinearly instead of picking the nearest texel.
    pub use_bicubic_sampling: bool,
    /// Snap the cursor and the sample point to the nearest texel center.
    pub snap_cursor: bool,
    pub ignore_transparent: bool,
    /// Colors with alpha at or below this are rejected when `ignore_transparent` is set.
    pub transparent_alpha_threshold: f32,
    /// Colors that can never be selected.
    pub ignored_colors: Vec<Color>,
    /// Per-channel tolerance for matching against `ignored_colors`.
    pub ignore_color_tolerance: f32,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            use_bicubic_sampling: true,
            snap_cursor: true,
            ignore_transparent: true,
            transparent_alpha_threshold: 0.01,
            ignored_colors: Vec::new(),
            ignore_color_tolerance: 0.02,
        }
    }
}

impl SamplingSettings {
    /// True if `color` must not be selected.
    pub fn is_ignored(&self, color: Color) -> bool {
        if self.ignore_transparent && color.a <= clamp01(self.transparent_alpha_threshold) {
            return true;
        }

        let tolerance = clamp01(self.ignore_color_tolerance) * 4.0;
        self.ignored_colors
            .iter()
            .any(|&ignored| manhattan_rgba(color, ignored) <= tolerance)
    }
}

/// Tuning for [`find_color_in_texture`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverseSearchConfig {
    /// Base per-channel tolerance.
    pub tolerance: f32,
    /// A texel closer than `tolerance * exact_factor` ends the search immediately.
    pub exact_factor: f32,
    /// The closest texel is accepted if it is within `tolerance * fallback_factor`.
    pub fallback_factor: f32,
    /// Textures with more pixels than this are scanned with stride 2.
    pub medium_pixel_count: usize,
    /// Textures with more pixels than this are scanned with stride 4.
    pub large_pixel_count: usize,
}

impl Default for ReverseSearchConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.02,
            exact_factor: 3.0,
            fallback_factor: 6.0,
            medium_pixel_count: 65_536,
            large_pixel_count: 262_144,
        }
    }
}

impl ReverseSearchConfig {
    /// Scan step for a texture of `pixel_count` texels. The thresholds are
    /// inclusive: exactly `medium_pixel_count` texels still scan every texel.
    pub fn stride(&self, pixel_count: usize) -> u32 {
        if pixel_count > self.large_pixel_count {
            4
        } else if pixel_count > self.medium_pixel_count {
            2
        } else {
            1
        }
    }
}

/// Move `uv` to the center of the texel it falls in.
pub fn snap_to_texel_center(uv: Vec2, width: u32, height: u32) -> Vec2 {
    if width == 0 || height == 0 {
        return uv;
    }
    let x = nearest_texel(uv.x, width);
    let y = nearest_texel(uv.y, height);
    Vec2::new(
        (x as f32 + 0.5) / width as f32,
        (y as f32 + 0.5) / height as f32,
    )
}

fn nearest_texel(coord: f32, size: u32) -> u32 {
    let texel = (coord * size as f32 - 0.5).round();
    texel.max(0.0).min((size - 1) as f32) as u32
}

/// Sample at `uv`. Unreadable or empty sources give opaque white.
pub fn sample_texture(source: &dyn TextureSource, uv: Vec2, bilinear: bool) -> Color {
    let (w, h) = (source.width(), source.height());
    if !source.is_readable() || w == 0 || h == 0 {
        return Color::WHITE;
    }
    if bilinear {
        return source.sample_bilinear(uv.x, uv.y);
    }
    source.get_pixel(nearest_texel(uv.x, w), nearest_texel(uv.y, h))
}

/// Locate `target` in the texture and return the UV of the matching texel center.
///
/// Scans with a stride that grows with texture size. Returns the first texel
/// within the exact tolerance, otherwise the closest texel if it is within the
/// fallback tolerance. Texels rejected by `sampling` are skipped.
pub fn find_color_in_texture(
    source: &dyn TextureSource,
    target: Color,
    sampling: &SamplingSettings,
    config: &ReverseSearchConfig,
) -> Option<Vec2> {
    let (w, h) = (source.width(), source.height());
    if !source.is_readable() || w == 0 || h == 0 {
        log::warn!("Reverse color search skipped: texture unreadable or empty");
        return None;
    }

    let stride = config.stride(w as usize * h as usize) as usize;
    let exact = config.tolerance * config.exact_factor;
    let fallback = config.tolerance * config.fallback_factor;
    let texel_uv = |x: u32, y: u32| {
        Vec2::new((x as f32 + 0.5) / w as f32, (y as f32 + 0.5) / h as f32)
    };

    let mut best: Option<(f32, Vec2)> = None;
    for y in (0..h).step_by(stride) {
        for x in (0..w).step_by(stride) {
            let pixel = source.get_pixel(x, y);
            if sampling.is_ignored(pixel) {
                continue;
            }

            let distance = manhattan_rgb(pixel, target);
            if distance < exact {
                log::debug!("Reverse search: exact match at ({x}, {y})");
                return Some(texel_uv(x, y));
            }
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, texel_uv(x, y)));
            }
        }
    }

    match best {
        Some((distance, uv)) if distance < fallback => {
            log::debug!("Reverse search: closest match at distance {distance:.4}");
            Some(uv)
        }
        _ => {
            log::debug!("Reverse search: no match for {target:?}");
            None
        }
    }
}
