//! Color-harmony rules deriving a palette from base colors.
//!
//! Hue-linked rules work from the first base color only. Derived entries keep
//! that color's alpha.

use chromadial_core::{clamp01, hsv_to_rgb, rgb_to_hsv, Color, HsvColor};

use crate::gradient::interpolate_colors;
use crate::settings::{PaletteSettings, PaletteType};

/// Analogous spacing in degrees when no hue shift is configured.
const DEFAULT_ANALOGOUS_SPACING: f32 = 30.0;

/// Offset of the split-complementary pair from the complement, in degrees.
const SPLIT_COMPLEMENT_OFFSET: f32 = 30.0;

/// Generate the palette for `palette_type`. An empty base list yields an empty palette.
pub fn generate(
    palette_type: PaletteType,
    base_colors: &[Color],
    settings: &PaletteSettings,
) -> Vec<Color> {
    let Some(&base) = base_colors.first() else {
        log::warn!("Cannot generate a {palette_type:?} palette without base colors");
        return Vec::new();
    };
    let settings = &settings.sanitized();

    let colors = match palette_type {
        PaletteType::Complementary => hue_offsets(base, &[0.0, 180.0]),
        PaletteType::Triadic => hue_offsets(base, &[0.0, 120.0, 240.0]),
        PaletteType::Tetradic => hue_offsets(base, &[0.0, 90.0, 180.0, 270.0]),
        PaletteType::SplitComplementary => hue_offsets(
            base,
            &[
                0.0,
                180.0 - SPLIT_COMPLEMENT_OFFSET,
                180.0 + SPLIT_COMPLEMENT_OFFSET,
            ],
        ),
        PaletteType::Analogous => analogous(base, settings),
        PaletteType::Monochromatic => monochromatic(base, settings),
        PaletteType::Gradient => gradient(base_colors, settings),
        PaletteType::Custom => base_colors.to_vec(),
    };

    log::debug!(
        "Generated {} {palette_type:?} colors from {} base colors",
        colors.len(),
        base_colors.len()
    );
    colors
}

fn rotate_hue(h: f32, turns: f32) -> f32 {
    (h + turns).rem_euclid(1.0)
}

/// Base color first, then one entry per further offset (degrees).
fn hue_offsets(base: Color, degrees: &[f32]) -> Vec<Color> {
    let hsv = rgb_to_hsv(base);
    degrees
        .iter()
        .map(|&offset| {
            if offset == 0.0 {
                base
            } else {
                hsv_to_rgb(hsv.with_hue(rotate_hue(hsv.h, offset / 360.0)))
            }
        })
        .collect()
}

/// Fraction of the way through `count` entries, 0 for the first and 1 for the last.
fn position(index: usize, count: usize) -> f32 {
    index as f32 / (count.saturating_sub(1)).max(1) as f32
}

/// Hues swept symmetrically around the base, saturation and value nudged along the sweep.
fn analogous(base: Color, settings: &PaletteSettings) -> Vec<Color> {
    let hsv = rgb_to_hsv(base);
    let count = settings.color_count;
    let spacing = if settings.hue_shift > 0.0 {
        settings.hue_shift
    } else {
        DEFAULT_ANALOGOUS_SPACING
    } / 360.0;
    let center = (count as f32 - 1.0) / 2.0;

    (0..count)
        .map(|i| {
            let t = position(i, count);
            let offset = i as f32 - center;
            hsv_to_rgb(HsvColor::new(
                rotate_hue(hsv.h, offset * spacing),
                clamp01(hsv.s + (t - 0.5) * settings.saturation_variation * 0.5),
                clamp01(hsv.v + (t - 0.5) * settings.lightness_variation * 0.5),
                hsv.a,
            ))
        })
        .collect()
}

/// One hue, saturation and value ramped across the entries.
fn monochromatic(base: Color, settings: &PaletteSettings) -> Vec<Color> {
    let hsv = rgb_to_hsv(base);
    let count = settings.color_count;

    (0..count)
        .map(|i| {
            let t = position(i, count);
            hsv_to_rgb(HsvColor::new(
                hsv.h,
                clamp01(hsv.s + (t - 0.5) * settings.saturation_variation),
                clamp01(hsv.v + (t - 0.5) * settings.lightness_variation),
                hsv.a,
            ))
        })
        .collect()
}

/// Samples across all base colors with optional hue sweep, saturation bulge and value ramp.
fn gradient(base_colors: &[Color], settings: &PaletteSettings) -> Vec<Color> {
    if base_colors.len() < 2 {
        return base_colors.to_vec();
    }

    let count = settings.color_count;
    let varies = settings.hue_shift > 0.0
        || settings.saturation_variation > 0.0
        || settings.lightness_variation > 0.0;

    (0..count)
        .map(|i| {
            let t = position(i, count);
            let color = interpolate_colors(base_colors, t, settings.smooth_transitions);
            if !varies {
                return color;
            }

            let mut hsv = rgb_to_hsv(color);
            if settings.hue_shift > 0.0 {
                hsv.h = rotate_hue(hsv.h, (t - 0.5) * settings.hue_shift / 360.0);
            }
            if settings.saturation_variation > 0.0 {
                hsv.s = clamp01(hsv.s + (t * std::f32::consts::PI).sin() * settings.saturation_variation);
            }
            if settings.lightness_variation > 0.0 {
                hsv.v = clamp01(hsv.v + (t - 0.5) * settings.lightness_variation);
            }
            hsv_to_rgb(hsv)
        })
        .collect()
}
