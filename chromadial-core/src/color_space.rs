//! RGB/HSV/CMYK conversions, hex encoding and color distance helpers.
//!
//! All functions are pure. Alpha passes through HSV conversions untouched;
//! CMYK has no alpha channel.

use crate::color::{clamp01, wrap_hue, CmykColor, Color, HsvColor};
use crate::error::ColorError;

/// Key values at or above this are treated as pure black.
const CMYK_BLACK_THRESHOLD: f32 = 0.999;

/// Alpha at or above this counts as fully opaque for hex formatting.
const OPAQUE_ALPHA: f32 = 0.999;

/// Convert RGB to HSV using the standard six-sector decomposition.
/// Achromatic colors report hue 0 and, for black, saturation 0.
pub fn rgb_to_hsv(color: Color) -> HsvColor {
    let Color { r, g, b, a } = color;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };

    let h = if delta <= 0.0 {
        0.0
    } else if max == r {
        let sector = (g - b) / delta;
        let sector = if sector < 0.0 { sector + 6.0 } else { sector };
        sector / 6.0
    } else if max == g {
        (2.0 + (b - r) / delta) / 6.0
    } else {
        (4.0 + (r - g) / delta) / 6.0
    };

    HsvColor::new(h, s, v, a)
}

/// Convert HSV to RGB. Hue wraps; saturation and value are clamped.
pub fn hsv_to_rgb(hsv: HsvColor) -> Color {
    let h = wrap_hue(hsv.h);
    let s = clamp01(hsv.s);
    let v = clamp01(hsv.v);

    if s <= 0.0 {
        return Color::new(v, v, v, hsv.a);
    }

    let scaled = (h * 6.0) % 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Color::new(r, g, b, hsv.a)
}

/// Convert RGB to CMYK, ignoring alpha. Near-black colors map to pure K.
pub fn rgb_to_cmyk(color: Color) -> CmykColor {
    let k = 1.0 - color.r.max(color.g).max(color.b);
    if k >= CMYK_BLACK_THRESHOLD {
        return CmykColor::new(0.0, 0.0, 0.0, k);
    }

    let inv_k = 1.0 - k;
    CmykColor::new(
        (1.0 - color.r - k) / inv_k,
        (1.0 - color.g - k) / inv_k,
        (1.0 - color.b - k) / inv_k,
        k,
    )
}

/// Convert CMYK to an opaque RGB color.
pub fn cmyk_to_rgb(cmyk: CmykColor) -> Color {
    let inv_k = 1.0 - cmyk.k;
    Color::rgb(
        (1.0 - cmyk.c) * inv_k,
        (1.0 - cmyk.m) * inv_k,
        (1.0 - cmyk.y) * inv_k,
    )
}

fn channel_to_byte(c: f32) -> u8 {
    (clamp01(c) * 255.0).round() as u8
}

/// Format as `#RRGGBBAA`, or `#RRGGBB` when alpha is excluded and the color is opaque.
pub fn to_hex(color: Color, include_alpha: bool) -> String {
    let r = channel_to_byte(color.r);
    let g = channel_to_byte(color.g);
    let b = channel_to_byte(color.b);
    if !include_alpha && color.a >= OPAQUE_ALPHA {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        let a = channel_to_byte(color.a);
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// Parse `RGB`, `RGBA`, `RRGGBB` or `RRGGBBAA`, with an optional leading `#`.
/// Inputs without alpha digits are fully opaque.
pub fn parse_hex(input: &str) -> Result<Color, ColorError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        log::debug!("Rejected hex color '{input}'");
        return Err(ColorError::InvalidHexDigit {
            input: input.to_string(),
        });
    }

    // Expand shorthand so every channel is two digits.
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => {
            log::debug!("Rejected hex color '{input}'");
            return Err(ColorError::InvalidHexLength {
                input: input.to_string(),
            });
        }
    };
    let expanded = if expanded.len() == 6 {
        expanded + "FF"
    } else {
        expanded
    };

    let channel = |i: usize| -> Result<f32, ColorError> {
        u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16)
            .map(|byte| byte as f32 / 255.0)
            .map_err(|_| ColorError::InvalidHexDigit {
                input: input.to_string(),
            })
    };

    Ok(Color::new(channel(0)?, channel(1)?, channel(2)?, channel(3)?))
}

/// Euclidean distance over (r, g, b, a).
pub fn color_distance(a: Color, b: Color) -> f32 {
    let dr = a.r - b.r;
    let dg = a.g - b.g;
    let db = a.b - b.b;
    let da = a.a - b.a;
    (dr * dr + dg * dg + db * db + da * da).sqrt()
}

/// Manhattan distance over (r, g, b), ignoring alpha.
pub fn manhattan_rgb(a: Color, b: Color) -> f32 {
    (a.r - b.r).abs() + (a.g - b.g).abs() + (a.b - b.b).abs()
}

/// Manhattan distance over (r, g, b, a).
pub fn manhattan_rgba(a: Color, b: Color) -> f32 {
    manhattan_rgb(a, b) + (a.a - b.a).abs()
}

/// Closest candidate by [`color_distance`]. The earliest candidate wins ties.
/// Returns `target` unchanged when there are no candidates.
pub fn find_nearest(target: Color, candidates: &[Color]) -> Color {
    let Some((&first, rest)) = candidates.split_first() else {
        return target;
    };

    let mut nearest = first;
    let mut min_distance = color_distance(target, first);
    for &candidate in rest {
        let distance = color_distance(target, candidate);
        if distance < min_distance {
            min_distance = distance;
            nearest = candidate;
        }
    }
    nearest
}
