//! Full HSV disk: hue by angle, the inner half ramps saturation at full
//! value and the outer half falls off toward black.

use super::circle::polar;
use super::ring::hue_direction;
use super::{CursorPlacement, DragRegion, MapContext, MapOutcome, ModeMapping};
use crate::color::{clamp01, HsvColor};
use crate::color_space::{hsv_to_rgb, manhattan_rgb};
use crate::points::{Rect, Vec2};

/// Value at or above this is treated as the saturation ramp without comparison.
const FULL_VALUE_EPSILON: f32 = 1e-3;

pub struct CircleFullMapping;

/// Saturation and value for a normalized radius.
pub fn radius_to_sv(r_norm: f32) -> (f32, f32) {
    let r_norm = clamp01(r_norm);
    if r_norm <= 0.5 {
        (r_norm * 2.0, 1.0)
    } else {
        let falloff = (2.0 * (1.0 - r_norm)).max(0.0);
        (falloff, falloff)
    }
}

/// Normalized radius representing `hsv`.
///
/// A color can be reached from either half of the disk. Both candidate radii
/// are reconstructed to RGB and the one closer to the target wins, preferring
/// the saturation ramp on ties.
pub fn sv_to_radius(hsv: HsvColor) -> f32 {
    if hsv.v >= 1.0 - FULL_VALUE_EPSILON {
        return clamp01(hsv.s) * 0.5;
    }

    let target = hsv_to_rgb(hsv);

    let top_s = clamp01(hsv.s);
    let top = hsv_to_rgb(HsvColor::new(hsv.h, top_s, 1.0, hsv.a));
    let r_top = top_s * 0.5;

    let falloff = clamp01(hsv.s.min(hsv.v));
    let bottom = hsv_to_rgb(HsvColor::new(hsv.h, falloff, falloff, hsv.a));
    let r_bottom = 1.0 - falloff * 0.5;

    if manhattan_rgb(target, top) <= manhattan_rgb(target, bottom) {
        r_top
    } else {
        r_bottom
    }
}

pub fn point_to_hsv(rect: Rect, point: Vec2, current: HsvColor) -> Option<(HsvColor, Vec2)> {
    let radius = rect.inscribed_radius();
    if rect.is_degenerate() || !(radius > 0.0) {
        return None;
    }
    let (h, r_norm, cursor) = polar(rect.center(), radius, point, current.h);
    let (s, v) = radius_to_sv(r_norm);
    Some((HsvColor::new(h, s, v, current.a), cursor))
}

pub fn hsv_to_point(rect: Rect, hsv: HsvColor) -> Vec2 {
    let r = clamp01(sv_to_radius(hsv)) * rect.inscribed_radius();
    rect.center() + hue_direction(hsv.h) * r
}

impl ModeMapping for CircleFullMapping {
    fn forward(&self, ctx: &MapContext<'_>, point: Vec2, _region: Option<DragRegion>) -> MapOutcome {
        match point_to_hsv(ctx.rect, point, ctx.current) {
            Some((hsv, cursor)) => MapOutcome::Hsv { hsv, cursor },
            None => MapOutcome::NoChange,
        }
    }

    fn inverse(&self, ctx: &MapContext<'_>, hsv: HsvColor) -> Option<CursorPlacement> {
        if ctx.rect.is_degenerate() {
            return Some(CursorPlacement::primary(ctx.rect.center()));
        }
        Some(CursorPlacement::primary(hsv_to_point(ctx.rect, hsv)))
    }
}
