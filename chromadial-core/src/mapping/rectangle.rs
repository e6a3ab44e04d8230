//! Saturation along x, value along y. Hue is left to a separate control.

use super::{CursorPlacement, DragRegion, MapContext, MapOutcome, ModeMapping};
use crate::color::{clamp01, HsvColor};
use crate::points::{lerp, Rect, Vec2};

pub struct RectangleMapping;

/// Saturation and value at `point`, with the point clamped into `rect`.
pub fn point_to_sv(rect: Rect, point: Vec2) -> (f32, f32, Vec2) {
    let clamped = rect.clamp(point);
    let sv = rect.normalize(clamped);
    (sv.x, sv.y, clamped)
}

/// Point inside `rect` for `saturation` (x) and `value` (y).
pub fn sv_to_point(rect: Rect, saturation: f32, value: f32) -> Vec2 {
    Vec2::new(
        lerp(rect.x_min(), rect.x_max(), clamp01(saturation)),
        lerp(rect.y_min(), rect.y_max(), clamp01(value)),
    )
}

impl ModeMapping for RectangleMapping {
    fn forward(&self, ctx: &MapContext<'_>, point: Vec2, _region: Option<DragRegion>) -> MapOutcome {
        if ctx.rect.is_degenerate() {
            return MapOutcome::NoChange;
        }
        let (s, v, cursor) = point_to_sv(ctx.rect, point);
        MapOutcome::Hsv {
            hsv: ctx.current.with_saturation(s).with_value(v),
            cursor,
        }
    }

    fn inverse(&self, ctx: &MapContext<'_>, hsv: HsvColor) -> Option<CursorPlacement> {
        if ctx.rect.is_degenerate() {
            return Some(CursorPlacement::primary(ctx.rect.center()));
        }
        Some(CursorPlacement::primary(sv_to_point(ctx.rect, hsv.s, hsv.v)))
    }
}
