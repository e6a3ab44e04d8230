//! Polar disk: hue by angle, saturation by radius, value held.

use super::ring::hue_direction;
use super::{hue_from_angle, CursorPlacement, DragRegion, MapContext, MapOutcome, ModeMapping};
use crate::color::{clamp01, HsvColor};
use crate::points::{Rect, Vec2};

/// Offsets shorter than this keep the previous hue.
pub(crate) const CENTER_EPSILON: f32 = 1e-6;

pub struct CircleMapping;

/// Hue and normalized radius at `point`, clamped to the disk of `radius`
/// around `center`. Returns the clamped point as the cursor.
pub(crate) fn polar(center: Vec2, radius: f32, point: Vec2, current_hue: f32) -> (f32, f32, Vec2) {
    let offset = (point - center).clamp_length(radius);
    let distance = offset.length();
    let hue = if distance <= CENTER_EPSILON {
        current_hue
    } else {
        hue_from_angle(offset.angle())
    };
    (hue, clamp01(distance / radius), center + offset)
}

/// Hue and saturation at `point` on the disk inscribed in `rect`, plus the
/// clamped cursor. `None` for a degenerate rect.
pub fn point_to_hs(rect: Rect, point: Vec2, current_hue: f32) -> Option<(f32, f32, Vec2)> {
    let radius = rect.inscribed_radius();
    if rect.is_degenerate() || !(radius > 0.0) {
        return None;
    }
    Some(polar(rect.center(), radius, point, current_hue))
}

/// Cursor position for `hue` and `saturation`. Inverse of [`point_to_hs`].
pub fn hs_to_point(rect: Rect, hue: f32, saturation: f32) -> Vec2 {
    let radius = rect.inscribed_radius() * clamp01(saturation);
    rect.center() + hue_direction(hue) * radius
}

impl ModeMapping for CircleMapping {
    fn forward(&self, ctx: &MapContext<'_>, point: Vec2, _region: Option<DragRegion>) -> MapOutcome {
        match point_to_hs(ctx.rect, point, ctx.current.h) {
            Some((h, s, cursor)) => MapOutcome::Hsv {
                hsv: ctx.current.with_hue(h).with_saturation(s),
                cursor,
            },
            None => MapOutcome::NoChange,
        }
    }

    fn inverse(&self, ctx: &MapContext<'_>, hsv: HsvColor) -> Option<CursorPlacement> {
        if ctx.rect.is_degenerate() {
            return Some(CursorPlacement::primary(ctx.rect.center()));
        }
        Some(CursorPlacement::primary(hs_to_point(ctx.rect, hsv.h, hsv.s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect::new(-50.0, -50.0, 100.0, 100.0);

    #[test]
    fn angle_zero_is_hue_half() {
        let (h, s, _) = point_to_hs(RECT, Vec2::new(25.0, 0.0), 0.0).unwrap();
        assert!((h - 0.5).abs() < 1e-6);
        assert!((s - 0.5).abs() < 1e-6);
    }

    #[test]
    fn outside_disk_clamps_to_rim() {
        let (_, s, cursor) = point_to_hs(RECT, Vec2::new(0.0, 80.0), 0.0).unwrap();
        assert_eq!(s, 1.0);
        assert!((cursor.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn center_keeps_hue() {
        let (h, s, _) = point_to_hs(RECT, Vec2::ZERO, 0.42).unwrap();
        assert_eq!(h, 0.42);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn inverse_matches_forward() {
        for i in 0..8 {
            let hue = i as f32 / 8.0 + 0.01;
            let p = hs_to_point(RECT, hue, 0.75);
            let (h, s, _) = point_to_hs(RECT, p, 0.0).unwrap();
            assert!((h - hue).abs() < 1e-4, "hue {hue} -> {h}");
            assert!((s - 0.75).abs() < 1e-4);
        }
    }

    #[test]
    fn zero_size_rect_has_no_mapping() {
        assert!(point_to_hs(Rect::new(0.0, 0.0, 0.0, 0.0), Vec2::ZERO, 0.0).is_none());
    }
}
