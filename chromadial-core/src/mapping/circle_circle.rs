//! Hue ring around a saturation/value disk. The disk is the unit square
//! warped by [`super::warp`], saturation along x and value along y.

use super::ring::{forward_compound, RingLayout};
use super::warp::{disk_to_square, square_to_disk};
use super::{CursorPlacement, DragRegion, MapContext, MapOutcome, ModeMapping};
use crate::color::{clamp01, HsvColor};
use crate::points::Vec2;

pub struct CircleCircleMapping;

/// Saturation and value at `point`, clamped into the inner disk.
pub fn point_to_sv(layout: &RingLayout, point: Vec2) -> (f32, f32, Vec2) {
    let offset = (point - layout.center).clamp_length(layout.region);
    let square = disk_to_square(offset * (1.0 / layout.region));
    (clamp01(square.x), clamp01(square.y), layout.center + offset)
}

pub fn sv_to_point(layout: &RingLayout, saturation: f32, value: f32) -> Vec2 {
    let disk = square_to_disk(Vec2::new(clamp01(saturation), clamp01(value))).clamp_length(1.0);
    layout.center + disk * layout.region
}

impl ModeMapping for CircleCircleMapping {
    fn classify(&self, ctx: &MapContext<'_>, point: Vec2) -> DragRegion {
        let region = ctx
            .ring
            .layout(ctx.rect)
            .map_or(DragRegion::Inner, |layout| layout.classify(point));
        log::debug!("CircleCircle gesture locked to {region:?}");
        region
    }

    fn forward(&self, ctx: &MapContext<'_>, point: Vec2, region: Option<DragRegion>) -> MapOutcome {
        forward_compound(ctx, point, region, |layout, point| {
            let (s, v, cursor) = point_to_sv(layout, point);
            MapOutcome::Hsv {
                hsv: ctx.current.with_saturation(s).with_value(v),
                cursor,
            }
        })
    }

    fn inverse(&self, ctx: &MapContext<'_>, hsv: HsvColor) -> Option<CursorPlacement> {
        let Some(layout) = ctx.ring.layout(ctx.rect) else {
            return Some(CursorPlacement::primary(ctx.rect.center()));
        };
        Some(CursorPlacement::with_secondary(
            sv_to_point(&layout, hsv.s, hsv.v),
            layout.ring_cursor(hsv.h),
        ))
    }

    fn has_secondary_cursor(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::test_support::context;
    use crate::mapping::RingGeometry;
    use crate::points::Rect;
    use crate::sampling::{ReverseSearchConfig, SamplingSettings};

    fn layout() -> RingLayout {
        RingGeometry::default()
            .layout(Rect::centered(200.0, 200.0))
            .unwrap()
    }

    #[test]
    fn disk_center_is_half_saturation_half_value() {
        let (s, v, _) = point_to_sv(&layout(), Vec2::ZERO);
        assert_eq!((s, v), (0.5, 0.5));
    }

    #[test]
    fn sv_roundtrip_through_disk() {
        let l = layout();
        for &(s, v) in &[(0.1, 0.9), (0.9, 0.1), (1.0, 1.0), (0.3, 0.6)] {
            let (s2, v2, _) = point_to_sv(&l, sv_to_point(&l, s, v));
            assert!((s2 - s).abs() < 1e-3 && (v2 - v).abs() < 1e-3, "({s}, {v}) -> ({s2}, {v2})");
        }
    }

    #[test]
    fn locked_inner_drag_ignores_ring() {
        let sampling = SamplingSettings::default();
        let search = ReverseSearchConfig::default();
        let ctx = context(
            Rect::centered(200.0, 200.0),
            HsvColor::new(0.1, 0.5, 0.5, 1.0),
            &sampling,
            &search,
        );
        // A point on the ring, but the gesture started inside.
        match CircleCircleMapping.forward(&ctx, Vec2::new(0.0, 95.0), Some(DragRegion::Inner)) {
            MapOutcome::Hsv { hsv, cursor } => {
                assert_eq!(hsv.h, 0.1);
                assert!((hsv.v - 1.0).abs() < 1e-4);
                assert!((cursor.length() - layout().region).abs() < 1e-3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
