//! Hue ring around an equilateral saturation/value triangle.
//!
//! The triangle apex points at the current hue and carries the pure hue. The
//! vertex a third of a turn counter-clockwise from it is white, the remaining
//! one black. Inside the triangle, `v = wWhite + wHue` and `s = wHue / v`.

use std::f32::consts::TAU;

use super::barycentric::{barycentric, closest_point_on_triangle};
use super::ring::{forward_compound, hue_direction, RingGeometry, RingLayout};
use super::{CursorPlacement, DragRegion, MapContext, MapOutcome, ModeMapping};
use crate::color::{clamp01, HsvColor};
use crate::points::{Rect, Vec2};

/// Value below which saturation is undefined and reported as zero.
const VALUE_EPSILON: f32 = 1e-5;

pub struct CircleTriangleMapping;

/// Triangle vertex positions for one hue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub hue: Vec2,
    pub white: Vec2,
    pub black: Vec2,
}

impl Triangle {
    pub fn new(layout: &RingLayout, hue: f32) -> Self {
        let arm = hue_direction(hue) * layout.region;
        Self {
            hue: layout.center + arm,
            white: layout.center + arm.rotate(TAU / 3.0),
            black: layout.center + arm.rotate(-TAU / 3.0),
        }
    }

    /// Saturation and value at `point`, projecting onto the boundary when
    /// the point is outside. Returns the point the cursor should sit on.
    pub fn point_to_sv(&self, point: Vec2) -> Option<(f32, f32, Vec2)> {
        let (weights, cursor) = match barycentric(point, self.white, self.black, self.hue) {
            Some(w) if w.is_inside() => (w, point),
            Some(_) => {
                let projected = closest_point_on_triangle(point, self.white, self.black, self.hue);
                (barycentric(projected, self.white, self.black, self.hue)?, projected)
            }
            None => return None,
        };

        let value = clamp01(weights.a + weights.c);
        let saturation = if value > VALUE_EPSILON {
            clamp01(weights.c / value)
        } else {
            0.0
        };
        Some((saturation, value, cursor))
    }

    pub fn sv_to_point(&self, saturation: f32, value: f32) -> Vec2 {
        let mut w_white = clamp01(value * (1.0 - saturation));
        let mut w_hue = clamp01(value * saturation);
        let mut w_black = clamp01(1.0 - value);
        let sum = w_white + w_hue + w_black;
        if sum > VALUE_EPSILON {
            w_white /= sum;
            w_hue /= sum;
            w_black /= sum;
        }
        self.white * w_white + self.black * w_black + self.hue * w_hue
    }
}

/// Triangle for `hue` inside the ring laid out on `rect`.
pub fn triangle_vertices(rect: Rect, ring: &RingGeometry, hue: f32) -> Option<Triangle> {
    ring.layout(rect).map(|layout| Triangle::new(&layout, hue))
}

impl ModeMapping for CircleTriangleMapping {
    fn classify(&self, ctx: &MapContext<'_>, point: Vec2) -> DragRegion {
        let region = ctx
            .ring
            .layout(ctx.rect)
            .map_or(DragRegion::Inner, |layout| layout.classify(point));
        log::debug!("CircleTriangle gesture locked to {region:?}");
        region
    }

    fn forward(&self, ctx: &MapContext<'_>, point: Vec2, region: Option<DragRegion>) -> MapOutcome {
        forward_compound(ctx, point, region, |layout, point| {
            let triangle = Triangle::new(layout, ctx.current.h);
            match triangle.point_to_sv(point) {
                Some((s, v, cursor)) => MapOutcome::Hsv {
                    hsv: ctx.current.with_saturation(s).with_value(v),
                    cursor,
                },
                None => MapOutcome::NoChange,
            }
        })
    }

    fn inverse(&self, ctx: &MapContext<'_>, hsv: HsvColor) -> Option<CursorPlacement> {
        let Some(layout) = ctx.ring.layout(ctx.rect) else {
            return Some(CursorPlacement::primary(ctx.rect.center()));
        };
        let triangle = Triangle::new(&layout, hsv.h);
        Some(CursorPlacement::with_secondary(
            triangle.sv_to_point(hsv.s, hsv.v),
            layout.ring_cursor(hsv.h),
        ))
    }

    fn has_secondary_cursor(&self) -> bool {
        true
    }
}
