//! Hue ring shared by the compound CircleTriangle and CircleCircle widgets.

use serde::{Deserialize, Serialize};

use super::{angle_from_hue, hue_from_angle, DragRegion, MapContext, MapOutcome};
use crate::points::{Rect, Vec2};

/// Proportions of the hue ring and the inner region it encloses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingGeometry {
    /// Ring thickness as a fraction of the widget diameter.
    pub thickness_factor: f32,
    /// Inner region radius as a fraction of the ring's inner radius.
    pub inner_scale: f32,
    /// Squared offset length below which the pointer direction is unreliable.
    pub direction_threshold: f32,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            thickness_factor: 0.085,
            inner_scale: 0.92,
            direction_threshold: 1e-6,
        }
    }
}

impl RingGeometry {
    /// Concrete radii for `rect`, or `None` when there is nothing to map onto.
    pub fn layout(&self, rect: Rect) -> Option<RingLayout> {
        if rect.is_degenerate() {
            return None;
        }
        let outer = rect.inscribed_radius();
        let inner = outer - self.thickness_factor * 2.0 * outer;
        let region = inner * self.inner_scale;
        if !(region > 0.0) {
            return None;
        }
        Some(RingLayout {
            center: rect.center(),
            outer,
            inner,
            region,
        })
    }
}

/// Ring radii resolved against a widget rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingLayout {
    pub center: Vec2,
    /// Outer edge of the ring.
    pub outer: f32,
    /// Inner edge of the ring.
    pub inner: f32,
    /// Circumradius of the triangle or radius of the inner disk.
    pub region: f32,
}

impl RingLayout {
    pub fn classify(&self, point: Vec2) -> DragRegion {
        let distance = (point - self.center).length().min(self.outer);
        if distance >= self.inner {
            DragRegion::Outer
        } else {
            DragRegion::Inner
        }
    }

    pub fn mid_radius(&self) -> f32 {
        (self.inner + self.outer) * 0.5
    }

    /// Ring cursor position for `hue`.
    pub fn ring_cursor(&self, hue: f32) -> Vec2 {
        self.center + hue_direction(hue) * self.mid_radius()
    }
}

/// Unit vector pointing at `hue` on the ring.
pub fn hue_direction(hue: f32) -> Vec2 {
    Vec2::from_angle(angle_from_hue(hue))
}

/// Shared forward path of the compound modes.
///
/// The point is pulled inside the outer radius, then routed by region: the
/// ring yields a hue, anything else goes to `inner` with the clamped point.
pub(crate) fn forward_compound(
    ctx: &MapContext<'_>,
    point: Vec2,
    region: Option<DragRegion>,
    inner: impl FnOnce(&RingLayout, Vec2) -> MapOutcome,
) -> MapOutcome {
    let Some(layout) = ctx.ring.layout(ctx.rect) else {
        return MapOutcome::NoChange;
    };

    let offset = (point - layout.center).clamp_length(layout.outer);
    let region = region.unwrap_or_else(|| layout.classify(point));

    match region {
        DragRegion::Outer => {
            let direction = if offset.length_squared() < ctx.ring.direction_threshold {
                hue_direction(ctx.current.h)
            } else {
                offset.normalized()
            };
            let hue = hue_from_angle(direction.angle());
            MapOutcome::Hue {
                hue,
                ring_cursor: layout.center + direction * layout.mid_radius(),
            }
        }
        DragRegion::Inner => inner(&layout, layout.center + offset),
    }
}
