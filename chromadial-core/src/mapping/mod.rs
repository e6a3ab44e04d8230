//! Point ↔ color mapping for every picker widget shape.
//!
//! Each [`Mode`] resolves to one [`ModeMapping`] strategy through
//! [`mapping_for`]. Strategies are stateless: everything they need arrives in a
//! [`MapContext`], and results come back as a [`MapOutcome`] for the caller to
//! apply. Nothing in this module mutates shared state.

pub mod barycentric;
pub mod circle;
pub mod circle_circle;
pub mod circle_full;
pub mod circle_triangle;
pub mod rectangle;
pub mod ring;
pub mod texture;
pub mod warp;

use serde::{Deserialize, Serialize};

use crate::color::{Color, HsvColor};
use crate::points::{Rect, Vec2};
use crate::sampling::{ReverseSearchConfig, SamplingSettings};
use crate::texture::TextureSource;

pub use ring::RingGeometry;

/// Picker widget shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Rectangle,
    Circle,
    CircleFull,
    CircleTriangle,
    CircleCircle,
    Texture,
    Palette,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Rectangle,
        Mode::Circle,
        Mode::CircleFull,
        Mode::CircleTriangle,
        Mode::CircleCircle,
        Mode::Texture,
        Mode::Palette,
    ];

    pub fn mapping(self) -> &'static dyn ModeMapping {
        mapping_for(self)
    }

    /// Texture and Palette modes pick colors from a bitmap.
    pub fn is_texture_based(self) -> bool {
        matches!(self, Mode::Texture | Mode::Palette)
    }
}

/// Sub-area of a compound widget that a gesture is locked to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragRegion {
    /// Triangle, inner disk, or the whole surface of single-region modes.
    Inner,
    /// Hue ring.
    Outer,
}

/// Gesture state. The region is classified once on pointer-down and held
/// until pointer-up, even if the pointer crosses into the other region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingInner,
    DraggingOuter,
}

impl DragState {
    pub fn begin(region: DragRegion) -> Self {
        match region {
            DragRegion::Inner => DragState::DraggingInner,
            DragRegion::Outer => DragState::DraggingOuter,
        }
    }

    pub fn is_dragging(self) -> bool {
        self != DragState::Idle
    }

    pub fn locked_region(self) -> Option<DragRegion> {
        match self {
            DragState::Idle => None,
            DragState::DraggingInner => Some(DragRegion::Inner),
            DragState::DraggingOuter => Some(DragRegion::Outer),
        }
    }
}

/// Inputs shared by all strategies for one mapping call.
#[derive(Clone, Copy)]
pub struct MapContext<'a> {
    /// Widget bounds in local coordinates.
    pub rect: Rect,
    /// Color currently held by the picker; supplies the channels a mode does not control.
    pub current: HsvColor,
    pub ring: RingGeometry,
    /// Bitmap for Texture and Palette modes.
    pub texture: Option<&'a dyn TextureSource>,
    pub sampling: &'a SamplingSettings,
    pub search: &'a ReverseSearchConfig,
}

/// Result of mapping a pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapOutcome {
    /// New HSV for live preview; the cursor moves to `cursor`.
    Hsv { hsv: HsvColor, cursor: Vec2 },
    /// Only the hue changes; the ring cursor moves to `ring_cursor`.
    Hue { hue: f32, ring_cursor: Vec2 },
    /// Texture sample to apply as RGB.
    Rgb { color: Color, cursor: Vec2 },
    /// The sampled color was rejected. The cursor still follows the pointer.
    Ignored { cursor: Vec2 },
    /// Nothing to do (degenerate geometry or no texture).
    NoChange,
}

/// Cursor positions representing a color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorPlacement {
    pub primary: Vec2,
    /// Hue-ring cursor for compound modes.
    pub secondary: Option<Vec2>,
}

impl CursorPlacement {
    pub fn primary(primary: Vec2) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(primary: Vec2, secondary: Vec2) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }
}

/// One widget shape's forward and inverse mapping.
pub trait ModeMapping {
    /// Region a gesture starting at `point` locks to.
    fn classify(&self, _ctx: &MapContext<'_>, _point: Vec2) -> DragRegion {
        DragRegion::Inner
    }

    /// Map a pointer position to a color. `region` is the locked drag region,
    /// or `None` to classify from the point itself.
    fn forward(&self, ctx: &MapContext<'_>, point: Vec2, region: Option<DragRegion>) -> MapOutcome;

    /// Cursor placement for `hsv`, or `None` when no position represents it.
    fn inverse(&self, ctx: &MapContext<'_>, hsv: HsvColor) -> Option<CursorPlacement>;

    /// Whether the mode draws a second cursor on a hue ring.
    fn has_secondary_cursor(&self) -> bool {
        false
    }
}

/// The single dispatch table from mode to strategy.
pub fn mapping_for(mode: Mode) -> &'static dyn ModeMapping {
    match mode {
        Mode::Rectangle => &rectangle::RectangleMapping,
        Mode::Circle => &circle::CircleMapping,
        Mode::CircleFull => &circle_full::CircleFullMapping,
        Mode::CircleTriangle => &circle_triangle::CircleTriangleMapping,
        Mode::CircleCircle => &circle_circle::CircleCircleMapping,
        Mode::Texture | Mode::Palette => &texture::TextureMapping,
    }
}

/// Hue for a polar angle in radians. Angle -π maps to hue 0.
pub fn hue_from_angle(angle: f32) -> f32 {
    ((angle + std::f32::consts::PI) / std::f32::consts::TAU).rem_euclid(1.0)
}

/// Polar angle in radians for a hue. Inverse of [`hue_from_angle`].
pub fn angle_from_hue(hue: f32) -> f32 {
    hue * std::f32::consts::TAU - std::f32::consts::PI
}
