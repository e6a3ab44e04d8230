//! Bitmap picking for Texture and Palette modes.

use super::{CursorPlacement, DragRegion, MapContext, MapOutcome, ModeMapping};
use crate::color::HsvColor;
use crate::color_space::hsv_to_rgb;
use crate::points::Vec2;
use crate::sampling::{find_color_in_texture, sample_texture, snap_to_texel_center};

pub struct TextureMapping;

impl ModeMapping for TextureMapping {
    fn forward(&self, ctx: &MapContext<'_>, point: Vec2, _region: Option<DragRegion>) -> MapOutcome {
        let Some(texture) = ctx.texture else {
            return MapOutcome::NoChange;
        };
        if ctx.rect.is_degenerate() || !texture.is_readable() {
            return MapOutcome::NoChange;
        }

        let mut cursor = ctx.rect.clamp(point);
        let mut uv = ctx.rect.normalize(cursor);
        if ctx.sampling.snap_cursor {
            uv = snap_to_texel_center(uv, texture.width(), texture.height());
            cursor = ctx.rect.denormalize(uv);
        }

        let color = sample_texture(texture, uv, ctx.sampling.use_bicubic_sampling);
        if ctx.sampling.is_ignored(color) {
            return MapOutcome::Ignored { cursor };
        }
        MapOutcome::Rgb { color, cursor }
    }

    fn inverse(&self, ctx: &MapContext<'_>, hsv: HsvColor) -> Option<CursorPlacement> {
        let texture = ctx.texture?;
        let uv = find_color_in_texture(texture, hsv_to_rgb(hsv), ctx.sampling, ctx.search)?;
        Some(CursorPlacement::primary(ctx.rect.denormalize(uv)))
    }
}
