//! Palette generation and rasterization settings.

use serde::{Deserialize, Serialize};

use crate::error::PaletteError;

/// Harmony rule used to derive a palette from its base colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaletteType {
    /// Base plus the opposite hue.
    #[default]
    Complementary,
    /// Three hues a third of a turn apart.
    Triadic,
    /// Four hues a quarter turn apart.
    Tetradic,
    /// Neighbouring hues swept around the base.
    Analogous,
    /// Base plus the two hues beside its complement.
    SplitComplementary,
    /// One hue with varied saturation and value.
    Monochromatic,
    /// Interpolation across all base colors.
    Gradient,
    /// Base colors as given.
    Custom,
}

impl PaletteType {
    pub const ALL: [PaletteType; 8] = [
        PaletteType::Complementary,
        PaletteType::Triadic,
        PaletteType::Tetradic,
        PaletteType::Analogous,
        PaletteType::SplitComplementary,
        PaletteType::Monochromatic,
        PaletteType::Gradient,
        PaletteType::Custom,
    ];

    /// True when every generated entry is derived from the first base color's hue.
    pub fn is_hue_linked(self) -> bool {
        !matches!(self, PaletteType::Gradient | PaletteType::Custom)
    }
}

/// Spatial arrangement of colors in a rasterized palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureLayout {
    #[default]
    Horizontal,
    Vertical,
    Grid,
    Radial,
    Smooth,
}

/// Rotation applied to a rasterized palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Nearest quarter turn at or below `degrees` (toward zero), wrapped into [0, 360).
    pub fn snapped(degrees: i32) -> Self {
        let mut angle = degrees % 360 / 90 * 90;
        if angle < 0 {
            angle += 360;
        }
        match angle {
            90 => Rotation::R90,
            180 => Rotation::R180,
            270 => Rotation::R270,
            _ => Rotation::R0,
        }
    }

    /// Swaps width and height.
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = PaletteError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(PaletteError::InvalidRotation(other)),
        }
    }
}

pub const MIN_COLOR_COUNT: usize = 2;
pub const MAX_COLOR_COUNT: usize = 64;
pub const MAX_TEXTURE_SIZE: u32 = 2048;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    /// Entries produced by the Analogous, Monochromatic and Gradient rules.
    pub color_count: usize,
    pub saturation_variation: f32,
    pub lightness_variation: f32,
    /// Degrees. Analogous spacing, or the gradient hue sweep.
    pub hue_shift: f32,
    pub layout: TextureLayout,
    pub smooth_transitions: bool,
    /// Size the texture from the color count instead of `texture_width`/`texture_height`.
    pub auto_size: bool,
    pub texture_width: u32,
    pub texture_height: u32,
    /// Degrees, a multiple of 90.
    pub rotation_angle: i32,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            color_count: 5,
            saturation_variation: 0.2,
            lightness_variation: 0.3,
            hue_shift: 0.0,
            layout: TextureLayout::default(),
            smooth_transitions: true,
            auto_size: true,
            texture_width: 256,
            texture_height: 256,
            rotation_angle: 0,
        }
    }
}

impl PaletteSettings {
    /// Copy with every field pulled into its valid range.
    pub fn sanitized(&self) -> Self {
        let rotation = self.rotation();
        if rotation.degrees() != self.rotation_angle {
            log::warn!(
                "Palette rotation {} is not a quarter turn, using {}",
                self.rotation_angle,
                rotation.degrees()
            );
        }

        Self {
            color_count: self.color_count.clamp(MIN_COLOR_COUNT, MAX_COLOR_COUNT),
            saturation_variation: unit(self.saturation_variation),
            lightness_variation: unit(self.lightness_variation),
            hue_shift: if self.hue_shift.is_finite() {
                self.hue_shift.clamp(0.0, 360.0)
            } else {
                0.0
            },
            texture_width: self.texture_width.clamp(1, MAX_TEXTURE_SIZE),
            texture_height: self.texture_height.clamp(1, MAX_TEXTURE_SIZE),
            rotation_angle: rotation.degrees(),
            ..self.clone()
        }
    }

    /// Rotation snapped to a quarter turn.
    pub fn rotation(&self) -> Rotation {
        Rotation::snapped(self.rotation_angle)
    }

    /// Strict rotation, rejecting angles that are not exact quarter turns.
    pub fn checked_rotation(&self) -> Result<Rotation, PaletteError> {
        Rotation::try_from(self.rotation_angle)
    }
}

fn unit(x: f32) -> f32 {
    chromadial_core::clamp01(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_parsing() {
        assert_eq!(Rotation::try_from(270), Ok(Rotation::R270));
        assert_eq!(Rotation::try_from(45), Err(PaletteError::InvalidRotation(45)));
        assert_eq!(Rotation::snapped(100), Rotation::R90);
        assert_eq!(Rotation::snapped(-90), Rotation::R270);
        assert_eq!(Rotation::snapped(450), Rotation::R90);
        assert_eq!(Rotation::snapped(-45), Rotation::R0);
    }

    #[test]
    fn sanitized_clamps_everything() {
        let wild = PaletteSettings {
            color_count: 500,
            saturation_variation: -1.0,
            lightness_variation: f32::NAN,
            hue_shift: 720.0,
            texture_width: 0,
            texture_height: 9000,
            rotation_angle: 200,
            ..PaletteSettings::default()
        };
        let clean = wild.sanitized();
        assert_eq!(clean.color_count, MAX_COLOR_COUNT);
        assert_eq!(clean.saturation_variation, 0.0);
        assert_eq!(clean.lightness_variation, 0.0);
        assert_eq!(clean.hue_shift, 360.0);
        assert_eq!((clean.texture_width, clean.texture_height), (1, MAX_TEXTURE_SIZE));
        assert_eq!(clean.rotation_angle, 180);
        assert_eq!(clean.checked_rotation(), Ok(Rotation::R180));
    }

    #[test]
    fn hue_linked_types() {
        assert!(PaletteType::Analogous.is_hue_linked());
        assert!(!PaletteType::Gradient.is_hue_linked());
        assert!(!PaletteType::Custom.is_hue_linked());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let settings: PaletteSettings =
            serde_json::from_str(r#"{"color_count": 8, "layout": "Grid"}"#).unwrap();
        assert_eq!(settings.color_count, 8);
        assert_eq!(settings.layout, TextureLayout::Grid);
        assert_eq!(settings.saturation_variation, 0.2);
        assert!(settings.smooth_transitions);
    }
}
