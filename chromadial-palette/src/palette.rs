//! Persisted palette asset.

use chromadial_core::{Color, ColorSource};
use serde::{Deserialize, Serialize};

use crate::error::PaletteError;
use crate::harmony;
use crate::overrides::{HandleOverride, HandleOverrides};
use crate::raster::PaletteRasterizer;
use crate::settings::{PaletteSettings, PaletteType};
use crate::texture::PaletteTexture;

/// Named palette: base colors, the harmony rule applied to them and the result.
///
/// The rasterized texture is cached until the generated colors change and is
/// never serialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub name: String,
    palette_type: PaletteType,
    base_colors: Vec<Color>,
    generated: Vec<Color>,
    overrides: HandleOverrides,
    settings: PaletteSettings,
    #[serde(skip)]
    texture: Option<PaletteTexture>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            name: "New Palette".to_string(),
            palette_type: PaletteType::default(),
            base_colors: vec![Color::rgb(1.0, 0.0, 0.0)],
            generated: Vec::new(),
            overrides: HandleOverrides::default(),
            settings: PaletteSettings::default(),
            texture: None,
        }
    }
}

impl Palette {
    /// Palette with its colors already generated.
    pub fn new(name: impl Into<String>, palette_type: PaletteType, base_colors: Vec<Color>) -> Self {
        let mut palette = Self {
            name: name.into(),
            palette_type,
            base_colors,
            ..Self::default()
        };
        palette.generate();
        palette
    }

    pub fn palette_type(&self) -> PaletteType {
        self.palette_type
    }

    pub fn base_colors(&self) -> &[Color] {
        &self.base_colors
    }

    pub fn generated_colors(&self) -> &[Color] {
        &self.generated
    }

    pub fn settings(&self) -> &PaletteSettings {
        &self.settings
    }

    pub fn overrides(&self) -> &HandleOverrides {
        &self.overrides
    }

    pub fn handle_override(&self, index: usize) -> Option<&HandleOverride> {
        self.overrides.get(index)
    }

    /// Whether entries follow the first base color's hue.
    pub fn hue_linked(&self) -> bool {
        self.palette_type.is_hue_linked()
    }

    /// Regenerate from the base colors, then apply overrides.
    /// Without base colors the previous result is kept.
    pub fn generate(&mut self) {
        if let Err(err) = self.try_generate() {
            log::warn!("Palette '{}': {err}", self.name);
        }
    }

    pub fn try_generate(&mut self) -> Result<(), PaletteError> {
        if self.base_colors.is_empty() {
            return Err(PaletteError::EmptyBaseColors);
        }

        let mut colors = harmony::generate(
            self.palette_type,
            &self.base_colors,
            &self.settings.sanitized(),
        );
        self.overrides.resize(colors.len());
        self.overrides.apply(&mut colors);
        self.generated = colors;
        self.invalidate_texture();
        Ok(())
    }

    pub fn set_base_colors(&mut self, colors: Vec<Color>) {
        self.base_colors = colors;
        self.generate();
    }

    /// Switch the harmony rule. Overrides are positional and are dropped.
    pub fn set_palette_type(&mut self, palette_type: PaletteType) {
        self.palette_type = palette_type;
        self.overrides.reset();
        self.generate();
    }

    pub fn set_settings(&mut self, settings: PaletteSettings) {
        self.settings = settings;
        self.generate();
    }

    /// Pin saturation and/or value of generated entry `index`. Returns whether the palette changed.
    pub fn set_handle_override(
        &mut self,
        index: usize,
        saturation: Option<f32>,
        value: Option<f32>,
    ) -> bool {
        if self.generated.is_empty() {
            return false;
        }
        self.overrides.resize(self.generated.len());
        let changed = self.overrides.set(index, saturation, value);
        if changed {
            self.generate();
        }
        changed
    }

    pub fn clear_handle_override(&mut self, index: usize, saturation: bool, value: bool) -> bool {
        let changed = self.overrides.clear(index, saturation, value);
        if changed {
            self.generate();
        }
        changed
    }

    pub fn clear_all_overrides(&mut self, saturation: bool, value: bool) -> bool {
        let changed = self.overrides.clear_all(saturation, value);
        if changed {
            self.generate();
        }
        changed
    }

    /// Cached texture, rasterized on first use. `None` when nothing has been generated.
    pub fn texture(&mut self, rasterizer: &PaletteRasterizer) -> Option<&PaletteTexture> {
        if self.generated.is_empty() {
            return None;
        }
        if self.texture.is_none() {
            self.texture = Some(rasterizer.rasterize(&self.generated, &self.settings));
        }
        self.texture.as_ref()
    }

    pub fn invalidate_texture(&mut self) {
        self.texture = None;
    }
}

impl ColorSource for Palette {
    fn available_colors(&self) -> Vec<Color> {
        self.generated.clone()
    }
}
