//! Rasterized palette bitmap with its sampling hints.

use chromadial_core::{unique_colors, Color, ColorSource, PixelBuffer, TextureSource};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    #[default]
    Point,
    Bilinear,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    #[default]
    Clamp,
    Repeat,
}

/// Generated palette image. Never persisted with the palette asset.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteTexture {
    buffer: PixelBuffer,
    filter: FilterMode,
    wrap: WrapMode,
}

impl PaletteTexture {
    pub fn new(buffer: PixelBuffer, filter: FilterMode) -> Self {
        Self {
            buffer,
            filter,
            wrap: WrapMode::Clamp,
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap
    }

    /// Generated textures are runtime-only.
    pub fn is_persistent(&self) -> bool {
        false
    }

    pub fn pixels(&self) -> &[Color] {
        self.buffer.pixels()
    }

    /// Row-major 8-bit RGBA, row 0 at the bottom.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.buffer
            .pixels()
            .iter()
            .flat_map(|c| {
                let c = c.clamped();
                [c.r, c.g, c.b, c.a].map(|channel| (channel * 255.0).round() as u8)
            })
            .collect()
    }
}

impl TextureSource for PaletteTexture {
    fn width(&self) -> u32 {
        self.buffer.width()
    }

    fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn is_readable(&self) -> bool {
        self.buffer.is_readable()
    }

    fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.buffer.get_pixel(x, y)
    }
}

impl ColorSource for PaletteTexture {
    fn available_colors(&self) -> Vec<Color> {
        unique_colors(self)
    }
}
