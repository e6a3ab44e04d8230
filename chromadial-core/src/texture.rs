//! Host-facing texture and color-list providers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::color_space::find_nearest;
use crate::error::TextureError;

/// Alpha at or below this is left out of extracted color lists.
const UNIQUE_COLOR_MIN_ALPHA: f32 = 0.01;

/// Read access to a bitmap. Row 0 is the bottom row, matching UV v = 0.
pub trait TextureSource {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Unreadable sources are skipped by sampling and reverse search.
    fn is_readable(&self) -> bool {
        true
    }

    /// Texel at integer coordinates. Callers clamp coordinates into range.
    fn get_pixel(&self, x: u32, y: u32) -> Color;

    /// Bilinear sample at UV with texel centers at (i + 0.5) / size and clamp addressing.
    fn sample_bilinear(&self, u: f32, v: f32) -> Color {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return Color::WHITE;
        }

        let fx = u * w as f32 - 0.5;
        let fy = v * h as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;

        let clamp_x = |x: f32| x.max(0.0).min((w - 1) as f32) as u32;
        let clamp_y = |y: f32| y.max(0.0).min((h - 1) as f32) as u32;
        let (xa, xb) = (clamp_x(x0), clamp_x(x0 + 1.0));
        let (ya, yb) = (clamp_y(y0), clamp_y(y0 + 1.0));

        let bottom = self.get_pixel(xa, ya).lerp(self.get_pixel(xb, ya), tx);
        let top = self.get_pixel(xa, yb).lerp(self.get_pixel(xb, yb), tx);
        bottom.lerp(top, ty)
    }
}

/// Provider of a discrete list of selectable colors.
pub trait ColorSource {
    fn available_colors(&self) -> Vec<Color>;

    /// Closest available color to `target`, or `target` itself when there are none.
    fn nearest_available(&self, target: Color) -> Color {
        find_nearest(target, &self.available_colors())
    }
}

/// Distinct visible colors of a texture, in scan order.
pub fn unique_colors(source: &dyn TextureSource) -> Vec<Color> {
    if !source.is_readable() {
        log::warn!("Cannot extract colors from an unreadable texture");
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut colors = Vec::new();
    for y in 0..source.height() {
        for x in 0..source.width() {
            let pixel = source.get_pixel(x, y);
            if pixel.a > UNIQUE_COLOR_MIN_ALPHA && seen.insert(pixel.bit_key()) {
                colors.push(pixel);
            }
        }
    }
    colors
}

/// Owned row-major RGBA bitmap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    readable: bool,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            readable: true,
        })
    }

    /// Buffer filled with one color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
            readable: true,
        }
    }

    /// Buffer built by evaluating `f(x, y)` for every texel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
            readable: true,
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }

    pub fn set_readable(&mut self, readable: bool) {
        self.readable = readable;
    }

    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }
}

impl TextureSource for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_readable(&self) -> bool {
        self.readable
    }

    fn get_pixel(&self, x: u32, y: u32) -> Color {
        if self.pixels.is_empty() {
            return Color::WHITE;
        }
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[self.index(x, y)]
    }
}

impl ColorSource for PixelBuffer {
    fn available_colors(&self) -> Vec<Color> {
        unique_colors(self)
    }
}
