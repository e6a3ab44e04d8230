//! Rendering generated colors into a palette texture.

use chromadial_core::{Color, PixelBuffer, TextureSource, Vec2};
use serde::{Deserialize, Serialize};

use crate::gradient::interpolate_colors;
use crate::settings::{PaletteSettings, Rotation, TextureLayout};
use crate::texture::{FilterMode, PaletteTexture};

/// Grid candidates with a longer side more than this many times the shorter are skipped.
const MAX_GRID_ASPECT: usize = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterizerConfig {
    /// Lower bound on the long side of smooth strips.
    pub min_resolution: u32,
    /// Texels per color along smooth strips.
    pub pixels_per_color: u32,
    /// Upper bound on the long side of smooth strips.
    pub max_resolution: u32,
    /// Side of radial, smooth and empty textures.
    pub fixed_size: u32,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            min_resolution: 64,
            pixels_per_color: 8,
            max_resolution: 2048,
            fixed_size: 256,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PaletteRasterizer {
    config: RasterizerConfig,
}

impl PaletteRasterizer {
    pub fn new(config: RasterizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RasterizerConfig {
        &self.config
    }

    /// Texture size before rotation for `color_count` entries.
    pub fn optimal_size(&self, color_count: usize, settings: &PaletteSettings) -> (u32, u32) {
        if !settings.auto_size {
            return (settings.texture_width.max(1), settings.texture_height.max(1));
        }

        let strip = || {
            if settings.smooth_transitions {
                (color_count as u32)
                    .saturating_mul(self.config.pixels_per_color)
                    .max(self.config.min_resolution)
                    .min(self.config.max_resolution)
                    .max(1)
            } else {
                (color_count as u32).max(1)
            }
        };

        match settings.layout {
            TextureLayout::Horizontal => (strip(), 1),
            TextureLayout::Vertical => (1, strip()),
            TextureLayout::Grid => {
                let (cols, rows) = grid_size(color_count);
                (cols as u32, rows as u32)
            }
            TextureLayout::Radial | TextureLayout::Smooth => {
                (self.config.fixed_size, self.config.fixed_size)
            }
        }
    }

    /// Render `colors` with the layout, size and rotation from `settings`.
    pub fn rasterize(&self, colors: &[Color], settings: &PaletteSettings) -> PaletteTexture {
        let settings = settings.sanitized();
        if colors.is_empty() {
            log::debug!("Rasterizing an empty palette as solid white");
            let size = self.config.fixed_size.max(1);
            return PaletteTexture::new(PixelBuffer::filled(size, size, Color::WHITE), FilterMode::Point);
        }

        let (width, height) = self.optimal_size(colors.len(), &settings);
        let smooth = settings.smooth_transitions;
        let buffer = match settings.layout {
            TextureLayout::Horizontal => PixelBuffer::from_fn(width, height, |x, _| {
                strip_color(colors, x, width, smooth)
            }),
            TextureLayout::Vertical => PixelBuffer::from_fn(width, height, |_, y| {
                strip_color(colors, y, height, smooth)
            }),
            TextureLayout::Grid => grid(colors, width, height),
            TextureLayout::Radial => radial(colors, width, height),
            TextureLayout::Smooth => PixelBuffer::from_fn(width, height, |x, y| {
                let across = interpolate_colors(colors, unit_position(x, width), false);
                let down = interpolate_colors(colors, unit_position(y, height), false);
                across.lerp(down, 0.5)
            }),
        };

        let filter = match settings.layout {
            TextureLayout::Horizontal | TextureLayout::Vertical if !smooth => FilterMode::Point,
            TextureLayout::Grid => FilterMode::Point,
            _ => FilterMode::Bilinear,
        };

        let buffer = rotate(&buffer, settings.rotation());
        log::debug!(
            "Rasterized {} colors as {:?} {}x{}",
            colors.len(),
            settings.layout,
            buffer.width(),
            buffer.height()
        );
        PaletteTexture::new(buffer, filter)
    }
}

/// Texel index mapped onto [0, 1] with the first and last texels at the ends.
fn unit_position(i: u32, size: u32) -> f32 {
    if size <= 1 {
        0.0
    } else {
        i as f32 / (size - 1) as f32
    }
}

fn strip_color(colors: &[Color], i: u32, size: u32, smooth: bool) -> Color {
    if smooth {
        return interpolate_colors(colors, unit_position(i, size), false);
    }
    let n = colors.len();
    let index = if size as usize == n {
        i as usize
    } else {
        (i as f32 / size as f32 * n as f32).floor() as usize
    };
    colors[index.min(n - 1)]
}

/// Cells laid out left to right, top row first. Row 0 of the buffer is the bottom.
fn grid(colors: &[Color], width: u32, height: u32) -> PixelBuffer {
    let n = colors.len();
    let (mut cols, mut rows) = (width as usize, height as usize);
    if n < cols * rows {
        let (c, r) = grid_size(n);
        if c <= cols && r <= rows {
            cols = c;
            rows = r;
        }
    }
    let tile_w = (width as usize / cols).max(1);
    let tile_h = (height as usize / rows).max(1);

    PixelBuffer::from_fn(width, height, |x, y| {
        let col = (x as usize / tile_w).min(cols - 1);
        let row = (y as usize / tile_h).min(rows - 1);
        let index = (rows - 1 - row) * cols + col;
        colors.get(index).copied().unwrap_or(Color::TRANSPARENT)
    })
}

fn radial(colors: &[Color], width: u32, height: u32) -> PixelBuffer {
    let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
    let max_distance = (width.min(height) as f32 / 2.0).max(f32::EPSILON);
    PixelBuffer::from_fn(width, height, |x, y| {
        let distance = Vec2::new(x as f32, y as f32).distance(center);
        interpolate_colors(colors, distance / max_distance, false)
    })
}

/// Columns and rows for `n` cells.
///
/// Waste (empty cells) is minimized first, then the difference between columns
/// and rows. Shapes more elongated than 2:1 are not considered.
pub fn grid_size(n: usize) -> (usize, usize) {
    if n <= 1 {
        return (1, 1);
    }

    let score = |cols: usize, rows: usize| (cols * rows - n, cols.abs_diff(rows));
    let root = (n as f64).sqrt();
    let mut best_cols = root.ceil() as usize;
    let mut best_rows = n.div_ceil(best_cols);
    let mut best = score(best_cols, best_rows);

    let start = root.round() as i64;
    for delta in 0..=n as i64 {
        for sign in [-1, 1] {
            let cols = start + sign * delta;
            if cols < 1 || cols > n as i64 {
                continue;
            }
            let cols = cols as usize;
            let rows = n.div_ceil(cols);
            if cols.max(rows) > MAX_GRID_ASPECT * cols.min(rows) {
                continue;
            }
            let candidate = score(cols, rows);
            if candidate < best {
                best = candidate;
                best_cols = cols;
                best_rows = rows;
            }
        }
        if best == (0, 0) || (best.0 == 0 && best.1 <= 3) {
            break;
        }
    }

    (best_cols, best_rows)
}

/// Rotate a bitmap by quarter turns. 90 and 270 swap width and height.
pub fn rotate(buffer: &PixelBuffer, rotation: Rotation) -> PixelBuffer {
    let (w, h) = (buffer.width(), buffer.height());
    match rotation {
        Rotation::R0 => buffer.clone(),
        Rotation::R90 => PixelBuffer::from_fn(h, w, |nx, ny| buffer.get_pixel(ny, h - 1 - nx)),
        Rotation::R180 => {
            PixelBuffer::from_fn(w, h, |nx, ny| buffer.get_pixel(w - 1 - nx, h - 1 - ny))
        }
        Rotation::R270 => PixelBuffer::from_fn(h, w, |nx, ny| buffer.get_pixel(w - 1 - ny, nx)),
    }
}
