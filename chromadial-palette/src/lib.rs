//! Harmony-based palette generation and palette texture rasterization.

pub mod error;
pub mod gradient;
pub mod harmony;
pub mod overrides;
pub mod palette;
pub mod raster;
pub mod settings;
pub mod texture;

pub use error::PaletteError;
pub use gradient::{interpolate_colors, smoothstep};
pub use harmony::generate;
pub use overrides::{HandleOverride, HandleOverrides};
pub use palette::Palette;
pub use raster::{grid_size, rotate, PaletteRasterizer, RasterizerConfig};
pub use settings::{PaletteSettings, PaletteType, Rotation, TextureLayout};
pub use texture::{FilterMode, PaletteTexture, WrapMode};
