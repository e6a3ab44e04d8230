pub mod color;
pub mod color_space;
pub mod color_state;
pub mod cursor;
pub mod error;
pub mod mapping;
pub mod picker;
pub mod points;
pub mod sampling;
pub mod texture;

pub use color::{clamp01, wrap_hue, CmykColor, Color, HsvColor};
pub use color_space::{
    cmyk_to_rgb, color_distance, find_nearest, hsv_to_rgb, manhattan_rgb, manhattan_rgba,
    parse_hex, rgb_to_cmyk, rgb_to_hsv, to_hex,
};
pub use color_state::{ColorState, Listener, SubscriptionId, CHANNEL_EPSILON};
pub use cursor::{cursor_display_color, perceived_brightness, CursorContrastMode};
pub use error::{ColorError, TextureError};
pub use mapping::warp::{disk_to_square, square_to_disk};
pub use mapping::{
    mapping_for, CursorPlacement, DragRegion, DragState, MapContext, MapOutcome, Mode,
    ModeMapping, RingGeometry,
};
pub use picker::{PickerConfig, PickerController};
pub use points::{inverse_lerp, lerp, Rect, Vec2};
pub use sampling::{
    find_color_in_texture, sample_texture, snap_to_texel_center, ReverseSearchConfig,
    SamplingSettings,
};
pub use texture::{unique_colors, ColorSource, PixelBuffer, TextureSource};
