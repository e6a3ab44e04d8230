//! Cursor tint that stays visible against the color under it.

use serde::{Deserialize, Serialize};

use crate::color::{clamp01, Color};

/// How the cursor tint reacts to the color underneath it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorContrastMode {
    /// Keep the cursor's own color.
    None,
    /// RGB complement of the picked color.
    #[default]
    InvertColor,
    /// Black over light colors, white over dark ones.
    InvertLightness,
}

/// Rec. 709 luma.
pub fn perceived_brightness(color: Color) -> f32 {
    clamp01(0.2126 * color.r + 0.7152 * color.g + 0.0722 * color.b)
}

/// Color to draw a cursor with over `current`. Alpha always comes from the
/// cursor's default color.
pub fn cursor_display_color(current: Color, default_cursor: Color, mode: CursorContrastMode) -> Color {
    match mode {
        CursorContrastMode::None => default_cursor,
        CursorContrastMode::InvertColor => Color::new(
            1.0 - current.r,
            1.0 - current.g,
            1.0 - current.b,
            default_cursor.a,
        ),
        CursorContrastMode::InvertLightness => {
            let level = if perceived_brightness(current) >= 0.5 { 0.0 } else { 1.0 };
            Color::new(level, level, level, default_cursor.a)
        }
    }
}
