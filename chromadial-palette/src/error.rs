//! Palette error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("Rotation must be 0, 90, 180 or 270 degrees, got {0}")]
    InvalidRotation(i32),

    #[error("Palette has no base colors to generate from")]
    EmptyBaseColors,
}
