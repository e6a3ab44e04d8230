//! Core error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Hex color '{input}' must have 3, 4, 6 or 8 digits")]
    InvalidHexLength { input: String },

    #[error("Hex color '{input}' contains non-hex characters")]
    InvalidHexDigit { input: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureError {
    #[error("Pixel buffer has {actual} pixels, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
