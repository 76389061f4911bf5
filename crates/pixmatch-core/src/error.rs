//! Error types for pixmatch-core
//!
//! Provides a unified error type for the comparison engine. Each variant
//! captures enough context for diagnostics without exposing internal
//! implementation details.

use thiserror::Error;

/// Comparison engine error type
#[derive(Error, Debug)]
pub enum Error {
    /// Either input buffer has zero width or height
    #[error("image is empty")]
    EmptyImage,

    /// Input buffers have different dimensions
    #[error("image dimensions do not match: {0}x{1} vs {2}x{3}")]
    DimensionsMismatch(u32, u32, u32, u32),

    /// The adapter cannot map a color model into canonical RGBA
    ///
    /// Reserved: the default adapter covers every [`ColorModel`] variant.
    ///
    /// [`ColorModel`]: crate::ColorModel
    #[error("unsupported color model: {0}")]
    UnsupportedFormat(String),

    /// Invalid buffer geometry (stride or data length too small)
    #[error("invalid buffer layout: {0}")]
    InvalidLayout(String),
}

/// Result type alias for comparison operations
pub type Result<T> = std::result::Result<T, Error>;
