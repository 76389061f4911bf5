//! Typed regression-check failures
//!
//! Every failed check records one of these; the `Display` output is what
//! the recorder prints, so each variant carries the data a reader needs
//! to see what diverged without rerunning.

use pixmatch_core::Rgba;
use thiserror::Error;

/// A failed regression check
#[derive(Debug, Error)]
pub enum TestError {
    /// A floating-point value missed its reference
    #[error("check {index}: expected value {expected}, got {actual} (tolerance {tolerance})")]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        tolerance: f64,
    },

    /// A comparison produced the wrong difference count
    #[error("check {index}: expected {expected} differing pixels, got {actual}")]
    CountMismatch {
        index: usize,
        expected: u64,
        actual: u64,
    },

    /// A rendered diff-image pixel has the wrong color
    #[error("check {index}: diff pixel ({x}, {y}) is {actual}, expected {expected}")]
    PixelMismatch {
        index: usize,
        x: u32,
        y: u32,
        expected: Rgba,
        actual: Rgba,
    },

    /// Two pixel buffers that should be identical are not
    #[error("check {index}: buffers differ ({reason})")]
    BufferMismatch { index: usize, reason: &'static str },

    /// A decoded image does not reproduce the rendered diff image
    #[error("check {index}: decoded image does not match the rendered diff ({reason})")]
    RenderMismatch { index: usize, reason: &'static str },
}
