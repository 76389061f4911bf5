//! pixmatch-core - perceptual pixel-level image comparison
//!
//! Given two decoded raster images of identical dimensions, this crate
//! counts the pixels that differ perceptually under a configurable
//! YIQ-space threshold, detects anti-aliased edges so smoothing noise is
//! not reported as change, and optionally renders a diff image marking
//! differences, anti-aliasing, and unchanged regions.
//!
//! Decoding and encoding are deliberately out of scope: the engine
//! consumes [`PixBuffer`] values and hands back a [`DiffImage`] for the
//! caller to encode (see the `pixmatch-io` crate).
//!
//! # Example
//!
//! ```
//! use pixmatch_core::{ColorModel, Options, PixBuffer};
//!
//! let a = PixBuffer::from_raw(2, 2, ColorModel::Gray8, vec![0, 0, 0, 0]).unwrap();
//! let b = PixBuffer::from_raw(2, 2, ColorModel::Gray8, vec![0, 0, 0, 255]).unwrap();
//!
//! let result = a.compare(&b, &Options::new().with_output(true)).unwrap();
//! assert_eq!(result.diff_count, 1);
//! assert!(result.output.is_some());
//! ```

pub mod color;
pub mod error;
pub mod options;
pub mod output;
pub mod pix;

pub use color::Rgba;
pub use error::{Error, Result};
pub use options::Options;
pub use output::DiffImage;
pub use pix::{ColorModel, CompareResult, PixBuffer, Point, YIQ_DELTA_MAX};
