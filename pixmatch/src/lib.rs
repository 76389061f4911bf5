//! pixmatch - perceptual pixel-level image comparison
//!
//! Compares two decoded raster images of identical dimensions and counts
//! the pixels that differ perceptually under a configurable YIQ-space
//! threshold. Anti-aliased edges are detected so font smoothing does not
//! show up as change, and an optional diff image marks differences,
//! anti-aliasing, and unchanged regions. Built for automated
//! visual-regression testing and image-diff tooling.
//!
//! # Overview
//!
//! - Comparison engine: `pixmatch-core`, re-exported at the root
//! - PNG/GIF/JPEG decoding and diff-image encoding: `pixmatch-io`,
//!   exposed as [`io`]
//!
//! # Example
//!
//! ```
//! use pixmatch::{ColorModel, Options, PixBuffer};
//!
//! let a = PixBuffer::from_raw(2, 2, ColorModel::Gray8, vec![0, 0, 0, 0]).unwrap();
//! let b = PixBuffer::from_raw(2, 2, ColorModel::Gray8, vec![0, 0, 255, 0]).unwrap();
//!
//! let result = a.compare(&b, &Options::new()).unwrap();
//! assert_eq!(result.diff_count, 1);
//! ```
//!
//! Comparing files on disk goes through [`io`]:
//!
//! ```no_run
//! use pixmatch::{Options, io};
//!
//! let (a, b) = io::read_pair("before.png", "after.png")?;
//! let result = a.compare(&b, &Options::new().with_output(true))?;
//! println!("{} pixels differ", result.diff_count);
//! if let Some(diff) = result.output {
//!     io::write_diff_png("diff.png", &diff)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export core types
pub use pixmatch_core::*;

/// Image decoding and diff-image encoding
pub use pixmatch_io as io;
