//! pixmatch-test - regression test support for pixmatch
//!
//! Provides the check recorder used by the `tests/*_reg.rs` files across
//! the workspace, plus synthetic pixel-buffer fixtures. The recorder's
//! checks are comparator-shaped: reference values, diff counts, rendered
//! diff-image pixels, buffer equality, and decoded-versus-rendered byte
//! identity. Failures accumulate as typed [`TestError`] values and are
//! reported together by [`RegParams::cleanup`].
//!
//! # Usage
//!
//! ```
//! use pixmatch_test::{RegParams, fixtures};
//! use pixmatch_core::Options;
//!
//! let (a, b) = fixtures::aa_step_pair();
//! let result = a.compare(&b, &Options::new()).unwrap();
//!
//! let mut rp = RegParams::new("doc");
//! rp.check_count(10, &result);
//! assert!(rp.cleanup());
//! ```

mod error;
pub mod fixtures;
mod params;

pub use error::TestError;
pub use params::RegParams;
