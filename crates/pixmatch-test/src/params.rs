//! Regression check recorder
//!
//! [`RegParams`] accumulates the checks of one regression test and
//! reports them together at [`cleanup`]. The checks speak the
//! comparator's language: expected diff counts, rendered diff-image
//! pixels, and decoded-versus-rendered byte equality. Failures are
//! recorded as typed [`TestError`] values, not bare strings, so a
//! failing run prints exactly what diverged.
//!
//! [`cleanup`]: RegParams::cleanup

use crate::error::TestError;
use pixmatch_core::{CompareResult, DiffImage, PixBuffer, Rgba};

/// Regression test state: the test name, a running check index, and the
/// failures recorded so far
pub struct RegParams {
    test_name: String,
    index: usize,
    failures: Vec<TestError>,
}

impl RegParams {
    /// Start a named regression test
    pub fn new(test_name: &str) -> Self {
        eprintln!("==== {}_reg ====", test_name);
        Self {
            test_name: test_name.to_string(),
            index: 0,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, failure: TestError) -> bool {
        eprintln!("{}_reg: {}", self.test_name, failure);
        self.failures.push(failure);
        false
    }

    /// Check a floating-point value against a reference within a
    /// tolerance
    pub fn check_value(&mut self, expected: f64, actual: f64, tolerance: f64) -> bool {
        self.index += 1;
        if (expected - actual).abs() > tolerance {
            return self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                tolerance,
            });
        }
        true
    }

    /// Check the difference count of a comparison
    pub fn check_count(&mut self, expected: u64, result: &CompareResult) -> bool {
        self.index += 1;
        if result.diff_count != expected {
            return self.record(TestError::CountMismatch {
                index: self.index,
                expected,
                actual: result.diff_count,
            });
        }
        true
    }

    /// Check one pixel of a rendered diff image
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    pub fn check_pixel(&mut self, image: &DiffImage, x: u32, y: u32, expected: Rgba) -> bool {
        self.index += 1;
        let actual = image.pixel(x, y).expect("pixel inside the diff image");
        if actual != expected {
            return self.record(TestError::PixelMismatch {
                index: self.index,
                x,
                y,
                expected,
                actual,
            });
        }
        true
    }

    /// Check two pixel buffers for exact equality
    ///
    /// Dimensions, color model, and raw bytes must all match.
    pub fn compare_buffers(&mut self, buf1: &PixBuffer, buf2: &PixBuffer) -> bool {
        self.index += 1;
        let reason = if !buf1.dimensions_equal(buf2) {
            Some("dimensions differ")
        } else if buf1.model() != buf2.model() {
            Some("color models differ")
        } else if !buf1.identical_bytes(buf2) {
            Some("raw bytes differ")
        } else {
            None
        };
        match reason {
            Some(reason) => self.record(TestError::BufferMismatch {
                index: self.index,
                reason,
            }),
            None => true,
        }
    }

    /// Check that a decoded image reproduces a rendered diff image
    /// byte-for-byte
    ///
    /// The decoded buffer must be tightly packed RGBA8 with the diff
    /// image's dimensions, which is what decoding an encoded diff always
    /// yields.
    pub fn compare_rendered(&mut self, image: &DiffImage, decoded: &PixBuffer) -> bool {
        self.index += 1;
        let reason = if decoded.dims() != image.dims() {
            Some("dimensions differ")
        } else if decoded.bytes_per_pixel() != 4 {
            Some("decoded buffer is not RGBA8")
        } else if decoded.raw_bytes() != image.data() {
            Some("raw bytes differ")
        } else {
            None
        };
        match reason {
            Some(reason) => self.record(TestError::RenderMismatch {
                index: self.index,
                reason,
            }),
            None => true,
        }
    }

    /// Finish the test, reporting the overall result
    ///
    /// Returns `true` if every check passed.
    pub fn cleanup(&self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg ({} checks)", self.test_name, self.index);
            true
        } else {
            eprintln!(
                "FAILURE: {}_reg ({} of {} checks failed)",
                self.test_name,
                self.failures.len(),
                self.index
            );
            false
        }
    }
}
