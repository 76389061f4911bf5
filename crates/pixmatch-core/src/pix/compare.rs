//! Image comparison
//!
//! The perceptual delta and the diff driver. [`color_delta`] measures the
//! squared YIQ distance between two pixels; [`compare`] runs the per-row
//! parallel scan that classifies every pixel as identical, sub-threshold,
//! anti-aliased, or genuinely different, tallies the differences, and
//! optionally renders a diff image.
//!
//! [`color_delta`]: PixBuffer::color_delta
//! [`compare`]: PixBuffer::compare

use rayon::prelude::*;

use super::{PixBuffer, Point};
use crate::color;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::output::DiffImage;

/// Maximum possible squared YIQ delta between two colors.
///
/// The driver's activation threshold is `YIQ_DELTA_MAX * threshold²`, so
/// a threshold of 1.0 accepts every pixel.
pub const YIQ_DELTA_MAX: f64 = 35215.0;

/// Result of comparing two pixel buffers
#[derive(Debug, Clone, PartialEq)]
pub struct CompareResult {
    /// Number of pixels classified as genuine differences
    pub diff_count: u64,
    /// Rendered diff image, present when [`Options::output`] was set and
    /// the buffers were not byte-identical
    pub output: Option<DiffImage>,
}

impl PixBuffer {
    /// Signed squared perceptual distance between a pixel of this buffer
    /// and a pixel of `other`.
    ///
    /// Both pixels are read canonically, composited over white when
    /// translucent, and projected into YIQ. With `only_y` the plain
    /// brightness difference is returned instead of the weighted square.
    /// The sign carries relative brightness: negative means this buffer's
    /// pixel is the brighter one.
    ///
    /// # Panics
    ///
    /// Panics if either offset is out of bounds for its buffer.
    pub fn color_delta(&self, other: &PixBuffer, pos_a: usize, pos_b: usize, only_y: bool) -> f64 {
        let ca = self.rgba_at(pos_a);
        let cb = other.rgba_at(pos_b);
        if ca == cb {
            return 0.0;
        }

        let (r1, g1, b1) = color::blend_over_white(ca);
        let (r2, g2, b2) = color::blend_over_white(cb);

        let y1 = color::yiq_y(r1, g1, b1);
        let y2 = color::yiq_y(r2, g2, b2);
        let dy = y1 - y2;
        if only_y {
            return dy;
        }

        let di = color::yiq_i(r1, g1, b1) - color::yiq_i(r2, g2, b2);
        let dq = color::yiq_q(r1, g1, b1) - color::yiq_q(r2, g2, b2);
        let delta = 0.5053 * dy * dy + 0.299 * di * di + 0.1957 * dq * dq;

        if y1 > y2 { -delta } else { delta }
    }

    /// Compare this buffer against `other`.
    ///
    /// Classifies every pixel and returns the count of genuine
    /// differences, plus a rendered diff image when the options request
    /// one. Rows are scanned in parallel; each worker writes a disjoint
    /// band of the output and keeps a local tally, so the result is
    /// deterministic regardless of scheduling.
    ///
    /// Byte-identical inputs short-circuit to a zero count with no
    /// rendering, even when an output was requested.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyImage`] when either buffer covers zero pixels
    /// - [`Error::DimensionsMismatch`] when the rectangles differ
    ///
    /// # Examples
    ///
    /// ```
    /// use pixmatch_core::{ColorModel, Options, PixBuffer};
    ///
    /// let a = PixBuffer::from_raw(2, 1, ColorModel::Gray8, vec![0, 0]).unwrap();
    /// let b = PixBuffer::from_raw(2, 1, ColorModel::Gray8, vec![0, 255]).unwrap();
    /// let result = a.compare(&b, &Options::new()).unwrap();
    /// assert_eq!(result.diff_count, 1);
    /// ```
    pub fn compare(&self, other: &PixBuffer, options: &Options) -> Result<CompareResult> {
        if self.is_empty() || other.is_empty() {
            return Err(Error::EmptyImage);
        }
        if !self.dimensions_equal(other) {
            return Err(Error::DimensionsMismatch(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }
        if self.identical_bytes(other) {
            return Ok(CompareResult {
                diff_count: 0,
                output: None,
            });
        }

        let max_delta = YIQ_DELTA_MAX * options.threshold * options.threshold;
        let (_, height) = self.dims();

        if options.output {
            let mut image = DiffImage::new(self.width(), self.height());
            let stride = image.stride();
            let diff_count = image
                .data_mut()
                .par_chunks_mut(stride)
                .enumerate()
                .map(|(y, row)| self.scan_row(other, options, max_delta, y as u32, Some(row)))
                .sum();
            Ok(CompareResult {
                diff_count,
                output: Some(image),
            })
        } else {
            let diff_count = (0..height)
                .into_par_iter()
                .map(|y| self.scan_row(other, options, max_delta, y, None))
                .sum();
            Ok(CompareResult {
                diff_count,
                output: None,
            })
        }
    }

    /// Classify one row of pixels, returning its difference tally.
    ///
    /// `row` is this row's band of the output image, when rendering.
    fn scan_row(
        &self,
        other: &PixBuffer,
        options: &Options,
        max_delta: f64,
        y: u32,
        mut row: Option<&mut [u8]>,
    ) -> u64 {
        let mut diffs = 0u64;
        for x in 0..self.width() {
            let pos_a = self.position(x, y);
            let pos_b = other.position(x, y);
            let delta = self.color_delta(other, pos_a, pos_b, false);

            if delta.abs() > max_delta {
                let pt = Point::new(x, y);
                if !options.include_aa
                    && (self.antialiased(other, pt) || other.antialiased(self, pt))
                {
                    // Smoothing artifact: render but never count.
                    if let Some(row) = row.as_deref_mut()
                        && !options.diff_mask
                    {
                        DiffImage::put_row_pixel(row, x, options.aa_color);
                    }
                } else {
                    if let Some(row) = row.as_deref_mut() {
                        let color = match options.diff_color_alt {
                            Some(alt) if delta < 0.0 => alt,
                            _ => options.diff_color,
                        };
                        DiffImage::put_row_pixel(row, x, color);
                    }
                    diffs += 1;
                }
            } else if let Some(row) = row.as_deref_mut()
                && !options.diff_mask
            {
                let gray = self.rgba_at(pos_a).blend_to_gray(options.alpha);
                DiffImage::put_row_pixel(row, x, gray);
            }
        }
        diffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::pix::ColorModel;

    fn gray(width: u32, height: u32, values: &[u8]) -> PixBuffer {
        PixBuffer::from_raw(width, height, ColorModel::Gray8, values.to_vec()).unwrap()
    }

    fn nrgba(width: u32, height: u32, pixels: &[Rgba]) -> PixBuffer {
        let mut data = Vec::with_capacity(pixels.len() * 4);
        for p in pixels {
            data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        PixBuffer::from_raw(width, height, ColorModel::Nrgba8, data).unwrap()
    }

    #[test]
    fn test_color_delta_equal_pixels() {
        let a = nrgba(1, 1, &[Rgba::new(12, 34, 56, 78)]);
        let b = nrgba(1, 1, &[Rgba::new(12, 34, 56, 78)]);
        assert_eq!(a.color_delta(&b, 0, 0, false), 0.0);
    }

    #[test]
    fn test_color_delta_black_white() {
        let a = nrgba(1, 1, &[Rgba::rgb(0, 0, 0)]);
        let b = nrgba(1, 1, &[Rgba::WHITE]);
        // Chrominance of any gray is zero, so the delta collapses to
        // 0.5053 * dy^2 with dy ~ 255.
        let delta = a.color_delta(&b, 0, 0, false);
        assert!((delta - 32857.13).abs() < 0.01);
        // Swapped direction only flips the sign.
        let swapped = b.color_delta(&a, 0, 0, false);
        assert!((swapped + delta).abs() < 1e-9);
        assert!(swapped < 0.0);
    }

    #[test]
    fn test_color_delta_brightness_only() {
        let a = gray(1, 1, &[100]);
        let b = gray(1, 1, &[50]);
        let dy = a.color_delta(&b, 0, 0, true);
        // y(gray v) = v * (sum of YIQ luma coefficients) = v * 1.00000001
        assert!((dy - 50.0000005).abs() < 1e-6);
    }

    #[test]
    fn test_color_delta_translucent_blends_over_white() {
        // Half-transparent red against opaque red: the translucent pixel
        // washes towards white, so it reads brighter.
        let a = nrgba(1, 1, &[Rgba::new(255, 0, 0, 128)]);
        let b = nrgba(1, 1, &[Rgba::rgb(255, 0, 0)]);
        let delta = a.color_delta(&b, 0, 0, false);
        assert!(delta < 0.0, "translucent-over-white side is brighter");
    }

    #[test]
    fn test_compare_empty_rejected() {
        let empty = PixBuffer::new(0, 5, ColorModel::Gray8);
        let solid = gray(1, 1, &[0]);
        assert!(matches!(
            empty.compare(&solid, &Options::new()),
            Err(Error::EmptyImage)
        ));
        assert!(matches!(
            solid.compare(&empty, &Options::new()),
            Err(Error::EmptyImage)
        ));
    }

    #[test]
    fn test_compare_dimensions_rejected() {
        let a = gray(2, 2, &[0; 4]);
        let b = gray(3, 2, &[0; 6]);
        match a.compare(&b, &Options::new()) {
            Err(Error::DimensionsMismatch(2, 2, 3, 2)) => {}
            other => panic!("expected dimensions mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_compare_identical_skips_rendering() {
        let a = gray(4, 4, &[9; 16]);
        let b = gray(4, 4, &[9; 16]);
        let result = a.compare(&b, &Options::new().with_output(true)).unwrap();
        assert_eq!(result.diff_count, 0);
        assert!(result.output.is_none());
    }

    #[test]
    fn test_compare_counts_single_difference() {
        let mut values = [50u8; 9];
        values[4] = 250;
        let a = gray(3, 3, &values);
        let b = gray(3, 3, &[50; 9]);
        let result = a.compare(&b, &Options::new()).unwrap();
        assert_eq!(result.diff_count, 1);
    }

    #[test]
    fn test_compare_threshold_one_accepts_everything() {
        let a = gray(2, 2, &[0, 255, 0, 255]);
        let b = gray(2, 2, &[255, 0, 255, 0]);
        let result = a
            .compare(&b, &Options::new().with_threshold(1.0))
            .unwrap();
        assert_eq!(result.diff_count, 0);
    }

    #[test]
    fn test_compare_mixed_models() {
        // Same observable colors through different adapters: zero diff.
        let a = gray(2, 2, &[10, 20, 30, 40]);
        let b = nrgba(
            2,
            2,
            &[
                Rgba::gray(10),
                Rgba::gray(20),
                Rgba::gray(30),
                Rgba::gray(40),
            ],
        );
        let result = a.compare(&b, &Options::new()).unwrap();
        assert_eq!(result.diff_count, 0);
    }

    #[test]
    fn test_compare_respects_stride() {
        // Same pixels, one buffer padded with garbage past each row.
        let tight = gray(2, 2, &[1, 2, 3, 4]);
        let padded = PixBuffer::from_raw_parts(
            2,
            2,
            ColorModel::Gray8,
            4,
            vec![1, 2, 99, 99, 3, 4, 99, 99],
        )
        .unwrap();
        let result = tight.compare(&padded, &Options::new()).unwrap();
        assert_eq!(result.diff_count, 0);
    }
}
