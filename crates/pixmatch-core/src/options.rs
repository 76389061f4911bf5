//! Comparison options
//!
//! [`Options`] is an immutable configuration record. The `with_*` setters
//! consume and return the value, so a configured instance reads as one
//! expression and no shared state is mutated.

use crate::color::Rgba;

/// Configuration for a comparison run
///
/// # Examples
///
/// ```
/// use pixmatch_core::{Options, Rgba};
///
/// let opts = Options::new()
///     .with_threshold(0.05)
///     .with_include_aa(true)
///     .with_diff_color(Rgba::rgb(255, 0, 255));
/// assert_eq!(opts.threshold, 0.05);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Color-difference activation threshold in `[0, 1]`; smaller is
    /// more sensitive
    pub threshold: f64,
    /// Mixing factor in `[0, 1]` for the unchanged-pixel gray background
    pub alpha: f64,
    /// Count anti-aliased pixels as differences instead of detecting them
    pub include_aa: bool,
    /// Color for detected anti-aliased pixels in the diff image
    pub aa_color: Rgba,
    /// Color for differing pixels in the diff image
    pub diff_color: Rgba,
    /// Alternative color for pixels that got darker; `diff_color` is used
    /// for both directions when unset
    pub diff_color_alt: Option<Rgba>,
    /// Draw only differing pixels, leaving the rest transparent
    pub diff_mask: bool,
    /// Render a diff image and return it from the comparison
    pub output: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            alpha: 0.1,
            include_aa: false,
            aa_color: Rgba::new(255, 255, 0, 255),
            diff_color: Rgba::new(255, 0, 0, 255),
            diff_color_alt: None,
            diff_mask: false,
            output: false,
        }
    }
}

impl Options {
    /// Create options with the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color-difference threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the gray-background mixing factor
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Count anti-aliased pixels as differences
    pub fn with_include_aa(mut self, include_aa: bool) -> Self {
        self.include_aa = include_aa;
        self
    }

    /// Set the anti-aliased pixel color
    pub fn with_aa_color(mut self, color: Rgba) -> Self {
        self.aa_color = color;
        self
    }

    /// Set the difference color
    pub fn with_diff_color(mut self, color: Rgba) -> Self {
        self.diff_color = color;
        self
    }

    /// Set the alternative difference color for darkened pixels
    pub fn with_diff_color_alt(mut self, color: Rgba) -> Self {
        self.diff_color_alt = Some(color);
        self
    }

    /// Render only differing pixels
    pub fn with_diff_mask(mut self, diff_mask: bool) -> Self {
        self.diff_mask = diff_mask;
        self
    }

    /// Request a rendered diff image
    pub fn with_output(mut self, output: bool) -> Self {
        self.output = output;
        self
    }
}
