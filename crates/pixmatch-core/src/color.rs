//! Canonical colors and YIQ color-space conversion
//!
//! All comparison math runs on canonical 8-bit RGBA tuples projected into
//! the NTSC YIQ color space. The YIQ coefficients below are bit-stable:
//! downstream deltas must reproduce reference values to many significant
//! digits, so they are written out in full and evaluated in `f64`.

use std::fmt;

/// Canonical 8-bit RGBA color
///
/// Every supported pixel format normalizes to this tuple before any
/// perceptual math happens. Equality is componentwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
    /// Alpha component
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque white
    pub const WHITE: Rgba = Rgba {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Create a new RGBA color
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque grayscale color
    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Y (brightness) component in YIQ space
    pub fn y(self) -> f64 {
        yiq_y(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }

    /// I (orange-blue chrominance) component in YIQ space
    pub fn i(self) -> f64 {
        yiq_i(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }

    /// Q (purple-green chrominance) component in YIQ space
    pub fn q(self) -> f64 {
        yiq_q(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }

    /// Collapse the color to an opaque gray, mixed towards white.
    ///
    /// Computes the YIQ brightness `y` and blends it over a white
    /// background with mixing factor `m` in `[0, 1]`. Fully transparent
    /// colors come out white. Used to render unchanged pixels as a faint
    /// monochrome background in the diff image.
    pub fn blend_to_gray(self, m: f64) -> Rgba {
        if self.a == 0 {
            return Rgba::gray(255);
        }
        let gray = (255.0 + (self.y() - 255.0) * m).clamp(0.0, 255.0);
        Rgba::gray(gray as u8)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Y component of YIQ for raw channel values
#[inline]
pub(crate) fn yiq_y(r: f64, g: f64, b: f64) -> f64 {
    r * 0.29889531 + g * 0.58662247 + b * 0.11448223
}

/// I component of YIQ for raw channel values
#[inline]
pub(crate) fn yiq_i(r: f64, g: f64, b: f64) -> f64 {
    r * 0.59597799 - g * 0.27417610 - b * 0.32180189
}

/// Q component of YIQ for raw channel values
#[inline]
pub(crate) fn yiq_q(r: f64, g: f64, b: f64) -> f64 {
    r * 0.21147017 - g * 0.52261711 + b * 0.31114694
}

/// Composite a color over an opaque white background.
///
/// Translucent colors are blended channel-wise with
/// `c' = 255 + (c - 255) * a` where `a = alpha / 255`; opaque colors pass
/// through unchanged. Returns fractional channels for the YIQ projection.
#[inline]
pub(crate) fn blend_over_white(c: Rgba) -> (f64, f64, f64) {
    let (r, g, b) = (f64::from(c.r), f64::from(c.g), f64::from(c.b));
    if c.a == 255 {
        return (r, g, b);
    }
    let a = f64::from(c.a) / 255.0;
    (
        255.0 + (r - 255.0) * a,
        255.0 + (g - 255.0) * a,
        255.0 + (b - 255.0) * a,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yiq_reference_values() {
        let c = Rgba::new(11, 22, 33, 44);
        assert!((c.y() - 19.97145634).abs() < 1e-8);
        assert!((c.i() - (-10.09557868)).abs() < 1e-8);
        assert!((c.q() - 1.09644447).abs() < 1e-8);
    }

    #[test]
    fn test_display() {
        let c = Rgba::new(123, 233, 12, 42);
        assert_eq!(c.to_string(), "(123,233,12,42)");
    }

    #[test]
    fn test_blend_over_white_opaque_passthrough() {
        let (r, g, b) = blend_over_white(Rgba::rgb(10, 20, 30));
        assert_eq!((r, g, b), (10.0, 20.0, 30.0));
    }

    #[test]
    fn test_blend_over_white_half_alpha() {
        // alpha 127/255, green channel 0 -> 255 - 255 * (127/255) = 128
        let (_, g, _) = blend_over_white(Rgba::new(255, 0, 0, 127));
        assert!((g - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_blend_over_white_transparent_is_white() {
        let (r, g, b) = blend_over_white(Rgba::new(90, 90, 90, 0));
        assert_eq!((r, g, b), (255.0, 255.0, 255.0));
    }

    #[test]
    fn test_blend_to_gray() {
        // White stays white at any mixing factor.
        assert_eq!(Rgba::WHITE.blend_to_gray(0.1), Rgba::gray(255));
        // Black at m=1.0 goes fully dark (y of black is 0).
        assert_eq!(Rgba::rgb(0, 0, 0).blend_to_gray(1.0), Rgba::gray(0));
        // Transparent pixels render white.
        assert_eq!(Rgba::new(0, 0, 0, 0).blend_to_gray(1.0), Rgba::gray(255));
    }

    #[test]
    fn test_blend_to_gray_partial_mix() {
        // y(0,0,0) = 0, m = 0.5 -> 255 + (0 - 255) * 0.5 = 127.5 -> 127
        assert_eq!(Rgba::rgb(0, 0, 0).blend_to_gray(0.5), Rgba::gray(127));
    }
}
