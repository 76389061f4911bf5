//! Synthetic pixel-buffer fixtures
//!
//! This repo ships no image corpus; regression tests build their inputs
//! from these constructors instead. The shapes are chosen so expected
//! diff counts and anti-aliasing classifications can be derived by hand.
//!
//! All constructors panic on mismatched geometry - they are test-only.

use pixmatch_core::{ColorModel, PixBuffer, Rgba};

/// 8-bit grayscale buffer from explicit values (row-major)
pub fn gray8(width: u32, height: u32, values: &[u8]) -> PixBuffer {
    assert_eq!(values.len(), (width * height) as usize);
    PixBuffer::from_raw(width, height, ColorModel::Gray8, values.to_vec()).unwrap()
}

/// 16-bit grayscale buffer from explicit samples (row-major, stored
/// big-endian)
pub fn gray16(width: u32, height: u32, samples: &[u16]) -> PixBuffer {
    assert_eq!(samples.len(), (width * height) as usize);
    let mut data = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        data.extend_from_slice(&s.to_be_bytes());
    }
    PixBuffer::from_raw(width, height, ColorModel::Gray16, data).unwrap()
}

/// Non-premultiplied RGBA buffer from explicit pixels (row-major)
pub fn nrgba8(width: u32, height: u32, pixels: &[Rgba]) -> PixBuffer {
    assert_eq!(pixels.len(), (width * height) as usize);
    let mut data = Vec::with_capacity(pixels.len() * 4);
    for p in pixels {
        data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }
    PixBuffer::from_raw(width, height, ColorModel::Nrgba8, data).unwrap()
}

/// Paletted buffer from indices and a palette
pub fn paletted(width: u32, height: u32, indices: &[u8], palette: &[Rgba]) -> PixBuffer {
    assert_eq!(indices.len(), (width * height) as usize);
    PixBuffer::from_raw(width, height, ColorModel::Paletted, indices.to_vec())
        .unwrap()
        .with_palette(palette.to_vec())
        .unwrap()
}

/// Solid-color buffer
pub fn solid(width: u32, height: u32, color: Rgba) -> PixBuffer {
    nrgba8(width, height, &vec![color; (width * height) as usize])
}

/// Two-color checkerboard with square cells
pub fn checkerboard(width: u32, height: u32, cell: u32, c1: Rgba, c2: Rgba) -> PixBuffer {
    assert!(cell > 0);
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let color = if ((x / cell) + (y / cell)) % 2 == 0 {
                c1
            } else {
                c2
            };
            pixels.push(color);
        }
    }
    nrgba8(width, height, &pixels)
}

/// Horizontal gray ramp from black to white
pub fn gray_ramp(width: u32, height: u32) -> PixBuffer {
    assert!(width > 1);
    let mut values = Vec::with_capacity((width * height) as usize);
    for _ in 0..height {
        for x in 0..width {
            values.push((x * 255 / (width - 1)) as u8);
        }
    }
    gray8(width, height, &values)
}

/// A 5x5 anti-aliased step edge and its all-white counterpart.
///
/// The first buffer is white on top, black on the bottom, with a
/// half-intensity smoothing band across row 2. Compared against the
/// all-white buffer with default options, the band row classifies as
/// anti-aliased (5 pixels) and the two black rows as genuine differences
/// (10 pixels); with `include_aa` the count is all 15.
pub fn aa_step_pair() -> (PixBuffer, PixBuffer) {
    #[rustfmt::skip]
    let stepped = gray8(5, 5, &[
        255, 255, 255, 255, 255,
        255, 255, 255, 255, 255,
        128, 128, 128, 128, 128,
        0, 0, 0, 0, 0,
        0, 0, 0, 0, 0,
    ]);
    let white = gray8(5, 5, &[255; 25]);
    (stepped, white)
}
