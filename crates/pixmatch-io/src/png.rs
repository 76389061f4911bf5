//! PNG image format support
//!
//! Decodes every PNG variant the comparison engine models: grayscale at
//! any bit depth, gray+alpha, truecolor with and without alpha, 8-bit
//! and 16-bit channels, and indexed color with optional transparency.
//! The mapping keeps 16-bit samples big-endian and preserves the
//! premultiplied/straight alpha distinction:
//!
//! | PNG type              | [`ColorModel`] |
//! |-----------------------|----------------|
//! | Gray 1/2/4 (expanded) | `Gray8`        |
//! | Gray 8 / 16           | `Gray8` / `Gray16` |
//! | Gray+alpha 8 / 16     | `Nrgba8` / `Nrgba16` |
//! | RGB 8 / 16 (opaque)   | `Rgba8` / `Rgba16` |
//! | RGBA 8 / 16           | `Nrgba8` / `Nrgba16` |
//! | Indexed (+tRNS)       | `Paletted`     |

use crate::{IoError, IoResult};
use pixmatch_core::{ColorModel, DiffImage, PixBuffer, Rgba};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixBuffer> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let line_size = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let pix = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One | BitDepth::Two | BitDepth::Four) => {
            let bytes = unpack_rows(width, height, bit_depth as u32, line_size, data, true);
            PixBuffer::from_raw(width, height, ColorModel::Gray8, bytes)
        }
        (ColorType::Grayscale, BitDepth::Eight) => {
            copy_rows(width, height, 1, line_size, data, ColorModel::Gray8)
        }
        (ColorType::Grayscale, BitDepth::Sixteen) => {
            copy_rows(width, height, 2, line_size, data, ColorModel::Gray16)
        }
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => {
            let bytes = map_pixels(width, height, 2, line_size, data, |px, out| {
                out.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            });
            PixBuffer::from_raw(width, height, ColorModel::Nrgba8, bytes)
        }
        (ColorType::GrayscaleAlpha, BitDepth::Sixteen) => {
            let bytes = map_pixels(width, height, 4, line_size, data, |px, out| {
                out.extend_from_slice(&[px[0], px[1], px[0], px[1], px[0], px[1], px[2], px[3]]);
            });
            PixBuffer::from_raw(width, height, ColorModel::Nrgba16, bytes)
        }
        (ColorType::Rgb, BitDepth::Eight) => {
            let bytes = map_pixels(width, height, 3, line_size, data, |px, out| {
                out.extend_from_slice(px);
                out.push(255);
            });
            PixBuffer::from_raw(width, height, ColorModel::Rgba8, bytes)
        }
        (ColorType::Rgb, BitDepth::Sixteen) => {
            let bytes = map_pixels(width, height, 6, line_size, data, |px, out| {
                out.extend_from_slice(px);
                out.extend_from_slice(&[255, 255]);
            });
            PixBuffer::from_raw(width, height, ColorModel::Rgba16, bytes)
        }
        (ColorType::Rgba, BitDepth::Eight) => {
            copy_rows(width, height, 4, line_size, data, ColorModel::Nrgba8)
        }
        (ColorType::Rgba, BitDepth::Sixteen) => {
            copy_rows(width, height, 8, line_size, data, ColorModel::Nrgba16)
        }
        (ColorType::Indexed, BitDepth::One | BitDepth::Two | BitDepth::Four) => {
            let bytes = unpack_rows(width, height, bit_depth as u32, line_size, data, false);
            PixBuffer::from_raw(width, height, ColorModel::Paletted, bytes)
        }
        (ColorType::Indexed, BitDepth::Eight) => {
            copy_rows(width, height, 1, line_size, data, ColorModel::Paletted)
        }
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    }
    .map_err(IoError::Core)?;

    if color_type == ColorType::Indexed {
        let info = reader.info();
        let palette = info
            .palette
            .as_ref()
            .ok_or_else(|| IoError::InvalidData("indexed PNG has no palette".to_string()))?;
        let trns = info.trns.as_deref().unwrap_or(&[]);

        let mut colors = Vec::with_capacity(palette.len() / 3);
        for (i, chunk) in palette.chunks(3).enumerate() {
            if chunk.len() == 3 {
                let alpha = trns.get(i).copied().unwrap_or(255);
                colors.push(Rgba::new(chunk[0], chunk[1], chunk[2], alpha));
            }
        }
        return pix.with_palette(colors).map_err(IoError::Core);
    }

    Ok(pix)
}

/// Write a rendered diff image as an RGBA8 PNG
pub fn write_png<W: Write>(image: &DiffImage, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

/// Copy rows of fixed-size pixels, dropping any per-row padding
fn copy_rows(
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
    line_size: usize,
    data: &[u8],
    model: ColorModel,
) -> pixmatch_core::Result<PixBuffer> {
    let row_bytes = width as usize * bytes_per_pixel;
    let mut out = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let start = y * line_size;
        out.extend_from_slice(&data[start..start + row_bytes]);
    }
    PixBuffer::from_raw(width, height, model, out)
}

/// Transform rows of fixed-size pixels through `f`
fn map_pixels(
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
    line_size: usize,
    data: &[u8],
    f: impl Fn(&[u8], &mut Vec<u8>),
) -> Vec<u8> {
    let row_bytes = width as usize * bytes_per_pixel;
    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height as usize {
        let row = &data[y * line_size..y * line_size + row_bytes];
        for px in row.chunks_exact(bytes_per_pixel) {
            f(px, &mut out);
        }
    }
    out
}

/// Unpack sub-byte samples (MSB first) into one byte per pixel.
///
/// With `scale` the samples stretch to the full 0..255 range (grayscale);
/// without it they stay raw (palette indices).
fn unpack_rows(
    width: u32,
    height: u32,
    bits: u32,
    line_size: usize,
    data: &[u8],
    scale: bool,
) -> Vec<u8> {
    let max = (1u16 << bits) - 1;
    let row_bytes = (width as usize * bits as usize).div_ceil(8);
    let mut out = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * line_size..y * line_size + row_bytes];
        for x in 0..width as usize {
            let bit_pos = x * bits as usize;
            let byte = row[bit_pos / 8];
            let shift = 8 - bits as usize - (bit_pos % 8);
            let v = u16::from(byte >> shift) & max;
            out.push(if scale { (v * 255 / max) as u8 } else { v as u8 });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(
        width: u32,
        height: u32,
        color: ColorType,
        depth: BitDepth,
        palette: Option<Vec<u8>>,
        trns: Option<Vec<u8>>,
        data: &[u8],
    ) -> Vec<u8> {
        let mut out = Vec::new();
        let mut encoder = Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if let Some(palette) = palette {
            encoder.set_palette(palette);
        }
        if let Some(trns) = trns {
            encoder.set_trns(trns);
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
        out
    }

    #[test]
    fn test_read_gray8() {
        let bytes = encode(
            2,
            2,
            ColorType::Grayscale,
            BitDepth::Eight,
            None,
            None,
            &[0, 85, 170, 255],
        );
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.model(), ColorModel::Gray8);
        assert_eq!(pix.rgba(1, 0), Some(Rgba::gray(85)));
        assert_eq!(pix.rgba(1, 1), Some(Rgba::gray(255)));
    }

    #[test]
    fn test_read_gray1_expands_and_scales() {
        // Eight 1-bit pixels in one byte, MSB first.
        let bytes = encode(
            8,
            1,
            ColorType::Grayscale,
            BitDepth::One,
            None,
            None,
            &[0b1011_0000],
        );
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.model(), ColorModel::Gray8);
        let values: Vec<u8> = (0..8).map(|x| pix.rgba(x, 0).unwrap().r).collect();
        assert_eq!(values, vec![255, 0, 255, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn test_read_gray16_stays_big_endian() {
        let bytes = encode(
            1,
            1,
            ColorType::Grayscale,
            BitDepth::Sixteen,
            None,
            None,
            &[0xAB, 0x52],
        );
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.model(), ColorModel::Gray16);
        assert_eq!(pix.raw_bytes(), &[0xAB, 0x52]);
        assert_eq!(pix.rgba(0, 0), Some(Rgba::gray(0xAB)));
    }

    #[test]
    fn test_read_rgb_becomes_opaque_rgba() {
        let bytes = encode(
            2,
            1,
            ColorType::Rgb,
            BitDepth::Eight,
            None,
            None,
            &[1, 2, 3, 4, 5, 6],
        );
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.model(), ColorModel::Rgba8);
        assert_eq!(pix.rgba(0, 0), Some(Rgba::rgb(1, 2, 3)));
        assert_eq!(pix.rgba(1, 0), Some(Rgba::rgb(4, 5, 6)));
    }

    #[test]
    fn test_read_rgba_keeps_straight_alpha() {
        let bytes = encode(
            1,
            1,
            ColorType::Rgba,
            BitDepth::Eight,
            None,
            None,
            &[10, 20, 30, 40],
        );
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.model(), ColorModel::Nrgba8);
        assert_eq!(pix.rgba(0, 0), Some(Rgba::new(10, 20, 30, 40)));
    }

    #[test]
    fn test_read_gray_alpha() {
        let bytes = encode(
            1,
            1,
            ColorType::GrayscaleAlpha,
            BitDepth::Eight,
            None,
            None,
            &[200, 100],
        );
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.model(), ColorModel::Nrgba8);
        assert_eq!(pix.rgba(0, 0), Some(Rgba::new(200, 200, 200, 100)));
    }

    #[test]
    fn test_read_indexed_with_transparency() {
        let bytes = encode(
            3,
            1,
            ColorType::Indexed,
            BitDepth::Eight,
            Some(vec![255, 255, 255, 255, 0, 0, 0, 0, 255]),
            Some(vec![255, 0]),
            &[0, 1, 2],
        );
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.model(), ColorModel::Paletted);
        assert_eq!(pix.rgba(0, 0), Some(Rgba::WHITE));
        // Entry 1 is fully transparent through tRNS.
        assert_eq!(pix.rgba(1, 0), Some(Rgba::new(255, 0, 0, 0)));
        // Entries past the tRNS table stay opaque.
        assert_eq!(pix.rgba(2, 0), Some(Rgba::rgb(0, 0, 255)));
    }

    #[test]
    fn test_write_diff_image() {
        // A freshly rendered (all transparent) diff image encodes as an
        // RGBA8 PNG and reads back pixel-for-pixel.
        let diff = DiffImage::new(2, 1);
        let mut bytes = Vec::new();
        write_png(&diff, &mut bytes).unwrap();
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.dims(), (2, 1));
        assert_eq!(pix.model(), ColorModel::Nrgba8);
        assert_eq!(pix.rgba(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(pix.raw_bytes(), diff.data());
    }
}
