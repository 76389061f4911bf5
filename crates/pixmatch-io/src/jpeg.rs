//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Grayscale frames map
//! to the gray models, baseline color frames decode to opaque RGBA, and
//! four-component (Adobe) frames keep their CMYK samples for the core's
//! uncalibrated conversion.
//!
//! JPEG *writing* is not supported: diff images encode as PNG, and the
//! `jpeg-decoder` crate is decode-only.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use pixmatch_core::{ColorModel, PixBuffer};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixBuffer> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::InvalidData("missing JPEG frame info".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    match info.pixel_format {
        PixelFormat::L8 => PixBuffer::from_raw(width, height, ColorModel::Gray8, pixels),
        PixelFormat::L16 => PixBuffer::from_raw(width, height, ColorModel::Gray16, pixels),
        PixelFormat::RGB24 => {
            let mut data = Vec::with_capacity(width as usize * height as usize * 4);
            for px in pixels.chunks_exact(3) {
                data.extend_from_slice(px);
                data.push(255);
            }
            PixBuffer::from_raw(width, height, ColorModel::Rgba8, data)
        }
        PixelFormat::CMYK32 => PixBuffer::from_raw(width, height, ColorModel::Cmyk, pixels),
    }
    .map_err(IoError::Core)
}
