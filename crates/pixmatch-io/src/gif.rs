//! GIF image format support
//!
//! Reads single-frame GIF images as paletted buffers. The frame's local
//! palette wins over the global one, and a transparency index maps to a
//! fully transparent palette entry. Animated GIFs (multiple frames) are
//! rejected. GIF writing is not supported; diff images encode as PNG.

use crate::{IoError, IoResult};
use gif::{ColorOutput, DecodeOptions};
use pixmatch_core::{ColorModel, PixBuffer, Rgba};
use std::io::Read;

/// Read a GIF image
///
/// Reads the first frame of a GIF image. Animated GIFs (multiple frames)
/// will return an error.
pub fn read_gif<R: Read>(reader: R) -> IoResult<PixBuffer> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);

    let mut decoder = options
        .read_info(reader)
        .map_err(|e| IoError::DecodeError(format!("GIF decode error: {}", e)))?;

    let frame = decoder
        .read_next_frame()
        .map_err(|e| IoError::DecodeError(format!("GIF frame error: {}", e)))?
        .ok_or_else(|| IoError::InvalidData("no frames in GIF".to_string()))?
        .clone();

    if decoder
        .read_next_frame()
        .map_err(|e| IoError::DecodeError(format!("GIF frame error: {}", e)))?
        .is_some()
    {
        return Err(IoError::UnsupportedFormat(
            "animated GIF not supported".to_string(),
        ));
    }

    // Get palette - prefer local, fall back to global
    let palette: &[u8] = if let Some(ref local_palette) = frame.palette {
        local_palette
    } else if let Some(global_palette) = decoder.global_palette() {
        global_palette
    } else {
        return Err(IoError::InvalidData("GIF has no color map".to_string()));
    };

    let ncolors = palette.len() / 3;
    if ncolors == 0 || ncolors > 256 {
        return Err(IoError::InvalidData(format!(
            "invalid palette size: {}",
            ncolors
        )));
    }

    let mut colors = Vec::with_capacity(ncolors);
    for chunk in palette.chunks(3) {
        if chunk.len() == 3 {
            colors.push(Rgba::rgb(chunk[0], chunk[1], chunk[2]));
        }
    }
    if let Some(transparent) = frame.transparent
        && let Some(color) = colors.get_mut(transparent as usize)
    {
        color.a = 0;
    }

    let width = u32::from(frame.width);
    let height = u32::from(frame.height);
    let data = frame.buffer.into_owned();

    PixBuffer::from_raw(width, height, ColorModel::Paletted, data)
        .and_then(|pix| pix.with_palette(colors))
        .map_err(IoError::Core)
}
