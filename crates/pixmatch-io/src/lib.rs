//! pixmatch-io - image decoding and diff-image encoding for pixmatch
//!
//! This crate turns image files into the [`PixBuffer`] values the
//! comparison engine consumes, and writes rendered [`DiffImage`]s back
//! out. Formats are detected from magic numbers, never from file
//! extensions.

mod error;
mod format;

#[cfg(feature = "png-format")]
pub mod png;

#[cfg(feature = "gif-format")]
pub mod gif;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use pixmatch_core::{DiffImage, PixBuffer};

use std::fs::File;
#[cfg(feature = "png-format")]
use std::io::BufWriter;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Read an image from a file path
///
/// The format is automatically detected from the file contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixBuffer> {
    let file = File::open(path).map_err(IoError::Io)?;
    let mut reader = BufReader::new(file);

    let mut header = [0u8; 8];
    let bytes_read = reader.read(&mut header).map_err(IoError::Io)?;
    let format = detect_format_from_bytes(&header[..bytes_read])?;
    reader.seek(SeekFrom::Start(0)).map_err(IoError::Io)?;

    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "gif-format")]
        ImageFormat::Gif => gif::read_gif(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        other => Err(IoError::UnsupportedFormat(format!(
            "no reader available for {:?}",
            other
        ))),
    }
}

/// Read both images of a comparison pair, concurrently
pub fn read_pair<P: AsRef<Path> + Sync>(path_a: P, path_b: P) -> IoResult<(PixBuffer, PixBuffer)> {
    let (a, b) = rayon::join(|| read_image(&path_a), || read_image(&path_b));
    Ok((a?, b?))
}

/// Write a rendered diff image to a PNG file
#[cfg(feature = "png-format")]
pub fn write_diff_png<P: AsRef<Path>>(path: P, image: &DiffImage) -> IoResult<()> {
    let file = File::create(path).map_err(IoError::Io)?;
    png::write_png(image, BufWriter::new(file))
}
