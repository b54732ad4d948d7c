//! Image decoding and encoding at the edge of the noise pipeline.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use grainy_core::{DimensionError, PixelBuffer};
use image::codecs::jpeg::JpegEncoder;

/// Load an image from disk as 8-bit RGB.
///
/// Any format the `image` crate can decode is accepted. Alpha and extra
/// precision are dropped; color profiles and metadata are not carried over.
pub fn load_image(path: &Path) -> Result<PixelBuffer, ImageIoError> {
    let rgb = image::open(path).map_err(ImageIoError::Decode)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(PixelBuffer::from_rgb(width, height, rgb.into_raw())?)
}

/// Encode `buffer` to `path`. The format follows the file extension.
///
/// `jpeg_quality` (1-100) applies to `.jpg`/`.jpeg` outputs only; other
/// formats use the encoder defaults.
pub fn save_image(path: &Path, buffer: &PixelBuffer, jpeg_quality: Option<u8>) -> Result<(), ImageIoError> {
    let rgb = image::RgbImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .ok_or(ImageIoError::Shape(DimensionError::BufferLength {
            expected: buffer.pixel_count() * 3,
            actual: buffer.as_bytes().len(),
        }))?;

    match jpeg_quality {
        Some(quality) if is_jpeg(path) => {
            let writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(writer, quality)
                .encode_image(&rgb)
                .map_err(ImageIoError::Encode)
        }
        _ => rgb.save(path).map_err(ImageIoError::Encode),
    }
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
}

/// Errors that can occur while reading or writing images.
#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
    #[error("unusable image shape: {0}")]
    Shape(#[from] DimensionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
