//! Pixel buffer representation for the noise pipeline.

use crate::error::DimensionError;

/// Number of interleaved channels the compositor understands (RGB).
pub const RGB_CHANNELS: u32 = 3;

/// Row-major, interleaved 8-bit pixel data.
///
/// The buffer is always validated on construction, so `data.len()` equals
/// `width × height × channels` for every live value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw interleaved bytes, checking the shape.
    pub fn new(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self, DimensionError> {
        if width == 0 || height == 0 {
            return Err(DimensionError::ZeroSize { width, height });
        }
        if channels != RGB_CHANNELS {
            return Err(DimensionError::UnsupportedChannels(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(DimensionError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Convenience constructor for RGB data.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DimensionError> {
        Self::new(width, height, RGB_CHANNELS, data)
    }

    /// A buffer of the same shape as `self`, every byte set to zero.
    pub(crate) fn zeroed_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: vec![0; self.data.len()],
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> u32 {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGB triple of the pixel at scan index `index`.
    pub fn pixel(&self, index: usize) -> [u8; 3] {
        let start = index * self.channels as usize;
        [self.data[start], self.data[start + 1], self.data[start + 2]]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
