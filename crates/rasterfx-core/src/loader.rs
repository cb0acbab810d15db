//! Obtaining pixels from an image source, optionally downsampled.
//!
//! Sources decode at an integer sample ratio: a ratio of `n` keeps one
//! pixel out of every `n × n` block, so a large photo can be edited (or
//! previewed) at a fraction of its resolution.

use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::image::PixelBuffer;

/// Smallest power-of-two ratio that brings both dimensions strictly below
/// the requested size.
///
/// Returns 1 when either requested dimension is 0.
pub fn sample_size(src_width: u32, src_height: u32, req_width: u32, req_height: u32) -> u32 {
    if req_width == 0 || req_height == 0 {
        return 1;
    }
    let mut sample = 1_u32;
    while src_height / sample >= req_height || src_width / sample >= req_width {
        match sample.checked_mul(2) {
            Some(next) => sample = next,
            None => break,
        }
    }
    sample
}

/// Something that can (re)produce the pixels of an image.
pub trait ImageSource: std::fmt::Debug {
    /// Full-resolution `(width, height)` of the source.
    fn dimensions(&self) -> Result<(u32, u32), LoadError>;

    /// Decode at `sample` ratio (see [`PixelBuffer::downsample`]).
    fn decode(&self, sample: u32) -> Result<PixelBuffer, LoadError>;
}

/// An image file decoded with the `image` crate.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileSource {
    fn dimensions(&self) -> Result<(u32, u32), LoadError> {
        Ok(image::image_dimensions(&self.path)?)
    }

    fn decode(&self, sample: u32) -> Result<PixelBuffer, LoadError> {
        let rgba = image::open(&self.path)?.to_rgba8();
        let buffer = PixelBuffer::from(rgba).downsample(sample);
        if buffer.is_empty() {
            return Err(LoadError::EmptyImage);
        }
        tracing::info!(
            "decoded {} at 1/{} -> {}x{}",
            self.path.display(),
            sample,
            buffer.width(),
            buffer.height()
        );
        Ok(buffer)
    }
}

/// An already-decoded buffer acting as a source.
#[derive(Debug, Clone)]
pub struct MemorySource {
    buffer: PixelBuffer,
}

impl MemorySource {
    pub fn new(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }
}

impl ImageSource for MemorySource {
    fn dimensions(&self) -> Result<(u32, u32), LoadError> {
        Ok((self.buffer.width(), self.buffer.height()))
    }

    fn decode(&self, sample: u32) -> Result<PixelBuffer, LoadError> {
        let buffer = self.buffer.downsample(sample);
        if buffer.is_empty() {
            return Err(LoadError::EmptyImage);
        }
        Ok(buffer)
    }
}
