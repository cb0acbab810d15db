//! Raster representation for the effects engine.
//!
//! Pixels are packed 8-bit RGBA. Every effect reads and rewrites the whole
//! buffer in place; no operation changes the buffer's dimensions.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// One packed pixel. Channel order in memory is R, G, B, A.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Build a pixel from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque pixel.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same value on R, G and B, keeping `a`.
    pub const fn gray(value: u8, a: u8) -> Self {
        Self { r: value, g: value, b: value, a }
    }

    /// `[r, g, b]` as an array.
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Clamp a float channel into `[0, 255]` and truncate it.
///
/// NaN maps to 0.
pub(crate) fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

/// Width × height packed RGBA pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl PixelBuffer {
    /// A buffer of the given size filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Rgba8) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![fill; len],
        }
    }

    /// Wrap existing pixels. Returns `None` if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap raw RGBA bytes. Returns `None` on a length mismatch.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width as usize * height as usize * 4 {
            return None;
        }
        let pixels: Vec<Rgba8> = bytemuck::cast_slice(bytes).to_vec();
        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, px: Rgba8) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = px;
        }
    }

    /// Raw RGBA bytes, 4 per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy every pixel of `other` into this buffer.
    ///
    /// Returns `false` and leaves `self` untouched if the dimensions differ.
    pub fn copy_from(&mut self, other: &PixelBuffer) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        self.pixels.copy_from_slice(&other.pixels);
        true
    }

    /// Apply `f` to every pixel in place.
    pub fn map_in_place(&mut self, mut f: impl FnMut(Rgba8) -> Rgba8) {
        for px in &mut self.pixels {
            *px = f(*px);
        }
    }

    /// Nearest-neighbour downsample by an integer ratio.
    ///
    /// Output is `(width / ratio, height / ratio)`; each output pixel is the
    /// source pixel at `(x * ratio, y * ratio)`. A ratio of 0 or 1 clones.
    pub fn downsample(&self, ratio: u32) -> PixelBuffer {
        if ratio <= 1 {
            return self.clone();
        }
        let width = self.width / ratio;
        let height = self.height / ratio;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(self.pixels[self.index(x * ratio, y * ratio)]);
            }
        }
        PixelBuffer {
            width,
            height,
            pixels,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels: Vec<Rgba8> = bytemuck::cast_slice(img.as_raw()).to_vec();
        Self {
            width,
            height,
            pixels,
        }
    }
}

impl From<&PixelBuffer> for image::RgbaImage {
    fn from(buffer: &PixelBuffer) -> Self {
        let raw = buffer.as_bytes().to_vec();
        // Length is width * height * 4 by construction.
        image::RgbaImage::from_raw(buffer.width, buffer.height, raw)
            .unwrap_or_else(|| image::RgbaImage::new(buffer.width, buffer.height))
    }
}
