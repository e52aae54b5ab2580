//! Packed pixel storage for render output.

use std::borrow::Cow;

use image::{Rgba, RgbaImage};
use lumen_math::unpack_bgra;

/// Fixed-size buffer of packed BGRA pixels.
///
/// Rows are stored bottom-up: row 0 is the bottom scanline, which is the
/// layout a positive-height bitmap expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with zero pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels. Returns `None` if the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, pixel: u32) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    /// Mutable rows, bottom row first. Rows are disjoint, so they can be
    /// handed to different threads.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, u32> {
        // chunks_exact_mut panics on 0; an empty buffer has no rows anyway
        let width = (self.width as usize).max(1);
        self.pixels.chunks_exact_mut(width)
    }

    /// Mutable access to the whole pixel slice.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Size of the pixel payload in bytes.
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<u32>()
    }

    /// Pixel payload as little-endian bytes (B, G, R, A per pixel).
    pub fn as_bytes(&self) -> Cow<'_, [u8]> {
        if cfg!(target_endian = "little") {
            Cow::Borrowed(bytemuck::cast_slice(&self.pixels))
        } else {
            Cow::Owned(self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect())
        }
    }

    /// Convert to a top-down RGBA image (for PNG and other formats).
    pub fn to_rgba_image(&self) -> RgbaImage {
        let height = self.height;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(unpack_bgra(self.get(x, height - 1 - y)))
        })
    }
}
