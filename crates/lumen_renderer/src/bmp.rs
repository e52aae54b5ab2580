//! Uncompressed 32-bit bitmap encoding.
//!
//! Layout is the classic 14-byte file header followed by the 40-byte
//! `BITMAPINFOHEADER`, all little-endian, then `width * height` BGRA pixels.
//! Height is written positive, so the first stored row is the bottom one.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::ImageBuffer;

/// Size of the file header plus info header in bytes.
pub const HEADER_SIZE: usize = 54;

/// "BM" read as a little-endian u16.
const FILE_TYPE: u16 = 0x4D42;
const INFO_HEADER_SIZE: u32 = 40;
const BITS_PER_PIXEL: u16 = 32;
const BI_RGB: u32 = 0;

/// Errors that can occur while writing or reading bitmaps.
#[derive(Error, Debug)]
pub enum BmpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a bitmap file (signature {0:#06x})")]
    InvalidSignature(u16),

    #[error("Unsupported bitmap format: {bits_per_pixel} bpp, compression {compression}")]
    UnsupportedFormat { bits_per_pixel: u16, compression: u32 },

    #[error("Image dimensions {width}x{height} do not fit a bitmap")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Header declares a {declared} byte file, dimensions imply {expected}")]
    SizeMismatch { declared: u32, expected: u64 },
}

/// Result type for bitmap operations.
pub type BmpResult<T> = Result<T, BmpError>;

/// Bitmap file header and info header, field for field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    pub file_type: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub bitmap_offset: u32,
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub size_of_bitmap: u32,
    pub horizontal_resolution: i32,
    pub vertical_resolution: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BitmapHeader {
    /// Header for a 32-bpp uncompressed image of the given size.
    pub fn for_image(width: u32, height: u32) -> BmpResult<Self> {
        let invalid = || BmpError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        };
        let payload = (width as u64) * (height as u64) * 4;
        let file_size = u32::try_from(HEADER_SIZE as u64 + payload).map_err(|_| invalid())?;

        Ok(Self {
            file_type: FILE_TYPE,
            file_size,
            reserved1: 0,
            reserved2: 0,
            bitmap_offset: HEADER_SIZE as u32,
            size: INFO_HEADER_SIZE,
            width: i32::try_from(width).map_err(|_| invalid())?,
            height: i32::try_from(height).map_err(|_| invalid())?,
            planes: 1,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: BI_RGB,
            size_of_bitmap: 0,
            horizontal_resolution: 0,
            vertical_resolution: 0,
            colors_used: 0,
            colors_important: 0,
        })
    }

    /// Serialize to the on-disk byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut w = FieldWriter { buf: &mut out, pos: 0 };

        w.put(&self.file_type.to_le_bytes());
        w.put(&self.file_size.to_le_bytes());
        w.put(&self.reserved1.to_le_bytes());
        w.put(&self.reserved2.to_le_bytes());
        w.put(&self.bitmap_offset.to_le_bytes());
        w.put(&self.size.to_le_bytes());
        w.put(&self.width.to_le_bytes());
        w.put(&self.height.to_le_bytes());
        w.put(&self.planes.to_le_bytes());
        w.put(&self.bits_per_pixel.to_le_bytes());
        w.put(&self.compression.to_le_bytes());
        w.put(&self.size_of_bitmap.to_le_bytes());
        w.put(&self.horizontal_resolution.to_le_bytes());
        w.put(&self.vertical_resolution.to_le_bytes());
        w.put(&self.colors_used.to_le_bytes());
        w.put(&self.colors_important.to_le_bytes());
        debug_assert_eq!(w.pos, HEADER_SIZE);

        out
    }

    /// Parse the on-disk byte layout. No validation beyond field extraction.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let mut r = FieldReader { buf: bytes, pos: 0 };

        Self {
            file_type: r.u16(),
            file_size: r.u32(),
            reserved1: r.u16(),
            reserved2: r.u16(),
            bitmap_offset: r.u32(),
            size: r.u32(),
            width: r.i32(),
            height: r.i32(),
            planes: r.u16(),
            bits_per_pixel: r.u16(),
            compression: r.u32(),
            size_of_bitmap: r.u32(),
            horizontal_resolution: r.i32(),
            vertical_resolution: r.i32(),
            colors_used: r.u32(),
            colors_important: r.u32(),
        }
    }
}

struct FieldWriter<'a> {
    buf: &'a mut [u8; HEADER_SIZE],
    pos: usize,
}

impl FieldWriter<'_> {
    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }
}

struct FieldReader<'a> {
    buf: &'a [u8; HEADER_SIZE],
    pos: usize,
}

impl FieldReader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }
}

/// Write `image` as a bitmap to `writer`.
///
/// Either the whole header and payload are written or an error is returned.
pub fn write_bmp<W: Write>(image: &ImageBuffer, mut writer: W) -> BmpResult<()> {
    let header = BitmapHeader::for_image(image.width(), image.height())?;
    writer.write_all(&header.to_bytes())?;
    writer.write_all(&image.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write `image` to a bitmap file at `path`.
///
/// A failed write may leave a partial file behind; it is not removed.
pub fn save_bmp(image: &ImageBuffer, path: impl AsRef<Path>) -> BmpResult<()> {
    let path = path.as_ref();
    let result = File::create(path)
        .map_err(BmpError::from)
        .and_then(|file| write_bmp(image, BufWriter::new(file)));

    match &result {
        Ok(()) => log::info!(
            "Wrote {}x{} bitmap to {}",
            image.width(),
            image.height(),
            path.display()
        ),
        Err(e) => log::error!("Failed to write image data to {}: {e}", path.display()),
    }
    result
}

/// Read a 32-bpp uncompressed bitmap, as written by [`write_bmp`].
///
/// Top-down files (negative height) are not supported.
pub fn read_bmp<R: Read>(mut reader: R) -> BmpResult<(BitmapHeader, ImageBuffer)> {
    let mut bytes = [0u8; HEADER_SIZE];
    reader.read_exact(&mut bytes)?;
    let header = BitmapHeader::from_bytes(&bytes);

    if header.file_type != FILE_TYPE {
        return Err(BmpError::InvalidSignature(header.file_type));
    }
    if header.bits_per_pixel != BITS_PER_PIXEL || header.compression != BI_RGB {
        return Err(BmpError::UnsupportedFormat {
            bits_per_pixel: header.bits_per_pixel,
            compression: header.compression,
        });
    }
    let (width, height) = match (u32::try_from(header.width), u32::try_from(header.height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(BmpError::InvalidDimensions {
                width: header.width as i64,
                height: header.height as i64,
            })
        }
    };

    // Nothing is allocated until the declared size agrees with the dimensions
    let payload_len = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|n| n.checked_mul(4))
        .filter(|&n| n <= u64::from(u32::MAX))
        .ok_or(BmpError::InvalidDimensions {
            width: header.width as i64,
            height: header.height as i64,
        })?;
    let data_offset = u64::from(header.bitmap_offset).max(HEADER_SIZE as u64);
    let expected = data_offset + payload_len;
    if expected > u64::from(u32::MAX) || expected != u64::from(header.file_size) {
        return Err(BmpError::SizeMismatch {
            declared: header.file_size,
            expected,
        });
    }

    // Skip anything between the headers and the pixel data
    let gap = data_offset - HEADER_SIZE as u64;
    std::io::copy(&mut (&mut reader).take(gap), &mut std::io::sink())?;

    let mut payload = vec![0u8; payload_len as usize];
    reader.read_exact(&mut payload)?;

    let pixels = payload
        .chunks_exact(4)
        .map(|p| u32::from_le_bytes([p[0], p[1], p[2], p[3]]))
        .collect();
    let image =
        ImageBuffer::from_pixels(width, height, pixels).ok_or(BmpError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        })?;

    Ok((header, image))
}

/// Read a bitmap file from `path`.
pub fn load_bmp(path: impl AsRef<Path>) -> BmpResult<(BitmapHeader, ImageBuffer)> {
    let file = File::open(path)?;
    read_bmp(std::io::BufReader::new(file))
}
