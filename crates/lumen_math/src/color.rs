//! Linear color helpers and 32-bit BGRA packing.

use crate::{Vec3, Vec4};

/// Color type alias (linear RGB, unclamped)
pub type Color = Vec3;

/// Scale a channel to `[0, 255]`, round, and keep the low byte.
///
/// Values above 1.0 wrap through the byte truncation, negative values and NaN
/// land on 0 because float-to-int casts saturate.
#[inline]
fn channel_to_byte(c: f32) -> u32 {
    ((c * 255.0 + 0.5) as u32) & 0xFF
}

/// Pack a linear RGBA color into a `u32` laid out as B, G, R, A from the
/// least significant byte up.
pub fn pack_bgra(color: Vec4) -> u32 {
    let r = channel_to_byte(color.x);
    let g = channel_to_byte(color.y);
    let b = channel_to_byte(color.z);
    let a = channel_to_byte(color.w);

    b | (g << 8) | (r << 16) | (a << 24)
}

/// Split a packed BGRA pixel back into `[r, g, b, a]` bytes.
pub fn unpack_bgra(pixel: u32) -> [u8; 4] {
    let [b, g, r, a] = pixel.to_le_bytes();
    [r, g, b, a]
}
