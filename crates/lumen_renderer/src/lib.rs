//! Lumen Renderer - deterministic CPU ray tracing.
//!
//! One primary ray per pixel, a fixed bounce budget, and a bitmap writer.
//! Every render of the same world and camera produces the same bytes.

mod bmp;
mod camera;
mod hittable;
mod image_buffer;
mod renderer;
mod trace;

pub use bmp::{
    load_bmp, read_bmp, save_bmp, write_bmp, BitmapHeader, BmpError, BmpResult, HEADER_SIZE,
};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable};
pub use image_buffer::ImageBuffer;
pub use renderer::{render, render_parallel, render_pixel, render_with, RenderMode};
pub use trace::{ray_cast, MAX_BOUNCES, MIN_HIT_DISTANCE, TOLERANCE};

/// Re-export scene and math types used in the public API
pub use lumen_core::{Material, Plane, Sphere, World};
pub use lumen_math::{Color, Interval, Ray, Vec3, Vec4};
