//! Render drivers.
//!
//! Both drivers write each pixel exactly once and read the world only, so the
//! parallel driver produces the same bytes as the serial one.

use std::time::Instant;

use lumen_core::World;
use lumen_math::pack_bgra;
use rayon::prelude::*;

use crate::{ray_cast, Camera, ImageBuffer};

/// How the pixel loop is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// One thread, raster order
    #[default]
    Serial,
    /// One rayon task per scanline
    Parallel,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Parallel => "parallel",
        }
    }
}

/// Trace and pack a single pixel.
#[inline]
pub fn render_pixel(world: &World, camera: &Camera, x: u32, y: u32) -> u32 {
    let color = ray_cast(world, camera.ray_for_pixel(x, y));
    pack_bgra(color.extend(1.0))
}

/// Render the entire scene on the calling thread.
pub fn render(world: &World, camera: &Camera) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.width(), camera.height());

    for (y, row) in image.rows_mut().enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = render_pixel(world, camera, x as u32, y as u32);
        }
    }

    image
}

/// Render the entire scene with scanlines distributed over the rayon pool.
pub fn render_parallel(world: &World, camera: &Camera) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.width(), camera.height());
    let width = camera.width() as usize;

    if width > 0 {
        image
            .pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = render_pixel(world, camera, x as u32, y as u32);
                }
            });
    }

    image
}

/// Render with the given mode and log timing.
pub fn render_with(world: &World, camera: &Camera, mode: RenderMode) -> ImageBuffer {
    log::info!(
        "Rendering {}x{} ({})",
        camera.width(),
        camera.height(),
        mode.as_str()
    );
    let start = Instant::now();

    let image = match mode {
        RenderMode::Serial => render(world, camera),
        RenderMode::Parallel => render_parallel(world, camera),
    };

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
