//! Camera and film mapping for primary ray generation.

use lumen_math::{Ray, Vec3};

/// Up direction used to orient the camera basis.
const WORLD_UP: Vec3 = Vec3::Y;

/// Up direction used when the view direction is parallel to `WORLD_UP`.
const FALLBACK_UP: Vec3 = Vec3::Z;

/// Basis vectors shorter than this are treated as degenerate.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Pinhole camera with a film plane one unit in front of it.
///
/// The larger film dimension is 1.0 world units; the smaller one follows the
/// image aspect ratio. Pixel (0, 0) maps to the bottom-left film corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Image settings
    width: u32,
    height: u32,

    // Camera positioning
    position: Vec3,
    target: Vec3,

    // Cached computed values
    x_axis: Vec3,
    y_axis: Vec3,
    z_axis: Vec3,
    film_center: Vec3,
    half_film_width: f32,
    half_film_height: f32,
}

impl Camera {
    /// Distance from the camera position to the film center.
    pub const FILM_DISTANCE: f32 = 1.0;

    /// Build a camera at `position` looking toward `target` for a
    /// `width x height` image.
    ///
    /// `position` must differ from `target` and both dimensions must be
    /// non-zero; otherwise the resulting rays contain NaNs.
    pub fn look_at(position: Vec3, target: Vec3, width: u32, height: u32) -> Self {
        let z_axis = (position - target).normalize();

        let mut right = WORLD_UP.cross(z_axis);
        if right.length_squared() < DEGENERATE_EPSILON {
            log::warn!(
                "Camera at {position} looks along world up; using {FALLBACK_UP} as up vector"
            );
            right = FALLBACK_UP.cross(z_axis);
        }
        let x_axis = right.normalize();
        let y_axis = z_axis.cross(x_axis).normalize();

        let mut film_width = 1.0;
        let mut film_height = 1.0;
        if width > height {
            film_height = film_width * (height as f32 / width as f32);
        } else {
            film_width = film_height * (width as f32 / height as f32);
        }

        let film_center = position - Self::FILM_DISTANCE * z_axis;

        log::debug!(
            "Camera {width}x{height}: film {film_width}x{film_height}, center {film_center}"
        );

        Self {
            width,
            height,
            position,
            target,
            x_axis,
            y_axis,
            z_axis,
            film_center,
            half_film_width: 0.5 * film_width,
            half_film_height: 0.5 * film_height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Camera basis as (right, up, backward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.x_axis, self.y_axis, self.z_axis)
    }

    /// Full film size in world units.
    pub fn film_size(&self) -> (f32, f32) {
        (2.0 * self.half_film_width, 2.0 * self.half_film_height)
    }

    /// Primary ray through pixel (x, y).
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let film_x = x as f32 / self.width as f32 * 2.0 - 1.0;
        let film_y = y as f32 / self.height as f32 * 2.0 - 1.0;

        let film_point = self.film_center
            + (film_x * self.half_film_width) * self.x_axis
            + (film_y * self.half_film_height) * self.y_axis;

        Ray::new(self.position, (film_point - self.position).normalize())
    }

    /// All primary rays in raster order (row 0 first).
    pub fn rays(&self) -> impl Iterator<Item = Ray> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| self.ray_for_pixel(x, y)))
    }
}
