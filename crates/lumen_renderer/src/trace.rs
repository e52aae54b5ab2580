//! Path accumulation.
//!
//! Each bounce follows the surface normal instead of a sampled or mirrored
//! direction, so the result is fully deterministic for a given world and ray.

use lumen_core::World;
use lumen_math::{Color, Interval, Ray};

use crate::hittable::Hittable;

/// Maximum number of intersect/accumulate steps per primary ray.
pub const MAX_BOUNCES: u32 = 8;

/// Hits closer than this are ignored to avoid re-hitting the surface a
/// bounce just left.
pub const MIN_HIT_DISTANCE: f32 = 0.001;

/// Parallel-ray and discriminant cutoff for the closed-form hit tests.
pub const TOLERANCE: f32 = 0.0001;

/// Compute the linear color seen along `ray`.
///
/// Emission is weighted by the running attenuation. A miss adds the
/// environment material's emission and stops; running out of bounces stops
/// with whatever has been gathered.
pub fn ray_cast(world: &World, ray: Ray) -> Color {
    let mut final_color = Color::ZERO;
    let mut attenuation = Color::ONE;
    let mut ray = ray;

    for _ in 0..MAX_BOUNCES {
        match world.hit(&ray, Interval::new(MIN_HIT_DISTANCE, f32::MAX)) {
            Some(rec) => {
                let material = world.material(rec.material);
                final_color += attenuation * material.emit_color;
                attenuation *= material.reflect_color;

                ray = Ray::new(rec.point, rec.normal);
            }
            None => {
                final_color += attenuation * world.environment().emit_color;
                break;
            }
        }
    }

    final_color
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{presets, Material, Plane, Sphere};
    use lumen_math::Vec3;

    const SKY: Vec3 = Vec3::new(0.3, 0.4, 0.5);

    #[test]
    fn test_miss_returns_environment() {
        let world = presets::raytest();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 10.0), Vec3::Y);
        assert_eq!(ray_cast(&world, ray), SKY);
    }

    #[test]
    fn test_empty_world_returns_environment() {
        let world = presets::empty();
        assert_eq!(ray_cast(&world, Ray::default()), SKY);
    }

    #[test]
    fn test_black_sphere_absorbs_everything() {
        let world = World::new(
            vec![Material::emissive(SKY), Material::default()],
            vec![],
            vec![Sphere::new(Vec3::ZERO, 1.0, 1)],
        );
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(ray_cast(&world, ray), Color::ZERO);
    }

    #[test]
    fn test_parallel_plane_is_ignored() {
        let world = World::new(
            vec![Material::emissive(SKY), Material::emissive(Vec3::X)],
            vec![Plane::new(Vec3::Y, 0.0, 1)],
            vec![],
        );
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
        assert_eq!(ray_cast(&world, ray), SKY);
    }

    #[test]
    fn test_degenerate_geometry_contributes_nothing() {
        let world = World::new(
            vec![Material::emissive(SKY), Material::emissive(Vec3::X)],
            vec![Plane::new(Vec3::ZERO, 0.0, 1)],
            vec![Sphere::new(Vec3::new(0.0, 0.0, -3.0), 0.0, 1)],
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(ray_cast(&world, ray), SKY);
    }

    #[test]
    fn test_single_bounce_attenuates_environment() {
        let world = presets::raytest();
        // Straight down onto the ground plane, then straight up into the sky
        let ray = Ray::new(Vec3::new(5.0, 1.0, 5.0), Vec3::NEG_Y);
        assert_eq!(ray_cast(&world, ray), SKY * 0.5);
    }

    #[test]
    fn test_sphere_bounce_tints_environment() {
        let world = presets::raytest();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let color = ray_cast(&world, ray);
        let expected = Vec3::new(0.7, 0.5, 0.3) * SKY;
        assert!((color - expected).length() < 1e-6, "{color:?}");
    }

    #[test]
    fn test_bounce_budget_truncates() {
        // Two planes facing each other trap the ray between y = 0 and y = 1
        let glow = Material::new(Vec3::new(0.1, 0.0, 0.0), Vec3::ONE);
        let world = World::new(
            vec![Material::emissive(Vec3::ONE), glow],
            vec![
                Plane::new(Vec3::Y, 0.0, 1),
                Plane::new(Vec3::NEG_Y, 1.0, 1),
            ],
            vec![],
        );
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::Y);
        let color = ray_cast(&world, ray);

        // One emission per bounce and no environment term
        assert!((color.x - 0.1 * MAX_BOUNCES as f32).abs() < 1e-5, "{color:?}");
        assert_eq!(color.y, 0.0);
        assert_eq!(color.z, 0.0);
    }

    #[test]
    fn test_ray_cast_is_deterministic() {
        let world = presets::raytest();
        let ray = Ray::new(Vec3::new(0.3, 1.0, 10.0), Vec3::new(-0.03, -0.12, -1.0).normalize());
        assert_eq!(ray_cast(&world, ray), ray_cast(&world, ray));
    }
}
