//! Hittable trait and HitRecord for ray-primitive intersection.
//!
//! Planes and spheres are solved in closed form. `World` scans planes first,
//! then spheres, narrowing the accepted interval after every hit, so the
//! nearest hit wins and exact ties go to whichever primitive came first.

use lumen_core::{Plane, Sphere, World};
use lumen_math::{Interval, Ray, Vec3};

use crate::trace::TOLERANCE;

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at the hit point (unit length, not flipped toward the ray)
    pub normal: Vec3,
    /// Index into `World::materials`
    pub material: usize,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction);
        // Parallel to the plane
        if denom >= -TOLERANCE && denom <= TOLERANCE {
            return None;
        }

        let t = (-self.distance - self.normal.dot(ray.origin)) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord {
            t,
            point: ray.at(t),
            normal: self.normal,
            material: self.material,
        })
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let relative_origin = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(relative_origin);
        let c = relative_origin.dot(relative_origin) - self.radius * self.radius;

        // a > 0 for any non-zero direction
        let denom = 2.0 * a;
        let root_term = (b * b - 4.0 * a * c).sqrt();
        // NaN (negative discriminant) fails this comparison too
        if !(root_term > TOLERANCE) {
            return None;
        }

        let t_far = (-b + root_term) / denom;
        let t_near = (-b - root_term) / denom;

        // Prefer the near root unless it is behind the minimum hit distance
        let t = if t_near > ray_t.min && t_near < t_far {
            t_near
        } else {
            t_far
        };
        if !ray_t.surrounds(t) {
            return None;
        }

        let point = ray.at(t);
        Some(HitRecord {
            t,
            point,
            normal: (point - self.center).normalize(),
            material: self.material,
        })
    }
}

impl Hittable for World {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut interval = ray_t;

        let planes = self.planes().iter().map(|p| p as &dyn Hittable);
        let spheres = self.spheres().iter().map(|s| s as &dyn Hittable);

        for object in planes.chain(spheres) {
            if let Some(rec) = object.hit(ray, interval) {
                interval = interval.with_max(rec.t);
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::MIN_HIT_DISTANCE;
    use lumen_core::Material;

    fn range() -> Interval {
        Interval::new(MIN_HIT_DISTANCE, f32::MAX)
    }

    fn ground() -> Plane {
        Plane::new(Vec3::Y, 0.0, 1)
    }

    #[test]
    fn test_plane_hit() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = ground().hit(&ray, range()).unwrap();

        assert_eq!(rec.t, 1.0);
        assert_eq!(rec.point, Vec3::ZERO);
        assert_eq!(rec.normal, Vec3::Y);
        assert_eq!(rec.material, 1);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(ground().hit(&ray, range()).is_none());

        // Within tolerance of parallel still counts as parallel
        let grazing = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -0.00005, 0.0));
        assert!(ground().hit(&grazing, range()).is_none());
    }

    #[test]
    fn test_plane_behind_origin_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(ground().hit(&ray, range()).is_none());
    }

    #[test]
    fn test_plane_offset_distance() {
        // y = 2 written as dot((0,1,0), p) - 2 = 0
        let plane = Plane::new(Vec3::Y, -2.0, 0);
        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::NEG_Y);
        let rec = plane.hit(&ray, range()).unwrap();
        assert_eq!(rec.t, 3.0);
        assert_eq!(rec.point, Vec3::new(3.0, 2.0, 0.0));
    }

    #[test]
    fn test_plane_respects_closest_so_far() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        assert!(ground().hit(&ray, Interval::new(MIN_HIT_DISTANCE, 0.5)).is_none());
    }

    #[test]
    fn test_sphere_hit_near_side() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 2);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let rec = sphere.hit(&ray, range()).unwrap();

        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert_eq!(rec.material, 2);
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 2);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = sphere.hit(&ray, range()).unwrap();

        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 2);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Y);
        assert!(sphere.hit(&ray, range()).is_none());

        // Entirely behind the origin
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(sphere.hit(&ray, range()).is_none());
    }

    #[test]
    fn test_sphere_tangent_ray_misses() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 2);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z);
        assert!(sphere.hit(&ray, range()).is_none());
    }

    #[test]
    fn test_zero_normal_plane_never_hits() {
        let plane = Plane::new(Vec3::ZERO, 0.0, 1);
        for direction in [Vec3::NEG_Y, Vec3::X, Vec3::new(0.3, -0.9, 0.1).normalize()] {
            let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), direction);
            assert!(plane.hit(&ray, range()).is_none(), "{direction:?}");
        }
    }

    #[test]
    fn test_zero_radius_sphere_never_hits() {
        let sphere = Sphere::new(Vec3::ZERO, 0.0, 2);

        // Straight through the center: the discriminant is exactly zero
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(sphere.hit(&ray, range()).is_none());

        let ray = Ray::new(Vec3::new(0.0, 0.5, 5.0), Vec3::NEG_Z);
        assert!(sphere.hit(&ray, range()).is_none());
    }

    #[test]
    fn test_negative_radius_hits_like_its_magnitude() {
        let negative = Sphere::new(Vec3::ZERO, -1.0, 2);
        let positive = Sphere::new(Vec3::ZERO, 1.0, 2);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        assert_eq!(negative.hit(&ray, range()), positive.hit(&ray, range()));
    }

    #[test]
    fn test_world_skips_degenerate_primitives() {
        let world = World::new(
            vec![Material::default(); 3],
            vec![Plane::new(Vec3::ZERO, 0.0, 1)],
            vec![
                Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.0, 1),
                Sphere::new(Vec3::new(0.0, 0.0, -6.0), 1.0, 2),
            ],
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, range()).unwrap();

        assert_eq!(rec.material, 2);
        assert!((rec.t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_world_selects_nearest() {
        let world = World::new(
            vec![Material::default(); 3],
            vec![],
            vec![
                Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, 1),
                Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, 2),
            ],
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, range()).unwrap();

        assert_eq!(rec.material, 2);
        assert!((rec.t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_world_tie_goes_to_first_primitive() {
        // Sphere resting on the plane, touching it exactly at the origin
        let world = World::new(
            vec![Material::default(); 3],
            vec![Plane::new(Vec3::Y, 0.0, 1)],
            vec![Sphere::new(Vec3::new(0.0, -1.0, 0.0), 1.0, 2)],
        );
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = world.hit(&ray, range()).unwrap();

        assert_eq!(rec.t, 1.0);
        assert_eq!(rec.material, 1);
    }

    #[test]
    fn test_world_miss() {
        let world = World::new(vec![Material::default()], vec![ground()], vec![]);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
        assert_eq!(world.hit(&ray, range()), None);
    }
}
