//! Scene types for Lumen.
//!
//! A `World` is built once, validated by whoever loads it, and then shared
//! read-only by every pixel of a render.

use lumen_math::Vec3;
use thiserror::Error;

/// Index of the material returned when a ray leaves the scene.
pub const ENVIRONMENT_MATERIAL: usize = 0;

/// How far a plane normal may stray from unit length before validation fails.
const UNIT_NORMAL_TOLERANCE: f32 = 1e-3;

/// Errors reported by scene validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene defines no materials; material 0 (environment) is required")]
    MissingEnvironment,

    #[error("{kind} {index} references material {material}, but only {count} materials exist")]
    InvalidMaterial {
        kind: &'static str,
        index: usize,
        material: usize,
        count: usize,
    },

    #[error("Plane {index} normal has length {length}, expected 1")]
    NonUnitNormal { index: usize, length: f32 },

    #[error("Sphere {index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Failed to read scene file: {0}")]
    Io(String),

    #[error("Failed to parse scene description: {0}")]
    Parse(String),

    #[error("Unknown scene preset: {0}")]
    UnknownPreset(String),
}

impl From<serde_json::Error> for SceneError {
    fn from(error: serde_json::Error) -> Self {
        SceneError::Parse(error.to_string())
    }
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Surface response to light.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Material {
    /// Light emitted by the surface (linear RGB)
    pub emit_color: Vec3,

    /// Fraction of incoming light passed on to the next bounce
    pub reflect_color: Vec3,
}

impl Material {
    pub const fn new(emit_color: Vec3, reflect_color: Vec3) -> Self {
        Self {
            emit_color,
            reflect_color,
        }
    }

    /// A material that only emits.
    pub const fn emissive(emit_color: Vec3) -> Self {
        Self::new(emit_color, Vec3::ZERO)
    }

    /// A material that only reflects.
    pub const fn reflective(reflect_color: Vec3) -> Self {
        Self::new(Vec3::ZERO, reflect_color)
    }
}

/// Infinite plane `dot(normal, p) + distance = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    pub distance: f32,
    pub material: usize,
}

impl Plane {
    pub const fn new(normal: Vec3, distance: f32, material: usize) -> Self {
        Self {
            normal,
            distance,
            material,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: usize,
}

impl Sphere {
    pub const fn new(center: Vec3, radius: f32, material: usize) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// Immutable collection of everything a render can hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    materials: Vec<Material>,
    planes: Vec<Plane>,
    spheres: Vec<Sphere>,
}

impl World {
    /// Build a world. No checks are made here; see [`World::validate`].
    pub fn new(materials: Vec<Material>, planes: Vec<Plane>, spheres: Vec<Sphere>) -> Self {
        Self {
            materials,
            planes,
            spheres,
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Material lookup used by the tracer.
    ///
    /// Panics if `index` is out of range; validated worlds never hit that.
    #[inline]
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    /// The material returned for rays that escape the scene.
    #[inline]
    pub fn environment(&self) -> &Material {
        self.material(ENVIRONMENT_MATERIAL)
    }

    /// Check the invariants the tracer relies on.
    pub fn validate(&self) -> SceneResult<()> {
        let count = self.materials.len();
        if count == 0 {
            return Err(SceneError::MissingEnvironment);
        }

        for (index, plane) in self.planes.iter().enumerate() {
            if plane.material >= count {
                return Err(SceneError::InvalidMaterial {
                    kind: "Plane",
                    index,
                    material: plane.material,
                    count,
                });
            }
            let length = plane.normal.length();
            if !((length - 1.0).abs() <= UNIT_NORMAL_TOLERANCE) {
                return Err(SceneError::NonUnitNormal { index, length });
            }
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if sphere.material >= count {
                return Err(SceneError::InvalidMaterial {
                    kind: "Sphere",
                    index,
                    material: sphere.material,
                    count,
                });
            }
            if !(sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
        }

        log::debug!(
            "Validated world: {} materials, {} planes, {} spheres",
            count,
            self.planes.len(),
            self.spheres.len()
        );
        Ok(())
    }
}
