//! Built-in scenes.

use lumen_math::Vec3;

use crate::scene::{Material, Plane, SceneError, SceneResult, Sphere, World};

/// Names accepted by [`build`].
pub const PRESET_NAMES: &[&str] = &["raytest", "empty"];

/// Build a preset by name (case-insensitive).
pub fn build(name: &str) -> SceneResult<World> {
    match name.to_ascii_lowercase().as_str() {
        "raytest" => Ok(raytest()),
        "empty" => Ok(empty()),
        _ => Err(SceneError::UnknownPreset(name.to_string())),
    }
}

/// Ground plane with a single sphere resting on it under a blue-grey sky.
pub fn raytest() -> World {
    let materials = vec![
        Material::emissive(Vec3::new(0.3, 0.4, 0.5)),
        Material::reflective(Vec3::new(0.5, 0.5, 0.5)),
        Material::reflective(Vec3::new(0.7, 0.5, 0.3)),
    ];
    let planes = vec![Plane::new(Vec3::Y, 0.0, 1)];
    let spheres = vec![Sphere::new(Vec3::ZERO, 1.0, 2)];

    World::new(materials, planes, spheres)
}

/// Sky only.
pub fn empty() -> World {
    World::new(vec![Material::emissive(Vec3::new(0.3, 0.4, 0.5))], vec![], vec![])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for name in PRESET_NAMES {
            let world = build(name).unwrap();
            assert_eq!(world.validate(), Ok(()), "preset {name}");
        }
    }

    #[test]
    fn test_build_case_insensitive() {
        assert_eq!(build("RayTest").unwrap(), raytest());
    }

    #[test]
    fn test_unknown_preset() {
        assert_eq!(
            build("cornell"),
            Err(SceneError::UnknownPreset("cornell".to_string()))
        );
    }
}
