//! JSON scene descriptions.
//!
//! Vectors are plain `[f32; 3]` arrays so the file format does not depend on
//! glam's serde representation.

use std::path::Path;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::{Material, Plane, SceneError, SceneResult, Sphere, World};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDescription {
    #[serde(default)]
    pub emit: [f32; 3],
    #[serde(default)]
    pub reflect: [f32; 3],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaneDescription {
    pub normal: [f32; 3],
    #[serde(default)]
    pub distance: f32,
    pub material: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SphereDescription {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: usize,
}

/// Serializable form of a [`World`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    pub materials: Vec<MaterialDescription>,
    #[serde(default)]
    pub planes: Vec<PlaneDescription>,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert to a validated world.
    pub fn into_world(self) -> SceneResult<World> {
        let materials = self
            .materials
            .into_iter()
            .map(|m| Material::new(Vec3::from_array(m.emit), Vec3::from_array(m.reflect)))
            .collect();
        let planes = self
            .planes
            .into_iter()
            .map(|p| Plane::new(Vec3::from_array(p.normal), p.distance, p.material))
            .collect();
        let spheres = self
            .spheres
            .into_iter()
            .map(|s| Sphere::new(Vec3::from_array(s.center), s.radius, s.material))
            .collect();

        let world = World::new(materials, planes, spheres);
        world.validate()?;
        Ok(world)
    }
}

impl From<&World> for SceneDescription {
    fn from(world: &World) -> Self {
        Self {
            materials: world
                .materials()
                .iter()
                .map(|m| MaterialDescription {
                    emit: m.emit_color.to_array(),
                    reflect: m.reflect_color.to_array(),
                })
                .collect(),
            planes: world
                .planes()
                .iter()
                .map(|p| PlaneDescription {
                    normal: p.normal.to_array(),
                    distance: p.distance,
                    material: p.material,
                })
                .collect(),
            spheres: world
                .spheres()
                .iter()
                .map(|s| SphereDescription {
                    center: s.center.to_array(),
                    radius: s.radius,
                    material: s.material,
                })
                .collect(),
        }
    }
}

/// Load and validate a scene file.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<World> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| SceneError::Io(format!("{}: {e}", path.display())))?;
    let world = SceneDescription::from_json(&text)?.into_world()?;
    log::info!(
        "Loaded scene {}: {} materials, {} planes, {} spheres",
        path.display(),
        world.materials().len(),
        world.planes().len(),
        world.spheres().len()
    );
    Ok(world)
}
