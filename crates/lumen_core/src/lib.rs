//! Lumen Core - Scene model for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `World`, `Material`, `Plane`, `Sphere`
//! - **Scene files**: JSON scene descriptions via serde
//! - **Presets**: built-in scenes addressable by name
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::presets;
//!
//! let world = presets::build("raytest")?;
//! println!("{} planes, {} spheres", world.planes().len(), world.spheres().len());
//! ```

pub mod description;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use description::{load_scene, SceneDescription};
pub use scene::{Material, Plane, SceneError, SceneResult, Sphere, World, ENVIRONMENT_MATERIAL};
