use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lumen_core::{load_scene, presets, World};
use lumen_math::Vec3;
use lumen_renderer::{Camera, RenderMode};
use serde::Deserialize;

/// Render job read from a JSON file. Every field is optional; the defaults
/// reproduce the reference render.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub output_path: PathBuf,
    pub camera_position: [f32; 3],
    pub look_target: [f32; 3],
    pub parallel: bool,
    /// Built-in scene name, used when `scene_file` is absent
    pub scene: String,
    pub scene_file: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            output_path: PathBuf::from("raytest.bmp"),
            camera_position: [0.0, 1.0, 10.0],
            look_target: [0.0, 0.0, 0.0],
            parallel: true,
            scene: "raytest".to_string(),
            scene_file: None,
        }
    }
}

/// Output encodings picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bmp,
    /// Anything the `image` crate can infer from the extension
    Other,
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid render config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("width and height must be positive");
        }
        if !is_finite(self.camera_position) || !is_finite(self.look_target) {
            bail!("camera vectors must contain finite values");
        }
        if (self.camera() - self.target()).length() < 1e-4 {
            bail!("cameraPosition must differ from lookTarget");
        }
        if self.scene_file.is_none() && self.scene.trim().is_empty() {
            bail!("scene must name a preset when sceneFile is not given");
        }
        Ok(())
    }

    pub fn camera(&self) -> Vec3 {
        Vec3::from_array(self.camera_position)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.look_target)
    }

    pub fn build_camera(&self) -> Camera {
        Camera::look_at(self.camera(), self.target(), self.width, self.height)
    }

    pub fn build_world(&self) -> Result<World> {
        match &self.scene_file {
            Some(path) => load_scene(path)
                .with_context(|| format!("failed to load scene {}", path.display())),
            None => presets::build(&self.scene).with_context(|| {
                format!("available presets: {}", presets::PRESET_NAMES.join(", "))
            }),
        }
    }

    pub fn mode(&self) -> RenderMode {
        if self.parallel {
            RenderMode::Parallel
        } else {
            RenderMode::Serial
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.output_path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bmp") => OutputFormat::Bmp,
            None => OutputFormat::Bmp,
            Some(_) => OutputFormat::Other,
        }
    }
}

fn is_finite(value: [f32; 3]) -> bool {
    value.iter().all(|v| v.is_finite())
}
