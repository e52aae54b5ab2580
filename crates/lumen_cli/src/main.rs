//! Lumen command line renderer.
//!
//! Usage: `lumen [config.json]`. Without a config the reference scene is
//! rendered to `raytest.bmp`. Set `RUST_LOG` to change verbosity.

mod config;

use std::path::Path;

use anyhow::{Context, Result};
use lumen_renderer::{render_with, save_bmp, ImageBuffer};

use config::{OutputFormat, RenderConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => RenderConfig::load(Path::new(&path))?,
        None => RenderConfig::default(),
    };
    config.validate()?;

    let world = config.build_world()?;
    let camera = config.build_camera();
    let image = render_with(&world, &camera, config.mode());

    write_image(&image, &config)?;
    log::info!("Done.");
    Ok(())
}

fn write_image(image: &ImageBuffer, config: &RenderConfig) -> Result<()> {
    let path = &config.output_path;
    match config.output_format() {
        OutputFormat::Bmp => save_bmp(image, path)
            .with_context(|| format!("failed to write {}", path.display())),
        OutputFormat::Other => {
            image
                .to_rgba_image()
                .save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
            Ok(())
        }
    }
}
