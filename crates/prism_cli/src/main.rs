//! Prism command-line renderer.
//!
//! ```text
//! prism <scene> <output.png> [--config settings.json] [--mesh model.obj] [--spot]
//! ```

mod scenes;

use anyhow::{bail, Context, Result};
use prism_math::Vec3;
use prism_tracer::{Camera, OctreeConfig, RenderConfig, Renderer, Scene};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use scenes::SceneOptions;

/// Camera placement, in degrees and world units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct CameraSettings {
    fov_y: f32,
    position: Vec3,
    target: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_y: 90.0,
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
        }
    }
}

/// Contents of the optional JSON settings file. Missing keys keep defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct Settings {
    render: RenderConfig,
    camera: CameraSettings,
    octree: OctreeConfig,
}

impl Settings {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }
}

struct Args {
    scene: String,
    output: PathBuf,
    config: Option<PathBuf>,
    mesh: Option<PathBuf>,
    spot: bool,
}

fn usage() -> String {
    format!(
        "Usage: prism <scene> <output.png> [--config settings.json] [--mesh model.obj] [--spot]\nScenes: {}",
        scenes::SCENE_NAMES.join(", ")
    )
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut mesh = None;
    let mut spot = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(args.next().context("--config needs a path")?.into()),
            "--mesh" => mesh = Some(args.next().context("--mesh needs a path")?.into()),
            "--spot" => spot = true,
            "-h" | "--help" => bail!(usage()),
            flag if flag.starts_with("--") => bail!("unknown option '{}'\n{}", flag, usage()),
            _ => positional.push(arg),
        }
    }

    let [scene, output]: [String; 2] = positional.try_into().map_err(|_| anyhow::anyhow!(usage()))?;

    Ok(Args {
        scene,
        output: output.into(),
        config,
        mesh,
        spot,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    log::info!("Starting Prism: scene '{}'", args.scene);

    let mut scene = Scene::new();
    let options = SceneOptions {
        mesh: args.mesh.clone(),
        spot: args.spot,
        octree: settings.octree,
    };
    scenes::build(&args.scene, &mut scene, &options)?;

    let render = settings.render;
    let camera = Camera::new(
        settings.camera.fov_y,
        settings.camera.position,
        settings.camera.target,
        render.width,
        render.height,
    );
    let mut renderer = Renderer::new(camera, render).context("Invalid render settings")?;
    renderer.render(&scene);

    renderer
        .output()
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["mesh", "out.png", "--mesh", "bunny.obj", "--spot"]).unwrap();

        assert_eq!(parsed.scene, "mesh");
        assert_eq!(parsed.output, PathBuf::from("out.png"));
        assert_eq!(parsed.mesh, Some(PathBuf::from("bunny.obj")));
        assert!(parsed.spot);
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["box"]).is_err());
        assert!(args(&["box", "out.png", "--config"]).is_err());
        assert!(args(&["box", "out.png", "--fast"]).is_err());
    }

    #[test]
    fn test_settings_partial_json() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "render": { "width": 320, "height": 180, "samples": 4 },
                "camera": { "fov_y": 60.0, "position": [0.0, 1.0, 2.0] }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.render.width, 320);
        assert_eq!(settings.render.max_depth, 5);
        assert_eq!(settings.camera.position, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(settings.camera.target, Vec3::NEG_Z);
        assert_eq!(settings.octree, OctreeConfig::default());
    }
}
