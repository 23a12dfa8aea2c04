use folio3d_fx::{DeviceSignals, QualitySettings};
use folio3d_ui3d::{CameraView, InteractionSettings};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/scene.toml";

/// Everything a session reads from `config/scene.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub interaction: InteractionSettings,
    pub quality: QualitySettings,
    /// Simulated device the session pretends to run on.
    pub device: DeviceSignals,
    pub camera: CameraConfig,
    pub scene: SceneSourceConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels, used for pointer coordinates.
    pub viewport: [u32; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        let view = CameraView::default();
        Self {
            position: view.position.to_array(),
            target: view.target.to_array(),
            fov_degrees: view.fov_degrees,
            near: view.near,
            far: view.far,
            viewport: [1280, 720],
        }
    }
}

impl CameraConfig {
    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport[0].max(1), self.viewport[1].max(1))
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            position: Vec3::from_array(self.position),
            target: Vec3::from_array(self.target),
            fov_degrees: self.fov_degrees.clamp(1.0, 179.0),
            near: self.near.max(f32::EPSILON),
            far: self.far.max(self.near + f32::EPSILON),
            ..CameraView::default()
        }
        .with_viewport(self.viewport())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneSourceConfig {
    /// Scene descriptions tried in order before the fallback scene.
    pub candidates: Vec<PathBuf>,
    /// Seed for the particle simulation.
    pub particle_seed: u64,
}

impl Default for SceneSourceConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                PathBuf::from("assets/scene.json"),
                PathBuf::from("assets/scene-fallback.json"),
            ],
            particle_seed: 0x5eed,
        }
    }
}

impl SceneConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SceneConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SceneConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Scene config not found at {}. Using defaults",
                        path.display()
                    );
                }
                SceneConfig::default()
            }
        }
    }
}
