//! Viewer configuration
//!
//! Loaded from `.toml` or `.json`; every field has a default so partial
//! files work.

use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{error::ConfigError, gfx::framing::FramingConfig, gfx::scene::ShadingMode};

/// Configuration trait
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from file, picking the format from the extension
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path).as_deref() {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("json") => {
                serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path).as_deref() {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Camera settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view of the perspective camera
    pub fovy_degrees: f32,
    /// Height of the orthographic frustum in world units
    pub ortho_frustum_size: f32,
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 45.0,
            ortho_frustum_size: 400.0,
            min_distance: None,
            max_distance: None,
        }
    }
}

/// Everything the viewer reads at start-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub framing: FramingConfig,
    pub camera: CameraConfig,
    /// Location of the model list
    pub manifest_path: String,
    /// Primary light intensity, `0.0..=2.0`
    pub light_intensity: f32,
    pub show_grid: bool,
    pub shading: ShadingMode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            framing: FramingConfig::default(),
            camera: CameraConfig::default(),
            manifest_path: "models/models.json".to_string(),
            light_intensity: 0.8,
            show_grid: true,
            shading: ShadingMode::Lit,
        }
    }
}

impl Config for ViewerConfig {}
