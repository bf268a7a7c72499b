use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::canvas::DEFAULT_HISTORY_CAPACITY;
use crate::error::ConfigError;
use crate::grid::GridSize;
use crate::input::GestureConfig;

/// Environment variable pointing at an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "SWATCH_STUDIO_CONFIG";

/// Painting surface and brush defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub brush_size: f32,
    pub min_brush_size: f32,
    pub max_brush_size: f32,
    pub brush_opacity: f32,
    pub history_capacity: usize,
    /// Initial iris color as `#RRGGBB`
    pub iris_color: String,
    /// Raster artwork to use instead of the built-in eye
    pub artwork_path: Option<PathBuf>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 350,
            brush_size: 24.0,
            min_brush_size: 2.0,
            max_brush_size: 80.0,
            brush_opacity: 0.6,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            iris_color: "#5B7FA3".to_string(),
            artwork_path: None,
        }
    }
}

impl CanvasConfig {
    /// Iris color, falling back to the default for bad hex codes
    pub fn iris_color(&self) -> Color32 {
        crate::swatch::parse_hex(&self.iris_color).unwrap_or_else(|err| {
            log::warn!("Bad iris color in config: {err}");
            Color32::from_rgb(0x5B, 0x7F, 0xA3)
        })
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub gesture: GestureConfig,
    pub canvas: CanvasConfig,
    pub default_grid_size: GridSize,
    /// Where palettes and exports are stored
    pub data_dir: PathBuf,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            canvas: CanvasConfig::default(),
            default_grid_size: GridSize::default(),
            data_dir: PathBuf::from("swatch_studio_data"),
        }
    }
}

impl StudioConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load from `SWATCH_STUDIO_CONFIG` if set, otherwise use defaults.
    ///
    /// A broken config file is logged and replaced by defaults.
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(err) => {
                log::error!("Failed to load config from {}: {err}", Path::new(&path).display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{"gesture":{"swipe_threshold":80.0},"canvas":{"width":300},"default_grid_size":4}"#;
        let config: StudioConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.gesture.swipe_threshold, 80.0);
        assert_eq!(config.gesture.confirm_threshold, 20.0);
        assert_eq!(config.canvas.width, 300);
        assert_eq!(config.canvas.height, 350);
        assert_eq!(config.default_grid_size, GridSize::LARGE);
    }

    #[test]
    fn test_invalid_grid_size_is_rejected() {
        let json = r#"{"default_grid_size":7}"#;
        assert!(serde_json::from_str::<StudioConfig>(json).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r##"{"canvas":{"iris_color":"#00ff00"}}"##).unwrap();
        let config = StudioConfig::from_file(&path).unwrap();
        assert_eq!(config.canvas.iris_color(), Color32::from_rgb(0, 255, 0));

        std::fs::write(&path, "{").unwrap();
        assert!(matches!(StudioConfig::from_file(&path), Err(ConfigError::Parse(_))));
    }
}
