//! Engine configuration
//!
//! One explicit value built at startup and passed to whatever needs the
//! screen size or asset location.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_WIDTH: u32 = 224;
pub const DEFAULT_HEIGHT: u32 = 288;
pub const DEFAULT_MAGNIFICATION: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical screen width in pixels
    pub width: u32,
    /// Logical screen height in pixels
    pub height: u32,
    /// Window pixels per logical pixel
    pub magnification: u32,
    pub vsync: bool,
    pub asset_dir: PathBuf,
    /// Background clear color as [r, g, b]
    pub clear_color: [u8; 3],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            magnification: DEFAULT_MAGNIFICATION,
            vsync: true,
            asset_dir: PathBuf::from("assets"),
            clear_color: [0, 0, 0],
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        let config = Self::from_json(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("invalid screen size {}x{}", self.width, self.height));
        }
        if self.magnification == 0 {
            return Err("magnification must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn clear_color(&self) -> Color {
        let [r, g, b] = self.clear_color;
        Color::rgb(r, g, b)
    }

    /// Window size in real pixels
    pub fn window_size(&self) -> (u32, u32) {
        (self.width * self.magnification, self.height * self.magnification)
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.asset_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!((config.width, config.height, config.magnification), (224, 288, 3));
        assert_eq!(config.window_size(), (672, 864));
        assert_eq!(config.clear_color(), Color::BLACK);
        assert_eq!(config.asset_path("font.json"), PathBuf::from("assets/font.json"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{"width": 160, "clear_color": [10, 20, 30]}"#).unwrap();
        assert_eq!(config.width, 160);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert!(config.vsync);
        assert_eq!(config.clear_color(), Color::rgb(10, 20, 30));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(EngineConfig::from_json(r#"{"magnification": 0}"#).is_err());
        assert!(EngineConfig::from_json(r#"{"width": 0}"#).is_err());
        assert!(EngineConfig::from_json("[]").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("pixelcade-config-{}.json", std::process::id()));
        let config = EngineConfig {
            magnification: 2,
            vsync: false,
            ..EngineConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
