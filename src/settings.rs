//! Presentation settings
//!
//! Read from LocalStorage on web or a JSON file natively. Never written back.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Presentation preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Isometric projection scale (1.0 = one pixel per world unit)
    pub projection_scale: f32,

    // === Scene ===
    /// Floor reference grid
    pub show_grid: bool,
    /// Ground shadow under the player
    pub show_shadow: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            projection_scale: 1.0,
            show_grid: true,
            show_shadow: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "iso_runner_settings";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if !(settings.projection_scale.is_finite() && settings.projection_scale > 0.0) {
            log::warn!(
                "Ignoring projection_scale {}, using 1.0",
                settings.projection_scale
            );
            settings.projection_scale = 1.0;
        }
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Bad stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let settings = Settings::from_json(r#"{ "show_grid": false }"#).unwrap();
        assert!(!settings.show_grid);
        assert!(settings.show_shadow);
        assert_eq!(settings.projection_scale, 1.0);
    }

    #[test]
    fn test_bad_scale_is_reset() {
        let settings = Settings::from_json(r#"{ "projection_scale": -2.0 }"#).unwrap();
        assert_eq!(settings.projection_scale, 1.0);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load_from("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
