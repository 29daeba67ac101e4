//! Chart configuration loaded from chart_config.json.
//!
//! If the config file doesn't exist, default values are used.
//! The config file is read fresh each time charts are generated,
//! so changes take effect without rebuilding.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Chart configuration with all customizable values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Font sizes
    pub font: FontConfig,
    /// Colors (RGB values)
    pub colors: ColorConfig,
    /// Layout dimensions
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Title font size
    pub title_size: u32,
    /// Per-panel caption font size
    pub caption_size: u32,
    /// Axis label font size
    pub axis_label_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Rate line color [R, G, B]
    pub line: [u8; 3],
    /// Mean line color [R, G, B]
    pub mean: [u8; 3],
    /// Panel background [R, G, B]
    pub light_gray_bg: [u8; 3],
    /// Grid line color [R, G, B]
    pub grid_color: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Image width
    pub chart_width: u32,
    /// Height of each quantity panel
    pub panel_height: u32,
    /// Title area height
    pub title_height: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            title_size: 28,
            caption_size: 18,
            axis_label_size: 13,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            line: [243, 156, 18],   // #F39C12
            mean: [41, 128, 185],   // #2980B9
            light_gray_bg: [245, 245, 245],
            grid_color: [220, 220, 220],
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            chart_width: 1000,
            panel_height: 260,
            title_height: 50,
        }
    }
}

impl ChartConfig {
    /// Load config from file, or return defaults if file doesn't exist.
    pub fn load(config_path: &Path) -> Self {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => {
                        crate::log(&format!("Loaded chart config from {}", config_path.display()));
                        return config;
                    }
                    Err(e) => {
                        crate::log(&format!(
                            "Failed to parse chart config: {}. Using defaults.",
                            e
                        ));
                    }
                },
                Err(e) => {
                    crate::log(&format!(
                        "Failed to read chart config: {}. Using defaults.",
                        e
                    ));
                }
            }
        }
        Self::default()
    }

    /// Save default config to file (for reference).
    pub fn save_default(config_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())
            .context("Failed to serialize default chart config")?;
        fs::write(config_path, json)
            .with_context(|| format!("Failed to write {}", config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = ChartConfig::load(&dir.path().join("chart_config.json"));
        assert_eq!(config.layout.chart_width, 1000);
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart_config.json");
        fs::write(&path, r#"{"layout": {"panel_height": 300}}"#).unwrap();

        let config = ChartConfig::load(&path);

        assert_eq!(config.layout.panel_height, 300);
        assert_eq!(config.layout.chart_width, 1000);
        assert_eq!(config.font.title_size, 28);
    }

    #[test]
    fn test_save_default_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart_config.json");

        ChartConfig::save_default(&path).unwrap();
        let config = ChartConfig::load(&path);

        assert_eq!(config.colors.line, [243, 156, 18]);
    }
}
