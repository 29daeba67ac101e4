//! Application configuration.
//!
//! Loads settings from config.json in the data directory at startup.
//! Missing keys fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key the run history blob is stored under
    #[serde(default = "default_history_key")]
    pub history_key: String,
    /// Store file name, relative to the data directory unless absolute
    #[serde(default = "default_store_file")]
    pub store_file: String,
    /// File extensions picked up when importing a directory
    #[serde(default = "default_text_extensions")]
    pub text_extensions: Vec<String>,
}

fn default_history_key() -> String {
    "runHistory".to_string()
}

fn default_store_file() -> String {
    "store.json".to_string()
}

fn default_text_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_key: default_history_key(),
            store_file: default_store_file(),
            text_extensions: default_text_extensions(),
        }
    }
}

impl AppConfig {
    /// Resolves the store file against the data directory.
    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        let path = PathBuf::from(&self.store_file);
        if path.is_absolute() {
            path
        } else {
            data_dir.join(path)
        }
    }
}

/// Loads configuration from `config_path` or returns defaults.
fn load_config(config_path: &Path) -> AppConfig {
    crate::log(&format!("Looking for config at: {}", config_path.display()));

    if config_path.exists() {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
    }

    AppConfig::default()
}

/// Initializes the global configuration. Call once at startup.
pub fn init_config() {
    let _ = CONFIG.set(load_config(&crate::paths::get_config_path()));
}

/// Returns the global configuration, or defaults if `init_config` was never called.
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}
