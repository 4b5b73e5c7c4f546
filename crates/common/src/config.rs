//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name used under the XDG config/data roots.
const APP_DIR: &str = "overlay-compositor";

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// File backing the persisted layout settings (overlay size, layout).
    pub settings_file: PathBuf,

    /// Export defaults.
    #[serde(default)]
    pub export: ExportDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Export and drawing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDefaults {
    /// Directory PNG exports are written to.
    pub output_dir: PathBuf,

    /// RGBA color of the band drawn behind the overlay image.
    pub highlight_color: [u8; 4],
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "compositor_render_engine=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_file: default_settings_file(),
            export: ExportDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            highlight_color: [255, 255, 0, 255],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
        .join(APP_DIR)
        .join("config.json")
}

/// Default location of the persisted layout settings.
fn default_settings_file() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
        .join(APP_DIR)
        .join("settings.json")
}

fn xdg_dir(var: &str, home_fallback: &[&str]) -> PathBuf {
    std::env::var(var).map(PathBuf::from).unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        home_fallback
            .iter()
            .fold(PathBuf::from(home), |path, part| path.join(part))
    })
}
