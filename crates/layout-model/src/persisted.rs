//! Persisted layout settings and the key-value stores behind them.
//!
//! Only three values survive a restart: the overlay width, the overlay
//! height and the selected layout. Each is stored as a string under its own
//! key so a store can be shared with other consumers that read the same keys.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::layout::{LayoutMode, OverlayDimensions};

pub const OVERLAY_WIDTH_KEY: &str = "overlayWidth";
pub const OVERLAY_HEIGHT_KEY: &str = "overlayHeight";
pub const SELECTED_LAYOUT_KEY: &str = "selectedLayout";

/// String key-value storage for settings.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), LayoutError>;
}

/// Typed view of the persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub overlay_width: i32,
    pub overlay_height: i32,
    pub layout: LayoutMode,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            overlay_width: OverlayDimensions::DEFAULT_WIDTH,
            overlay_height: OverlayDimensions::DEFAULT_HEIGHT,
            layout: LayoutMode::default(),
        }
    }
}

impl LayoutSettings {
    /// Read settings from a store.
    ///
    /// Keys are read independently; a missing or unparseable value keeps
    /// its default.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let mut settings = Self::default();

        if let Some(width) = read_parsed::<i32>(store, OVERLAY_WIDTH_KEY) {
            settings.overlay_width = width;
        }
        if let Some(height) = read_parsed::<i32>(store, OVERLAY_HEIGHT_KEY) {
            settings.overlay_height = height;
        }
        if let Some(layout) = read_parsed::<LayoutMode>(store, SELECTED_LAYOUT_KEY) {
            settings.layout = layout;
        }

        settings
    }

    /// Write all three values to a store.
    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<(), LayoutError> {
        store.set(OVERLAY_WIDTH_KEY, &self.overlay_width.to_string())?;
        store.set(OVERLAY_HEIGHT_KEY, &self.overlay_height.to_string())?;
        store.set(SELECTED_LAYOUT_KEY, self.layout.label())?;
        Ok(())
    }

    pub fn overlay_dimensions(&self) -> OverlayDimensions {
        OverlayDimensions::new(self.overlay_width, self.overlay_height)
    }
}

fn read_parsed<T: std::str::FromStr>(store: &dyn SettingsStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(key, value = %raw, "Ignoring unparseable persisted value");
            None
        }
    }
}

/// In-memory store, used for dry runs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LayoutError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object of strings on disk.
///
/// The whole file is rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            match Self::read_values(&path) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding settings file");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_values(path: &Path) -> Result<BTreeMap<String, String>, LayoutError> {
        let content = std::fs::read_to_string(path).map_err(|e| LayoutError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| LayoutError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn flush(&self) -> Result<(), LayoutError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LayoutError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.values).map_err(|e| LayoutError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| LayoutError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LayoutError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}
