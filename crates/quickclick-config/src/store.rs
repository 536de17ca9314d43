//! Settings persistence collaborator.
//!
//! Stored items are an opaque JSON object. Reads overlay whatever is stored
//! on top of the caller's defaults, so missing keys always fall back.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ConfigError;
use crate::settings::{Settings, SettingsPatch, normalize_key};

/// Host-owned key-value store for [`Settings`].
pub trait SettingsStore {
    /// Read settings, falling back to `defaults` for every missing key.
    fn get(&self, defaults: &Settings) -> Result<Settings, ConfigError>;

    /// Write the fields present in `partial`, leaving the rest untouched.
    fn set(&mut self, partial: &SettingsPatch) -> Result<(), ConfigError>;

    /// Overwrite every key with `defaults`.
    fn reset(&mut self, defaults: &Settings) -> Result<(), ConfigError> {
        self.set(&defaults.to_patch())
    }
}

fn merge_items(defaults: &Settings, items: &Map<String, Value>) -> Result<Settings, ConfigError> {
    let mut merged = match serde_json::to_value(defaults)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in items {
        merged.insert(key.clone(), value.clone());
    }
    let mut settings: Settings =
        serde_json::from_value(Value::Object(merged)).map_err(|e| ConfigError::InvalidValue {
            field: "settings".to_string(),
            message: e.to_string(),
        })?;
    settings.open_key = normalize_key(&settings.open_key);
    Ok(settings)
}

fn patch_items(items: &mut Map<String, Value>, partial: &SettingsPatch) -> Result<(), ConfigError> {
    if let Value::Object(patch) = serde_json::to_value(partial)? {
        for (key, value) in patch {
            items.insert(key, value);
        }
    }
    Ok(())
}

/// In-memory store, used by tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Map<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored items.
    pub fn items(&self) -> &Map<String, Value> {
        &self.items
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, defaults: &Settings) -> Result<Settings, ConfigError> {
        merge_items(defaults, &self.items)
    }

    fn set(&mut self, partial: &SettingsPatch) -> Result<(), ConfigError> {
        patch_items(&mut self.items, partial)
    }
}

/// Store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config dir>/quickclick/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quickclick").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<Map<String, Value>, ConfigError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            other => Err(ConfigError::InvalidFormat(format!(
                "expected a JSON object in {}, found {}",
                self.path.display(),
                other
            ))),
        }
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, defaults: &Settings) -> Result<Settings, ConfigError> {
        let items = self.read_items()?;
        merge_items(defaults, &items)
    }

    fn set(&mut self, partial: &SettingsPatch) -> Result<(), ConfigError> {
        let mut items = self.read_items()?;
        patch_items(&mut items, partial)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(items))?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "settings written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
