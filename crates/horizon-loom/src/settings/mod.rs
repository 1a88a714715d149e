//! Persisted key-value settings.
//!
//! [`Settings`] is a flat `key → string` store that can be persisted to JSON
//! or TOML. Writes are atomic (a temporary file in the target directory is
//! renamed over the target). With auto-save enabled every change is written
//! straight away; a failed write is logged and otherwise ignored.
//!
//! [`PreferenceStore`] builds the typed theme/font preferences on top of it.
//!
//! # Example
//!
//! ```no_run
//! use horizon_loom::settings::{Settings, SettingsFormat};
//!
//! let settings = Settings::load_or_default("prefs.json", SettingsFormat::Json);
//! settings.set_auto_save("prefs.json", SettingsFormat::Json);
//! settings.set("theme", "dark");
//! ```

mod preferences;

pub use preferences::{
    ColorSlot, FONT_OPTIONS, FontCategory, FontOption, PreferenceStore, Preferences,
    SYNTAX_THEMES, Theme, keys,
};

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use horizon_loom_core::Signal;
use horizon_loom_core::logging::targets;
use parking_lot::RwLock;

use crate::error::{Error, Result};

/// File format for persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsFormat {
    #[default]
    Json,
    Toml,
}

impl SettingsFormat {
    /// Pick the format from a file extension; anything but `.toml` is JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SettingsFormat::Toml,
            _ => SettingsFormat::Json,
        }
    }
}

#[derive(Debug, Clone)]
struct AutoSaveConfig {
    path: PathBuf,
    format: SettingsFormat,
}

/// A flat key-value settings store.
pub struct Settings {
    data: RwLock<BTreeMap<String, String>>,
    /// Emitted with the key of every changed setting.
    changed: Signal<String>,
    auto_save: RwLock<Option<AutoSaveConfig>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::from_data(BTreeMap::new())
    }

    /// Create a store from existing data.
    pub fn from_data(data: BTreeMap<String, String>) -> Self {
        Self {
            data: RwLock::new(data),
            changed: Signal::new(),
            auto_save: RwLock::new(None),
        }
    }

    /// Signal emitted with the key whenever a value changes.
    pub fn changed(&self) -> &Signal<String> {
        &self.changed
    }

    /// Persist every change to `path`.
    pub fn set_auto_save(&self, path: impl AsRef<Path>, format: SettingsFormat) {
        *self.auto_save.write() = Some(AutoSaveConfig {
            path: path.as_ref().to_path_buf(),
            format,
        });
    }

    pub fn disable_auto_save(&self) {
        *self.auto_save.write() = None;
    }

    pub fn is_auto_save_enabled(&self) -> bool {
        self.auto_save.read().is_some()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    /// Get a value, or `default` if the key is missing.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a value parsed with `FromStr`; `None` if missing or unparsable.
    pub fn get_parsed<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.data.read().get(key).and_then(|v| v.trim().parse().ok())
    }

    /// Set a value. Returns `true` (and notifies and auto-saves) if it changed.
    pub fn set(&self, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        {
            let mut data = self.data.write();
            if data.get(key) == Some(&value) {
                return false;
            }
            data.insert(key.to_string(), value);
        }
        self.changed.emit(key.to_string());
        self.try_auto_save();
        true
    }

    /// Remove a value, returning it if it was present.
    pub fn remove(&self, key: &str) -> Option<String> {
        let removed = self.data.write().remove(key);
        if removed.is_some() {
            self.changed.emit(key.to_string());
            self.try_auto_save();
        }
        removed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Remove every value.
    pub fn clear(&self) {
        let keys: Vec<String> = std::mem::take(&mut *self.data.write()).into_keys().collect();
        for key in keys {
            self.changed.emit(key);
        }
        self.try_auto_save();
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Load settings from a file.
    ///
    /// Non-string values (numbers, booleans) are kept in their textual form.
    pub fn load(path: impl AsRef<Path>, format: SettingsFormat) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let data = match format {
            SettingsFormat::Json => {
                let map: BTreeMap<String, serde_json::Value> =
                    serde_json::from_str(&content).map_err(|e| Error::parse(path, e))?;
                map.into_iter()
                    .map(|(k, v)| match v {
                        serde_json::Value::String(s) => (k, s),
                        other => (k, other.to_string()),
                    })
                    .collect()
            }
            SettingsFormat::Toml => {
                let map: BTreeMap<String, toml::Value> =
                    toml::from_str(&content).map_err(|e| Error::parse(path, e))?;
                map.into_iter()
                    .map(|(k, v)| match v {
                        toml::Value::String(s) => (k, s),
                        other => (k, other.to_string()),
                    })
                    .collect()
            }
        };
        Ok(Self::from_data(data))
    }

    /// Load settings, falling back to an empty store.
    ///
    /// A missing file is expected on first run; an unreadable or corrupt file
    /// is logged as a warning.
    pub fn load_or_default(path: impl AsRef<Path>, format: SettingsFormat) -> Self {
        let path = path.as_ref();
        match Self::load(path, format) {
            Ok(settings) => settings,
            Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!(target: targets::SETTINGS, path = %path.display(), "no settings file");
                Self::new()
            }
            Err(e) => {
                tracing::warn!(target: targets::SETTINGS, path = %path.display(), "ignoring settings: {}", e);
                Self::new()
            }
        }
    }

    /// Save settings to a file.
    ///
    /// The file is written atomically using a temporary file and rename.
    pub fn save(&self, path: impl AsRef<Path>, format: SettingsFormat) -> Result<()> {
        let path = path.as_ref();
        let content = {
            let data = self.data.read();
            match format {
                SettingsFormat::Json => {
                    serde_json::to_string_pretty(&*data).map_err(|e| Error::parse(path, e))?
                }
                SettingsFormat::Toml => toml::to_string(&*data).map_err(|e| Error::parse(path, e))?,
            }
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

        let mut file = tempfile::NamedTempFile::new_in(parent).map_err(|e| Error::io(path, e))?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| Error::io(path, e))?;
        file.persist(path).map_err(|e| Error::io(path, e.error))?;
        Ok(())
    }

    /// Write to the auto-save location, if enabled.
    pub fn sync(&self) -> Result<()> {
        let config = self.auto_save.read().clone();
        match config {
            Some(config) => self.save(&config.path, config.format),
            None => Ok(()),
        }
    }

    fn try_auto_save(&self) {
        if let Err(e) = self.sync() {
            tracing::error!(target: targets::SETTINGS, "Failed to auto-save settings: {}", e);
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("data", &*self.data.read())
            .field("auto_save", &*self.auto_save.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_set_reports_change_once() {
        let settings = Settings::new();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        settings.changed().connect(move |k| seen_clone.lock().push(k.clone()));

        assert!(settings.set("theme", "dark"));
        assert!(!settings.set("theme", "dark"));
        assert_eq!(*seen.lock(), vec!["theme".to_string()]);
        assert_eq!(settings.get_or("missing", "x"), "x");
    }

    #[test]
    fn test_get_parsed() {
        let settings = Settings::new();
        settings.set("size", " 16 ");
        settings.set("radius", "abc");
        assert_eq!(settings.get_parsed::<f32>("size"), Some(16.0));
        assert_eq!(settings.get_parsed::<f32>("radius"), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let settings = Settings::new();
        settings.set("theme", "dark");
        settings.set("baseFontSize", "18");
        settings.save(&path, SettingsFormat::Json).unwrap();

        let loaded = Settings::load(&path, SettingsFormat::Json).unwrap();
        assert_eq!(loaded.get("theme").as_deref(), Some("dark"));
        assert_eq!(loaded.keys(), vec!["baseFontSize", "theme"]);
    }

    #[test]
    fn test_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        let settings = Settings::new();
        settings.set("syntaxTheme", "One Dark");
        settings.save(&path, SettingsFormat::from_path(&path)).unwrap();

        let loaded = Settings::load(&path, SettingsFormat::Toml).unwrap();
        assert_eq!(loaded.get("syntaxTheme").as_deref(), Some("One Dark"));
    }

    #[test]
    fn test_non_string_values_are_kept_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"baseFontSize": 18, "theme": "dark"}"#).unwrap();

        let loaded = Settings::load(&path, SettingsFormat::Json).unwrap();
        assert_eq!(loaded.get("baseFontSize").as_deref(), Some("18"));
    }

    #[test]
    fn test_missing_and_corrupt_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(Settings::load_or_default(&missing, SettingsFormat::Json).is_empty());

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "{not json").unwrap();
        assert!(matches!(
            Settings::load(&corrupt, SettingsFormat::Json),
            Err(Error::Parse { .. })
        ));
        assert!(Settings::load_or_default(&corrupt, SettingsFormat::Json).is_empty());
    }

    #[test]
    fn test_auto_save_writes_every_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let settings = Settings::new();
        settings.set_auto_save(&path, SettingsFormat::Json);

        settings.set("theme", "dark");
        let loaded = Settings::load(&path, SettingsFormat::Json).unwrap();
        assert_eq!(loaded.get("theme").as_deref(), Some("dark"));

        settings.remove("theme");
        let loaded = Settings::load(&path, SettingsFormat::Json).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SettingsFormat::from_path("a/b.TOML"), SettingsFormat::Toml);
        assert_eq!(SettingsFormat::from_path("a/b.json"), SettingsFormat::Json);
        assert_eq!(SettingsFormat::from_path("noext"), SettingsFormat::Json);
    }
}
