//! Persisted visitor preferences.
//!
//! A single JSON blob holds the visitor's presentation choices. The store
//! merges partial updates into the existing record on every write
//! (last-write-wins per key) and treats a missing or unreadable blob as an
//! empty record, so a corrupted file can only ever cost cosmetic defaults,
//! never access to content.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_DIR_ENV;

/// Light/dark choice made with the theme toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Light palette.
    Light,
    /// Dark palette.
    Dark,
}

impl ThemeChoice {
    /// The palette id this choice selects.
    #[must_use]
    pub const fn palette_id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Partial record of the visitor's presentation choices.
///
/// Every field is optional; an absent field means "use the page default".
/// The record always serializes to a valid JSON object, with unset fields
/// omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceSet {
    /// Typography scale id, e.g. "large".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// Density scale id, e.g. "compact".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<String>,
    /// Motion profile id, e.g. "smooth".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
    /// Palette id; the single source of truth for colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<String>,
    /// Light/dark toggle state. Kept alongside `palette` so records
    /// written before palette unification still restore their colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeChoice>,
    /// Reduced-motion flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_motion: Option<bool>,
}

impl PreferenceSet {
    /// True if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.font_size.is_none()
            && self.density.is_none()
            && self.animation.is_none()
            && self.palette.is_none()
            && self.theme.is_none()
            && self.reduce_motion.is_none()
    }

    /// Shallow-merges `partial` into `self`.
    ///
    /// Fields present in `partial` overwrite unconditionally; absent
    /// fields are preserved.
    pub fn merge(&mut self, partial: Self) {
        if let Some(font_size) = partial.font_size {
            self.font_size = Some(font_size);
        }
        if let Some(density) = partial.density {
            self.density = Some(density);
        }
        if let Some(animation) = partial.animation {
            self.animation = Some(animation);
        }
        if let Some(palette) = partial.palette {
            self.palette = Some(palette);
        }
        if let Some(theme) = partial.theme {
            self.theme = Some(theme);
        }
        if let Some(reduce_motion) = partial.reduce_motion {
            self.reduce_motion = Some(reduce_motion);
        }
    }
}

/// Durable key-value persistence for the preference record.
///
/// # File location
///
/// - Linux: `~/.config/Folio/preferences.json`
/// - macOS: `~/Library/Application Support/Folio/preferences.json`
/// - Windows: `%APPDATA%\Folio\preferences.json`
///
/// The directory can be overridden with the `FOLIO_CONFIG_DIR` environment
/// variable or an explicit path (used by tests and `--prefs-file`).
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Creates a store backed by the platform-default preference file.
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            path: Self::default_file_path()?,
        })
    }

    /// Creates a store backed by an explicit file path.
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the platform-specific preference directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("Folio");
        Ok(config_dir)
    }

    /// Gets the full path to the preference file.
    pub fn default_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("preferences.json"))
    }

    /// Reads the persisted record.
    ///
    /// A missing file, unreadable file, or malformed blob all yield an
    /// empty record; this never fails.
    #[must_use]
    pub fn get(&self) -> PreferenceSet {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return PreferenceSet::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Shallow-merges `partial` into the persisted record and writes the
    /// merged result back atomically (temp file + rename).
    ///
    /// Keys absent from `partial` are preserved; keys present overwrite
    /// unconditionally.
    pub fn set(&self, partial: PreferenceSet) -> Result<()> {
        let mut record = self.get();
        record.merge(partial);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create preference directory: {}",
                parent.display()
            ))?;
        }

        let content =
            serde_json::to_string_pretty(&record).context("Failed to serialize preferences")?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp preference file: {}",
            temp_path.display()
        ))?;
        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp preference file to: {}",
            self.path.display()
        ))?;

        Ok(())
    }

    /// Deletes the persisted record, if any.
    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).context(format!(
                "Failed to remove preference file: {}",
                self.path.display()
            ))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PreferenceStore {
        PreferenceStore::at_path(dir.path().join("preferences.json"))
    }

    #[test]
    fn test_get_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_get_malformed_blob_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json at all").unwrap();
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_set_merges_disjoint_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .set(PreferenceSet {
                font_size: Some("large".to_string()),
                ..PreferenceSet::default()
            })
            .unwrap();
        store
            .set(PreferenceSet {
                density: Some("compact".to_string()),
                ..PreferenceSet::default()
            })
            .unwrap();

        let record = store.get();
        assert_eq!(record.font_size.as_deref(), Some("large"));
        assert_eq!(record.density.as_deref(), Some("compact"));
    }

    #[test]
    fn test_set_last_write_wins_per_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .set(PreferenceSet {
                animation: Some("smooth".to_string()),
                ..PreferenceSet::default()
            })
            .unwrap();
        store
            .set(PreferenceSet {
                animation: Some("bounce".to_string()),
                ..PreferenceSet::default()
            })
            .unwrap();

        assert_eq!(store.get().animation.as_deref(), Some("bounce"));
    }

    #[test]
    fn test_persisted_keys_are_camel_case() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .set(PreferenceSet {
                font_size: Some("small".to_string()),
                theme: Some(ThemeChoice::Dark),
                reduce_motion: Some(true),
                ..PreferenceSet::default()
            })
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["fontSize"], "small");
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["reduceMotion"], true);
        // Unset keys are omitted, not written as null.
        assert!(raw.get("density").is_none());
    }

    #[test]
    fn test_unknown_keys_in_blob_are_tolerated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"fontSize":"xlarge","someFutureKey":[1,2,3]}"#,
        )
        .unwrap();
        assert_eq!(store.get().font_size.as_deref(), Some("xlarge"));
    }

    #[test]
    fn test_reset_removes_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .set(PreferenceSet {
                reduce_motion: Some(true),
                ..PreferenceSet::default()
            })
            .unwrap();
        store.reset().unwrap();
        assert!(store.get().is_empty());
        // Resetting again is a no-op.
        store.reset().unwrap();
    }

    #[test]
    fn test_theme_choice_palette_ids() {
        assert_eq!(ThemeChoice::Light.palette_id(), "light");
        assert_eq!(ThemeChoice::Dark.palette_id(), "dark");
    }
}
