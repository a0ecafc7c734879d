use crate::models::SortKey;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;

/// View preferences that survive across sessions
///
/// Read on view activation, written back on every change. The browse view
/// reopens with the last search text and sort order the user left it with.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Preferences {
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub sidebar_docked: bool,
}

/// Simple get/set persistence seam for [`Preferences`].
///
/// The pipeline itself never touches storage; hosts pick an implementation.
pub trait PreferenceStore {
    fn load(&self) -> crate::Result<Preferences>;
    fn save(&self, preferences: &Preferences) -> crate::Result<()>;
}

/// TOML file under the platform config directory
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Store at the default location (XDG on Linux/macOS, AppData on
    /// Windows).
    pub fn new() -> crate::Result<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::Error::Preferences("Could not find config directory".into())
        })?;
        Ok(Self {
            path: config_dir.join("addonshelf").join("preferences.toml"),
        })
    }

    /// Store at an explicit path. Handy for tests and odd deployments.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self) -> crate::Result<Preferences> {
        if !self.path.exists() {
            // No file yet? Use defaults
            return Ok(Preferences::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        toml::from_str(&contents).map_err(|e| {
            crate::Error::Preferences(format!("Failed to parse preferences: {e}"))
        })
    }

    fn save(&self, preferences: &Preferences) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(preferences).map_err(|e| {
            crate::Error::Preferences(format!("Failed to serialize preferences: {e}"))
        })?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-memory store for hosts that persist elsewhere, and for tests
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    inner: RefCell<Preferences>,
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> crate::Result<Preferences> {
        Ok(self.inner.borrow().clone())
    }

    fn save(&self, preferences: &Preferences) -> crate::Result<()> {
        *self.inner.borrow_mut() = preferences.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trips() {
        let store = MemoryPreferences::default();
        assert_eq!(store.load().unwrap(), Preferences::default());

        let prefs = Preferences {
            search: Some("card".into()),
            sort_by: SortKey::Name,
            sidebar_docked: true,
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.load().unwrap(), prefs);
    }

    #[test]
    fn test_file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferences::at(dir.path().join("preferences.toml"));

        // Missing file falls back to defaults
        assert_eq!(store.load().unwrap(), Preferences::default());

        let prefs = Preferences {
            search: Some("mushroom".into()),
            sort_by: SortKey::LastUpdated,
            sidebar_docked: false,
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.load().unwrap(), prefs);
    }

    #[test]
    fn test_malformed_file_is_a_preferences_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "sort_by = 12").unwrap();

        let err = FilePreferences::at(path).load().unwrap_err();
        assert!(matches!(err, crate::Error::Preferences(_)));
    }
}
