//! Settings persistence.
//!
//! The settings file is JSON. Writes go through a temporary file in the same
//! directory followed by a rename, so a reader never observes a partially
//! written file: the last successful write wins.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{Settings, SettingsError};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "TUBEQ_CONFIG_DIR";

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Location of the settings file.
///
/// Resolution order:
/// 1. `TUBEQ_CONFIG_DIR` environment variable
/// 2. System configuration directory (e.g. `~/.config/tubeq`)
pub fn default_settings_path() -> Result<PathBuf, SettingsError> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir).join(SETTINGS_FILE_NAME));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("tubeq").join(SETTINGS_FILE_NAME))
        .ok_or(SettingsError::NoConfigDir)
}

/// File-backed settings with load/save/update.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
    /// Defaults stood in for an unreadable file that is still on disk.
    recovered: bool,
}

impl SettingsStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields the defaults, which are written out immediately
    /// so the user has a file to edit. A corrupted file is an error; callers
    /// that prefer to keep going can use [`SettingsStore::open_or_default`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();

        if !path.exists() {
            debug!(path = %path.display(), "Settings file missing, writing defaults");
            let store = Self {
                path,
                settings: Settings::default(),
                recovered: false,
            };
            store.save()?;
            return Ok(store);
        }

        let settings = read_settings(&path)?;
        Ok(Self {
            path,
            settings,
            recovered: false,
        })
    }

    /// Open the store, falling back to defaults (in memory) when the file is
    /// unreadable. The broken file is left in place until the next save.
    pub fn open_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not load settings, using defaults");
                Self {
                    path,
                    settings: Settings::default(),
                    recovered: true,
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the settings are defaults standing in for a file that could
    /// not be loaded. Cleared by the next successful save.
    pub const fn is_recovered(&self) -> bool {
        self.recovered
    }

    /// Replace the settings and persist them.
    pub fn replace(&mut self, settings: Settings) -> Result<(), SettingsError> {
        self.settings = settings;
        self.save()?;
        self.recovered = false;
        Ok(())
    }

    /// Mutate the settings in place and persist the result.
    pub fn update<F>(&mut self, mutate: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        mutate(&mut self.settings);
        self.save()?;
        self.recovered = false;
        Ok(())
    }

    /// Write the current settings atomically.
    pub fn save(&self) -> Result<(), SettingsError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, &e))?;

        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| SettingsError::io(&self.path, &e))?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| SettingsError::io(parent, &e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| SettingsError::io(tmp.path(), &e))?;
        tmp.persist(&self.path)
            .map_err(|e| SettingsError::io(&self.path, &e.error))?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let contents = fs::read_to_string(path).map_err(|e| SettingsError::io(path, &e))?;
    serde_json::from_str(&contents).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
