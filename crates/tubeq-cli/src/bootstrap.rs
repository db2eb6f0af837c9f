//! CLI bootstrap: resolve and load settings, fill in bundled tool paths.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use tubeq_core::{Settings, SettingsStore, default_settings_path, validate_settings};
use tubeq_runtime::detect_dependencies;

use crate::error::CliError;

/// Everything a handler needs.
#[derive(Debug)]
pub struct CliContext {
    store: SettingsStore,
}

impl CliContext {
    pub const fn new(store: SettingsStore) -> Self {
        Self { store }
    }

    pub const fn settings(&self) -> &Settings {
        self.store.settings()
    }

    /// Settings checked for values a download run cannot work with.
    pub fn validated_settings(&self) -> Result<&Settings, CliError> {
        let settings = self.store.settings();
        validate_settings(settings)?;
        Ok(settings)
    }

    pub const fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }
}

/// Load settings from `config` (or the default location).
///
/// Validation is left to the commands that download, so `tubeq config`
/// still works on a broken file.
///
/// yt-dlp or ffmpeg binaries shipped next to the `tubeq` executable are
/// picked up when the configured paths are unset or stale.
pub fn bootstrap(config: Option<PathBuf>) -> Result<CliContext, CliError> {
    let path = match config {
        Some(path) => path,
        None => default_settings_path()?,
    };
    debug!(path = %path.display(), "Loading settings");

    let mut store = SettingsStore::open_or_default(path);
    if let Some(base_dir) = executable_dir() {
        adopt_bundled_tools(&mut store, &base_dir)?;
    }

    Ok(CliContext::new(store))
}

/// Persist bundled tool paths found in `base_dir`.
///
/// Nothing is written while the store holds defaults for an unreadable file,
/// so the broken file stays on disk for the user to fix.
fn adopt_bundled_tools(store: &mut SettingsStore, base_dir: &Path) -> Result<(), CliError> {
    let mut settings = store.settings().clone();
    if !detect_dependencies(&mut settings, base_dir) {
        return Ok(());
    }
    if store.is_recovered() {
        warn!(
            path = %store.path().display(),
            "Settings file could not be loaded, not saving bundled tool paths"
        );
        return Ok(());
    }
    store.replace(settings)?;
    Ok(())
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()?
        .parent()
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bootstrap_creates_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let ctx = bootstrap(Some(path.clone())).unwrap();
        assert!(path.exists());
        assert_eq!(ctx.store().path(), path.as_path());
    }

    #[test]
    fn test_invalid_settings_fail_validation_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"queue_max_concurrent": 0}"#).unwrap();

        let ctx = bootstrap(Some(path)).unwrap();
        let err = ctx.validated_settings().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_bundled_tools_are_saved() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir(&bin).unwrap();
        let ytdlp = tubeq_runtime::deps::binary_name(
            tubeq_runtime::deps::YTDLP_BINARY,
            tubeq_core::Platform::current(),
        );
        std::fs::write(bin.join(&ytdlp), b"").unwrap();

        let mut store = SettingsStore::open(dir.path().join("settings.json")).unwrap();
        adopt_bundled_tools(&mut store, &bin).unwrap();

        let reloaded = SettingsStore::open(store.path()).unwrap();
        assert_eq!(
            reloaded.settings().ytdlp_path,
            bin.join(ytdlp).to_string_lossy()
        );
    }

    #[test]
    fn test_unreadable_settings_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir(&bin).unwrap();
        let ytdlp = tubeq_runtime::deps::binary_name(
            tubeq_runtime::deps::YTDLP_BINARY,
            tubeq_core::Platform::current(),
        );
        std::fs::write(bin.join(ytdlp), b"").unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ half written").unwrap();

        let mut store = SettingsStore::open_or_default(&path);
        adopt_bundled_tools(&mut store, &bin).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ half written");
        assert!(store.is_recovered());
    }
}
