//! `tubeq preset`: run a catalog preset over a batch of URLs.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;
use tubeq_core::{
    PresetCatalog, PresetOptions, Task, build_command, prepare_preset_args, urls_from_archive_dir,
    urls_from_batch_file,
};

use super::{new_task, queue};
use crate::bootstrap::CliContext;
use crate::commands::FinishArgs;
use crate::error::CliError;

/// Where the preset run takes its URLs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
    BatchFile(PathBuf),
    ArchiveDir(PathBuf),
}

impl UrlSource {
    pub fn from_args(batch: Option<PathBuf>, archive_dir: Option<PathBuf>) -> Result<Self, CliError> {
        match (batch, archive_dir) {
            (Some(batch), None) => Ok(Self::BatchFile(batch)),
            (None, Some(dir)) => Ok(Self::ArchiveDir(dir)),
            _ => Err(CliError::Arguments(
                "exactly one of --batch or --archive-dir is required".to_string(),
            )),
        }
    }

    fn urls(&self) -> Result<Vec<String>, CliError> {
        let urls = match self {
            Self::BatchFile(path) => urls_from_batch_file(path)?,
            Self::ArchiveDir(dir) => urls_from_archive_dir(dir)?,
        };
        Ok(urls)
    }
}

pub async fn execute(
    ctx: &CliContext,
    name: &str,
    catalog: &Path,
    source: &UrlSource,
    options: PresetOptions,
    finish: FinishArgs,
) -> Result<(), CliError> {
    let settings = ctx.validated_settings()?;
    let tasks = preset_tasks(ctx, name, catalog, source, options)?;
    info!(preset = name, count = tasks.len(), "Running preset");
    queue::run(settings, tasks, finish).await
}

/// One task per source URL, all sharing the prepared preset arguments.
pub fn preset_tasks(
    ctx: &CliContext,
    name: &str,
    catalog: &Path,
    source: &UrlSource,
    options: PresetOptions,
) -> Result<Vec<Task>, CliError> {
    let base = PresetCatalog::load(catalog)?.args(name)?;
    let args = prepare_preset_args(base, options, Local::now().date_naive());

    let settings = ctx.settings();
    Ok(source
        .urls()?
        .iter()
        .map(|url| new_task(url, build_command(settings, url, Some(&args))))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tubeq_core::SettingsStore;

    fn context(dir: &Path) -> CliContext {
        CliContext::new(SettingsStore::open(dir.join("settings.json")).unwrap())
    }

    #[test]
    fn test_source_requires_exactly_one() {
        assert!(UrlSource::from_args(None, None).is_err());
        assert!(UrlSource::from_args(Some("a".into()), Some("b".into())).is_err());
        assert_eq!(
            UrlSource::from_args(Some("a".into()), None).unwrap(),
            UrlSource::BatchFile("a".into())
        );
    }

    #[test]
    fn test_preset_tasks_from_batch_file() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("presets.json");
        fs::write(
            &catalog,
            r#"{"archive": ["--batch-file", "old.txt", "-o", "%(id)s.%(ext)s", "--format", "best"]}"#,
        )
        .unwrap();
        let batch = dir.path().join("urls.txt");
        fs::write(&batch, "https://a\n\n  https://b  \n").unwrap();

        let ctx = context(dir.path());
        let options = PresetOptions {
            write_comments: true,
            ..PresetOptions::default()
        };
        let tasks = preset_tasks(
            &ctx,
            "archive",
            &catalog,
            &UrlSource::BatchFile(batch),
            options,
        )
        .unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].label, "https://a");
        assert_eq!(tasks[1].command[1], "https://b");
        assert_ne!(tasks[0].id, tasks[1].id);

        let argv = &tasks[0].command;
        assert!(!argv.contains(&"--batch-file".to_string()));
        assert!(argv.contains(&"--write-comments".to_string()));
        assert_eq!(argv.iter().filter(|a| *a == "-o").count(), 1);
    }

    #[test]
    fn test_unknown_preset_is_argument_error() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("presets.json");
        fs::write(&catalog, r#"{"a": []}"#).unwrap();
        let ctx = context(dir.path());

        let err = preset_tasks(
            &ctx,
            "missing",
            &catalog,
            &UrlSource::BatchFile(dir.path().join("none.txt")),
            PresetOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Arguments(_)));
    }
}
