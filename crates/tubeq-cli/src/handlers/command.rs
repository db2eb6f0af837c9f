//! `tubeq command`: print the yt-dlp argv without running it.

use std::path::Path;

use tubeq_core::{PresetCatalog, build_command};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::shell_line;

pub fn execute(
    ctx: &CliContext,
    url: &str,
    preset: Option<&str>,
    catalog: Option<&Path>,
) -> Result<(), CliError> {
    println!("{}", render(ctx, url, preset, catalog)?);
    Ok(())
}

/// The command line for `url`, optionally using a catalog preset verbatim.
pub fn render(
    ctx: &CliContext,
    url: &str,
    preset: Option<&str>,
    catalog: Option<&Path>,
) -> Result<String, CliError> {
    let preset_args = match (preset, catalog) {
        (Some(name), Some(catalog)) => Some(PresetCatalog::load(catalog)?.args(name)?),
        (Some(_), None) => {
            return Err(CliError::Arguments("--preset requires --catalog".to_string()));
        }
        (None, _) => None,
    };

    let argv = build_command(ctx.settings(), url, preset_args.as_deref());
    Ok(shell_line(&argv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tubeq_core::SettingsStore;

    #[test]
    fn test_render_uses_preset_verbatim() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("presets.json");
        std::fs::write(&catalog, r#"{"best": ["--format", "best"]}"#).unwrap();
        let ctx = CliContext::new(SettingsStore::open(dir.path().join("s.json")).unwrap());

        let line = render(&ctx, "https://v/1", Some("best"), Some(&catalog)).unwrap();
        assert!(line.starts_with("yt-dlp https://v/1 --format best -o "), "{line}");
        assert!(!line.contains("--remux-video"));

        let plain = render(&ctx, "https://v/1", None, None).unwrap();
        assert!(plain.contains("--remux-video") || plain.contains(" -f "));
    }
}
