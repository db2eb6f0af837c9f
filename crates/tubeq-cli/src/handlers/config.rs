//! `tubeq config`: inspect or reset settings.

use tubeq_core::Settings;

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;

pub fn execute(ctx: &mut CliContext, command: &ConfigCommand) -> Result<(), CliError> {
    match command {
        ConfigCommand::Path => println!("{}", ctx.store().path().display()),
        ConfigCommand::Show => {
            let json = serde_json::to_string_pretty(ctx.settings())
                .map_err(|e| CliError::Config(e.to_string()))?;
            println!("{json}");
        }
        ConfigCommand::Reset => {
            ctx.store_mut().replace(Settings::default())?;
            println!("Settings reset: {}", ctx.store().path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tubeq_core::SettingsStore;

    #[test]
    fn test_reset_persists_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = SettingsStore::open(&path).unwrap();
        store.update(|s| s.audio_only = true).unwrap();

        let mut ctx = CliContext::new(store);
        execute(&mut ctx, &ConfigCommand::Reset).unwrap();

        let reloaded = SettingsStore::open(&path).unwrap();
        assert!(!reloaded.settings().audio_only);
    }
}
