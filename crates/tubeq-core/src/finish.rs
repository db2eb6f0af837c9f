//! Action to take once the download queue drains.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// What the front-end does after the last queued task finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishAction {
    #[default]
    None,
    /// Quit the front-end itself.
    Exit,
    Shutdown,
    Hibernate,
    Sleep,
}

impl FinishAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Exit => "exit",
            Self::Shutdown => "shutdown",
            Self::Hibernate => "hibernate",
            Self::Sleep => "sleep",
        }
    }

    /// The OS command line that carries out this action on `platform`.
    ///
    /// `None` for actions that need no command (`None`, `Exit`) and for
    /// actions the platform does not support.
    pub fn command_for(self, platform: Platform) -> Option<Vec<String>> {
        let argv: &[&str] = match (self, platform) {
            (Self::None | Self::Exit, _) | (_, Platform::Other) => return None,

            (Self::Shutdown, Platform::Windows) => &["shutdown", "/s", "/t", "0"],
            (Self::Shutdown, Platform::MacOs) => &[
                "osascript",
                "-e",
                "tell application \"System Events\" to shut down",
            ],
            (Self::Shutdown, Platform::Linux) => &["systemctl", "poweroff"],

            (Self::Hibernate, Platform::Windows) => &["shutdown", "/h"],
            (Self::Hibernate, Platform::Linux) => &["systemctl", "hibernate"],
            (Self::Hibernate, Platform::MacOs) => return None,

            (Self::Sleep, Platform::Windows) => {
                &["rundll32.exe", "powrprof.dll,SetSuspendState", "0,1,0"]
            }
            (Self::Sleep, Platform::MacOs) => {
                &["osascript", "-e", "tell application \"System Events\" to sleep"]
            }
            (Self::Sleep, Platform::Linux) => &["systemctl", "suspend"],
        };

        Some(argv.iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_exit_have_no_command() {
        for platform in [Platform::Windows, Platform::MacOs, Platform::Linux] {
            assert_eq!(FinishAction::None.command_for(platform), None);
            assert_eq!(FinishAction::Exit.command_for(platform), None);
        }
    }

    #[test]
    fn shutdown_commands() {
        assert_eq!(
            FinishAction::Shutdown.command_for(Platform::Linux).unwrap(),
            vec!["systemctl", "poweroff"]
        );
        assert_eq!(
            FinishAction::Shutdown.command_for(Platform::Windows).unwrap(),
            vec!["shutdown", "/s", "/t", "0"]
        );
    }

    #[test]
    fn hibernate_unsupported_on_macos() {
        assert_eq!(FinishAction::Hibernate.command_for(Platform::MacOs), None);
        assert_eq!(FinishAction::Sleep.command_for(Platform::Other), None);
    }

    #[test]
    fn serde_lowercase() {
        let action: FinishAction = serde_json::from_str("\"hibernate\"").unwrap();
        assert_eq!(action, FinishAction::Hibernate);
    }

    #[test]
    fn as_str_matches_serde_name() {
        for action in [FinishAction::None, FinishAction::Sleep, FinishAction::Hibernate] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }
}
