use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The command names users write in `config.toml` and pass to `tallwm-command`.
///
/// TOML has no nice way to write `tallwm_core::Command` with its payloads, so
/// bindings name a `BaseCommand` and carry the payload as a plain string `value`.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseCommand {
    Spawn,
    Shutdown,
    Restart,
    KillWindow,
    ToggleFullscreen,
    ToggleMinimize,
    RestoreMinimized,
    ToggleFloating,
    EnableFloating,
    DisableFloating,
    BringToFront,
    GoToGroup,
    MoveWindowToGroup,
    NextLayout,
    PreviousLayout,
    SetLayout,
    FocusNextWindow,
    FocusPreviousWindow,
    FocusLastWindow,
    /// A layout operation, named by `value` (for example `Grow` or `AddColumn`).
    Layout,
}

impl BaseCommand {
    /// Every command, in the order `tallwm-command --list` prints them.
    pub const ALL: [Self; 20] = [
        Self::Spawn,
        Self::Shutdown,
        Self::Restart,
        Self::KillWindow,
        Self::ToggleFullscreen,
        Self::ToggleMinimize,
        Self::RestoreMinimized,
        Self::ToggleFloating,
        Self::EnableFloating,
        Self::DisableFloating,
        Self::BringToFront,
        Self::GoToGroup,
        Self::MoveWindowToGroup,
        Self::NextLayout,
        Self::PreviousLayout,
        Self::SetLayout,
        Self::FocusNextWindow,
        Self::FocusPreviousWindow,
        Self::FocusLastWindow,
        Self::Layout,
    ];

    /// Whether the command needs a `value`.
    #[must_use]
    pub const fn takes_value(self) -> bool {
        matches!(
            self,
            Self::Spawn | Self::GoToGroup | Self::MoveWindowToGroup | Self::SetLayout | Self::Layout
        )
    }
}

impl fmt::Display for BaseCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Error)]
#[error("unknown command `{0}`")]
pub struct ParseCommandError(String);

impl FromStr for BaseCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.to_string() == s)
            .ok_or_else(|| ParseCommandError(s.to_string()))
    }
}
