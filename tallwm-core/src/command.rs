use crate::layouts::{LayoutCommand, LayoutKind};
use serde::{Deserialize, Serialize};

/// Everything a keybinding or an external client can ask the manager to do.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a program through the shell without waiting for it.
    Spawn(String),
    Shutdown,
    /// Re-read the configuration, keeping windows and groups.
    Restart,
    KillWindow,
    ToggleFullscreen,
    ToggleMinimize,
    /// Bring back the most recently minimized window of the focused group.
    RestoreMinimized,
    ToggleFloating,
    EnableFloating,
    DisableFloating,
    BringToFront,
    /// Show the named group on the focused screen.
    GoToGroup(String),
    /// Send the focused window to the end of the named group.
    MoveWindowToGroup(String),
    NextLayout,
    PreviousLayout,
    SetLayout(LayoutKind),
    /// Cycle focus through every window of the focused group, tiled or not.
    FocusNextWindow,
    FocusPreviousWindow,
    /// Focus the window that had focus before the current one.
    FocusLastWindow,
    Layout(LayoutCommand),
}

impl From<LayoutCommand> for Command {
    fn from(command: LayoutCommand) -> Self {
        Self::Layout(command)
    }
}
