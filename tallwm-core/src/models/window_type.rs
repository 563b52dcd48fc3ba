use serde::{Deserialize, Serialize};

/// The `_NET_WM_WINDOW_TYPE` hint a client advertises, or its equivalent on other backends.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    Desktop,
    Dock,
    Toolbar,
    Menu,
    Utility,
    Splash,
    Dialog,
    DropDownMenu,
    PopupMenu,
    Tooltip,
    Notification,
    Combo,
    Dnd,
    #[default]
    Normal,
}

impl WindowType {
    /// Hints whose windows never enter a group.
    #[must_use]
    pub const fn is_unmanaged(self) -> bool {
        matches!(self, Self::Desktop | Self::Dock)
    }

    /// Hints that classify a window as floating.
    #[must_use]
    pub const fn prefers_floating(self) -> bool {
        !matches!(self, Self::Normal | Self::Desktop | Self::Dock)
    }
}
