use crate::models::{Rect, WindowHandle};
use serde::{Deserialize, Serialize};

/// Pointer interaction the manager is in the middle of.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// A window follows the pointer. `origin` is where the drag started and
    /// `start` the window's floating geometry at that moment.
    MovingWindow {
        handle: WindowHandle,
        origin: (i32, i32),
        start: Rect,
    },
    ResizingWindow {
        handle: WindowHandle,
        origin: (i32, i32),
        start: Rect,
    },
    #[default]
    Normal,
}

impl Mode {
    #[must_use]
    pub const fn handle(&self) -> Option<WindowHandle> {
        match self {
            Self::MovingWindow { handle, .. } | Self::ResizingWindow { handle, .. } => {
                Some(*handle)
            }
            Self::Normal => None,
        }
    }
}
