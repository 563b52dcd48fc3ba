use serde::{Deserialize, Serialize};

/// State hints a client or the display server reports for a window.
///
/// Only `Fullscreen` and `Hidden` change how the window is managed; the others
/// are carried along so they survive a round trip through the display server.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Fullscreen,
    /// Minimized.
    Hidden,
    Modal,
    Above,
    Below,
}
