use crate::models::{GroupId, WindowHandle, WindowState};
use serde::{Deserialize, Serialize};

/// These are responses from the manager. The display server should act on them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum DisplayAction {
    /// The window is now managed. The flag says whether it floats.
    AddedWindow(WindowHandle, bool),
    /// The window is no longer managed.
    DestroyedWindow(WindowHandle),
    /// Ask the client to close, and kill it if it ignores the request.
    KillWindow(WindowHandle),
    WindowTakeFocus(WindowHandle),
    /// Nothing has focus anymore.
    Unfocus,
    /// Add or remove a state on the window.
    SetState(WindowHandle, bool, WindowState),
    /// Raise the window above all others.
    MoveToTop(WindowHandle),
    /// Tell the display server which group the window belongs to.
    SetWindowGroup(WindowHandle, GroupId),
    /// Enumerate the outputs again. Handled by the event loop, which feeds the result
    /// back as a `DisplayEvent::OutputsEnumerated`.
    QueryOutputs,
    /// Grab the pointer for a window drag.
    ReadyToMoveWindow(WindowHandle),
    ReadyToResizeWindow(WindowHandle),
    /// Release the pointer grab.
    NormalMode,
}
