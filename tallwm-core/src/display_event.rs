use crate::errors::DisplayQueryError;
use crate::models::{Output, Window, WindowChange, WindowHandle};
use crate::utils::modmask_lookup::{Button, ModMask};
use crate::Command;
use serde::{Deserialize, Serialize};

/// Input to the control loop, in the order the display server observed it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum DisplayEvent {
    /// A window was mapped. The coordinates are the pointer position, used to pick
    /// the screen the window appears on.
    WindowCreate(Window, i32, i32),
    WindowChange(WindowChange),
    WindowDestroy(WindowHandle),
    WindowUnmap(WindowHandle),
    /// A client asked for focus.
    FocusRequest(WindowHandle),
    /// The pointer entered a window.
    Enter(WindowHandle),
    KeyCombo(ModMask, String),
    MouseCombo(ModMask, Button, WindowHandle, i32, i32),
    MouseMotion(i32, i32),
    MouseRelease,
    /// Outputs were added, removed or resized.
    OutputsChanged,
    /// Result of a `DisplayAction::QueryOutputs`.
    OutputsEnumerated(Result<Vec<Output>, DisplayQueryError>),
    SendCommand(Command),
}
