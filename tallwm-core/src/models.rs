//! Objects (such as windows and groups) the manager keeps track of.
mod focus_manager;
mod group;
mod keybind;
mod manager;
mod mode;
mod rect;
mod registry;
mod screen;
mod window;
mod window_change;
mod window_state;
mod window_type;

pub use focus_manager::FocusManager;
pub use group::{Group, Groups};
pub use keybind::{Chord, Keybind, Keybindings, MouseAction, Mousebind};
pub use manager::{Bindings, ExitReason, Manager};
pub use mode::Mode;
pub use rect::Rect;
pub use registry::WindowRegistry;
pub use screen::{Output, Screen, ScreenId, SYNTHETIC_OUTPUT};
pub use window::{Management, Tiling, Window, WindowHandle};
pub use window_change::WindowChange;
pub use window_state::WindowState;
pub use window_type::WindowType;

pub type GroupId = usize;
