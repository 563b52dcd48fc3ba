pub mod command_handler;
pub mod display_event_handler;
mod focus_handler;
mod group_handler;
pub mod keybind_handler;
mod mouse_handler;
mod screen_handler;
pub mod window_handler;

pub use group_handler::Switch;
pub use keybind_handler::Dispatch;
