//! A window the manager knows about.
use super::{Rect, WindowState, WindowType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque id the display server hands out for a window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct WindowHandle(pub u32);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Whether a managed window takes part in its group's layout.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tiling {
    #[default]
    Tiled,
    Floating,
}

/// The state of a managed window as the dispatcher sees it.
///
/// Fullscreen overlays the tiling state and hands it back unchanged on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Management {
    Tiled,
    Floating,
    Fullscreen(Tiling),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Window {
    pub handle: WindowHandle,
    /// Second part of `WM_CLASS`.
    pub class: Option<String>,
    /// First part of `WM_CLASS`.
    pub instance: Option<String>,
    pub title: Option<String>,
    /// The window this one is a dependent dialog of. Only the id is kept.
    pub transient: Option<WindowHandle>,
    pub pid: Option<u32>,
    pub r#type: WindowType,
    pub states: Vec<WindowState>,
    pub never_focus: bool,
    pub urgent: bool,
    pub tiling: Tiling,
    pub fullscreen: bool,
    pub minimized: bool,
    pub visible: bool,
    /// Geometry last computed by `State::arrange`.
    pub geometry: Rect,
    /// Where the window sits while floating.
    pub floating: Option<Rect>,
    /// Geometry the client asked for itself.
    pub requested: Option<Rect>,
}

impl Window {
    #[must_use]
    pub fn new(handle: WindowHandle, title: Option<String>, pid: Option<u32>) -> Self {
        Self {
            handle,
            title,
            pid,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_floating(&self) -> bool {
        matches!(self.tiling, Tiling::Floating)
    }

    pub fn set_floating(&mut self, floating: bool) {
        if floating && !self.is_floating() && self.floating.is_none() {
            // Start floating where the window is currently drawn.
            self.floating = Some(self.requested.unwrap_or(self.geometry));
        }
        self.tiling = if floating {
            Tiling::Floating
        } else {
            Tiling::Tiled
        };
    }

    #[must_use]
    pub const fn management(&self) -> Management {
        if self.fullscreen {
            Management::Fullscreen(self.tiling)
        } else {
            match self.tiling {
                Tiling::Tiled => Management::Tiled,
                Tiling::Floating => Management::Floating,
            }
        }
    }

    /// Whether the group's layout places this window.
    #[must_use]
    pub const fn is_tiled(&self) -> bool {
        matches!(self.management(), Management::Tiled) && !self.minimized
    }

    #[must_use]
    pub fn has_state(&self, state: &WindowState) -> bool {
        self.states.contains(state)
    }

    #[must_use]
    pub fn can_focus(&self) -> bool {
        !self.never_focus && !self.minimized
    }
}
