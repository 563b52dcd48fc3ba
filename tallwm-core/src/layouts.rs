//! Tiling algorithms. Each maps the ordered tiled windows of a group to rectangles.
mod columns;
mod main_and_stack;
pub mod monocle;
pub mod split;

pub use columns::Columns;
pub use main_and_stack::MainAndStack;

use crate::errors::{CommandError, ConfigError};
use crate::models::{Rect, WindowHandle};
use crate::utils::helpers;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    MainAndStack,
    Columns,
    Monocle,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MainAndStack => "MainAndStack",
            Self::Columns => "Columns",
            Self::Monocle => "Monocle",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("Could not parse layout: {0}")]
pub struct ParseLayoutError(String);

impl FromStr for LayoutKind {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MainAndStack" | "Tall" => Ok(Self::MainAndStack),
            "Columns" | "Stack" => Ok(Self::Columns),
            "Monocle" | "Max" => Ok(Self::Monocle),
            _ => Err(ParseLayoutError(s.to_string())),
        }
    }
}

/// Operations a keybinding can aim at the focused group's layout.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCommand {
    // every layout
    FocusUp,
    FocusDown,
    ShuffleUp,
    ShuffleDown,
    // main and stack
    FocusLeft,
    FocusRight,
    SwapLeft,
    SwapRight,
    SwapMain,
    Flip,
    Grow,
    Shrink,
    IncreaseRatio,
    DecreaseRatio,
    Maximize,
    Normalize,
    IncreaseMainCount,
    DecreaseMainCount,
    // columns and monocle
    FocusNext,
    FocusPrevious,
    // columns
    AddColumn,
    DeleteColumn,
    ClientToNext,
    ClientToPrevious,
    Rotate,
}

/// A layout instance. Every group owns one of each configured layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind")]
pub enum Layout {
    MainAndStack(MainAndStack),
    Columns(Columns),
    Monocle,
}

impl Default for Layout {
    fn default() -> Self {
        Self::MainAndStack(MainAndStack::default())
    }
}

impl Layout {
    #[must_use]
    pub const fn kind(&self) -> LayoutKind {
        match self {
            Self::MainAndStack(_) => LayoutKind::MainAndStack,
            Self::Columns(_) => LayoutKind::Columns,
            Self::Monocle => LayoutKind::Monocle,
        }
    }

    /// # Errors
    ///
    /// Returns an error when the layout's parameters are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::MainAndStack(layout) => layout.validate(),
            Self::Columns(_) | Self::Monocle => Ok(()),
        }
    }

    /// Compute a rectangle for every shown window. Windows missing from the result
    /// are not shown by this layout.
    #[must_use]
    pub fn compute(
        &self,
        windows: &[WindowHandle],
        focused: Option<WindowHandle>,
        area: Rect,
    ) -> Vec<(WindowHandle, Rect)> {
        match self {
            Self::MainAndStack(layout) => layout.compute(windows, area),
            Self::Columns(layout) => layout.compute(windows, area),
            Self::Monocle => monocle::compute(windows, focused, area),
        }
    }

    /// Called by the owning group whenever its window count changes.
    pub fn reset(&mut self) {
        if let Self::MainAndStack(layout) = self {
            layout.reset();
        }
    }

    /// Apply `command` to the ordered `windows` of the group. Reordering commands
    /// rearrange `windows` in place.
    ///
    /// Returns the window that should receive focus, if focus should move.
    ///
    /// # Errors
    ///
    /// `CommandError::LayoutIncompatible` when this layout has no such operation and
    /// `CommandError::NoFocusedWindow` when the operation needs a focused tiled window.
    pub fn apply(
        &mut self,
        command: LayoutCommand,
        windows: &mut [WindowHandle],
        focused: Option<WindowHandle>,
    ) -> Result<Option<WindowHandle>, CommandError> {
        use LayoutCommand as C;
        let incompatible = CommandError::LayoutIncompatible {
            command,
            layout: self.kind(),
        };
        let index = focused.and_then(|f| windows.iter().position(|w| *w == f));
        let count = windows.len();

        // Commands that do not depend on a focused window.
        match (&mut *self, command) {
            (Self::MainAndStack(layout), C::Flip) => {
                layout.flip();
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::IncreaseRatio) => {
                layout.change_ratio(1.0);
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::DecreaseRatio) => {
                layout.change_ratio(-1.0);
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::Normalize) => {
                layout.normalize();
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::IncreaseMainCount) => {
                layout.change_main_count(1);
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::DecreaseMainCount) => {
                layout.change_main_count(-1);
                return Ok(None);
            }
            (Self::Columns(layout), C::AddColumn) => {
                layout.add_column();
                return Ok(None);
            }
            (Self::Columns(layout), C::DeleteColumn) => {
                layout.delete_column();
                return Ok(None);
            }
            (Self::Columns(_), C::Rotate) => {
                if count > 0 {
                    windows.rotate_right(1);
                }
                return Ok(None);
            }
            _ => {}
        }

        if !self.supports(command) {
            return Err(incompatible);
        }
        let index = index.ok_or(CommandError::NoFocusedWindow)?;

        let target = match (&mut *self, command) {
            (_, C::FocusNext) => helpers::wrapping_index(index, count, 1),
            (_, C::FocusPrevious) => helpers::wrapping_index(index, count, -1),
            (Self::Columns(layout), C::FocusUp) => layout.within_column(index, count, -1),
            (Self::Columns(layout), C::FocusDown) => layout.within_column(index, count, 1),
            (_, C::FocusUp) => helpers::wrapping_index(index, count, -1),
            (_, C::FocusDown) => helpers::wrapping_index(index, count, 1),
            (_, C::ShuffleUp) => {
                swap_with(windows, index, helpers::wrapping_index(index, count, -1));
                return Ok(None);
            }
            (_, C::ShuffleDown) => {
                swap_with(windows, index, helpers::wrapping_index(index, count, 1));
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::FocusLeft | C::FocusRight) => {
                let toward_main = (command == C::FocusLeft) != layout.flipped;
                side_target(layout.main_len(count), index, count, toward_main)
            }
            (Self::MainAndStack(layout), C::SwapLeft | C::SwapRight) => {
                let toward_main = (command == C::SwapLeft) != layout.flipped;
                let other = side_target(layout.main_len(count), index, count, toward_main);
                swap_with(windows, index, other);
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::SwapMain) => {
                let other = if index == 0 {
                    (count > layout.main_len(count)).then_some(layout.main_len(count))
                } else {
                    Some(0)
                };
                swap_with(windows, index, other);
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::Grow) => {
                layout.grow(index, count);
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::Shrink) => {
                layout.shrink(index, count);
                return Ok(None);
            }
            (Self::MainAndStack(layout), C::Maximize) => {
                layout.maximize(index, count);
                return Ok(None);
            }
            (Self::Columns(layout), C::ClientToNext) => {
                let other = layout.neighbour_in_column(index, count, 1);
                swap_with(windows, index, other);
                return Ok(None);
            }
            (Self::Columns(layout), C::ClientToPrevious) => {
                let other = layout.neighbour_in_column(index, count, -1);
                swap_with(windows, index, other);
                return Ok(None);
            }
            _ => return Err(incompatible),
        };
        Ok(target.map(|i| windows[i]).filter(|w| Some(*w) != focused))
    }

    #[must_use]
    pub const fn supports(&self, command: LayoutCommand) -> bool {
        use LayoutCommand as C;
        match command {
            C::FocusUp | C::FocusDown | C::ShuffleUp | C::ShuffleDown => true,
            C::FocusLeft
            | C::FocusRight
            | C::SwapLeft
            | C::SwapRight
            | C::SwapMain
            | C::Flip
            | C::Grow
            | C::Shrink
            | C::IncreaseRatio
            | C::DecreaseRatio
            | C::Maximize
            | C::Normalize
            | C::IncreaseMainCount
            | C::DecreaseMainCount => matches!(self, Self::MainAndStack(_)),
            C::FocusNext | C::FocusPrevious => matches!(self, Self::Columns(_) | Self::Monocle),
            C::AddColumn | C::DeleteColumn | C::ClientToNext | C::ClientToPrevious | C::Rotate => {
                matches!(self, Self::Columns(_))
            }
        }
    }
}

/// The window across the main/stack border from `index`, if there is one in that direction.
fn side_target(main_len: usize, index: usize, count: usize, toward_main: bool) -> Option<usize> {
    let in_main = index < main_len;
    match (toward_main, in_main) {
        (true, false) => Some(0),
        (false, true) if count > main_len => Some(main_len),
        _ => None,
    }
}

fn swap_with(windows: &mut [WindowHandle], index: usize, other: Option<usize>) {
    if let Some(other) = other {
        windows.swap(index, other);
    }
}
