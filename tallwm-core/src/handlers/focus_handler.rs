use crate::display_action::DisplayAction;
use crate::models::{GroupId, WindowHandle, WindowState};
use crate::state::State;
use crate::utils::helpers::wrapping_index;

impl State {
    /// Give focus to a window of a displayed group. Returns false and changes
    /// nothing if the window cannot take focus.
    pub fn focus_window(&mut self, handle: WindowHandle) -> bool {
        let Some(group) = self.groups.group_of(handle) else {
            return false;
        };
        let Some(screen) = self.screen_of_group(group).map(|s| s.id) else {
            return false;
        };
        match self.registry.lookup_mut(handle) {
            Ok(window) if window.can_focus() => window.urgent = false,
            _ => return false,
        }
        self.focus_manager.screen = Some(screen);
        if self.focus_manager.window != Some(handle) {
            tracing::trace!("Focusing window {}", handle);
            self.focus_manager.focus(handle, group);
        }
        self.actions.push_back(DisplayAction::WindowTakeFocus(handle));
        true
    }

    /// Move focus into `group`: its last focused window, else its first focusable
    /// one, else nothing.
    pub fn focus_group(&mut self, group: GroupId) {
        if let Some(screen) = self.screen_of_group(group).map(|s| s.id) {
            self.focus_manager.screen = Some(screen);
        }
        self.focus_manager.push_group(group);
        let candidates: Vec<WindowHandle> = self
            .focus_manager
            .last_window_of(group)
            .into_iter()
            .chain(self.groups.get(group).map(|g| g.windows.clone()).unwrap_or_default())
            .collect();
        if candidates.into_iter().any(|handle| self.focus_window(handle)) {
            return;
        }
        self.focus_manager.unfocus();
        self.actions.push_back(DisplayAction::Unfocus);
    }

    /// The window that should get focus once `handle` goes away: the next focusable
    /// member of its group, wrapping around.
    pub(crate) fn focus_candidate_after(&self, handle: WindowHandle) -> Option<WindowHandle> {
        let group = self.groups.get(self.groups.group_of(handle)?)?;
        let index = group.windows.iter().position(|h| *h == handle)?;
        let len = group.windows.len();
        (1..len)
            .map(|offset| group.windows[(index + offset) % len])
            .find(|h| self.registry.lookup(*h).is_ok_and(crate::models::Window::can_focus))
    }

    /// Move focus off `handle` onto the next focusable window of its group.
    pub(crate) fn focus_away_from(&mut self, handle: WindowHandle) {
        let next = self.focus_candidate_after(handle);
        self.focus_manager.unfocus();
        if !next.is_some_and(|next| self.focus_window(next)) {
            self.actions.push_back(DisplayAction::Unfocus);
        }
    }

    /// Raise a window to the top of the stacking order.
    pub fn raise_window(&mut self, handle: WindowHandle) {
        if self.registry.raise(handle).is_ok() {
            self.actions.push_back(DisplayAction::MoveToTop(handle));
        }
    }

    /// Step focus through the focused group in its order, passing over windows
    /// that cannot take focus.
    pub fn focus_relative(&mut self, shift: isize) -> bool {
        let Some(group) = self.focused_group().and_then(|id| self.groups.get(id)) else {
            return false;
        };
        let windows = group.windows.clone();
        let focused = self.focus_manager.window;
        let candidates: Vec<WindowHandle> =
            match windows.iter().position(|h| Some(*h) == focused) {
                Some(index) => (1..windows.len())
                    .filter_map(|step| {
                        wrapping_index(index, windows.len(), shift * step as isize)
                    })
                    .map(|i| windows[i])
                    .collect(),
                None => windows,
            };
        candidates.into_iter().any(|handle| self.focus_window(handle))
    }

    /// Bring a minimized window back. Returns false if it was not minimized.
    pub fn restore_window(&mut self, handle: WindowHandle) -> bool {
        match self.registry.lookup_mut(handle) {
            Ok(window) if window.minimized => {
                window.minimized = false;
                window.states.retain(|s| *s != WindowState::Hidden);
            }
            _ => return false,
        }
        self.actions
            .push_back(DisplayAction::SetState(handle, false, WindowState::Hidden));
        true
    }

    /// Restore the most recently minimized window of the focused group and
    /// focus it.
    pub fn restore_last_minimized(&mut self) -> bool {
        let Some(group) = self.focused_group().and_then(|id| self.groups.get(id)) else {
            return false;
        };
        let is_minimized = |h: &WindowHandle| {
            self.registry.lookup(*h).is_ok_and(|w| w.minimized)
        };
        let target = self
            .focus_manager
            .window_history
            .iter()
            .find(|h| group.contains(**h) && is_minimized(*h))
            .or_else(|| group.windows.iter().rev().find(|h| is_minimized(*h)))
            .copied();
        let Some(handle) = target else {
            return false;
        };
        self.restore_window(handle);
        self.focus_window(handle);
        true
    }

    /// Go back to the window focused before the current one.
    pub fn focus_last_window(&mut self) -> bool {
        let history: Vec<WindowHandle> = self
            .focus_manager
            .window_history
            .iter()
            .copied()
            .filter(|h| Some(*h) != self.focus_manager.window)
            .collect();
        history.into_iter().any(|handle| self.focus_window(handle))
    }
}
