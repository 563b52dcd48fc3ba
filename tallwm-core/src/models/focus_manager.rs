use super::{GroupId, ScreenId, WindowHandle};
use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

const HISTORY_LEN: usize = 10;

/// `FocusManager` stores which screen, group and window have focus.
///
/// There is at most one focused window at a time. `forget_window` must be called
/// for every destroyed window so no reference to it survives.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FocusManager {
    pub window: Option<WindowHandle>,
    pub screen: Option<ScreenId>,
    pub group_history: VecDeque<GroupId>,
    pub window_history: VecDeque<WindowHandle>,
    /// Last focused window per group, restored when a group is shown again.
    pub groups_last_window: HashMap<GroupId, WindowHandle>,
    // entries below are configuration variables and are never changed
    pub follow_mouse: bool,
    pub focus_new_windows: bool,
}

impl FocusManager {
    pub fn new(config: &impl Config) -> Self {
        Self {
            follow_mouse: config.follow_mouse_focus(),
            focus_new_windows: config.focus_new_windows(),
            ..Self::default()
        }
    }

    /// Record `handle` as the focused window, a member of `group`.
    pub fn focus(&mut self, handle: WindowHandle, group: GroupId) {
        self.window = Some(handle);
        self.groups_last_window.insert(group, handle);
        self.window_history.retain(|h| *h != handle);
        self.window_history.push_front(handle);
        self.window_history.truncate(HISTORY_LEN);
        self.push_group(group);
    }

    pub fn push_group(&mut self, group: GroupId) {
        if self.group_history.front() != Some(&group) {
            self.group_history.push_front(group);
            self.group_history.truncate(HISTORY_LEN);
        }
    }

    pub fn unfocus(&mut self) {
        self.window = None;
    }

    /// Drop every reference to a window. Returns true if it was the focused one.
    pub fn forget_window(&mut self, handle: WindowHandle) -> bool {
        self.window_history.retain(|h| *h != handle);
        self.groups_last_window.retain(|_, h| *h != handle);
        if self.window == Some(handle) {
            self.window = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn last_window_of(&self, group: GroupId) -> Option<WindowHandle> {
        self.groups_last_window.get(&group).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroying_the_focused_window_clears_focus() {
        let mut focus = FocusManager::default();
        focus.focus(WindowHandle(1), 1);
        focus.focus(WindowHandle(2), 1);
        assert!(focus.forget_window(WindowHandle(2)));
        assert_eq!(focus.window, None);
        assert_eq!(focus.last_window_of(1), None);
        assert_eq!(focus.window_history.front(), Some(&WindowHandle(1)));
    }

    #[test]
    fn forgetting_another_window_keeps_focus() {
        let mut focus = FocusManager::default();
        focus.focus(WindowHandle(1), 1);
        focus.focus(WindowHandle(2), 2);
        assert!(!focus.forget_window(WindowHandle(1)));
        assert_eq!(focus.window, Some(WindowHandle(2)));
        assert_eq!(focus.last_window_of(1), None);
    }
}
