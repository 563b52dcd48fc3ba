use crate::display_action::DisplayAction;
use crate::errors::{CommandError, GroupError};
use crate::models::{GroupId, ScreenId, WindowHandle};
use crate::state::State;

/// What a group switch did to the screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    /// The screen already showed the group.
    Unchanged,
    Switched,
    /// The group was shown on the other screen, which now shows the group this
    /// screen displayed before.
    Swapped(ScreenId),
}

impl State {
    /// Show `group` on `screen`.
    ///
    /// A group is displayed on at most one screen. If another screen shows it, the
    /// two screens trade groups.
    ///
    /// # Errors
    ///
    /// When the screen or the group does not exist.
    pub fn switch_to(&mut self, screen: ScreenId, group: GroupId) -> Result<Switch, CommandError> {
        if self.groups.get(group).is_none() {
            return Err(GroupError::UnknownGroup(group).into());
        }
        let index = self.screen_index(screen).ok_or(CommandError::NoScreen)?;
        let previous = self.screens[index].group;
        if previous == group {
            self.focus_group(group);
            return Ok(Switch::Unchanged);
        }

        let other = self.screens.iter().position(|s| s.group == group);
        self.screens[index].group = group;
        let switch = match other {
            Some(other) => {
                self.screens[other].group = previous;
                tracing::debug!(
                    "Swapping groups {} and {} between screens {:?} and {:?}",
                    previous,
                    group,
                    screen,
                    self.screens[other].id
                );
                Switch::Swapped(self.screens[other].id)
            }
            None => Switch::Switched,
        };
        self.focus_manager.screen = Some(screen);
        self.focus_group(group);
        Ok(switch)
    }

    /// Show the group named `name` on the focused screen.
    ///
    /// # Errors
    ///
    /// When no group has that name or there is no screen.
    pub fn goto_group(&mut self, name: &str) -> Result<Switch, CommandError> {
        let group = self
            .groups
            .by_name(name)
            .ok_or_else(|| CommandError::UnknownGroup(name.to_string()))?
            .id;
        let screen = self.focused_screen().ok_or(CommandError::NoScreen)?.id;
        self.switch_to(screen, group)
    }

    /// Move a window to the end of another group.
    ///
    /// # Errors
    ///
    /// When the window is in no group or the target group does not exist.
    pub fn move_window(&mut self, handle: WindowHandle, to: GroupId) -> Result<(), CommandError> {
        let from = self
            .groups
            .group_of(handle)
            .ok_or(crate::errors::NotFound(handle))?;
        let next = self.focus_candidate_after(handle);
        self.groups.move_window(handle, from, to)?;
        if from == to {
            return Ok(());
        }
        self.actions
            .push_back(DisplayAction::SetWindowGroup(handle, to));

        if self.focus_manager.window == Some(handle) && !self.is_displayed(to) {
            self.focus_manager.forget_window(handle);
            if !next.is_some_and(|next| self.focus_window(next)) {
                self.actions.push_back(DisplayAction::Unfocus);
            }
        }
        Ok(())
    }

    /// Move the focused window to the group named `name`.
    ///
    /// # Errors
    ///
    /// When no group has that name or nothing is focused.
    pub fn move_focused_to_group(&mut self, name: &str) -> Result<(), CommandError> {
        let group = self
            .groups
            .by_name(name)
            .ok_or_else(|| CommandError::UnknownGroup(name.to_string()))?
            .id;
        let handle = self
            .focus_manager
            .window
            .ok_or(CommandError::NoFocusedWindow)?;
        self.move_window(handle, group)
    }
}
