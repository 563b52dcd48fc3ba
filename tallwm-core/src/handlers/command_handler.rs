use crate::command::Command;
use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::errors::CommandError;
use crate::layouts::LayoutCommand;
use crate::models::{ExitReason, Manager, Window, WindowState};
use crate::utils::child_process;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Run one command. Errors are logged and dropped.
    /// Returns true if changes need to be rendered.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        match self.execute(command) {
            Ok(changed) => changed,
            Err(err) => {
                tracing::debug!("{:?} failed: {}", command, err);
                false
            }
        }
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// When the command does not apply to the current state, see [`CommandError`].
    /// Nothing is changed in that case.
    pub fn execute(&mut self, command: &Command) -> Result<bool, CommandError> {
        let state = &mut self.state;
        match command {
            Command::Spawn(program) => {
                child_process::spawn_shell(program, &mut self.children);
                Ok(false)
            }
            Command::Shutdown => {
                self.request_exit(ExitReason::Shutdown);
                Ok(false)
            }
            Command::Restart => {
                self.request_exit(ExitReason::Restart);
                Ok(false)
            }

            Command::KillWindow => {
                let handle = state.focus_manager.window.ok_or(CommandError::NoFocusedWindow)?;
                state.actions.push_back(DisplayAction::KillWindow(handle));
                Ok(false)
            }
            Command::ToggleFullscreen => {
                let window = self.focused_window_mut()?;
                window.fullscreen = !window.fullscreen;
                let (handle, fullscreen) = (window.handle, window.fullscreen);
                if fullscreen {
                    window.states.push(WindowState::Fullscreen);
                } else {
                    window.states.retain(|s| *s != WindowState::Fullscreen);
                }
                self.state.actions.push_back(DisplayAction::SetState(
                    handle,
                    fullscreen,
                    WindowState::Fullscreen,
                ));
                if fullscreen {
                    self.state.raise_window(handle);
                }
                Ok(true)
            }
            Command::ToggleMinimize => {
                let window = self.focused_window_mut()?;
                window.minimized = !window.minimized;
                let (handle, minimized) = (window.handle, window.minimized);
                if minimized {
                    window.states.push(WindowState::Hidden);
                } else {
                    window.states.retain(|s| *s != WindowState::Hidden);
                }
                self.state.actions.push_back(DisplayAction::SetState(
                    handle,
                    minimized,
                    WindowState::Hidden,
                ));
                if minimized {
                    self.state.focus_away_from(handle);
                }
                Ok(true)
            }
            Command::RestoreMinimized => Ok(state.restore_last_minimized()),
            Command::ToggleFloating => {
                let floating = !self.focused_window_mut()?.is_floating();
                self.set_focused_floating(floating)
            }
            Command::EnableFloating => self.set_focused_floating(true),
            Command::DisableFloating => self.set_focused_floating(false),
            Command::BringToFront => {
                let handle = state.focus_manager.window.ok_or(CommandError::NoFocusedWindow)?;
                state.raise_window(handle);
                Ok(false)
            }

            Command::GoToGroup(name) => {
                state.goto_group(name)?;
                Ok(true)
            }
            Command::MoveWindowToGroup(name) => {
                state.move_focused_to_group(name)?;
                Ok(true)
            }

            Command::NextLayout => self.cycle_layout(1),
            Command::PreviousLayout => self.cycle_layout(-1),
            Command::SetLayout(kind) => {
                let group = state.focused_group().ok_or(CommandError::NoScreen)?;
                state.set_layout(group, *kind)?;
                Ok(true)
            }

            Command::FocusNextWindow => Ok(state.focus_relative(1)),
            Command::FocusPreviousWindow => Ok(state.focus_relative(-1)),
            Command::FocusLastWindow => Ok(state.focus_last_window()),

            Command::Layout(command) => self.layout_command(*command),
        }
    }

    fn focused_window_mut(&mut self) -> Result<&mut Window, CommandError> {
        let handle = self
            .state
            .focus_manager
            .window
            .ok_or(CommandError::NoFocusedWindow)?;
        Ok(self.state.registry.lookup_mut(handle)?)
    }

    fn set_focused_floating(&mut self, floating: bool) -> Result<bool, CommandError> {
        let window = self.focused_window_mut()?;
        if window.is_floating() == floating {
            return Ok(false);
        }
        window.set_floating(floating);
        let handle = window.handle;
        if floating {
            self.state.raise_window(handle);
        }
        Ok(true)
    }

    fn cycle_layout(&mut self, shift: isize) -> Result<bool, CommandError> {
        let group = self.state.focused_group().ok_or(CommandError::NoScreen)?;
        let kind = self
            .state
            .groups
            .get_mut(group)
            .and_then(|g| g.cycle_layout(shift));
        tracing::debug!("Group {} now uses {:?}", group, kind);
        Ok(kind.is_some())
    }

    fn layout_command(&mut self, command: LayoutCommand) -> Result<bool, CommandError> {
        let state = &mut self.state;
        let group = state.focused_group().ok_or(CommandError::NoScreen)?;
        let focused = state.focus_manager.window;
        let registry = &state.registry;
        let target = state
            .groups
            .get_mut(group)
            .ok_or(crate::errors::GroupError::UnknownGroup(group))?
            .apply_layout_command(command, focused, |handle| {
                registry.lookup(handle).is_ok_and(Window::is_tiled)
            })?;
        if let Some(target) = target {
            state.focus_window(target);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::command::Command;
    use crate::config::TestConfig;
    use crate::errors::CommandError;
    use crate::layouts::{LayoutCommand, LayoutKind};
    use crate::models::{ExitReason, Management, Manager, Window, WindowHandle};

    type TestManager = Manager<TestConfig, crate::display_servers::MockDisplayServer>;

    fn manager_with_windows(count: u32) -> TestManager {
        let mut manager = Manager::new_test(&["1", "2"]);
        for id in 1..=count {
            manager.window_created_handler(Window::new(WindowHandle(id), None, None), 0, 0);
        }
        manager
    }

    fn order(manager: &TestManager) -> Vec<u32> {
        manager
            .state
            .groups
            .get(1)
            .map(|g| g.windows.iter().map(|h| h.0).collect())
            .unwrap_or_default()
    }

    #[test]
    fn shutdown_and_restart_request_an_exit() {
        let mut manager = manager_with_windows(0);
        manager.command_handler(&Command::Restart);
        assert_eq!(manager.exit_requested, Some(ExitReason::Restart));
        manager.command_handler(&Command::Shutdown);
        assert_eq!(manager.exit_requested, Some(ExitReason::Shutdown));
    }

    #[test]
    fn window_commands_need_a_focused_window() {
        let mut manager = manager_with_windows(0);
        assert_eq!(
            manager.execute(&Command::ToggleFloating),
            Err(CommandError::NoFocusedWindow)
        );
        assert!(!manager.command_handler(&Command::KillWindow));
    }

    #[test]
    fn floating_and_fullscreen_toggles() {
        let mut manager = manager_with_windows(1);
        let management = |m: &TestManager| {
            m.state
                .registry
                .lookup(WindowHandle(1))
                .map(Window::management)
        };
        assert!(manager.command_handler(&Command::ToggleFloating));
        assert_eq!(management(&manager), Ok(Management::Floating));
        assert!(manager.command_handler(&Command::ToggleFullscreen));
        assert_eq!(management(&manager), Ok(Management::Fullscreen(crate::models::Tiling::Floating)));
        assert!(manager.command_handler(&Command::ToggleFullscreen));
        assert!(manager.command_handler(&Command::DisableFloating));
        assert_eq!(management(&manager), Ok(Management::Tiled));
        assert!(!manager.command_handler(&Command::DisableFloating));
    }

    #[test]
    fn swap_main_moves_the_focused_window_first() {
        let mut manager = manager_with_windows(3);
        assert!(manager.command_handler(&LayoutCommand::SwapMain.into()));
        assert_eq!(order(&manager), vec![3, 2, 1]);
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(3)));
    }

    #[test]
    fn layout_commands_skip_floating_windows() {
        let mut manager = manager_with_windows(3);
        if let Ok(window) = manager.state.registry.lookup_mut(WindowHandle(2)) {
            window.set_floating(true);
        }
        manager.command_handler(&LayoutCommand::ShuffleUp.into());
        assert_eq!(order(&manager), vec![3, 2, 1]);
    }

    #[test]
    fn incompatible_layout_commands_change_nothing() {
        let mut manager = manager_with_windows(2);
        manager.command_handler(&Command::SetLayout(LayoutKind::Monocle));
        assert!(matches!(
            manager.execute(&LayoutCommand::Flip.into()),
            Err(CommandError::LayoutIncompatible { .. })
        ));
        assert_eq!(order(&manager), vec![1, 2]);
    }

    #[test]
    fn next_layout_cycles_and_wraps() {
        let mut manager = manager_with_windows(0);
        let kind = |m: &TestManager| m.state.groups.get(1).and_then(crate::models::Group::layout_kind);
        manager.command_handler(&Command::NextLayout);
        assert_eq!(kind(&manager), Some(LayoutKind::Columns));
        manager.command_handler(&Command::PreviousLayout);
        manager.command_handler(&Command::PreviousLayout);
        assert_eq!(kind(&manager), Some(LayoutKind::Monocle));
    }

    #[test]
    fn minimizing_moves_focus_on() {
        let mut manager = manager_with_windows(2);
        assert!(manager.command_handler(&Command::ToggleMinimize));
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(1)));
        manager.state.arrange();
        assert_eq!(
            manager.state.registry.lookup(WindowHandle(2)).map(|w| w.visible),
            Ok(false)
        );
    }

    #[test]
    fn minimized_windows_can_be_brought_back() {
        let mut manager = manager_with_windows(2);
        let minimized = |m: &TestManager| m.state.registry.lookup(WindowHandle(2)).map(|w| w.minimized);
        assert!(manager.command_handler(&Command::ToggleMinimize));
        assert_eq!(minimized(&manager), Ok(true));

        assert!(manager.command_handler(&Command::RestoreMinimized));
        assert_eq!(minimized(&manager), Ok(false));
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(2)));
        manager.state.arrange();
        assert_eq!(
            manager.state.registry.lookup(WindowHandle(2)).map(|w| w.visible),
            Ok(true)
        );
        assert!(!manager.command_handler(&Command::RestoreMinimized));
    }

    #[test]
    fn activating_a_minimized_window_restores_it() {
        let mut manager = manager_with_windows(2);
        manager.command_handler(&Command::ToggleMinimize);
        assert!(manager.focus_request_handler(WindowHandle(2)));
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(2)));
        assert_eq!(
            manager.state.registry.lookup(WindowHandle(2)).map(|w| w.states.is_empty()),
            Ok(true)
        );
    }
}
