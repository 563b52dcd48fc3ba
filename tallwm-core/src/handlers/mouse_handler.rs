use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::{Manager, Mode, MouseAction, Rect, WindowHandle};
use crate::utils::modmask_lookup::{Button, ModMask};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// A button was pressed over a window with modifiers held.
    /// Returns true if changes need to be rendered.
    pub fn mouse_combo_handler(
        &mut self,
        modifiers: ModMask,
        button: Button,
        handle: WindowHandle,
        x: i32,
        y: i32,
    ) -> bool {
        let Some(action) = self
            .bindings
            .mousebinds
            .iter()
            .find(|bind| bind.modifiers == modifiers && bind.button == button)
            .map(|bind| bind.action)
        else {
            return false;
        };
        let state = &mut self.state;
        let Ok(window) = state.registry.lookup_mut(handle) else {
            return false;
        };
        match action {
            MouseAction::Move | MouseAction::Resize => {
                if window.fullscreen {
                    return false;
                }
                window.set_floating(true);
                let start = window.floating.unwrap_or(window.geometry);
                window.floating = Some(start);
                let origin = (x, y);
                if action == MouseAction::Move {
                    state.mode = Mode::MovingWindow { handle, origin, start };
                    state.actions.push_back(DisplayAction::ReadyToMoveWindow(handle));
                } else {
                    state.mode = Mode::ResizingWindow { handle, origin, start };
                    state.actions.push_back(DisplayAction::ReadyToResizeWindow(handle));
                }
                state.raise_window(handle);
                state.focus_window(handle);
                true
            }
            MouseAction::BringToFront => {
                state.raise_window(handle);
                state.focus_window(handle);
                false
            }
        }
    }

    /// The pointer moved. Drags the window of a pending move or resize.
    /// Returns true if changes need to be rendered.
    pub fn mouse_motion_handler(&mut self, x: i32, y: i32) -> bool {
        let state = &mut self.state;
        match state.mode {
            Mode::MovingWindow { handle, origin, start } => {
                let Ok(window) = state.registry.lookup_mut(handle) else {
                    return false;
                };
                window.floating = Some(start.translate(x - origin.0, y - origin.1));
                true
            }
            Mode::ResizingWindow { handle, origin, start } => {
                let Ok(window) = state.registry.lookup_mut(handle) else {
                    return false;
                };
                let w = (start.w + x - origin.0).max(1);
                let h = (start.h + y - origin.1).max(1);
                window.floating = Some(Rect::new(start.x, start.y, w, h));
                true
            }
            Mode::Normal => {
                // The focused screen follows the pointer.
                if let Some(id) = state.screen_at(x, y).map(|s| s.id) {
                    state.focus_manager.screen = Some(id);
                }
                false
            }
        }
    }

    /// Returns true if changes need to be rendered.
    pub fn mouse_release_handler(&mut self) -> bool {
        let Some(handle) = self.state.mode.handle() else {
            return false;
        };
        self.state.mode = Mode::Normal;
        self.state.actions.push_back(DisplayAction::NormalMode);
        self.state.focus_window(handle);
        true
    }

    /// The pointer entered a window. Only moves focus with follow-mouse enabled.
    pub fn enter_handler(&mut self, handle: WindowHandle) -> bool {
        if !self.state.focus_manager.follow_mouse || self.state.mode != Mode::Normal {
            return false;
        }
        self.state.focus_window(handle);
        false
    }

    /// A client asked for focus. Windows that are not shown get marked urgent
    /// instead of stealing focus, minimized ones on a shown group are restored.
    pub fn focus_request_handler(&mut self, handle: WindowHandle) -> bool {
        let displayed = self
            .state
            .groups
            .group_of(handle)
            .is_some_and(|group| self.state.is_displayed(group));
        if displayed {
            // Activating a minimized window brings it back.
            let restored = self.state.restore_window(handle);
            self.state.focus_window(handle);
            return restored;
        }
        match self.state.registry.lookup_mut(handle) {
            Ok(window) if !window.urgent => {
                window.urgent = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_action::DisplayAction;
    use crate::models::{Manager, Mode, MouseAction, Mousebind, Rect, Window, WindowHandle};
    use crate::utils::modmask_lookup::{Button, ModMask};

    fn manager() -> Manager<TestConfig, crate::display_servers::MockDisplayServer> {
        let mut config = TestConfig::new(&["1", "2"]);
        config.mousebinds = vec![
            Mousebind {
                modifiers: ModMask::Super,
                button: Button::Button1,
                action: MouseAction::Move,
            },
            Mousebind {
                modifiers: ModMask::Super,
                button: Button::Button3,
                action: MouseAction::Resize,
            },
        ];
        let mut manager =
            Manager::new_test_with(config, &[("a", Rect::new(0, 0, 1000, 1000))]);
        let mut window = Window::new(WindowHandle(1), None, None);
        window.geometry = Rect::new(100, 100, 200, 200);
        manager.window_created_handler(window, 0, 0);
        manager
    }

    #[test]
    fn dragging_floats_and_moves_the_window() {
        let mut manager = manager();
        assert!(manager.mouse_combo_handler(ModMask::Super, Button::Button1, WindowHandle(1), 10, 10));
        assert!(matches!(manager.state.mode, Mode::MovingWindow { .. }));
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::ReadyToMoveWindow(WindowHandle(1))));
        assert!(manager.mouse_motion_handler(60, 30));
        let window = manager.state.registry.lookup(WindowHandle(1)).expect("managed");
        assert!(window.is_floating());
        assert_eq!(window.floating, Some(Rect::new(150, 120, 200, 200)));

        assert!(manager.mouse_release_handler());
        assert_eq!(manager.state.mode, Mode::Normal);
        assert_eq!(manager.state.actions.back(), Some(&DisplayAction::WindowTakeFocus(WindowHandle(1))));
    }

    #[test]
    fn resizing_never_collapses_the_window() {
        let mut manager = manager();
        manager.mouse_combo_handler(ModMask::Super, Button::Button3, WindowHandle(1), 0, 0);
        manager.mouse_motion_handler(-500, 50);
        let window = manager.state.registry.lookup(WindowHandle(1)).expect("managed");
        assert_eq!(window.floating, Some(Rect::new(100, 100, 1, 250)));
    }

    #[test]
    fn unbound_buttons_do_nothing() {
        let mut manager = manager();
        assert!(!manager.mouse_combo_handler(ModMask::Alt, Button::Button1, WindowHandle(1), 0, 0));
        assert_eq!(manager.state.mode, Mode::Normal);
        assert!(!manager.mouse_release_handler());
    }

    #[test]
    fn focus_requests_from_hidden_groups_mark_urgency() {
        let mut manager = manager();
        manager.state.move_window(WindowHandle(1), 2).expect("group exists");
        assert!(manager.focus_request_handler(WindowHandle(1)));
        assert_eq!(
            manager.state.registry.lookup(WindowHandle(1)).map(|w| w.urgent),
            Ok(true)
        );
    }

    #[test]
    fn enter_only_focuses_with_follow_mouse() {
        let mut manager = manager();
        manager.window_created_handler(Window::new(WindowHandle(2), None, None), 0, 0);
        manager.enter_handler(WindowHandle(1));
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(2)));
        manager.state.focus_manager.follow_mouse = true;
        manager.enter_handler(WindowHandle(1));
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(1)));
    }
}
