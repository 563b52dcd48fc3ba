use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_event::DisplayEvent;
use crate::display_servers::DisplayServer;
use crate::models::{Chord, Manager};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Process a single event. Returns true if changes need to be rendered.
    pub fn display_event_handler(&mut self, event: DisplayEvent) -> bool {
        match event {
            DisplayEvent::WindowCreate(window, x, y) => self.window_created_handler(window, x, y),
            DisplayEvent::WindowChange(change) => self.window_changed_handler(change),
            DisplayEvent::WindowDestroy(handle) | DisplayEvent::WindowUnmap(handle) => {
                self.window_destroyed_handler(handle)
            }
            DisplayEvent::FocusRequest(handle) => self.focus_request_handler(handle),
            DisplayEvent::Enter(handle) => self.enter_handler(handle),
            DisplayEvent::KeyCombo(modifiers, key) => {
                let chord = Chord { modifiers, key };
                matches!(
                    self.dispatch(&chord),
                    crate::Dispatch::Executed { changed: true }
                )
            }
            DisplayEvent::MouseCombo(modifiers, button, handle, x, y) => {
                self.mouse_combo_handler(modifiers, button, handle, x, y)
            }
            DisplayEvent::MouseMotion(x, y) => self.mouse_motion_handler(x, y),
            DisplayEvent::MouseRelease => self.mouse_release_handler(),
            DisplayEvent::OutputsChanged => {
                self.state.actions.push_back(DisplayAction::QueryOutputs);
                false
            }
            DisplayEvent::OutputsEnumerated(outputs) => self.state.reconcile_outputs(outputs),
            DisplayEvent::SendCommand(command) => self.command_handler(&command),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::display_action::DisplayAction;
    use crate::display_event::DisplayEvent;
    use crate::models::{Manager, Output, Rect, Window, WindowHandle};
    use crate::utils::modmask_lookup::ModMask;

    #[test]
    fn output_changes_trigger_a_query() {
        let mut manager = Manager::new_test(&["1"]);
        assert!(!manager.display_event_handler(DisplayEvent::OutputsChanged));
        assert_eq!(manager.state.actions.back(), Some(&DisplayAction::QueryOutputs));
        let outputs = vec![Output::new("big", Rect::new(0, 0, 3840, 2160))];
        assert!(manager.display_event_handler(DisplayEvent::OutputsEnumerated(Ok(outputs))));
        assert_eq!(manager.state.screens[0].bbox(), Rect::new(0, 0, 3840, 2160));
    }

    #[test]
    fn key_combos_go_through_the_bindings() {
        let mut manager = Manager::new_test(&["1", "2"]);
        manager.display_event_handler(DisplayEvent::WindowCreate(
            Window::new(WindowHandle(1), None, None),
            0,
            0,
        ));
        let moved = manager.display_event_handler(DisplayEvent::KeyCombo(
            ModMask::Super | ModMask::Shift,
            "2".to_string(),
        ));
        assert!(moved);
        assert_eq!(manager.state.groups.group_of(WindowHandle(1)), Some(2));
        assert!(!manager.display_event_handler(DisplayEvent::KeyCombo(ModMask::Super, "x".to_string())));
    }

    #[test]
    fn unmapped_windows_are_forgotten() {
        let mut manager = Manager::new_test(&["1"]);
        manager.display_event_handler(DisplayEvent::WindowCreate(
            Window::new(WindowHandle(1), None, None),
            0,
            0,
        ));
        assert!(manager.display_event_handler(DisplayEvent::WindowUnmap(WindowHandle(1))));
        assert!(manager.state.registry.is_empty());
    }
}
