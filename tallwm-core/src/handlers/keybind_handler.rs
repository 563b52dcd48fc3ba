use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::{Chord, Manager};

/// Outcome of a key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The chord is bound. `changed` is true if anything needs rendering.
    Executed { changed: bool },
    Unbound,
}

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Run every command bound to `chord`, in order. A command that does not apply
    /// is skipped and the rest still run.
    pub fn dispatch(&mut self, chord: &Chord) -> Dispatch {
        let Some(commands) = self.bindings.keybindings.get(chord).map(<[_]>::to_vec) else {
            tracing::trace!("No binding for {}", chord);
            return Dispatch::Unbound;
        };
        let mut changed = false;
        for command in &commands {
            match self.execute(command) {
                Ok(result) => changed |= result,
                Err(err) => tracing::debug!("{}: skipping {:?}: {}", chord, command, err),
            }
        }
        Dispatch::Executed { changed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::config::TestConfig;
    use crate::layouts::{LayoutCommand, LayoutKind};
    use crate::models::{Keybind, Window, WindowHandle};
    use crate::utils::modmask_lookup::ModMask;

    fn manager(keybinds: Vec<Keybind>) -> Manager<TestConfig, crate::display_servers::MockDisplayServer> {
        let mut config = TestConfig::new(&["1", "2"]);
        config.keybinds = keybinds;
        Manager::new_test_with(config, &[("a", crate::models::Rect::new(0, 0, 100, 100))])
    }

    #[test]
    fn unbound_chords_change_nothing() {
        let mut manager = manager(vec![]);
        manager.window_created_handler(Window::new(WindowHandle(1), None, None), 0, 0);
        manager.state.actions.clear();
        let before = manager.state.screens.clone();
        let result = manager.dispatch(&Chord::new(ModMask::Alt, "q"));
        assert_eq!(result, Dispatch::Unbound);
        assert!(manager.state.actions.is_empty());
        assert_eq!(manager.state.screens, before);
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(1)));
    }

    #[test]
    fn derived_group_keys_switch_groups() {
        let mut manager = manager(vec![]);
        let result = manager.dispatch(&Chord::new(ModMask::Super, "2"));
        assert_eq!(result, Dispatch::Executed { changed: true });
        assert_eq!(manager.state.screens[0].group, 2);
    }

    #[test]
    fn incompatible_actions_are_skipped_and_the_rest_run() {
        let chord = Chord::new(ModMask::Super, "m");
        let mut manager = manager(vec![Keybind {
            chord: chord.clone(),
            commands: vec![
                Command::SetLayout(LayoutKind::Monocle),
                LayoutCommand::Flip.into(),
                Command::GoToGroup("2".to_string()),
            ],
        }]);
        let result = manager.dispatch(&chord);
        assert_eq!(result, Dispatch::Executed { changed: true });
        assert_eq!(manager.state.screens[0].group, 2);
        assert_eq!(
            manager.state.groups.get(1).and_then(crate::models::Group::layout_kind),
            Some(LayoutKind::Monocle)
        );
    }
}
