use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_event::DisplayEvent;
use crate::display_servers::DisplayServer;
use crate::models::{ExitReason, Manager, Mode, Window};
use crate::utils::child_process;
use std::sync::atomic::Ordering;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Run until a `Shutdown` or `Restart` command is handled.
    ///
    /// Events are handled strictly in the order the display server reports them.
    /// The manager can be reused after a `Restart`: windows, groups and screens
    /// survive, startup programs are not run again.
    pub async fn event_loop(&mut self) -> ExitReason {
        let mut event_buffer: Vec<DisplayEvent> = vec![];
        if self.state.screens.is_empty() {
            event_buffer.push(DisplayEvent::OutputsEnumerated(
                self.display_server.enumerate_outputs(),
            ));
        }

        //main event loop
        loop {
            self.display_server.flush();

            let mut needs_update = false;
            tokio::select! {
                () = self.display_server.wait_readable(), if event_buffer.is_empty() => {
                    event_buffer.append(&mut self.display_server.get_next_events());
                    continue;
                }
                else => {
                    event_buffer
                        .drain(..)
                        .for_each(|event| needs_update = self.display_event_handler(event) || needs_update);
                }
            }

            // If we need to update the displayed state.
            if needs_update {
                self.state.arrange();
                match self.state.mode {
                    // While dragging only the dragged window changes.
                    Mode::MovingWindow { handle, .. } | Mode::ResizingWindow { handle, .. } => {
                        let windows: Vec<&Window> = self
                            .state
                            .registry
                            .iter()
                            .filter(|w| w.handle == handle)
                            .collect();
                        self.display_server.update_windows(windows);
                    }
                    Mode::Normal => {
                        let windows: Vec<&Window> = self.state.registry.iter().collect();
                        self.display_server.update_windows(windows);
                    }
                }
            }

            //perform any actions requested by the handlers
            while let Some(act) = self.state.actions.pop_front() {
                if act == DisplayAction::QueryOutputs {
                    event_buffer.push(DisplayEvent::OutputsEnumerated(
                        self.display_server.enumerate_outputs(),
                    ));
                    continue;
                }
                if let Some(event) = self.display_server.execute_action(act) {
                    event_buffer.push(event);
                }
            }

            if !self.startup_done {
                self.startup_done = true;
                for program in &self.bindings.startup {
                    child_process::spawn_shell(program, &mut self.children);
                }
            }

            if self.reap_requested.swap(false, Ordering::SeqCst) {
                self.children.reap();
            }

            if let Some(reason) = self.exit_requested.take() {
                tracing::info!("Leaving the event loop: {:?}", reason);
                return reason;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::command::Command;
    use crate::display_action::DisplayAction;
    use crate::display_event::DisplayEvent;
    use crate::config::TestConfig;
    use crate::display_servers::MockDisplayServer;
    use crate::errors::DisplayQueryError;
    use crate::models::{ExitReason, Manager, Output, Rect, Window, WindowHandle};

    fn create(id: u32) -> DisplayEvent {
        DisplayEvent::WindowCreate(Window::new(WindowHandle(id), None, None), 0, 0)
    }

    #[tokio::test]
    async fn shutdown_ends_the_loop() {
        let server =
            MockDisplayServer::with_outputs(vec![Output::new("a", Rect::new(0, 0, 800, 600))]);
        let mut manager = Manager::new(TestConfig::new(&["1"]), server).expect("valid config");
        manager.display_server.batches.push_back(vec![create(1), create(2)]);
        manager
            .display_server
            .batches
            .push_back(vec![DisplayEvent::SendCommand(Command::Shutdown)]);

        assert_eq!(manager.event_loop().await, ExitReason::Shutdown);
        assert_eq!(manager.state.screens.len(), 1);
        assert_eq!(manager.state.screens[0].output.name, "a");
        let geometry: Vec<Rect> = manager.state.registry.iter().map(|w| w.geometry).collect();
        assert_eq!(geometry, vec![Rect::new(0, 0, 400, 600), Rect::new(400, 0, 400, 600)]);
        assert!(manager
            .display_server
            .actions
            .contains(&DisplayAction::AddedWindow(WindowHandle(2), false)));
    }

    #[tokio::test]
    async fn restart_keeps_the_manager_usable() {
        let server =
            MockDisplayServer::with_outputs(vec![Output::new("a", Rect::new(0, 0, 800, 600))]);
        let mut manager = Manager::new(TestConfig::new(&["1"]), server).expect("valid config");
        manager
            .display_server
            .batches
            .push_back(vec![create(1), DisplayEvent::SendCommand(Command::Restart)]);
        assert_eq!(manager.event_loop().await, ExitReason::Restart);

        manager
            .reload_config(TestConfig::new(&["1", "2"]))
            .expect("valid reload");
        manager.display_server.batches.push_back(vec![
            DisplayEvent::SendCommand(Command::GoToGroup("2".to_string())),
            DisplayEvent::SendCommand(Command::Shutdown),
        ]);
        assert_eq!(manager.event_loop().await, ExitReason::Shutdown);
        assert!(manager.state.registry.contains(WindowHandle(1)));
        assert_eq!(manager.state.screens[0].group, 2);
    }

    #[tokio::test]
    async fn unreadable_outputs_fall_back_to_a_synthetic_screen() {
        let server = MockDisplayServer::failing(DisplayQueryError::NoOutputs);
        let mut manager = Manager::new(TestConfig::new(&["1"]), server).expect("valid config");
        manager
            .display_server
            .batches
            .push_back(vec![create(1), DisplayEvent::SendCommand(Command::Shutdown)]);
        assert_eq!(manager.event_loop().await, ExitReason::Shutdown);
        assert!(manager.state.screens[0].is_synthetic());
        assert_eq!(
            manager.state.registry.lookup(WindowHandle(1)).map(|w| w.visible),
            Ok(true)
        );
    }

    #[tokio::test]
    async fn output_changes_are_queried_and_applied() {
        let mut manager = Manager::new_test_with(
            TestConfig::new(&["1"]),
            &[("a", Rect::new(0, 0, 800, 600))],
        );
        manager.display_server.outputs = Ok(vec![
            Output::new("a", Rect::new(0, 0, 800, 600)),
            Output::new("b", Rect::new(800, 0, 800, 600)),
        ]);
        manager.display_server.batches.push_back(vec![DisplayEvent::OutputsChanged]);
        manager
            .display_server
            .batches
            .push_back(vec![DisplayEvent::SendCommand(Command::Shutdown)]);
        manager.event_loop().await;
        assert_eq!(manager.state.screens.len(), 2);
        assert_eq!(manager.state.screens[1].group, 2);
        assert!(!manager
            .display_server
            .actions
            .contains(&DisplayAction::QueryOutputs));
    }
}
