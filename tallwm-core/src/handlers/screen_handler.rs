use crate::display_action::DisplayAction;
use crate::errors::DisplayQueryError;
use crate::models::{GroupId, Output, Screen, ScreenId, WindowHandle, SYNTHETIC_OUTPUT};
use crate::state::State;

impl State {
    /// Bring the screens in line with the outputs the display server reported.
    ///
    /// Screens are matched to outputs by name and keep their group. New outputs
    /// show the first group no screen displays, a fresh group if every group is
    /// taken. When the outputs cannot be enumerated, or none are left, a single
    /// synthetic screen covering the fallback area is used instead.
    ///
    /// Windows of groups that are no longer displayed are moved to the group of the
    /// first screen so none becomes unreachable. Returns true if changes need to
    /// be rendered.
    pub fn reconcile_outputs(&mut self, outputs: Result<Vec<Output>, DisplayQueryError>) -> bool {
        let outputs = match outputs {
            Ok(outputs) if !outputs.is_empty() => outputs,
            Ok(_) => {
                tracing::warn!("No outputs reported, using a synthetic screen");
                vec![Output::new(SYNTHETIC_OUTPUT, self.fallback_area)]
            }
            Err(err) => {
                tracing::warn!("Could not enumerate outputs: {}", err);
                vec![Output::new(SYNTHETIC_OUTPUT, self.fallback_area)]
            }
        };

        let previous_groups: Vec<GroupId> = self.screens.iter().map(|s| s.group).collect();
        let mut old = std::mem::take(&mut self.screens);
        // Match by name first so kept screens hold on to their groups.
        let matched: Vec<(Output, Option<Screen>)> = outputs
            .into_iter()
            .map(|output| {
                let kept = old
                    .iter()
                    .position(|s| s.output.name == output.name)
                    .map(|index| old.remove(index));
                (output, kept)
            })
            .collect();
        let kept_groups: Vec<GroupId> = matched
            .iter()
            .filter_map(|(_, kept)| kept.as_ref().map(|s| s.group))
            .collect();

        for (output, kept) in matched {
            let screen = match kept {
                Some(mut screen) => {
                    screen.output = output;
                    screen
                }
                None => {
                    let group = self.free_group(&kept_groups);
                    let id = ScreenId(self.next_screen_id);
                    self.next_screen_id += 1;
                    tracing::info!("New screen {:?} on {} shows group {}", id, output.name, group);
                    Screen { id, output, group }
                }
            };
            self.screens.push(screen);
        }
        for removed in &old {
            tracing::info!("Screen {:?} on {} is gone", removed.id, removed.output.name);
        }

        self.rescue_released_windows(&previous_groups);

        let focused_alive = self
            .focus_manager
            .screen
            .is_some_and(|id| self.screen_index(id).is_some());
        if !focused_alive {
            if let Some(group) = self.screens.first().map(|s| s.group) {
                self.focus_group(group);
            }
        }
        true
    }

    /// First group neither shown by a screen nor `reserved`, a new one if all are.
    fn free_group(&mut self, reserved: &[GroupId]) -> GroupId {
        let free = self.groups.all().map(|g| g.id).find(|id| {
            !reserved.contains(id) && !self.screens.iter().any(|s| s.group == *id)
        });
        match free {
            Some(id) => id,
            None => self.groups.add_new_unlabeled(self.layouts.clone()),
        }
    }

    fn rescue_released_windows(&mut self, previous_groups: &[GroupId]) {
        let Some(target) = self.screens.first().map(|s| s.group) else {
            return;
        };
        for group in previous_groups {
            if self.is_displayed(*group) {
                continue;
            }
            let windows: Vec<WindowHandle> = self
                .groups
                .get(*group)
                .map(|g| g.windows.clone())
                .unwrap_or_default();
            for handle in windows {
                if self.groups.move_window(handle, *group, target).is_ok() {
                    self.actions
                        .push_back(DisplayAction::SetWindowGroup(handle, target));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::models::{Manager, Rect, Window};

    type TestManager = Manager<TestConfig, crate::display_servers::MockDisplayServer>;

    fn outputs(list: &[(&str, Rect)]) -> Vec<Output> {
        list.iter().map(|(name, rect)| Output::new(name, *rect)).collect()
    }

    fn add(manager: &mut TestManager, id: u32, x: i32) {
        manager.window_created_handler(Window::new(WindowHandle(id), None, None), x, 0);
    }

    #[test]
    fn each_output_gets_a_distinct_group() {
        let manager = Manager::new_test_with(
            TestConfig::new(&["1", "2"]),
            &[
                ("a", Rect::new(0, 0, 100, 100)),
                ("b", Rect::new(100, 0, 100, 100)),
                ("c", Rect::new(200, 0, 100, 100)),
            ],
        );
        let shown: Vec<GroupId> = manager.state.screens.iter().map(|s| s.group).collect();
        assert_eq!(shown, vec![1, 2, 3]);
        assert_eq!(manager.state.groups.len(), 3);
    }

    #[test]
    fn removing_the_last_output_keeps_every_window_reachable() {
        let mut manager = Manager::new_test_with(
            TestConfig::new(&["1", "2"]),
            &[
                ("a", Rect::new(0, 0, 100, 100)),
                ("b", Rect::new(100, 0, 100, 100)),
            ],
        );
        add(&mut manager, 1, 0);
        add(&mut manager, 2, 150);
        assert!(manager.state.reconcile_outputs(Ok(vec![])));

        assert_eq!(manager.state.screens.len(), 1);
        let screen = &manager.state.screens[0];
        assert!(screen.is_synthetic());
        assert_eq!(screen.bbox(), Rect::new(0, 0, 1920, 1080));
        let group = screen.group;
        assert_eq!(group, 1);
        assert_eq!(manager.state.groups.len(), 2);
        assert_eq!(manager.state.groups.group_of(WindowHandle(1)), Some(group));
        assert_eq!(manager.state.groups.group_of(WindowHandle(2)), Some(group));
        manager.state.arrange();
        assert!(manager.state.registry.iter().all(|w| w.visible));
    }

    #[test]
    fn failed_enumeration_falls_back_to_a_synthetic_screen() {
        let mut manager = Manager::new_test(&["1"]);
        manager
            .state
            .reconcile_outputs(Err(DisplayQueryError::Backend("gone".to_string())));
        assert_eq!(manager.state.screens.len(), 1);
        assert!(manager.state.screens[0].is_synthetic());
    }

    #[test]
    fn kept_outputs_keep_their_group_and_take_new_geometry() {
        let mut manager = Manager::new_test_with(
            TestConfig::new(&["1", "2"]),
            &[
                ("a", Rect::new(0, 0, 100, 100)),
                ("b", Rect::new(100, 0, 100, 100)),
            ],
        );
        let b = manager.state.screens[1].id;
        manager.state.reconcile_outputs(Ok(outputs(&[("b", Rect::new(0, 0, 300, 300))])));
        assert_eq!(manager.state.screens.len(), 1);
        assert_eq!(manager.state.screens[0].id, b);
        assert_eq!(manager.state.screens[0].group, 2);
        assert_eq!(manager.state.screens[0].bbox(), Rect::new(0, 0, 300, 300));
        assert_eq!(manager.state.focus_manager.screen, Some(b));
    }

    #[test]
    fn released_windows_move_to_the_first_screen() {
        let mut manager = Manager::new_test_with(
            TestConfig::new(&["1", "2"]),
            &[
                ("a", Rect::new(0, 0, 100, 100)),
                ("b", Rect::new(100, 0, 100, 100)),
            ],
        );
        add(&mut manager, 1, 150);
        manager.state.actions.clear();
        manager.state.reconcile_outputs(Ok(outputs(&[("a", Rect::new(0, 0, 100, 100))])));
        assert_eq!(manager.state.groups.group_of(WindowHandle(1)), Some(1));
        assert!(manager
            .state
            .actions
            .contains(&DisplayAction::SetWindowGroup(WindowHandle(1), 1)));
    }
}
