use crate::config::{best_rule, Config, FloatRule, WindowRule};
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::{GroupId, Manager, Tiling, Window, WindowChange, WindowHandle, WindowState};

/// Decide how a new window is managed. `None` means it is not managed at all.
///
/// The first rule that has an opinion wins, in this order: an explicit user rule,
/// the transient-for hint, the window-type hint, the floating blacklist. A window
/// nothing matches is tiled.
#[must_use]
pub fn classify(
    window: &Window,
    window_rules: &[WindowRule],
    float_rules: &[FloatRule],
) -> Option<Tiling> {
    if window.r#type.is_unmanaged() {
        return None;
    }
    let floating = if let Some(floating) = best_rule(window_rules, window).and_then(|r| r.floating) {
        floating
    } else {
        window.transient.is_some()
            || window.r#type.prefers_floating()
            || float_rules.iter().any(|rule| rule.matches(window))
    };
    Some(if floating {
        Tiling::Floating
    } else {
        Tiling::Tiled
    })
}

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Classify a newly mapped window and add it to a group.
    /// Returns true if changes need to be rendered.
    pub fn window_created_handler(&mut self, mut window: Window, x: i32, y: i32) -> bool {
        //don't add the window if the manager already knows about it
        if self.state.registry.contains(window.handle) {
            return false;
        }
        let Some(tiling) = classify(&window, &self.bindings.window_rules, &self.bindings.float_rules)
        else {
            tracing::debug!("Not managing {} ({:?})", window.handle, window.r#type);
            return false;
        };

        let group = self.target_group(&window, x, y);
        window.set_floating(tiling == Tiling::Floating);
        window.fullscreen = window.has_state(&WindowState::Fullscreen);
        let handle = window.handle;
        let floating = window.is_floating();

        if let Err(err) = self.state.manage_window(window, group) {
            tracing::error!("Could not manage window {}: {}", handle, err);
            return false;
        }
        tracing::debug!("Managing {} in group {} as {:?}", handle, group, tiling);

        //let the DS know we are managing this window
        self.state
            .actions
            .push_back(DisplayAction::AddedWindow(handle, floating));
        self.state
            .actions
            .push_back(DisplayAction::SetWindowGroup(handle, group));
        if floating {
            self.state.raise_window(handle);
        }

        let focus_new = self.state.focus_manager.focus_new_windows
            || self.state.focus_manager.window.is_none();
        if focus_new && self.state.is_displayed(group) {
            self.state.focus_window(handle);
        }
        true
    }

    /// Rule group, then the transient parent's group, then the group shown where
    /// the window appeared.
    fn target_group(&self, window: &Window, x: i32, y: i32) -> GroupId {
        let state = &self.state;
        best_rule(&self.bindings.window_rules, window)
            .and_then(|rule| rule.group.as_deref())
            .and_then(|name| state.groups.by_name(name))
            .map(|group| group.id)
            .or_else(|| window.transient.and_then(|parent| state.groups.group_of(parent)))
            .or_else(|| state.screen_at(x, y).map(|screen| screen.group))
            .or_else(|| state.focused_group())
            .unwrap_or(1)
    }

    /// A window was destroyed or unmapped by its client.
    /// Returns true if changes need to be rendered.
    pub fn window_destroyed_handler(&mut self, handle: WindowHandle) -> bool {
        let Ok(window) = self.state.registry.lookup(handle) else {
            return false;
        };
        let transient = window.transient;
        let next = self.state.focus_candidate_after(handle);
        let was_focused = self.state.focus_manager.window == Some(handle);

        if let Err(err) = self.state.unmanage_window(handle) {
            tracing::error!("{}", err);
            return false;
        }
        self.state
            .actions
            .push_back(DisplayAction::DestroyedWindow(handle));

        //make sure focus is recalculated if we closed the currently focused window
        if was_focused {
            let refocused = transient
                .into_iter()
                .chain(next)
                .any(|handle| self.state.focus_window(handle));
            if !refocused {
                self.state.actions.push_back(DisplayAction::Unfocus);
            }
        }
        true
    }

    /// Returns true if changes need to be rendered.
    pub fn window_changed_handler(&mut self, change: WindowChange) -> bool {
        let handle = change.handle;
        let Ok(window) = self.state.registry.lookup_mut(handle) else {
            return false;
        };
        let was_fullscreen = window.fullscreen;
        tracing::trace!("WINDOW CHANGED {:?}", change);
        let changed = change.update(window);
        let fullscreen = window.fullscreen;
        let minimized = window.minimized;
        if fullscreen != was_fullscreen {
            self.state.actions.push_back(DisplayAction::SetState(
                handle,
                fullscreen,
                WindowState::Fullscreen,
            ));
            if fullscreen {
                self.state.raise_window(handle);
            }
        }
        if minimized && self.state.focus_manager.window == Some(handle) {
            self.state.focus_away_from(handle);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Attribute, TestConfig};
    use crate::models::{Management, Rect, WindowType};

    fn window(id: u32) -> Window {
        Window::new(WindowHandle(id), None, None)
    }

    #[test]
    fn dialogs_float_and_plain_windows_tile() {
        let mut dialog = window(1);
        dialog.r#type = WindowType::Dialog;
        assert_eq!(classify(&dialog, &[], &[]), Some(Tiling::Floating));
        assert_eq!(classify(&window(2), &[], &[]), Some(Tiling::Tiled));
    }

    #[test]
    fn docks_are_not_managed() {
        let mut dock = window(1);
        dock.r#type = WindowType::Dock;
        assert_eq!(classify(&dock, &[], &[]), None);
    }

    #[test]
    fn user_rule_overrides_every_hint() {
        let mut dialog = window(1);
        dialog.r#type = WindowType::Dialog;
        dialog.transient = Some(WindowHandle(9));
        dialog.class = Some("gimp".to_string());
        let rules = [WindowRule::new(Some("gimp"), None, Some(false), None).expect("valid")];
        assert_eq!(classify(&dialog, &rules, &[]), Some(Tiling::Tiled));
    }

    #[test]
    fn transient_and_blacklist_classify_floating() {
        let mut child = window(1);
        child.transient = Some(WindowHandle(2));
        assert_eq!(classify(&child, &[], &[]), Some(Tiling::Floating));

        let mut askpass = window(3);
        askpass.class = Some("ssh-askpass".to_string());
        let rules = [FloatRule::new(Attribute::Class, "ssh-askpass").expect("valid")];
        assert_eq!(classify(&askpass, &[], &rules), Some(Tiling::Floating));
    }

    #[test]
    fn created_windows_join_the_group_under_the_pointer() {
        let mut manager = Manager::new_test_with(
            TestConfig::new(&["1", "2"]),
            &[
                ("left", Rect::new(0, 0, 1000, 1000)),
                ("right", Rect::new(1000, 0, 1000, 1000)),
            ],
        );
        assert!(manager.window_created_handler(window(1), 1500, 10));
        assert_eq!(manager.state.groups.group_of(WindowHandle(1)), Some(2));
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(1)));
        assert!(!manager.window_created_handler(window(1), 0, 0));
    }

    #[test]
    fn transient_windows_follow_their_parent() {
        let mut manager = Manager::new_test(&["1", "2"]);
        manager.window_created_handler(window(1), 0, 0);
        manager
            .state
            .move_window(WindowHandle(1), 2)
            .expect("group 2 exists");
        let mut child = window(2);
        child.transient = Some(WindowHandle(1));
        manager.window_created_handler(child, 0, 0);
        assert_eq!(manager.state.groups.group_of(WindowHandle(2)), Some(2));
        let management = manager
            .state
            .registry
            .lookup(WindowHandle(2))
            .map(Window::management);
        assert_eq!(management, Ok(Management::Floating));
    }

    #[test]
    fn rules_can_place_windows_on_a_group() {
        let mut config = TestConfig::new(&["1", "2"]);
        config.window_rules =
            vec![WindowRule::new(Some("slack"), None, None, Some("2".to_string())).expect("valid")];
        let mut manager = Manager::new_test_with(config, &[("a", Rect::new(0, 0, 100, 100))]);
        let mut slack = window(1);
        slack.class = Some("slack".to_string());
        manager.window_created_handler(slack, 0, 0);
        assert_eq!(manager.state.groups.group_of(WindowHandle(1)), Some(2));
        // Group 2 is not shown, so focus stays where it was.
        assert_eq!(manager.state.focus_manager.window, None);
    }

    #[test]
    fn destroying_the_focused_window_focuses_a_neighbour() {
        let mut manager = Manager::new_test(&["1"]);
        for id in 1..=3 {
            manager.window_created_handler(window(id), 0, 0);
        }
        manager.state.focus_window(WindowHandle(2));
        assert!(manager.window_destroyed_handler(WindowHandle(2)));
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(3)));
        assert!(!manager.state.registry.contains(WindowHandle(2)));
        assert!(!manager.window_destroyed_handler(WindowHandle(2)));
    }

    #[test]
    fn destroying_the_last_window_clears_focus() {
        let mut manager = Manager::new_test(&["1"]);
        manager.window_created_handler(window(1), 0, 0);
        manager.window_destroyed_handler(WindowHandle(1));
        assert_eq!(manager.state.focus_manager.window, None);
        assert_eq!(manager.state.actions.back(), Some(&DisplayAction::Unfocus));
    }

    #[test]
    fn fullscreen_requests_overlay_and_restore() {
        let mut manager = Manager::new_test(&["1"]);
        manager.window_created_handler(window(1), 0, 0);
        let mut change = WindowChange::new(WindowHandle(1));
        change.states = Some(vec![WindowState::Fullscreen]);
        assert!(manager.window_changed_handler(change));
        let management = |m: &Manager<_, _>| {
            m.state
                .registry
                .lookup(WindowHandle(1))
                .map(Window::management)
        };
        assert_eq!(management(&manager), Ok(Management::Fullscreen(Tiling::Tiled)));
        let mut change = WindowChange::new(WindowHandle(1));
        change.states = Some(vec![]);
        manager.window_changed_handler(change);
        assert_eq!(management(&manager), Ok(Management::Tiled));
    }

    #[test]
    fn fullscreen_requests_on_hidden_groups_wait_until_shown() {
        let area = Rect::new(0, 0, 1920, 1080);
        let mut manager = Manager::new_test(&["1", "2"]);
        manager.window_created_handler(window(1), 0, 0);
        manager
            .state
            .move_window(WindowHandle(1), 2)
            .expect("group 2 exists");
        let mut change = WindowChange::new(WindowHandle(1));
        change.states = Some(vec![WindowState::Fullscreen]);
        assert!(manager.window_changed_handler(change));
        assert!(manager.state.actions.contains(&DisplayAction::SetState(
            WindowHandle(1),
            true,
            WindowState::Fullscreen,
        )));
        manager.state.arrange();
        let placed = |m: &Manager<_, _>| {
            m.state
                .registry
                .lookup(WindowHandle(1))
                .map(|w| (w.fullscreen, w.visible, w.geometry))
        };
        assert!(matches!(placed(&manager), Ok((true, false, _))));

        manager.state.goto_group("2").expect("group 2 exists");
        manager.state.arrange();
        assert_eq!(placed(&manager), Ok((true, true, area)));
    }

    #[test]
    fn hidden_state_minimizes_and_moves_focus() {
        let mut manager = Manager::new_test(&["1"]);
        for id in 1..=2 {
            manager.window_created_handler(window(id), 0, 0);
        }
        let mut change = WindowChange::new(WindowHandle(2));
        change.states = Some(vec![WindowState::Hidden]);
        assert!(manager.window_changed_handler(change));
        assert_eq!(manager.state.focus_manager.window, Some(WindowHandle(1)));

        let mut change = WindowChange::new(WindowHandle(2));
        change.states = Some(vec![]);
        assert!(manager.window_changed_handler(change));
        assert_eq!(
            manager.state.registry.lookup(WindowHandle(2)).map(|w| w.minimized),
            Ok(false)
        );
    }
}

