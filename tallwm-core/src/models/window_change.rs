use super::{Rect, Window, WindowHandle, WindowState, WindowType};
use serde::{Deserialize, Serialize};

/// A property-change notification for a managed window. Only the fields that are
/// `Some` changed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct WindowChange {
    pub handle: WindowHandle,
    pub title: Option<String>,
    pub class: Option<String>,
    pub instance: Option<String>,
    pub transient: Option<Option<WindowHandle>>,
    pub r#type: Option<WindowType>,
    pub states: Option<Vec<WindowState>>,
    pub requested: Option<Rect>,
    pub urgent: Option<bool>,
    pub never_focus: Option<bool>,
}

impl WindowChange {
    #[must_use]
    pub fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            ..Self::default()
        }
    }

    /// Whether the change asks for the fullscreen sub-state, if it says anything about it.
    #[must_use]
    pub fn wants_fullscreen(&self) -> Option<bool> {
        self.states
            .as_ref()
            .map(|states| states.contains(&WindowState::Fullscreen))
    }

    /// Copy the changed properties onto `window`. Returns true if anything that
    /// affects the arrangement changed.
    ///
    /// The tiling state is never touched here: classification only happens on create.
    pub fn update(self, window: &mut Window) -> bool {
        let mut changed = false;
        if let Some(title) = self.title {
            window.title = Some(title);
        }
        if let Some(class) = self.class {
            window.class = Some(class);
        }
        if let Some(instance) = self.instance {
            window.instance = Some(instance);
        }
        if let Some(transient) = self.transient {
            window.transient = transient;
        }
        if let Some(r#type) = self.r#type {
            changed |= window.r#type != r#type;
            window.r#type = r#type;
        }
        if let Some(states) = self.states {
            let fullscreen = states.contains(&WindowState::Fullscreen);
            changed |= window.fullscreen != fullscreen;
            window.fullscreen = fullscreen;
            let minimized = states.contains(&WindowState::Hidden);
            changed |= window.minimized != minimized;
            window.minimized = minimized;
            window.states = states;
        }
        if let Some(requested) = self.requested {
            window.requested = Some(requested);
            if window.is_floating() {
                changed |= window.floating != Some(requested);
                window.floating = Some(requested);
            }
        }
        if let Some(urgent) = self.urgent {
            window.urgent = urgent;
        }
        if let Some(never_focus) = self.never_focus {
            window.never_focus = never_focus;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tiling;

    #[test]
    fn fullscreen_request_overlays_tiling() {
        let mut window = Window::new(WindowHandle(1), None, None);
        let mut change = WindowChange::new(WindowHandle(1));
        change.states = Some(vec![WindowState::Fullscreen]);
        assert!(change.update(&mut window));
        assert!(window.fullscreen);
        assert_eq!(window.tiling, Tiling::Tiled);

        let mut change = WindowChange::new(WindowHandle(1));
        change.states = Some(vec![]);
        assert!(change.update(&mut window));
        assert!(!window.fullscreen);
    }

    #[test]
    fn title_changes_do_not_require_a_relayout() {
        let mut window = Window::new(WindowHandle(1), None, None);
        let mut change = WindowChange::new(WindowHandle(1));
        change.title = Some("vim".to_string());
        assert!(!change.update(&mut window));
        assert_eq!(window.title.as_deref(), Some("vim"));
    }
}
