//! Everything the control loop mutates.
use crate::config::{Config, InsertBehavior};
use crate::errors::{ConfigError, GroupError, NotFound, TallError};
use crate::layouts::{Layout, LayoutKind};
use crate::models::{
    FocusManager, GroupId, Groups, Mode, Rect, Screen, ScreenId, Window, WindowHandle,
    WindowRegistry,
};
use crate::DisplayAction;
use std::collections::{HashMap, VecDeque};

#[derive(Debug)]
pub struct State {
    pub registry: WindowRegistry,
    pub groups: Groups,
    pub screens: Vec<Screen>,
    pub focus_manager: FocusManager,
    pub mode: Mode,
    pub actions: VecDeque<DisplayAction>,
    /// Templates new groups copy their layouts from.
    pub layouts: Vec<Layout>,
    pub insert_behavior: InsertBehavior,
    pub fallback_area: Rect,
    pub(crate) next_screen_id: usize,
}

impl State {
    /// # Errors
    ///
    /// When the group list or the layouts are invalid.
    pub(crate) fn new(config: &impl Config) -> Result<Self, ConfigError> {
        let layouts = validated_layouts(config)?;
        let groups = Groups::new(&config.groups(), &layouts)?;
        Ok(Self {
            registry: WindowRegistry::default(),
            groups,
            screens: vec![],
            focus_manager: FocusManager::new(config),
            mode: Mode::default(),
            actions: VecDeque::new(),
            layouts,
            insert_behavior: config.insert_behavior(),
            fallback_area: config.fallback_area(),
            next_screen_id: 0,
        })
    }

    /// Apply a reloaded configuration. Windows, groups and screens are kept; groups
    /// the new configuration declares that do not exist yet are appended.
    ///
    /// # Errors
    ///
    /// When the new group list or layouts are invalid. Nothing is changed then.
    pub(crate) fn load_config(&mut self, config: &impl Config) -> Result<(), ConfigError> {
        let layouts = validated_layouts(config)?;
        let declared = config.groups();
        Groups::new(&declared, &layouts)?;

        for group in declared {
            if self.groups.by_name(&group.name).is_none() {
                let label = group.label.as_deref().unwrap_or(&group.name);
                self.groups.add_new(&group.name, label, layouts.clone());
            }
        }
        let focus = FocusManager::new(config);
        self.focus_manager.follow_mouse = focus.follow_mouse;
        self.focus_manager.focus_new_windows = focus.focus_new_windows;
        self.insert_behavior = config.insert_behavior();
        self.fallback_area = config.fallback_area();
        self.layouts = layouts;
        Ok(())
    }

    /// Register a window and put it in `group`, both or neither.
    ///
    /// # Errors
    ///
    /// When the handle is already registered or the group does not exist.
    pub fn manage_window(&mut self, window: Window, group: GroupId) -> Result<(), TallError> {
        let handle = window.handle;
        let index = self.insert_index(group);
        self.registry.register(window)?;
        if let Err(err) = self.groups.insert_window(group, handle, index) {
            self.registry.unregister(handle)?;
            return Err(err.into());
        }
        Ok(())
    }

    /// Forget a window everywhere: registry, its group and focus.
    ///
    /// # Errors
    ///
    /// `NotFound` when the window is not registered.
    pub fn unmanage_window(&mut self, handle: WindowHandle) -> Result<Window, NotFound> {
        let window = self.registry.unregister(handle)?;
        if let Some(group) = self.groups.group_of(handle) {
            // Membership was just looked up, removal cannot fail.
            let _ = self.groups.remove_window(group, handle);
        }
        self.focus_manager.forget_window(handle);
        if self.mode.handle() == Some(handle) {
            self.mode = Mode::Normal;
        }
        Ok(window)
    }

    fn insert_index(&self, group: GroupId) -> usize {
        let Some(members) = self.groups.get(group).map(|g| &g.windows) else {
            return 0;
        };
        let current = self
            .focus_manager
            .window
            .and_then(|focused| members.iter().position(|h| *h == focused));
        match (self.insert_behavior, current) {
            (InsertBehavior::Top, _) => 0,
            (InsertBehavior::BeforeCurrent, Some(index)) => index,
            (InsertBehavior::AfterCurrent, Some(index)) => index + 1,
            _ => members.len(),
        }
    }

    /// The screen that has focus, or the first one.
    #[must_use]
    pub fn focused_screen(&self) -> Option<&Screen> {
        self.focus_manager
            .screen
            .and_then(|id| self.screens.iter().find(|s| s.id == id))
            .or_else(|| self.screens.first())
    }

    #[must_use]
    pub fn focused_group(&self) -> Option<GroupId> {
        self.focused_screen().map(|s| s.group)
    }

    #[must_use]
    pub fn screen_of_group(&self, group: GroupId) -> Option<&Screen> {
        self.screens.iter().find(|s| s.group == group)
    }

    #[must_use]
    pub fn screen_at(&self, x: i32, y: i32) -> Option<&Screen> {
        self.screens.iter().find(|s| s.bbox().contains_point(x, y))
    }

    #[must_use]
    pub fn screen_index(&self, id: ScreenId) -> Option<usize> {
        self.screens.iter().position(|s| s.id == id)
    }

    #[must_use]
    pub fn is_displayed(&self, group: GroupId) -> bool {
        self.screen_of_group(group).is_some()
    }

    #[must_use]
    pub fn focused_window(&self) -> Option<&Window> {
        self.focus_manager
            .window
            .and_then(|handle| self.registry.lookup(handle).ok())
    }

    /// # Errors
    ///
    /// When the group does not exist or has no layout of that kind.
    pub fn set_layout(&mut self, group: GroupId, kind: LayoutKind) -> Result<(), GroupError> {
        self.groups.set_layout(group, kind)?;
        self.arrange();
        Ok(())
    }

    /// Recompute geometry and visibility of every window.
    ///
    /// Windows of displayed groups are placed by their group's layout (tiled), kept
    /// where they are (floating) or stretched over the output (fullscreen). Windows
    /// of hidden groups, minimized windows and windows the layout leaves out are
    /// hidden.
    pub fn arrange(&mut self) {
        let focused = self.focus_manager.window;
        let mut placements: HashMap<WindowHandle, Rect> = HashMap::new();
        for screen in &self.screens {
            let Some(group) = self.groups.get(screen.group) else {
                continue;
            };
            let area = screen.bbox();
            let tiled: Vec<WindowHandle> = group
                .windows
                .iter()
                .copied()
                .filter(|h| self.registry.lookup(*h).is_ok_and(Window::is_tiled))
                .collect();
            if let Some(layout) = group.layout() {
                placements.extend(layout.compute(&tiled, focused, area));
            }
            for handle in &group.windows {
                let Ok(window) = self.registry.lookup(*handle) else {
                    continue;
                };
                if window.minimized {
                    continue;
                }
                if window.fullscreen {
                    placements.insert(*handle, area);
                } else if window.is_floating() {
                    let rect = window
                        .floating
                        .filter(|r| r.w > 0 && r.h > 0)
                        .unwrap_or_else(|| Rect::new(0, 0, area.w / 2, area.h / 2).centered_in(&area));
                    placements.insert(*handle, rect);
                }
            }
        }

        for window in self.registry.iter_mut() {
            match placements.get(&window.handle) {
                Some(rect) => {
                    window.geometry = *rect;
                    window.visible = true;
                    if window.is_floating() && !window.fullscreen {
                        window.floating = Some(*rect);
                    }
                }
                None => window.visible = false,
            }
        }
    }
}

fn validated_layouts(config: &impl Config) -> Result<Vec<Layout>, ConfigError> {
    let layouts = config.layouts()?;
    if layouts.is_empty() {
        return Err(ConfigError::NoLayouts);
    }
    layouts.iter().try_for_each(Layout::validate)?;
    Ok(layouts)
}
