use super::{GroupId, WindowHandle};
use crate::config::GroupConfig;
use crate::errors::{CommandError, ConfigError, GroupError};
use crate::layouts::{Layout, LayoutCommand, LayoutKind};
use serde::{Deserialize, Serialize};

/// A named workspace: an ordered list of windows and the layouts it can cycle through.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub label: String,
    /// Every member window, tiled or not, in layout order.
    pub windows: Vec<WindowHandle>,
    pub layouts: Vec<Layout>,
    pub current_layout: usize,
}

impl Group {
    #[must_use]
    pub fn new(id: GroupId, name: &str, label: &str, layouts: Vec<Layout>) -> Self {
        Self {
            id,
            name: name.to_string(),
            label: label.to_string(),
            windows: vec![],
            layouts,
            current_layout: 0,
        }
    }

    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.layouts.get(self.current_layout)
    }

    #[must_use]
    pub fn layout_kind(&self) -> Option<LayoutKind> {
        self.layout().map(Layout::kind)
    }

    #[must_use]
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.contains(&handle)
    }

    /// Step through the layouts. Returns the now active kind.
    pub fn cycle_layout(&mut self, shift: isize) -> Option<LayoutKind> {
        let next = crate::utils::helpers::wrapping_index(self.current_layout, self.layouts.len(), shift)?;
        self.current_layout = next;
        self.layout_kind()
    }

    /// Apply a layout command to the tiled members, in their group order.
    ///
    /// # Errors
    ///
    /// Whatever the active layout reports, see [`Layout::apply`].
    pub fn apply_layout_command<F>(
        &mut self,
        command: LayoutCommand,
        focused: Option<WindowHandle>,
        is_tiled: F,
    ) -> Result<Option<WindowHandle>, CommandError>
    where
        F: Fn(WindowHandle) -> bool,
    {
        let layout = self
            .layouts
            .get_mut(self.current_layout)
            .ok_or(CommandError::NoScreen)?;
        let slots: Vec<usize> = (0..self.windows.len())
            .filter(|i| is_tiled(self.windows[*i]))
            .collect();
        let mut tiled: Vec<WindowHandle> = slots.iter().map(|i| self.windows[*i]).collect();
        let focus = layout.apply(command, &mut tiled, focused)?;
        // Write the reordered tiled windows back into the slots they came from.
        for (slot, handle) in slots.into_iter().zip(tiled) {
            self.windows[slot] = handle;
        }
        Ok(focus)
    }

    fn reset_layouts(&mut self) {
        self.layouts.iter_mut().for_each(Layout::reset);
    }
}

/// Wrapper holding all the groups in declared order.
///
/// Ids start at 1 and increase by 1 with no gaps; the id of a group is its
/// position in the list plus one.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Groups {
    groups: Vec<Group>,
}

impl Groups {
    /// Build the declared groups, each with its own copy of the layout templates.
    ///
    /// # Errors
    ///
    /// Fails for an empty list, an empty name, a repeated name or no layouts.
    pub fn new(configs: &[GroupConfig], layouts: &[Layout]) -> Result<Self, ConfigError> {
        if configs.is_empty() {
            return Err(ConfigError::NoGroups);
        }
        if layouts.is_empty() {
            return Err(ConfigError::NoLayouts);
        }
        let mut groups = Self::default();
        for config in configs {
            if config.name.trim().is_empty() {
                return Err(ConfigError::EmptyGroupName);
            }
            if groups.by_name(&config.name).is_some() {
                return Err(ConfigError::DuplicateGroup(config.name.clone()));
            }
            let label = config.label.as_deref().unwrap_or(&config.name);
            groups.add_new(&config.name, label, layouts.to_vec());
        }
        Ok(groups)
    }

    pub fn add_new(&mut self, name: &str, label: &str, layouts: Vec<Layout>) -> GroupId {
        let id = self.groups.len() + 1;
        self.groups.push(Group::new(id, name, label, layouts));
        id
    }

    /// Add a group nobody declared, named after its id. A taken name gets a
    /// `_<n>` suffix.
    pub fn add_new_unlabeled(&mut self, layouts: Vec<Layout>) -> GroupId {
        let id = self.groups.len() + 1;
        let mut name = id.to_string();
        let mut suffix = 0;
        while self.by_name(&name).is_some() {
            suffix += 1;
            name = format!("{id}_{suffix}");
        }
        self.add_new(&name, &name, layouts)
    }

    #[must_use]
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        id.checked_sub(1).and_then(|index| self.groups.get(index))
    }

    pub fn get_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        id.checked_sub(1).and_then(|index| self.groups.get_mut(index))
    }

    fn try_get_mut(&mut self, id: GroupId) -> Result<&mut Group, GroupError> {
        self.get_mut(id).ok_or(GroupError::UnknownGroup(id))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn all(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The group a window is a member of.
    #[must_use]
    pub fn group_of(&self, handle: WindowHandle) -> Option<GroupId> {
        self.groups.iter().find(|g| g.contains(handle)).map(|g| g.id)
    }

    /// Append a window to a group.
    ///
    /// # Errors
    ///
    /// The group must exist and the window must not be in any group yet.
    pub fn add_window(&mut self, group: GroupId, handle: WindowHandle) -> Result<(), GroupError> {
        let index = self.get(group).map_or(0, |g| g.windows.len());
        self.insert_window(group, handle, index)
    }

    /// Insert a window at `index` of a group's order, clamped to the end.
    ///
    /// # Errors
    ///
    /// The group must exist and the window must not be in any group yet.
    pub fn insert_window(
        &mut self,
        group: GroupId,
        handle: WindowHandle,
        index: usize,
    ) -> Result<(), GroupError> {
        if let Some(current) = self.group_of(handle) {
            return Err(GroupError::AlreadyMember {
                window: handle,
                group: current,
            });
        }
        let target = self.try_get_mut(group)?;
        let index = index.min(target.windows.len());
        target.windows.insert(index, handle);
        target.reset_layouts();
        Ok(())
    }

    /// # Errors
    ///
    /// The group must exist and contain the window.
    pub fn remove_window(&mut self, group: GroupId, handle: WindowHandle) -> Result<(), GroupError> {
        let target = self.try_get_mut(group)?;
        let index = target
            .windows
            .iter()
            .position(|w| *w == handle)
            .ok_or(GroupError::NotMember {
                window: handle,
                group,
            })?;
        target.windows.remove(index);
        target.reset_layouts();
        Ok(())
    }

    /// Move a window to the end of another group.
    ///
    /// Both groups are checked before anything changes, so a failed move leaves the
    /// window where it was.
    ///
    /// # Errors
    ///
    /// Both groups must exist and the window must be a member of `from`.
    pub fn move_window(
        &mut self,
        handle: WindowHandle,
        from: GroupId,
        to: GroupId,
    ) -> Result<(), GroupError> {
        if self.get(to).is_none() {
            return Err(GroupError::UnknownGroup(to));
        }
        if from == to {
            return if self.get(from).is_some_and(|g| g.contains(handle)) {
                Ok(())
            } else {
                Err(GroupError::NotMember {
                    window: handle,
                    group: from,
                })
            };
        }
        self.remove_window(from, handle)?;
        self.add_window(to, handle)
    }

    /// Make the first layout of `kind` the group's active layout.
    ///
    /// # Errors
    ///
    /// The group must exist and have a layout of that kind.
    pub fn set_layout(&mut self, group: GroupId, kind: LayoutKind) -> Result<(), GroupError> {
        let target = self.try_get_mut(group)?;
        let index = target
            .layouts
            .iter()
            .position(|l| l.kind() == kind)
            .ok_or(GroupError::LayoutUnavailable {
                group,
                layout: kind,
            })?;
        target.current_layout = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::{Columns, MainAndStack};

    fn groups(names: &[&str]) -> Groups {
        let configs: Vec<_> = names.iter().map(|n| GroupConfig::new(n)).collect();
        let layouts = vec![
            Layout::MainAndStack(MainAndStack::default()),
            Layout::Columns(Columns::default()),
            Layout::Monocle,
        ];
        Groups::new(&configs, &layouts).expect("valid groups")
    }

    fn membership_count(groups: &Groups, handle: WindowHandle) -> usize {
        groups.all().filter(|g| g.contains(handle)).count()
    }

    #[test]
    fn ids_start_at_one_in_declared_order() {
        let groups = groups(&["web", "code"]);
        assert_eq!(groups.get(1).map(|g| g.name.as_str()), Some("web"));
        assert_eq!(groups.get(2).map(|g| g.name.as_str()), Some("code"));
        assert!(groups.get(0).is_none());
    }

    #[test]
    fn declaration_errors() {
        let layouts = vec![Layout::Monocle];
        assert!(matches!(
            Groups::new(&[], &layouts),
            Err(ConfigError::NoGroups)
        ));
        assert!(matches!(
            Groups::new(&[GroupConfig::new("a"), GroupConfig::new("a")], &layouts),
            Err(ConfigError::DuplicateGroup(name)) if name == "a"
        ));
        assert!(matches!(
            Groups::new(&[GroupConfig::new(" ")], &layouts),
            Err(ConfigError::EmptyGroupName)
        ));
        assert!(matches!(
            Groups::new(&[GroupConfig::new("a")], &[]),
            Err(ConfigError::NoLayouts)
        ));
    }

    #[test]
    fn a_window_is_never_in_two_groups() {
        let mut groups = groups(&["1", "2", "3"]);
        let handle = WindowHandle(10);
        groups.add_window(1, handle).expect("first add");
        assert_eq!(
            groups.add_window(2, handle),
            Err(GroupError::AlreadyMember {
                window: handle,
                group: 1
            })
        );
        let steps: [(GroupId, GroupId); 5] = [(1, 2), (2, 3), (3, 3), (3, 1), (1, 2)];
        for (from, to) in steps {
            groups.move_window(handle, from, to).expect("valid move");
            assert_eq!(membership_count(&groups, handle), 1);
            assert_eq!(groups.group_of(handle), Some(to));
        }
        groups.remove_window(2, handle).expect("member");
        assert_eq!(membership_count(&groups, handle), 0);
    }

    #[test]
    fn failed_moves_change_nothing() {
        let mut groups = groups(&["1", "2"]);
        groups.add_window(1, WindowHandle(1)).expect("add");
        assert_eq!(
            groups.move_window(WindowHandle(1), 1, 9),
            Err(GroupError::UnknownGroup(9))
        );
        assert!(groups.move_window(WindowHandle(1), 2, 1).is_err());
        assert_eq!(groups.group_of(WindowHandle(1)), Some(1));
    }

    #[test]
    fn moving_back_appends_instead_of_restoring_position() {
        let mut groups = groups(&["a", "b"]);
        for id in 1..=3 {
            groups.add_window(1, WindowHandle(id)).expect("add");
        }
        groups.move_window(WindowHandle(1), 1, 2).expect("a to b");
        groups.move_window(WindowHandle(1), 2, 1).expect("b to a");
        let order = groups.get(1).map(|g| g.windows.clone()).unwrap_or_default();
        assert_eq!(order, vec![WindowHandle(2), WindowHandle(3), WindowHandle(1)]);
    }

    #[test]
    fn set_layout_picks_the_matching_kind() {
        let mut groups = groups(&["a"]);
        groups.set_layout(1, LayoutKind::Monocle).expect("has monocle");
        assert_eq!(groups.get(1).and_then(Group::layout_kind), Some(LayoutKind::Monocle));

        let mut single = Groups::new(&[GroupConfig::new("a")], &[Layout::Monocle]).expect("valid");
        assert_eq!(
            single.set_layout(1, LayoutKind::Columns),
            Err(GroupError::LayoutUnavailable {
                group: 1,
                layout: LayoutKind::Columns
            })
        );
    }

    #[test]
    fn unlabeled_groups_get_unique_names() {
        let mut groups = groups(&["2"]);
        let id = groups.add_new_unlabeled(vec![Layout::Monocle]);
        assert_eq!(id, 2);
        let name = groups.get(id).map(|g| g.name.clone()).unwrap_or_default();
        assert_eq!(name, "2_1");
        assert_eq!(groups.len(), 2);

        let mut groups = self::groups(&["2", "2_1"]);
        let id = groups.add_new_unlabeled(vec![Layout::Monocle]);
        assert_eq!(id, 3);
        let mut groups = self::groups(&["3", "3_1"]);
        let id = groups.add_new_unlabeled(vec![Layout::Monocle]);
        assert_eq!(groups.get(id).map(|g| g.name.as_str()), Some("3_2"));
    }

    #[test]
    fn layout_commands_only_reorder_tiled_windows() {
        let mut groups = groups(&["a"]);
        for id in 1..=3 {
            groups.add_window(1, WindowHandle(id)).expect("add");
        }
        let group = groups.get_mut(1).expect("group 1");
        // Window 2 floats, so swapping 3 into main skips over it.
        group
            .apply_layout_command(LayoutCommand::SwapMain, Some(WindowHandle(3)), |h| {
                h != WindowHandle(2)
            })
            .expect("swap main");
        assert_eq!(
            group.windows,
            vec![WindowHandle(3), WindowHandle(2), WindowHandle(1)]
        );
    }
}
