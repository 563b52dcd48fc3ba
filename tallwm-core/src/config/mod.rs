//! What the core needs to know from a configuration source.
mod group_config;
mod insert_behavior;
mod window_rule;

pub use group_config::GroupConfig;
pub use insert_behavior::InsertBehavior;
pub use window_rule::{best_rule, Attribute, FloatRule, WindowRule};

use crate::command::Command;
use crate::errors::ConfigError;
use crate::layouts::Layout;
use crate::models::{Keybind, Mousebind, Rect};
use crate::utils::modmask_lookup::ModMask;

/// A configuration source. Fallible accessors are validated when a `Manager` is
/// built or reloaded, before anything is applied.
pub trait Config {
    /// Declared groups, in order.
    fn groups(&self) -> Vec<GroupConfig>;

    /// Layout templates. Every group gets its own copy of each, in this order.
    ///
    /// # Errors
    ///
    /// When a layout's parameters are out of range or the list is empty.
    fn layouts(&self) -> Result<Vec<Layout>, ConfigError>;

    /// # Errors
    ///
    /// When the mod key names an unknown modifier.
    fn modkey(&self) -> Result<ModMask, ConfigError>;

    /// User keybindings. Group switching keys are derived separately.
    ///
    /// # Errors
    ///
    /// When a binding names an unknown modifier or an invalid command.
    fn keybinds(&self) -> Result<Vec<Keybind>, ConfigError>;

    /// # Errors
    ///
    /// When a binding names an unknown modifier or button.
    fn mousebinds(&self) -> Result<Vec<Mousebind>, ConfigError>;

    /// # Errors
    ///
    /// When a matcher does not compile.
    fn float_rules(&self) -> Result<Vec<FloatRule>, ConfigError>;

    /// # Errors
    ///
    /// When a matcher does not compile.
    fn window_rules(&self) -> Result<Vec<WindowRule>, ConfigError>;

    /// Shell commands started once per session.
    fn startup(&self) -> Vec<String>;

    fn follow_mouse_focus(&self) -> bool;

    fn focus_new_windows(&self) -> bool;

    fn insert_behavior(&self) -> InsertBehavior;

    /// Geometry of the synthetic output used when enumeration fails.
    fn fallback_area(&self) -> Rect;
}

fn undefined_group(groups: &[GroupConfig], name: &str, used_by: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if groups.iter().any(|group| group.name == name) {
        return Ok(());
    }
    Err(ConfigError::UndefinedGroup {
        name: name.to_owned(),
        used_by: used_by(),
    })
}

/// Every group a keybinding switches to or moves a window to has to be declared.
///
/// # Errors
///
/// `ConfigError::UndefinedGroup` for the first binding naming an unknown group.
pub fn check_keybind_groups(groups: &[GroupConfig], keybinds: &[Keybind]) -> Result<(), ConfigError> {
    keybinds.iter().try_for_each(|keybind| {
        keybind.commands.iter().try_for_each(|command| match command {
            Command::GoToGroup(name) | Command::MoveWindowToGroup(name) => {
                undefined_group(groups, name, || format!("the binding for {}", keybind.chord))
            }
            _ => Ok(()),
        })
    })
}

/// Every group a window rule places windows on has to be declared.
///
/// # Errors
///
/// `ConfigError::UndefinedGroup` for the first rule naming an unknown group.
pub fn check_rule_groups(groups: &[GroupConfig], rules: &[WindowRule]) -> Result<(), ConfigError> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(index, rule)| rule.group.as_deref().map(|name| (index, name)))
        .try_for_each(|(index, name)| {
            undefined_group(groups, name, || format!("window rule #{}", index + 1))
        })
}

#[cfg(test)]
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    pub groups: Vec<String>,
    pub layouts: Vec<Layout>,
    pub keybinds: Vec<Keybind>,
    pub mousebinds: Vec<Mousebind>,
    pub float_classes: Vec<String>,
    pub window_rules: Vec<WindowRule>,
    pub startup: Vec<String>,
    pub follow_mouse_focus: bool,
    pub focus_new_windows: bool,
    pub insert_behavior: InsertBehavior,
}

#[cfg(test)]
impl TestConfig {
    pub fn new(groups: &[&str]) -> Self {
        use crate::layouts::{Columns, MainAndStack};
        Self {
            groups: groups.iter().map(ToString::to_string).collect(),
            layouts: vec![
                Layout::MainAndStack(MainAndStack::default()),
                Layout::Columns(Columns::default()),
                Layout::Monocle,
            ],
            focus_new_windows: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Config for TestConfig {
    fn groups(&self) -> Vec<GroupConfig> {
        self.groups.iter().map(|name| GroupConfig::new(name)).collect()
    }
    fn layouts(&self) -> Result<Vec<Layout>, ConfigError> {
        Ok(self.layouts.clone())
    }
    fn modkey(&self) -> Result<ModMask, ConfigError> {
        Ok(ModMask::Super)
    }
    fn keybinds(&self) -> Result<Vec<Keybind>, ConfigError> {
        Ok(self.keybinds.clone())
    }
    fn mousebinds(&self) -> Result<Vec<Mousebind>, ConfigError> {
        Ok(self.mousebinds.clone())
    }
    fn float_rules(&self) -> Result<Vec<FloatRule>, ConfigError> {
        self.float_classes
            .iter()
            .map(|class| FloatRule::new(Attribute::Class, class))
            .collect()
    }
    fn window_rules(&self) -> Result<Vec<WindowRule>, ConfigError> {
        Ok(self.window_rules.clone())
    }
    fn startup(&self) -> Vec<String> {
        self.startup.clone()
    }
    fn follow_mouse_focus(&self) -> bool {
        self.follow_mouse_focus
    }
    fn focus_new_windows(&self) -> bool {
        self.focus_new_windows
    }
    fn insert_behavior(&self) -> InsertBehavior {
        self.insert_behavior
    }
    fn fallback_area(&self) -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }
}
