//! `tallwm` general configuration

mod checks;
mod default;
mod keybind;

pub use self::keybind::{CommandSpec, Keybind, Modifier, Mousebind};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tallwm_core::config::{Attribute, FloatRule, GroupConfig, InsertBehavior, WindowRule};
use tallwm_core::errors::ConfigError;
use tallwm_core::layouts::Layout;
use tallwm_core::models::{Chord, Rect};
use tallwm_core::utils::modmask_lookup::{into_button, into_mod, into_modmask, ModMask};
use tallwm_core::Config as _;
use xdg::BaseDirectories;

/// One entry of the floating blacklist.
///
/// ```toml
/// [[float_rules]]
/// attribute = "Class"
/// pattern = "pinentry.*"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FloatRuleConfig {
    pub attribute: Attribute,
    /// Regular expression that has to match the whole attribute.
    pub pattern: String,
}

/// Selecting by class and/or title, lets the user decide whether a window floats
/// and which group it starts on. Overrides every other hint.
///
/// ```toml
/// [[window_rules]]
/// window_class = "krita"
/// floating = false
/// group = "3"
/// ```
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct WindowRuleConfig {
    /// Pattern for the class or instance name.
    pub window_class: Option<String>,
    /// Pattern for the window title.
    pub window_title: Option<String>,
    pub floating: Option<bool>,
    /// Name of the group the window starts on.
    pub group: Option<String>,
}

/// General configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Modifier the `modkey` placeholder in bindings stands for.
    pub modkey: String,
    /// Modifier for mouse bindings without their own. Defaults to `modkey`.
    pub mousekey: Option<Modifier>,
    /// Focus the window under the pointer.
    pub follow_mouse_focus: bool,
    /// Give focus to new windows on a displayed group.
    pub focus_new_windows: bool,
    /// Where new windows land in their group's order.
    pub insert_behavior: InsertBehavior,
    /// `tracing` filter directives, `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Shell commands started once when the session begins.
    pub startup: Vec<String>,
    /// Geometry used when the display server cannot report its outputs.
    pub fallback_area: Rect,
    /// Groups in order. The first ten get `modkey+<n>` and `modkey+Shift+<n>`.
    pub groups: Vec<GroupConfig>,
    /// Layouts every group cycles through, with their parameters.
    pub layouts: Vec<Layout>,
    pub float_rules: Vec<FloatRuleConfig>,
    pub window_rules: Vec<WindowRuleConfig>,
    pub keybind: Vec<Keybind>,
    pub mousebind: Vec<Mousebind>,
}

/// Load the user's configuration, writing the defaults first if there is none.
///
/// # Errors
///
/// When the config directory cannot be created or the file cannot be read,
/// written or parsed.
pub fn load() -> Result<Config> {
    let path = BaseDirectories::with_prefix("tallwm")?.place_config_file("config.toml")?;
    if path.exists() {
        load_from_path(&path)
    } else {
        let config = Config::default();
        config.write_to(&path)?;
        tracing::info!("Wrote default configuration to {}", path.display());
        Ok(config)
    }
}

/// # Errors
///
/// When the file cannot be read or is not a valid configuration.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let path = expand_path(path);
    let contents =
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let config = toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Expand a leading `~` and environment variables.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::full(&raw).map_or_else(|_| raw.to_string(), |p| p.into_owned()))
}

impl Config {
    /// # Errors
    ///
    /// When the configuration cannot be serialized or the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string(self)?;
        fs::write(path, toml).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn mousekey(&self) -> Result<ModMask, ConfigError> {
        let modkey = self.modkey()?;
        self.mousekey
            .as_ref()
            .map_or(Ok(modkey), |m| into_modmask(&m.names(), modkey))
    }
}

impl tallwm_core::Config for Config {
    fn groups(&self) -> Vec<GroupConfig> {
        self.groups.clone()
    }

    fn layouts(&self) -> Result<Vec<Layout>, ConfigError> {
        Ok(self.layouts.clone())
    }

    fn modkey(&self) -> Result<ModMask, ConfigError> {
        into_mod(&self.modkey)
    }

    fn keybinds(&self) -> Result<Vec<tallwm_core::models::Keybind>, ConfigError> {
        let modkey = self.modkey()?;
        self.keybind
            .iter()
            .map(|keybind| {
                let modifiers = keybind
                    .modifier
                    .as_ref()
                    .map_or(Ok(ModMask::empty()), |m| into_modmask(&m.names(), modkey))?;
                let commands = keybind
                    .commands
                    .iter()
                    .map(CommandSpec::to_command)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(tallwm_core::models::Keybind {
                    chord: Chord::new(modifiers, &keybind.key),
                    commands,
                })
            })
            .collect()
    }

    fn mousebinds(&self) -> Result<Vec<tallwm_core::models::Mousebind>, ConfigError> {
        let modkey = self.modkey()?;
        let mousekey = self.mousekey()?;
        self.mousebind
            .iter()
            .map(|bind| {
                let modifiers = bind
                    .modifier
                    .as_ref()
                    .map_or(Ok(mousekey), |m| into_modmask(&m.names(), modkey))?;
                Ok(tallwm_core::models::Mousebind {
                    modifiers,
                    button: into_button(&bind.button)?,
                    action: bind.action,
                })
            })
            .collect()
    }

    fn float_rules(&self) -> Result<Vec<FloatRule>, ConfigError> {
        self.float_rules
            .iter()
            .map(|rule| FloatRule::new(rule.attribute, &rule.pattern))
            .collect()
    }

    fn window_rules(&self) -> Result<Vec<WindowRule>, ConfigError> {
        self.window_rules
            .iter()
            .map(|rule| {
                WindowRule::new(
                    rule.window_class.as_deref(),
                    rule.window_title.as_deref(),
                    rule.floating,
                    rule.group.clone(),
                )
            })
            .collect()
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
        self.fallback_area
    }
}
