use super::{Keybindings, Mousebind};
use crate::config::{check_keybind_groups, check_rule_groups, Config, FloatRule, WindowRule};
use crate::display_servers::DisplayServer;
use crate::errors::ConfigError;
use crate::state::State;
use crate::utils::child_process::Children;
use std::sync::{atomic::AtomicBool, Arc};

/// Why the event loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Shutdown,
    Restart,
}

/// Bindings and rules compiled from a configuration.
#[derive(Debug, Clone)]
pub struct Bindings {
    pub keybindings: Keybindings,
    pub mousebinds: Vec<Mousebind>,
    pub window_rules: Vec<WindowRule>,
    pub float_rules: Vec<FloatRule>,
    pub startup: Vec<String>,
}

impl Bindings {
    /// # Errors
    ///
    /// The first invalid binding, rule or modifier found, or a binding or rule
    /// naming a group that is not declared.
    pub fn from_config(config: &impl Config) -> Result<Self, ConfigError> {
        let groups = config.groups();
        let keybinds = config.keybinds()?;
        check_keybind_groups(&groups, &keybinds)?;
        let window_rules = config.window_rules()?;
        check_rule_groups(&groups, &window_rules)?;
        Ok(Self {
            keybindings: Keybindings::build(config.modkey()?, &groups, keybinds)?,
            mousebinds: config.mousebinds()?,
            window_rules,
            float_rules: config.float_rules()?,
            startup: config.startup(),
        })
    }
}

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<C, SERVER> {
    pub state: State,
    pub config: C,
    pub display_server: SERVER,
    pub bindings: Bindings,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub(crate) exit_requested: Option<ExitReason>,
    pub(crate) startup_done: bool,
}

impl<C, SERVER> Manager<C, SERVER>
where
    C: Config,
    SERVER: DisplayServer,
{
    /// Validate `config` completely and build a manager with no windows.
    ///
    /// # Errors
    ///
    /// Any `ConfigError`. Nothing is managed before the configuration is known to
    /// be valid.
    pub fn new(config: C, display_server: SERVER) -> Result<Self, ConfigError> {
        let bindings = Bindings::from_config(&config)?;
        let state = State::new(&config)?;
        Ok(Self {
            state,
            config,
            display_server,
            bindings,
            children: Children::default(),
            reap_requested: Arc::default(),
            exit_requested: None,
            startup_done: false,
        })
    }

    pub fn register_child_hook(&self) {
        crate::utils::child_process::register_child_hook(self.reap_requested.clone());
    }

    /// Swap in a new configuration while keeping every window, group and screen.
    ///
    /// # Errors
    ///
    /// When the new configuration is invalid. The old one then stays in effect.
    pub fn reload_config(&mut self, config: C) -> Result<(), ConfigError> {
        let bindings = Bindings::from_config(&config)?;
        self.state.load_config(&config)?;
        self.bindings = bindings;
        self.config = config;
        tracing::info!(
            "Configuration reloaded with {} keybindings",
            self.bindings.keybindings.len()
        );
        Ok(())
    }

    /// Stop the event loop once the current iteration is done.
    pub fn request_exit(&mut self, reason: ExitReason) {
        self.exit_requested = Some(reason);
    }
}

#[cfg(test)]
impl Manager<crate::config::TestConfig, crate::display_servers::MockDisplayServer> {
    /// A manager with the given groups, showing the first on one 1920x1080 output.
    pub fn new_test(groups: &[&str]) -> Self {
        Self::new_test_with(
            crate::config::TestConfig::new(groups),
            &[("test", super::Rect::new(0, 0, 1920, 1080))],
        )
    }

    pub fn new_test_with(config: crate::config::TestConfig, outputs: &[(&str, super::Rect)]) -> Self {
        let outputs: Vec<super::Output> = outputs
            .iter()
            .map(|(name, rect)| super::Output::new(name, *rect))
            .collect();
        let server = crate::display_servers::MockDisplayServer::with_outputs(outputs.clone());
        let mut manager = Self::new(config, server).expect("valid test config");
        manager.state.reconcile_outputs(Ok(outputs));
        manager.state.actions.clear();
        manager
    }
}
