use crate::BaseCommand;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tallwm_core::errors::ConfigError;
use tallwm_core::layouts::{LayoutCommand, LayoutKind};
use tallwm_core::models::MouseAction;
use tallwm_core::Command;

/// A chord and the commands it runs, as written in `config.toml`:
///
/// ```toml
/// [[keybind]]
/// modifier = ["modkey", "Control"]
/// key = "l"
/// commands = [
///     { command = "Layout", value = "DeleteColumn" },
///     { command = "Layout", value = "Grow" },
/// ]
/// ```
///
/// Commands that do not apply to the active layout are skipped, so one chord can
/// serve several layouts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub modifier: Option<Modifier>,
    pub key: String,
    pub commands: Vec<CommandSpec>,
}

impl Keybind {
    pub fn new(modifier: &[&str], key: &str, commands: Vec<CommandSpec>) -> Self {
        let modifier: Vec<String> = modifier.iter().map(ToString::to_string).collect();
        Self {
            modifier: Some(modifier.into()),
            key: key.to_owned(),
            commands,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub command: BaseCommand,
    #[serde(default)]
    pub value: String,
}

impl CommandSpec {
    pub fn new(command: BaseCommand, value: &str) -> Self {
        Self {
            command,
            value: value.to_owned(),
        }
    }

    pub fn layout(command: &str) -> Self {
        Self::new(BaseCommand::Layout, command)
    }

    /// # Errors
    ///
    /// `ConfigError::InvalidCommand` when a required value is missing or invalid,
    /// `ConfigError::UnknownLayout` when `SetLayout` names no layout.
    pub fn to_command(&self) -> Result<Command, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidCommand {
            command: self.command.to_string(),
            reason: reason.to_owned(),
        };
        if self.command.takes_value() && self.value.trim().is_empty() {
            return Err(invalid("value must not be empty"));
        }
        let value = self.value.clone();
        let command = match self.command {
            BaseCommand::Spawn => Command::Spawn(value),
            BaseCommand::Shutdown => Command::Shutdown,
            BaseCommand::Restart => Command::Restart,
            BaseCommand::KillWindow => Command::KillWindow,
            BaseCommand::ToggleFullscreen => Command::ToggleFullscreen,
            BaseCommand::ToggleMinimize => Command::ToggleMinimize,
            BaseCommand::RestoreMinimized => Command::RestoreMinimized,
            BaseCommand::ToggleFloating => Command::ToggleFloating,
            BaseCommand::EnableFloating => Command::EnableFloating,
            BaseCommand::DisableFloating => Command::DisableFloating,
            BaseCommand::BringToFront => Command::BringToFront,
            BaseCommand::GoToGroup => Command::GoToGroup(value),
            BaseCommand::MoveWindowToGroup => Command::MoveWindowToGroup(value),
            BaseCommand::NextLayout => Command::NextLayout,
            BaseCommand::PreviousLayout => Command::PreviousLayout,
            BaseCommand::SetLayout => Command::SetLayout(
                LayoutKind::from_str(&value)
                    .map_err(|_| ConfigError::UnknownLayout(value.clone()))?,
            ),
            BaseCommand::FocusNextWindow => Command::FocusNextWindow,
            BaseCommand::FocusPreviousWindow => Command::FocusPreviousWindow,
            BaseCommand::FocusLastWindow => Command::FocusLastWindow,
            BaseCommand::Layout => Command::Layout(
                parse_layout_command(&value)
                    .ok_or_else(|| invalid(&format!("unknown layout command `{value}`")))?,
            ),
        };
        Ok(command)
    }
}

fn parse_layout_command(name: &str) -> Option<LayoutCommand> {
    serde_json::from_value(serde_json::Value::String(name.to_owned())).ok()
}

/// A mouse binding as written in `config.toml`. The modifier defaults to the
/// configured mouse key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Mousebind {
    pub modifier: Option<Modifier>,
    pub button: String,
    pub action: MouseAction,
}

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(untagged)]
pub enum Modifier {
    Single(String),
    List(Vec<String>),
}

impl Modifier {
    pub fn is_empty(&self) -> bool {
        match self {
            Modifier::Single(single) => single.is_empty(),
            Modifier::List(list) => list.is_empty(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Modifier::Single(modifier) => vec![modifier.as_str()],
            Modifier::List(modifiers) => modifiers.iter().map(String::as_str).collect(),
        }
    }
}

impl From<Vec<String>> for Modifier {
    fn from(l: Vec<String>) -> Self {
        Self::List(l)
    }
}

impl From<&str> for Modifier {
    fn from(m: &str) -> Self {
        Self::Single(m.to_owned())
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(modifier) => write!(f, "{modifier}"),
            Self::List(modifiers) => write!(f, "{}", modifiers.join("+")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_parsed_into_payloads() {
        assert_eq!(
            CommandSpec::new(BaseCommand::SetLayout, "Max").to_command().ok(),
            Some(Command::SetLayout(LayoutKind::Monocle))
        );
        assert_eq!(
            CommandSpec::layout("AddColumn").to_command().ok(),
            Some(Command::Layout(LayoutCommand::AddColumn))
        );
        assert_eq!(
            CommandSpec::new(BaseCommand::GoToGroup, "web").to_command().ok(),
            Some(Command::GoToGroup("web".to_owned()))
        );
    }

    #[test]
    fn missing_or_bad_values_are_rejected() {
        assert!(matches!(
            CommandSpec::new(BaseCommand::Spawn, " ").to_command(),
            Err(ConfigError::InvalidCommand { .. })
        ));
        assert!(CommandSpec::layout("Explode").to_command().is_err());
        assert!(matches!(
            CommandSpec::new(BaseCommand::SetLayout, "Spiral").to_command(),
            Err(ConfigError::UnknownLayout(name)) if name == "Spiral"
        ));
    }

    #[test]
    fn modifiers_accept_one_name_or_a_list() {
        let single: Keybind =
            toml::from_str("modifier = \"modkey\"\nkey = \"a\"\ncommands = []").expect("valid");
        assert_eq!(single.modifier.map(|m| m.to_string()), Some("modkey".to_owned()));
        let list: Keybind = toml::from_str(
            "modifier = [\"modkey\", \"Shift\"]\nkey = \"a\"\ncommands = [{ command = \"Shutdown\" }]",
        )
        .expect("valid");
        assert_eq!(list.modifier.map(|m| m.to_string()), Some("modkey+Shift".to_owned()));
        assert_eq!(list.commands, vec![CommandSpec::new(BaseCommand::Shutdown, "")]);
    }
}
