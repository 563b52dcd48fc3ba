use crate::layouts::{LayoutCommand, LayoutKind};
use crate::models::{GroupId, WindowHandle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TallError>;

#[derive(Debug, Error)]
pub enum TallError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Group(#[from] GroupError),
}

/// A malformed group list, rule set or binding table. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no groups are defined")]
    NoGroups,
    #[error("a group has an empty name")]
    EmptyGroupName,
    #[error("group `{0}` is defined more than once")]
    DuplicateGroup(String),
    #[error("no layouts are defined")]
    NoLayouts,
    #[error("unknown layout `{0}`")]
    UnknownLayout(String),
    #[error("ratio {ratio} must lie within [{min}, {max}] and inside (0, 1)")]
    InvalidRatio { ratio: f64, min: f64, max: f64 },
    #[error("multiple bindings for the chord {chord}")]
    DuplicateChord { chord: String },
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown mouse button `{0}`")]
    UnknownButton(String),
    #[error("invalid matcher `{pattern}`: {source}")]
    InvalidMatcher {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid command `{command}`: {reason}")]
    InvalidCommand { command: String, reason: String },
    #[error("{used_by} refers to group `{name}`, which is not defined")]
    UndefinedGroup { name: String, used_by: String },
}

/// Output enumeration failed. Recovered by falling back to a synthetic output.
#[derive(Serialize, Deserialize, Debug, Error, Clone, PartialEq, Eq)]
pub enum DisplayQueryError {
    #[error("the display server has not reported any outputs")]
    NoOutputs,
    #[error("output query failed: {0}")]
    Backend(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("window {0} is already registered")]
    AlreadyRegistered(WindowHandle),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("window {0} is not registered")]
pub struct NotFound(pub WindowHandle);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("no group with id {0}")]
    UnknownGroup(GroupId),
    #[error("window {window} is not a member of group {group}")]
    NotMember { window: WindowHandle, group: GroupId },
    #[error("window {window} already belongs to group {group}")]
    AlreadyMember { window: WindowHandle, group: GroupId },
    #[error("group {group} has no {layout} layout")]
    LayoutUnavailable { group: GroupId, layout: LayoutKind },
}

/// Why a command did nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{command:?} is not available in the {layout} layout")]
    LayoutIncompatible {
        command: LayoutCommand,
        layout: LayoutKind,
    },
    #[error("no window is focused")]
    NoFocusedWindow,
    #[error("no group named `{0}`")]
    UnknownGroup(String),
    #[error("no screen is available")]
    NoScreen,
    #[error(transparent)]
    Group(#[from] GroupError),
    #[error(transparent)]
    NotFound(#[from] NotFound),
}
