//! Key and mouse bindings.
use crate::command::Command;
use crate::config::GroupConfig;
use crate::errors::ConfigError;
use crate::utils::modmask_lookup::{Button, ModMask};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A modifier set plus a key symbol name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    pub modifiers: ModMask,
    pub key: String,
}

impl Chord {
    #[must_use]
    pub fn new(modifiers: ModMask, key: &str) -> Self {
        Self {
            modifiers,
            key: key.to_string(),
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, _) in self.modifiers.iter_names() {
            write!(f, "{name}+")?;
        }
        f.write_str(&self.key)
    }
}

/// A chord and the commands it runs, in order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Keybind {
    pub chord: Chord,
    pub commands: Vec<Command>,
}

/// Chord lookup table. Built once per configuration and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Keybindings {
    bindings: HashMap<Chord, Vec<Command>>,
}

impl Keybindings {
    /// Build the full table.
    ///
    /// The group list is read first and turned into `modkey+<n>` (go to group) and
    /// `modkey+Shift+<n>` (move the focused window there) for the first ten groups.
    /// The user bindings are registered after those, all in one pass.
    ///
    /// # Errors
    ///
    /// `ConfigError::DuplicateChord` if any two bindings share a chord.
    pub fn build(
        modkey: ModMask,
        groups: &[GroupConfig],
        user: Vec<Keybind>,
    ) -> Result<Self, ConfigError> {
        let derived: Vec<Keybind> = groups
            .iter()
            .take(10)
            .enumerate()
            .flat_map(|(index, group)| {
                let key = ((index + 1) % 10).to_string();
                [
                    Keybind {
                        chord: Chord::new(modkey, &key),
                        commands: vec![Command::GoToGroup(group.name.clone())],
                    },
                    Keybind {
                        chord: Chord::new(modkey | ModMask::Shift, &key),
                        commands: vec![Command::MoveWindowToGroup(group.name.clone())],
                    },
                ]
            })
            .collect();

        let mut keybindings = Self::default();
        for keybind in derived.into_iter().chain(user) {
            keybindings.register(keybind.chord, keybind.commands)?;
        }
        Ok(keybindings)
    }

    /// # Errors
    ///
    /// `ConfigError::DuplicateChord` if the chord is already bound.
    pub fn register(&mut self, chord: Chord, commands: Vec<Command>) -> Result<(), ConfigError> {
        if self.bindings.contains_key(&chord) {
            return Err(ConfigError::DuplicateChord {
                chord: chord.to_string(),
            });
        }
        self.bindings.insert(chord, commands);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, chord: &Chord) -> Option<&[Command]> {
        self.bindings.get(chord).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Drag the window, floating it.
    Move,
    /// Drag the bottom right corner of the window, floating it.
    Resize,
    BringToFront,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Mousebind {
    pub modifiers: ModMask,
    pub button: Button,
    pub action: MouseAction,
}
