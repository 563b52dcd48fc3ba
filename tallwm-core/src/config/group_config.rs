use serde::{Deserialize, Serialize};

/// One entry of the declared workspace list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GroupConfig {
    /// Unique name, used by commands such as `GoToGroup`.
    pub name: String,
    /// What a bar would display for the group. Defaults to the name.
    pub label: Option<String>,
}

impl GroupConfig {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
        }
    }
}
