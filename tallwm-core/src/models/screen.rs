use super::{GroupId, Rect};
use serde::{Deserialize, Serialize};

/// A physical display output as the display server reports it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub name: String,
    pub bbox: Rect,
}

impl Output {
    #[must_use]
    pub fn new(name: &str, bbox: Rect) -> Self {
        Self {
            name: name.to_string(),
            bbox,
        }
    }
}

/// Name of the output used when the real ones cannot be enumerated.
pub const SYNTHETIC_OUTPUT: &str = "synthetic";

/// An output bound to the one group it currently displays.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub id: ScreenId,
    pub output: Output,
    pub group: GroupId,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub usize);

impl Screen {
    #[must_use]
    pub const fn bbox(&self) -> Rect {
        self.output.bbox
    }

    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.output.name == SYNTHETIC_OUTPUT
    }
}
