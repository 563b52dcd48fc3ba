use serde::{Deserialize, Serialize};

/// Where a newly created window lands in its group's order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertBehavior {
    Top,
    #[default]
    Bottom,
    BeforeCurrent,
    AfterCurrent,
}
