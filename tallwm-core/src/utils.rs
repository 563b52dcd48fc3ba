//! Small helpers shared across the crate.
pub mod child_process;
pub mod helpers;
pub mod modmask_lookup;
