//! The `tallwm` binaries: configuration file, logging and the pipe display server.
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]
mod command;
mod config;
pub mod pipe_display_server;
pub mod utils;

pub use command::*;
pub use config::*;
