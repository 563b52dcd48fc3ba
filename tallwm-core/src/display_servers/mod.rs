use crate::display_action::DisplayAction;
use crate::errors::DisplayQueryError;
use crate::models::{Output, Window};
use crate::DisplayEvent;
#[cfg(test)]
mod mock_display_server;
use futures::prelude::*;
use std::pin::Pin;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

/// The window-system side of the manager: a source of events and a sink for actions.
pub trait DisplayServer {
    /// Events observed since the last call, in order.
    fn get_next_events(&mut self) -> Vec<DisplayEvent>;

    /// The current arrangement of every managed window.
    fn update_windows(&self, _windows: Vec<&Window>) {}

    fn execute_action(&mut self, _act: DisplayAction) -> Option<DisplayEvent> {
        None
    }

    /// Current outputs, in the order screens should be created for them.
    ///
    /// # Errors
    ///
    /// When the outputs cannot be queried. The manager falls back to a single
    /// synthetic output.
    fn enumerate_outputs(&mut self) -> Result<Vec<Output>, DisplayQueryError>;

    /// Resolves once `get_next_events` has something to return.
    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>>;

    fn flush(&self);
}
