use super::DisplayServer;
use crate::display_action::DisplayAction;
use crate::errors::DisplayQueryError;
use crate::models::Output;
use crate::DisplayEvent;
use std::collections::VecDeque;

/// Replays queued batches of events and records every action it is given.
#[derive(Debug)]
pub struct MockDisplayServer {
    pub outputs: Result<Vec<Output>, DisplayQueryError>,
    pub batches: VecDeque<Vec<DisplayEvent>>,
    pub actions: Vec<DisplayAction>,
}

impl MockDisplayServer {
    pub fn with_outputs(outputs: Vec<Output>) -> Self {
        Self {
            outputs: Ok(outputs),
            batches: VecDeque::new(),
            actions: vec![],
        }
    }

    pub fn failing(err: DisplayQueryError) -> Self {
        Self {
            outputs: Err(err),
            batches: VecDeque::new(),
            actions: vec![],
        }
    }
}

impl DisplayServer for MockDisplayServer {
    fn get_next_events(&mut self) -> Vec<DisplayEvent> {
        self.batches.pop_front().unwrap_or_default()
    }

    fn execute_action(&mut self, act: DisplayAction) -> Option<DisplayEvent> {
        self.actions.push(act);
        None
    }

    fn enumerate_outputs(&mut self) -> Result<Vec<Output>, DisplayQueryError> {
        self.outputs.clone()
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        Box::pin(futures::future::ready(()))
    }

    fn flush(&self) {}
}
