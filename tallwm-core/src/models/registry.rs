//! The set of live windows.
use super::{Window, WindowHandle};
use crate::errors::{NotFound, RegistryError};
use serde::{Deserialize, Serialize};

/// Every window the manager currently manages, in stacking order (last is topmost).
///
/// This is the only place window data lives. Groups, screens and focus refer to
/// windows by handle and look them up here, so a destroyed window cannot linger
/// anywhere as a stale copy.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct WindowRegistry {
    windows: Vec<Window>,
}

impl WindowRegistry {
    /// # Errors
    ///
    /// `RegistryError::AlreadyRegistered` if a window with the same handle exists.
    pub fn register(&mut self, window: Window) -> Result<(), RegistryError> {
        if self.contains(window.handle) {
            return Err(RegistryError::AlreadyRegistered(window.handle));
        }
        self.windows.push(window);
        Ok(())
    }

    /// # Errors
    ///
    /// `NotFound` if no window has this handle.
    pub fn unregister(&mut self, handle: WindowHandle) -> Result<Window, NotFound> {
        let index = self.position(handle)?;
        Ok(self.windows.remove(index))
    }

    /// # Errors
    ///
    /// `NotFound` if no window has this handle.
    pub fn lookup(&self, handle: WindowHandle) -> Result<&Window, NotFound> {
        self.windows
            .iter()
            .find(|w| w.handle == handle)
            .ok_or(NotFound(handle))
    }

    /// # Errors
    ///
    /// `NotFound` if no window has this handle.
    pub fn lookup_mut(&mut self, handle: WindowHandle) -> Result<&mut Window, NotFound> {
        self.windows
            .iter_mut()
            .find(|w| w.handle == handle)
            .ok_or(NotFound(handle))
    }

    #[must_use]
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.iter().any(|w| w.handle == handle)
    }

    /// Move a window to the top of the stacking order.
    ///
    /// # Errors
    ///
    /// `NotFound` if no window has this handle.
    pub fn raise(&mut self, handle: WindowHandle) -> Result<(), NotFound> {
        let index = self.position(handle)?;
        let window = self.windows.remove(index);
        self.windows.push(window);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Window> {
        self.windows.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn position(&self, handle: WindowHandle) -> Result<usize, NotFound> {
        self.windows
            .iter()
            .position(|w| w.handle == handle)
            .ok_or(NotFound(handle))
    }
}
