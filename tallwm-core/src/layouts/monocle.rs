use crate::models::{Rect, WindowHandle};

/// Only one window is shown and it covers the whole area. That is the focused
/// window when it is part of the list, otherwise the first one.
#[must_use]
pub fn compute(
    windows: &[WindowHandle],
    focused: Option<WindowHandle>,
    area: Rect,
) -> Vec<(WindowHandle, Rect)> {
    let shown = focused
        .filter(|handle| windows.contains(handle))
        .or_else(|| windows.first().copied());
    shown.map(|handle| vec![(handle, area)]).unwrap_or_default()
}
