use super::split::{offsets, split_evenly};
use crate::models::{Rect, WindowHandle};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Layout which deals the windows out into even columns, in order. Earlier columns
/// take the remainder when the windows do not divide evenly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Columns {
    pub columns: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self { columns: 2 }
    }
}

impl Columns {
    #[must_use]
    pub fn compute(&self, windows: &[WindowHandle], area: Rect) -> Vec<(WindowHandle, Rect)> {
        let ranges = self.column_ranges(windows.len());
        let widths = split_evenly(area.w, ranges.len());
        ranges
            .into_iter()
            .zip(offsets(area.x, &widths))
            .flat_map(|(range, (x, w))| {
                let heights = split_evenly(area.h, range.len());
                windows[range]
                    .iter()
                    .zip(offsets(area.y, &heights).collect::<Vec<_>>())
                    .map(move |(handle, (y, h))| (*handle, Rect::new(x, y, w, h)))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Index ranges into the window list, one per non-empty column.
    #[must_use]
    pub fn column_ranges(&self, window_count: usize) -> Vec<Range<usize>> {
        let count = self.columns.max(1).min(window_count);
        if count == 0 {
            return vec![];
        }
        let base = window_count / count;
        let extra = window_count % count;
        let mut start = 0;
        (0..count)
            .map(|i| {
                let len = base + usize::from(i < extra);
                let range = start..start + len;
                start += len;
                range
            })
            .collect()
    }

    pub fn add_column(&mut self) {
        self.columns += 1;
    }

    pub fn delete_column(&mut self) {
        self.columns = self.columns.saturating_sub(1).max(1);
    }

    /// Position of the window at `index` as `(column, row)`.
    #[must_use]
    pub fn locate(&self, index: usize, window_count: usize) -> Option<(usize, usize)> {
        self.column_ranges(window_count)
            .iter()
            .enumerate()
            .find(|(_, range)| range.contains(&index))
            .map(|(column, range)| (column, index - range.start))
    }

    /// Index of the window in the same row of the column `shift` columns away,
    /// or that column's last window when it is shorter. Wraps around.
    #[must_use]
    pub fn neighbour_in_column(
        &self,
        index: usize,
        window_count: usize,
        shift: isize,
    ) -> Option<usize> {
        let ranges = self.column_ranges(window_count);
        let (column, row) = self.locate(index, window_count)?;
        if ranges.len() < 2 {
            return None;
        }
        let target = (column as isize + shift).rem_euclid(ranges.len() as isize) as usize;
        let range = &ranges[target];
        Some(range.start + row.min(range.len() - 1))
    }

    /// Index of the window `shift` rows away inside the same column. Wraps around.
    #[must_use]
    pub fn within_column(&self, index: usize, window_count: usize, shift: isize) -> Option<usize> {
        let ranges = self.column_ranges(window_count);
        let (column, row) = self.locate(index, window_count)?;
        let range = &ranges[column];
        let row = (row as isize + shift).rem_euclid(range.len() as isize) as usize;
        Some(range.start + row)
    }
}
