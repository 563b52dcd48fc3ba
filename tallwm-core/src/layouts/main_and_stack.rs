use super::split::{offsets, split_evenly, split_length};
use crate::errors::ConfigError;
use crate::models::{Rect, WindowHandle};
use serde::{Deserialize, Serialize};

/// Layout which splits the area into two columns. The first `main_count` windows
/// share the main column, every other window gets a pane in the stack column.
///
/// Stack panes carry their own shares of the column height so single panes can be
/// grown or shrunk. The shares reset whenever the number of windows changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MainAndStack {
    /// Fraction of the width given to the main column.
    pub ratio: f64,
    pub min_ratio: f64,
    pub max_ratio: f64,
    /// Amount a single grow, shrink or ratio change moves things by.
    pub change_step: f64,
    pub main_count: usize,
    /// Smallest share of the stack column a pane can be shrunk to.
    pub min_share: f64,
    /// Main column on the right instead of the left.
    pub flipped: bool,
    #[serde(skip)]
    shares: Vec<f64>,
}

impl Default for MainAndStack {
    fn default() -> Self {
        Self {
            ratio: 0.5,
            min_ratio: 0.25,
            max_ratio: 0.75,
            change_step: 0.05,
            main_count: 1,
            min_share: 0.05,
            flipped: false,
            shares: vec![],
        }
    }
}

impl MainAndStack {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRatio` when the ratio bounds are not inside (0, 1)
    /// or the ratio is outside of them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = 0.0 < self.min_ratio
            && self.min_ratio <= self.ratio
            && self.ratio <= self.max_ratio
            && self.max_ratio < 1.0;
        if !ordered || self.change_step <= 0.0 || self.min_share <= 0.0 {
            return Err(ConfigError::InvalidRatio {
                ratio: self.ratio,
                min: self.min_ratio,
                max: self.max_ratio,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn compute(&self, windows: &[WindowHandle], area: Rect) -> Vec<(WindowHandle, Rect)> {
        if windows.is_empty() {
            return vec![];
        }
        let (main, stack) = windows.split_at(self.main_len(windows.len()));
        if stack.is_empty() {
            return column(main, area, &split_evenly(area.h, main.len()));
        }

        let widths = split_length(area.w, &[self.ratio, 1.0 - self.ratio]);
        let (main_w, stack_w) = (widths[0], widths[1]);
        let (main_x, stack_x) = if self.flipped {
            (area.x + stack_w, area.x)
        } else {
            (area.x, area.x + main_w)
        };

        let main_area = Rect::new(main_x, area.y, main_w, area.h);
        let stack_area = Rect::new(stack_x, area.y, stack_w, area.h);
        let mut tiles = column(main, main_area, &split_evenly(area.h, main.len()));
        let heights = split_length(area.h, &self.stack_shares(stack.len()));
        tiles.extend(column(stack, stack_area, &heights));
        tiles
    }

    #[must_use]
    pub fn main_len(&self, window_count: usize) -> usize {
        self.main_count.max(1).min(window_count)
    }

    /// Forget per-pane sizes. Called when the window count changes.
    pub fn reset(&mut self) {
        self.shares.clear();
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn change_ratio(&mut self, steps: f64) {
        self.ratio = (self.ratio + steps * self.change_step).clamp(self.min_ratio, self.max_ratio);
    }

    pub fn change_main_count(&mut self, delta: isize) {
        self.main_count = self.main_count.saturating_add_signed(delta).max(1);
        self.reset();
    }

    /// Grow the pane at `index`. A main pane grows by widening the main column.
    pub fn grow(&mut self, index: usize, window_count: usize) {
        let main_len = self.main_len(window_count);
        if index < main_len {
            self.change_ratio(1.0);
            return;
        }
        let stack_len = window_count - main_len;
        self.materialize(stack_len);
        let pane = index - main_len;
        let available: f64 = self.surplus_except(pane);
        let delta = self.change_step.min(available);
        if stack_len < 2 || delta <= 0.0 {
            return;
        }
        let min_share = self.min_share;
        for (i, share) in self.shares.iter_mut().enumerate() {
            if i != pane {
                *share -= delta * (*share - min_share).max(0.0) / available;
            }
        }
        self.shares[pane] += delta;
    }

    /// Shrink the pane at `index`. A main pane shrinks by narrowing the main column.
    pub fn shrink(&mut self, index: usize, window_count: usize) {
        let main_len = self.main_len(window_count);
        if index < main_len {
            self.change_ratio(-1.0);
            return;
        }
        let stack_len = window_count - main_len;
        self.materialize(stack_len);
        let pane = index - main_len;
        let delta = self.change_step.min(self.shares[pane] - self.min_share);
        if stack_len < 2 || delta <= 0.0 {
            return;
        }
        let give = delta / (stack_len - 1) as f64;
        for (i, share) in self.shares.iter_mut().enumerate() {
            if i == pane {
                *share -= delta;
            } else {
                *share += give;
            }
        }
    }

    /// Give the pane at `index` as much room as the bounds allow.
    pub fn maximize(&mut self, index: usize, window_count: usize) {
        let main_len = self.main_len(window_count);
        if index < main_len {
            self.ratio = self.max_ratio;
            return;
        }
        let stack_len = window_count - main_len;
        let others = (stack_len - 1) as f64 * self.min_share;
        self.shares = vec![self.min_share; stack_len];
        self.shares[index - main_len] = (1.0 - others).max(self.min_share);
    }

    /// Even out the stack panes again.
    pub fn normalize(&mut self) {
        self.reset();
    }

    fn stack_shares(&self, stack_len: usize) -> Vec<f64> {
        if self.shares.len() == stack_len {
            self.shares.clone()
        } else {
            vec![1.0 / stack_len as f64; stack_len]
        }
    }

    fn materialize(&mut self, stack_len: usize) {
        self.shares = self.stack_shares(stack_len);
    }

    fn surplus_except(&self, pane: usize) -> f64 {
        self.shares
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pane)
            .map(|(_, share)| (share - self.min_share).max(0.0))
            .sum()
    }
}

fn column(windows: &[WindowHandle], area: Rect, heights: &[i32]) -> Vec<(WindowHandle, Rect)> {
    windows
        .iter()
        .zip(offsets(area.y, heights))
        .map(|(handle, (y, h))| (*handle, Rect::new(area.x, y, area.w, h)))
        .collect()
}
