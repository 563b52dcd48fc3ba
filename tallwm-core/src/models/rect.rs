use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in root-window coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[must_use]
    pub fn area(&self) -> i64 {
        i64::from(self.w.max(0)) * i64::from(self.h.max(0))
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True when the two rectangles share any area. Touching edges do not count.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Same size, centered inside `outer`.
    #[must_use]
    pub fn centered_in(&self, outer: &Self) -> Self {
        let w = self.w.min(outer.w);
        let h = self.h.min(outer.h);
        Self {
            x: outer.x + (outer.w - w) / 2,
            y: outer.y + (outer.h - h) / 2,
            w,
            h,
        }
    }

    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            w: self.w,
            h: self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_rects_do_not_overlap() {
        let left = Rect::new(0, 0, 50, 100);
        let right = Rect::new(50, 0, 50, 100);
        assert!(!left.overlaps(&right));
        assert!(left.overlaps(&Rect::new(49, 99, 10, 10)));
    }

    #[test]
    fn centering_clamps_to_the_outer_rect() {
        let outer = Rect::new(100, 100, 200, 100);
        let inner = Rect::new(0, 0, 400, 50).centered_in(&outer);
        assert_eq!(inner, Rect::new(100, 125, 200, 50));
    }

    #[test]
    fn contains_point_excludes_far_edges() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains_point(0, 0));
        assert!(rect.contains_point(9, 9));
        assert!(!rect.contains_point(10, 5));
    }
}
