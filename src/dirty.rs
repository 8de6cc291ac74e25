//! Dirty region tracking
//!
//! [`DirtyTracker`] accumulates the bounding rectangle of every pixel touched
//! since the last successful flush. The region only ever grows until
//! [`reset`](DirtyTracker::reset); inputs outside the panel are clamped onto
//! it rather than rejected.
//!
//! ## Example
//!
//! ```
//! use ssd1322::dirty::{DirtyRect, DirtyTracker};
//!
//! let mut dirty = DirtyTracker::new(256, 64);
//! assert!(dirty.is_empty());
//!
//! dirty.mark_point(10, 5);
//! dirty.mark_rect(40, 20, 300, 30); // clamped to x2 = 255
//! assert_eq!(dirty.region(), Some(DirtyRect::new(10, 5, 255, 30)));
//!
//! dirty.reset();
//! assert_eq!(dirty.region(), None);
//! ```

/// Inclusive pixel rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRect {
    /// Left column
    pub x1: u16,
    /// Top row
    pub y1: u16,
    /// Right column (inclusive)
    pub x2: u16,
    /// Bottom row (inclusive)
    pub y2: u16,
}

impl DirtyRect {
    /// Create a rectangle from two corners, in any order
    pub fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Smallest rectangle covering both `self` and `other`
    pub fn union(self, other: Self) -> Self {
        Self {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Whether `other` lies entirely inside `self`
    pub fn contains(&self, other: &Self) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }
}

/// Bounding box of pixels modified since the last flush
#[derive(Clone, Debug, PartialEq)]
pub struct DirtyTracker {
    /// Panel width used for clamping
    width: u16,
    /// Panel height used for clamping
    height: u16,
    /// Current region, `None` when nothing is dirty
    region: Option<DirtyRect>,
}

impl DirtyTracker {
    /// Create an empty tracker for a `width` x `height` panel
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            region: None,
        }
    }

    /// Extend the region to include pixel `(x, y)`
    pub fn mark_point(&mut self, x: i32, y: i32) {
        self.mark_rect(x, y, x, y);
    }

    /// Extend the region to include the rectangle spanned by two corners
    pub fn mark_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let rect = DirtyRect::new(
            clamp_axis(x1, self.width),
            clamp_axis(y1, self.height),
            clamp_axis(x2, self.width),
            clamp_axis(y2, self.height),
        );
        self.region = Some(match self.region {
            Some(current) => current.union(rect),
            None => rect,
        });
    }

    /// Mark the whole panel dirty
    pub fn mark_all(&mut self) {
        self.mark_rect(0, 0, i32::from(self.width) - 1, i32::from(self.height) - 1);
    }

    /// Current region, or `None` if nothing is dirty
    pub fn region(&self) -> Option<DirtyRect> {
        self.region
    }

    /// Whether nothing has been marked since the last reset
    pub fn is_empty(&self) -> bool {
        self.region.is_none()
    }

    /// Forget the region
    pub fn reset(&mut self) {
        self.region = None;
    }
}

fn clamp_axis(value: i32, len: u16) -> u16 {
    value.clamp(0, i32::from(len) - 1) as u16
}
