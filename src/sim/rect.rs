//! Axis-aligned rectangle geometry shared by every entity
//!
//! Screen space: top-left origin, y grows downward, integer units.
//! Edges are inclusive, so two rectangles that merely touch overlap.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A positioned, sized rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Horizontal extents touch or cross
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.right() >= other.left() && self.left() <= other.right()
    }

    /// Vertical extents touch or cross
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.bottom() >= other.top() && self.top() <= other.bottom()
    }

    /// Inclusive AABB overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically(other)
    }

    /// Horizontal center
    pub fn center_x(&self) -> i32 {
        self.pos.x + self.size.x / 2
    }
}
