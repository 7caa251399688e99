//! Axis-aligned rectangle geometry for bat/ball collision
//!
//! Rectangles use screen conventions: `top_left` is the minimum corner, `size`
//! extends toward +x and +y. Edges are half-open, so two rectangles that only
//! share an edge do not overlap.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub top_left: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            top_left: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    /// Rectangle of the given size centred on `centre`
    pub fn from_centre(centre: IVec2, size: IVec2) -> Self {
        Self {
            top_left: centre - size / 2,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.top_left.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.top_left.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.top_left.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.top_left.y + self.size.y
    }

    /// True if the interiors of the two rectangles intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
