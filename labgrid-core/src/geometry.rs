//! Basic geometric types for positioned text
//!
//! Coordinates follow the extractor's top-down convention: `y0` is the top
//! edge and grows toward the bottom of the page.

use serde::{Deserialize, Serialize};

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box `[x0, y0, x1, y1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl BBox {
    /// Create a new bounding box from its edges
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Get the width
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Get the center point
    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Grow this box so it also covers `other`
    pub fn extend(&mut self, other: &BBox) {
        self.x0 = self.x0.min(other.x0);
        self.y0 = self.y0.min(other.y0);
        self.x1 = self.x1.max(other.x1);
        self.y1 = self.y1.max(other.y1);
    }

    /// True when the horizontal extent touches `[left, right]` (edges inclusive)
    pub fn intersects_x(&self, left: f64, right: f64) -> bool {
        !(self.x1 < left || self.x0 > right)
    }
}

/// Length of the overlap between the intervals `[a0, a1]` and `[b0, b1]`
pub fn overlap_1d(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}
