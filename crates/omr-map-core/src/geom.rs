//! Axis-aligned box geometry for detector output.
//!
//! Everything downstream (matching, row segmentation, inference) works on
//! these boxes alone; no image data reaches this crate.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box with `x1 <= x2` and `y1 <= y2`.
///
/// Constructed via [`BBox::new`], which normalizes swapped coordinates, so
/// the ordering invariant holds for every value in the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BBox {
    /// Build a box from two corner points in any order.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Box area. Zero for degenerate boxes.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point2<f32> {
        Point2::new((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    /// Overlap area with another box.
    ///
    /// Disjoint or degenerate boxes yield exactly `0.0`; a box overlapped
    /// with itself yields its own area.
    pub fn overlap_area(&self, other: &BBox) -> f32 {
        let w = self.x2.min(other.x2) - self.x1.max(other.x1);
        let h = self.y2.min(other.y2) - self.y1.max(other.y1);
        if w <= 0.0 || h <= 0.0 {
            return 0.0;
        }
        w * h
    }

    /// True when the two boxes share any positive area.
    pub fn overlaps(&self, other: &BBox) -> bool {
        self.overlap_area(other) > 0.0
    }
}
