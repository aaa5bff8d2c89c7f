// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Full-image coordinate types.
//!
//! Full-image space is indexed `(row, col)` with the origin at the top-left
//! pixel of the undecimated image. Canvas space uses `kurbo::Point`, where
//! `x` runs along columns and `y` along rows.

use serde::{Deserialize, Serialize};

/// Size of a full-resolution image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageExtent {
    pub rows: usize,
    pub cols: usize,
}

impl ImageExtent {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// The whole image as a rectangle.
    pub fn bounds(&self) -> ImageRect {
        ImageRect::new(0.0, 0.0, self.rows as f64, self.cols as f64)
    }
}

/// A point in full-image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePoint {
    pub row: f64,
    pub col: f64,
}

impl ImagePoint {
    pub const fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    pub fn is_finite(&self) -> bool {
        self.row.is_finite() && self.col.is_finite()
    }

    pub fn translate(self, d_row: f64, d_col: f64) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    pub fn distance(self, other: ImagePoint) -> f64 {
        (self.row - other.row).hypot(self.col - other.col)
    }
}

/// An axis-aligned rectangle in full-image space.
///
/// Rectangles built through [`ImageRect::from_points`] are normalized so that
/// `row_min <= row_max` and `col_min <= col_max`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageRect {
    pub row_min: f64,
    pub col_min: f64,
    pub row_max: f64,
    pub col_max: f64,
}

impl ImageRect {
    pub const fn new(row_min: f64, col_min: f64, row_max: f64, col_max: f64) -> Self {
        Self {
            row_min,
            col_min,
            row_max,
            col_max,
        }
    }

    /// Normalized rectangle spanning two corners.
    pub fn from_points(a: ImagePoint, b: ImagePoint) -> Self {
        Self::new(
            a.row.min(b.row),
            a.col.min(b.col),
            a.row.max(b.row),
            a.col.max(b.col),
        )
    }

    /// Bounding box of a set of points, `None` when empty.
    pub fn bounding(points: &[ImagePoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Self::from_points(*first, *first);
        for p in rest {
            rect.row_min = rect.row_min.min(p.row);
            rect.col_min = rect.col_min.min(p.col);
            rect.row_max = rect.row_max.max(p.row);
            rect.col_max = rect.col_max.max(p.col);
        }
        Some(rect)
    }

    pub fn rows(&self) -> f64 {
        self.row_max - self.row_min
    }

    pub fn cols(&self) -> f64 {
        self.col_max - self.col_min
    }

    pub fn center(&self) -> ImagePoint {
        ImagePoint::new(
            (self.row_min + self.row_max) / 2.0,
            (self.col_min + self.col_max) / 2.0,
        )
    }

    pub fn upper_left(&self) -> ImagePoint {
        ImagePoint::new(self.row_min, self.col_min)
    }

    pub fn lower_right(&self) -> ImagePoint {
        ImagePoint::new(self.row_max, self.col_max)
    }

    pub fn is_finite(&self) -> bool {
        self.row_min.is_finite()
            && self.col_min.is_finite()
            && self.row_max.is_finite()
            && self.col_max.is_finite()
    }

    /// True when the rectangle has no positive area.
    pub fn is_degenerate(&self) -> bool {
        !(self.rows() > 0.0 && self.cols() > 0.0)
    }

    /// True when some part of the rectangle lies on the image.
    pub fn overlaps(&self, extent: ImageExtent) -> bool {
        self.row_min < extent.rows as f64
            && self.row_max > 0.0
            && self.col_min < extent.cols as f64
            && self.col_max > 0.0
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: ImagePoint) -> bool {
        p.row >= self.row_min && p.row <= self.row_max && p.col >= self.col_min && p.col <= self.col_max
    }

    pub fn translate(&self, d_row: f64, d_col: f64) -> Self {
        Self::new(
            self.row_min + d_row,
            self.col_min + d_col,
            self.row_max + d_row,
            self.col_max + d_col,
        )
    }

    /// Snap every edge to the nearest whole pixel.
    pub fn round(&self) -> Self {
        Self::new(
            self.row_min.round(),
            self.col_min.round(),
            self.row_max.round(),
            self.col_max.round(),
        )
    }
}
