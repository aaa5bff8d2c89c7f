// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

use kurbo::{Point, Rect};

/// A drag rectangle anchored where the pointer went down
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RubberBand {
    pub anchor: Point,
    pub current: Point,
}

impl RubberBand {
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            current: anchor,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.current)
    }

    /// Whether both sides are longer than `threshold` canvas pixels.
    pub fn exceeds(&self, threshold: f64) -> bool {
        let rect = self.rect();
        rect.width() > threshold && rect.height() > threshold
    }
}
