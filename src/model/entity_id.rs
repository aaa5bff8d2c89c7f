// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Unique identifiers for vector shapes.
//!
//! Each `ShapeId` is drawn from a process-wide atomic counter, so ids are
//! unique across every registry in the process and a deleted shape's id is
//! never handed out again. Ordering follows creation order, which is what
//! lets the registry iterate shapes in insertion order.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a shape in a [`ShapeRegistry`](super::ShapeRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ShapeId(u64);

static SHAPE_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ShapeId {
    /// Allocate a fresh id
    pub(crate) fn next() -> Self {
        Self(SHAPE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}
