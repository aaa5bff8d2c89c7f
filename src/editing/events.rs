// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Notifications emitted by the canvas.
//!
//! The canvas never calls out to a presentation layer. It queues
//! [`CanvasEvent`]s, which the owner drains after each input event.

use crate::geometry::{ImagePoint, ImageRect};
use crate::model::{ShapeId, ShapeKind};
use crate::tools::ToolId;
use kurbo::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ToolChanged { tool: ToolId },
    ShapeCreated { id: ShapeId, kind: ShapeKind },
    ShapeDeleted { id: ShapeId, kind: ShapeKind },
    ShapeSelected { id: ShapeId, kind: ShapeKind },
    ShapeDeselected { id: ShapeId, kind: ShapeKind },
    /// Live vertex change during a gesture
    ShapeCoordsEdited { id: ShapeId, kind: ShapeKind },
    /// A gesture that changed a shape has ended
    ShapeCoordsFinalized { id: ShapeId, kind: ShapeKind },
    /// The selection box moved or resized
    SelectionChanged { rect: ImageRect },
    /// The selection box was released with a usable size
    SelectionFinalized { rect: ImageRect },
    ViewportExtentChanged { region: ImageRect, decimation: u32 },
    /// Source pixels were remapped; the display image was rebuilt
    RemapChanged,
    PointerCoordinateChanged { canvas: Point, image: ImagePoint },
}

/// FIFO of pending notifications
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: Vec<CanvasEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: CanvasEvent) {
        tracing::trace!("event {:?}", event);
        self.pending.push(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanvasEvent> {
        self.pending.iter()
    }
}
