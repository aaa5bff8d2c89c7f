// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! View tool: the idle state

use crate::editing::{CanvasSession, MouseDelegate, MouseEvent};
use crate::tools::{Tool, ToolId};
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct ViewTool;

impl Tool for ViewTool {
    fn id(&self) -> ToolId {
        ToolId::View
    }
}

impl MouseDelegate for ViewTool {
    type Data = CanvasSession;

    fn mouse_moved(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        session.emit_pointer_coordinate(event.pos);
    }

    fn wheel(&mut self, event: MouseEvent, delta: f64, session: &mut CanvasSession) {
        wheel_zoom(session, event.pos, delta);
    }
}

/// Zoom about `pos` if wheel zoom is enabled. Shared by the tools that
/// behave like VIEW between clicks.
pub(crate) fn wheel_zoom(session: &mut CanvasSession, pos: Point, delta: f64) {
    if !session.config.zoom_on_wheel {
        return;
    }
    tracing::debug!("View tool: wheel {} at {:?}", delta, pos);
    if let Err(err) = session.zoom_on_wheel(pos, delta) {
        session.record_failure(err);
    }
}
