// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Pan tool
//!
//! Each move pans by the distance from the last anchor and then re-anchors
//! at the pointer. Moves shorter than the pan threshold are skipped; the
//! release always pans whatever is left.

use crate::editing::{CanvasSession, Drag, MouseDelegate, MouseEvent};
use crate::tools::{Tool, ToolId};
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct PanTool {
    anchor: Option<Point>,
}

impl PanTool {
    fn pan_to(&mut self, pos: Point, check_distance: bool, session: &mut CanvasSession) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let delta = anchor - pos;
        if check_distance && delta.hypot() < session.config.pan_pixel_threshold {
            return;
        }
        if let Err(err) = session.pan(delta) {
            session.record_failure(err);
        }
        self.anchor = Some(pos);
    }
}

impl Tool for PanTool {
    fn id(&self) -> ToolId {
        ToolId::Pan
    }

    fn deactivate(&mut self, _session: &mut CanvasSession) {
        self.anchor = None;
    }
}

impl MouseDelegate for PanTool {
    type Data = CanvasSession;

    fn left_down(&mut self, event: MouseEvent, _session: &mut CanvasSession) {
        self.anchor = Some(event.pos);
    }

    fn left_drag_changed(&mut self, event: MouseEvent, _drag: Drag, session: &mut CanvasSession) {
        self.pan_to(event.pos, true, session);
    }

    fn left_up(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        self.pan_to(event.pos, false, session);
        self.anchor = None;
    }

    fn cancel(&mut self, _session: &mut CanvasSession) {
        self.anchor = None;
    }
}
