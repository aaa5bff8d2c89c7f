// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Select-region tool
//!
//! Drags out the selection rectangle. Once a selection is showing, grabbing
//! near a corner resizes it about the opposite corner and grabbing inside it
//! moves it.

use super::rubber_band::RubberBand;
use crate::editing::{CanvasEvent, CanvasSession, CursorHint, Drag, MouseDelegate, MouseEvent};
use crate::model::{ShapeKind, shape};
use crate::tools::{Tool, ToolId};
use kurbo::{Point, Rect};

/// What a press will do, decided on hover
#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Mode {
    /// Start a new rectangle
    #[default]
    Normal,
    /// Resize with `anchor` (the opposite corner) held fixed
    Corner { anchor: Point },
    /// Move the whole selection
    Shift { anchor: Point },
}

#[derive(Debug, Clone, Default)]
pub struct SelectRegionTool {
    mode: Mode,
    band: Option<RubberBand>,
}

impl SelectRegionTool {
    fn select_rect(session: &CanvasSession) -> Option<Rect> {
        session.tool_rect(session.shapes.select_rect_id())
    }

    fn pick_mode(&mut self, pos: Point, session: &mut CanvasSession) {
        let (mode, cursor) = match Self::select_rect(session) {
            Some(rect) => {
                let corners = shape::box_corners(Point::new(rect.x0, rect.y0), Point::new(rect.x1, rect.y1));
                match shape::closest_vertex(&corners, pos) {
                    Some((i, d)) if d < session.config.vertex_selector_pixel_threshold => (
                        Mode::Corner {
                            anchor: corners[(i + 2) % 4],
                        },
                        CursorHint::corner(i),
                    ),
                    _ if shape::area_contains(ShapeKind::Rect, &[corners[0], corners[2]], pos) => {
                        (Mode::Shift { anchor: pos }, CursorHint::Move)
                    }
                    _ => (Mode::Normal, CursorHint::Arrow),
                }
            }
            None => (Mode::Normal, CursorHint::Arrow),
        };
        self.mode = mode;
        session.cursor = cursor;
    }

    fn track(&mut self, pos: Point, session: &mut CanvasSession) {
        let id = session.shapes.select_rect_id();
        match &mut self.mode {
            Mode::Normal => {
                if let Some(band) = self.band.as_mut() {
                    band.current = pos;
                    session.set_tool_rect(id, band.anchor, band.current);
                }
            }
            Mode::Corner { anchor } => session.set_tool_rect(id, *anchor, pos),
            Mode::Shift { anchor } => {
                let delta = pos - *anchor;
                session.shift_selection(delta);
                *anchor = pos;
            }
        }
    }

    fn reset(&mut self, session: &mut CanvasSession) {
        self.mode = Mode::Normal;
        self.band = None;
        let id = session.shapes.select_rect_id();
        session.reset_tool_rect(id);
    }
}

impl Tool for SelectRegionTool {
    fn id(&self) -> ToolId {
        ToolId::SelectRegion
    }

    fn deactivate(&mut self, session: &mut CanvasSession) {
        self.reset(session);
    }
}

impl MouseDelegate for SelectRegionTool {
    type Data = CanvasSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        match &mut self.mode {
            Mode::Normal => {
                let band = RubberBand::new(event.pos);
                let id = session.shapes.select_rect_id();
                session.set_tool_rect(id, band.anchor, band.current);
                self.band = Some(band);
            }
            Mode::Shift { anchor } => *anchor = event.pos,
            Mode::Corner { .. } => {}
        }
    }

    fn left_drag_changed(&mut self, event: MouseEvent, _drag: Drag, session: &mut CanvasSession) {
        self.track(event.pos, session);
    }

    fn left_up(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        self.track(event.pos, session);
        self.band = None;

        let threshold = session.config.select_size_threshold;
        let big_enough = Self::select_rect(session)
            .is_some_and(|rect| rect.width() > threshold && rect.height() > threshold);
        if big_enough {
            let rect = session.selection_rect();
            tracing::debug!("Select tool: finalized {:?}", rect);
            session.emit(CanvasEvent::SelectionFinalized { rect });
        } else {
            tracing::debug!("Select tool: selection below {} px, cleared", threshold);
            self.reset(session);
        }
    }

    fn mouse_moved(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        session.emit_pointer_coordinate(event.pos);
        self.pick_mode(event.pos, session);
    }

    fn wheel(&mut self, event: MouseEvent, delta: f64, session: &mut CanvasSession) {
        super::view::wheel_zoom(session, event.pos, delta);
    }

    fn cancel(&mut self, session: &mut CanvasSession) {
        self.reset(session);
    }
}
