// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit-shape tool
//!
//! Works on the current shape. Hovering decides whether a press edits a
//! vertex or moves the whole shape:
//!
//! - rectangles and ellipses: near a corner resizes, inside moves
//! - lines and arrows: near a vertex edits, near the outline moves
//! - polygons: near a vertex edits, inside or near the outline moves
//! - points and text: near the marker moves
//!
//! In vertex mode a press away from every vertex adds one to lines and
//! polygons, and a right click removes one.

use crate::editing::{CanvasSession, CursorHint, Drag, MouseDelegate, MouseEvent};
use crate::geometry::{ImagePoint, ImageRect};
use crate::model::{ShapeId, ShapeKind, shape};
use crate::tools::{Tool, ToolId};
use kurbo::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Mode {
    /// Presses and drags act on a single vertex
    #[default]
    Normal,
    /// Drags translate the whole shape
    Shift,
}

#[derive(Debug, Clone, Default)]
pub struct EditShapeTool {
    mode: Mode,
}

/// A freshly drawn stub that was released without being stretched.
fn is_degenerate_stub(kind: ShapeKind, coords: &[ImagePoint]) -> bool {
    match kind {
        ShapeKind::Point | ShapeKind::Text => false,
        ShapeKind::Rect | ShapeKind::Ellipse => ImageRect::bounding(coords).is_none_or(|r| r.is_degenerate()),
        ShapeKind::Line | ShapeKind::Arrow => coords.windows(2).all(|pair| pair[0] == pair[1]),
        // Polygons start as a zero-length ring and grow by clicks
        ShapeKind::Polygon => false,
    }
}

impl EditShapeTool {
    /// Choose the press behaviour for a pointer at `pos`.
    ///
    /// Vertex and corner grabs are gated by `vertex_selector_pixel_threshold`.
    /// Shift mode near a line, arrow, point or text marker is gated by
    /// `shape_hit_pixel_threshold` against the outline distance.
    fn pick_mode(&mut self, id: ShapeId, pos: Point, session: &mut CanvasSession) {
        let (Some(kind), Some(coords)) = (
            session.shapes.get(id).map(|s| s.kind()),
            session.shape_canvas_coords(id),
        ) else {
            self.set_mode(Mode::Normal, CursorHint::Arrow, session);
            return;
        };
        let vertex_threshold = session.config.vertex_selector_pixel_threshold;
        let hit_threshold = session.config.shape_hit_pixel_threshold;
        let near_outline = || {
            session
                .distance_from_shape(id, pos)
                .is_some_and(|d| d < hit_threshold)
        };

        let (mode, cursor) = match kind {
            ShapeKind::Rect | ShapeKind::Ellipse => match coords.as_slice() {
                [a, b] => {
                    let corners = shape::box_corners(*a, *b);
                    match shape::closest_vertex(&corners, pos) {
                        Some((i, d)) if d < vertex_threshold => (Mode::Normal, CursorHint::corner(i)),
                        _ if shape::area_contains(ShapeKind::Rect, &[*a, *b], pos) => {
                            (Mode::Shift, CursorHint::Move)
                        }
                        _ => (Mode::Normal, CursorHint::Arrow),
                    }
                }
                _ => (Mode::Normal, CursorHint::Arrow),
            },
            ShapeKind::Line | ShapeKind::Arrow | ShapeKind::Polygon => {
                let on_vertex = shape::closest_vertex(&coords, pos).is_some_and(|(_, d)| d < vertex_threshold);
                let inside = kind == ShapeKind::Polygon && session.shape_contains(id, pos);
                if on_vertex {
                    (Mode::Normal, CursorHint::Cross)
                } else if inside || near_outline() {
                    (Mode::Shift, CursorHint::Move)
                } else {
                    (Mode::Normal, CursorHint::Arrow)
                }
            }
            ShapeKind::Point | ShapeKind::Text => {
                if near_outline() {
                    (Mode::Shift, CursorHint::Move)
                } else {
                    (Mode::Normal, CursorHint::Arrow)
                }
            }
        };
        self.set_mode(mode, cursor, session);
    }

    fn set_mode(&mut self, mode: Mode, cursor: CursorHint, session: &mut CanvasSession) {
        self.mode = mode;
        session.cursor = cursor;
    }

    /// Vertex-mode press on the current shape.
    fn press_vertex(&mut self, id: ShapeId, kind: ShapeKind, pos: Point, session: &mut CanvasSession) {
        if kind.is_point_like() {
            session.move_vertex(id, 0, pos, true);
            session.drawing.insert_at_index = 0;
            return;
        }
        if let Some(hit) = session.find_closest_shape_coord(id, pos) {
            if hit.distance < session.config.vertex_selector_pixel_threshold {
                tracing::debug!("Edit tool: grabbed vertex {} of {}", hit.index, id);
                session.drawing.insert_at_index = hit.index;
                return;
            }
        }
        match kind {
            // New vertices follow the last edited one, not the nearest one,
            // so successive clicks trace the outline in click order.
            ShapeKind::Line | ShapeKind::Polygon => {
                let after = session.drawing.insert_at_index;
                if let Some(at) = session.insert_vertex(id, after, pos, true) {
                    tracing::debug!("Edit tool: inserted vertex {} into {}", at, id);
                    session.drawing.insert_at_index = at;
                }
            }
            ShapeKind::Arrow => {
                let index = session.drawing.insert_at_index.min(1);
                session.move_vertex(id, index, pos, true);
                session.drawing.insert_at_index = index;
            }
            ShapeKind::Rect | ShapeKind::Ellipse => {
                session.set_canvas_vertices(id, &[pos, pos], true);
                session.drawing.insert_at_index = 1;
            }
            ShapeKind::Point | ShapeKind::Text => {}
        }
    }

    /// Apply the gesture at `pos` to the current shape.
    fn track(&mut self, id: ShapeId, pos: Point, emit: bool, session: &mut CanvasSession) {
        match self.mode {
            Mode::Normal => {
                let index = session.drawing.insert_at_index;
                session.move_vertex(id, index, pos, emit);
            }
            Mode::Shift => {
                let delta = pos - session.drawing.anchor;
                session.shift_shape(id, delta, emit);
                session.drawing.anchor = pos;
            }
        }
    }
}

impl Tool for EditShapeTool {
    fn id(&self) -> ToolId {
        ToolId::EditShape
    }

    fn deactivate(&mut self, session: &mut CanvasSession) {
        self.set_mode(Mode::Normal, CursorHint::Arrow, session);
    }
}

impl MouseDelegate for EditShapeTool {
    type Data = CanvasSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        let pos = event.pos;
        let Some(id) = session.current_shape_id() else {
            // Nothing to edit yet: pick a shape and grab its nearest vertex
            let Some(id) = session.select_closest_shape(pos, true) else {
                return;
            };
            if let Some(hit) = session.find_closest_shape_coord(id, pos) {
                session.drawing.insert_at_index = hit.index;
            }
            session.drawing.anchor = pos;
            self.pick_mode(id, pos, session);
            return;
        };
        let Some(kind) = session.shapes.get(id).map(|s| s.kind()) else {
            return;
        };
        match self.mode {
            Mode::Normal => self.press_vertex(id, kind, pos, session),
            Mode::Shift => session.drawing.anchor = pos,
        }
    }

    fn left_drag_changed(&mut self, event: MouseEvent, _drag: Drag, session: &mut CanvasSession) {
        if let Some(id) = session.current_shape_id() {
            self.track(id, event.pos, true, session);
        }
    }

    fn left_up(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        let Some(id) = session.current_shape_id() else {
            return;
        };
        self.track(id, event.pos, false, session);

        let stub = session
            .shapes
            .get(id)
            .is_some_and(|s| is_degenerate_stub(s.kind(), s.image_coords()));
        if session.drawing.actively_drawing && stub {
            tracing::debug!("Edit tool: discarding unstretched {}", id);
            session.delete_shape(id);
            session.request_tool(ToolId::NewShape);
        } else {
            session.finalize_shape(id);
        }
        session.drawing.actively_drawing = false;
        if self.mode == Mode::Shift {
            self.set_mode(Mode::Normal, CursorHint::Arrow, session);
        }
    }

    fn right_down(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        if self.mode != Mode::Normal {
            return;
        }
        let Some(id) = session.current_shape_id() else {
            return;
        };
        if session
            .shapes
            .get(id)
            .and_then(|s| s.kind().min_vertices_after_removal())
            .is_none()
        {
            return;
        }
        // A vertex under the pointer wins over the tracked insertion index
        let index = match session.find_closest_shape_coord(id, event.pos) {
            Some(hit) if hit.distance < session.config.vertex_selector_pixel_threshold => hit.index,
            _ => session.drawing.insert_at_index,
        };
        if let Some(next) = session.remove_vertex(id, index) {
            tracing::debug!("Edit tool: removed vertex {} from {}", index, id);
            session.drawing.insert_at_index = next;
            session.finalize_shape(id);
        }
    }

    fn mouse_moved(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        session.emit_pointer_coordinate(event.pos);
        match session.current_shape_id() {
            Some(id) => self.pick_mode(id, event.pos, session),
            None => self.set_mode(Mode::Normal, CursorHint::Arrow, session),
        }
    }

    fn wheel(&mut self, event: MouseEvent, delta: f64, session: &mut CanvasSession) {
        super::view::wheel_zoom(session, event.pos, delta);
    }

    fn cancel(&mut self, session: &mut CanvasSession) {
        self.set_mode(Mode::Normal, CursorHint::Arrow, session);
    }
}
