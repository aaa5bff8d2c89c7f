// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! New-shape tool
//!
//! A press drops a stub of the pending kind under the pointer and hands the
//! rest of the gesture to the edit tool, which drags the stub's free vertex.

use crate::editing::{CanvasSession, MouseDelegate, MouseEvent, ShapeDrawingState};
use crate::model::ShapeKind;
use crate::settings;
use crate::tools::{Tool, ToolId};
use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Default)]
pub struct NewShapeTool;

/// Canvas vertices of a fresh stub and the vertex the drag will move.
///
/// Two-corner and two-point stubs start one pixel apart so they never begin
/// degenerate.
pub(crate) fn stub_vertices(kind: ShapeKind, pos: Point) -> (Vec<Point>, usize) {
    match kind {
        ShapeKind::Point | ShapeKind::Text => (vec![pos], 0),
        ShapeKind::Polygon => (vec![pos, pos], 1),
        ShapeKind::Line | ShapeKind::Arrow | ShapeKind::Rect | ShapeKind::Ellipse => {
            (vec![pos, pos + Vec2::new(1.0, 1.0)], 1)
        }
    }
}

impl Tool for NewShapeTool {
    fn id(&self) -> ToolId {
        ToolId::NewShape
    }
}

impl MouseDelegate for NewShapeTool {
    type Data = CanvasSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        let kind = session.new_shape_kind;
        let (vertices, insert_at_index) = stub_vertices(kind, event.pos);
        let id = match session.create_shape_from_canvas(kind, &vertices) {
            Ok(id) => id,
            Err(err) => {
                session.record_failure(err);
                return;
            }
        };
        if kind == ShapeKind::Text {
            if let Err(err) = session.set_shape_text(id, Some(settings::style::DEFAULT_TEXT.to_string())) {
                session.record_failure(err);
            }
        }
        tracing::debug!("New shape tool: created {} {}", kind, id);

        session.set_current_shape(Some(id));
        session.drawing = ShapeDrawingState {
            actively_drawing: true,
            insert_at_index,
            anchor: event.pos,
        };
        session.request_tool(ToolId::EditShape);
    }

    fn mouse_moved(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        session.emit_pointer_coordinate(event.pos);
    }

    fn wheel(&mut self, event: MouseEvent, delta: f64, session: &mut CanvasSession) {
        super::view::wheel_zoom(session, event.pos, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{CanvasEvent, MouseButton};
    use crate::geometry::ImagePoint;

    #[test]
    fn press_creates_stub_and_hands_off() {
        let mut session = CanvasSession::identity_for_tests();
        session.new_shape_kind = ShapeKind::Rect;
        let mut tool = NewShapeTool;
        tool.left_down(
            MouseEvent::with_button(Point::new(50.0, 40.0), MouseButton::Left),
            &mut session,
        );

        let shape = session.current_shape().unwrap();
        assert_eq!(shape.kind(), ShapeKind::Rect);
        assert_eq!(
            shape.image_coords(),
            &[ImagePoint::new(40.0, 50.0), ImagePoint::new(41.0, 51.0)]
        );
        assert!(session.drawing.actively_drawing);
        assert_eq!(session.drawing.insert_at_index, 1);
        assert_eq!(session.take_requested_tool(), Some(ToolId::EditShape));

        let events = session.drain_events();
        assert!(matches!(events[0], CanvasEvent::ShapeCreated { kind: ShapeKind::Rect, .. }));
        assert!(matches!(events[1], CanvasEvent::ShapeSelected { .. }));
    }

    #[test]
    fn text_stub_gets_default_label() {
        let mut session = CanvasSession::identity_for_tests();
        session.new_shape_kind = ShapeKind::Text;
        NewShapeTool.left_down(
            MouseEvent::with_button(Point::new(10.0, 10.0), MouseButton::Left),
            &mut session,
        );
        let shape = session.current_shape().unwrap();
        assert_eq!(shape.text.as_deref(), Some("Text"));
        assert_eq!(session.drawing.insert_at_index, 0);
    }

    #[test]
    fn polygon_stub_starts_doubled() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(stub_vertices(ShapeKind::Polygon, p), (vec![p, p], 1));
        assert_eq!(stub_vertices(ShapeKind::Point, p), (vec![p], 0));
    }
}
