// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Shift-shape tool: drag the current shape, picking the nearest one first
//! if nothing is current.

use crate::editing::{CanvasSession, Drag, MouseDelegate, MouseEvent};
use crate::tools::{Tool, ToolId};
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct ShiftShapeTool;

impl ShiftShapeTool {
    fn shift_to(&self, pos: Point, emit: bool, session: &mut CanvasSession) {
        let Some(id) = session.current_shape_id() else {
            return;
        };
        let delta = pos - session.drawing.anchor;
        session.shift_shape(id, delta, emit);
        session.drawing.anchor = pos;
    }
}

impl Tool for ShiftShapeTool {
    fn id(&self) -> ToolId {
        ToolId::ShiftShape
    }
}

impl MouseDelegate for ShiftShapeTool {
    type Data = CanvasSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        if session.current_shape_id().is_none() {
            session.select_closest_shape(event.pos, true);
        }
        session.drawing.anchor = event.pos;
    }

    fn left_drag_changed(&mut self, event: MouseEvent, _drag: Drag, session: &mut CanvasSession) {
        self.shift_to(event.pos, true, session);
    }

    fn left_up(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        self.shift_to(event.pos, false, session);
        if let Some(id) = session.current_shape_id() {
            tracing::debug!("Shift tool: finished moving {}", id);
            session.finalize_shape(id);
        }
    }

    fn mouse_moved(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        session.emit_pointer_coordinate(event.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{CanvasEvent, MouseButton};
    use crate::geometry::{ImagePoint, ImageRect};
    use crate::model::ShapeKind;

    #[test]
    fn drag_moves_nearest_shape_within_limits() {
        let mut session = CanvasSession::identity_for_tests();
        let id = session
            .create_shape(
                ShapeKind::Rect,
                vec![ImagePoint::new(10.0, 10.0), ImagePoint::new(40.0, 40.0)],
                None,
            )
            .unwrap();
        session
            .set_drag_limits(id, Some(ImageRect::new(0.0, 0.0, 100.0, 100.0)))
            .unwrap();
        session.drain_events();

        let mut tool = ShiftShapeTool;
        let start = Point::new(40.0, 25.0);
        let end = Point::new(45.0, 225.0);
        tool.left_down(MouseEvent::with_button(start, MouseButton::Left), &mut session);
        assert_eq!(session.current_shape_id(), Some(id));
        let drag = Drag {
            start,
            prev: start,
            current: end,
        };
        tool.left_drag_changed(MouseEvent::with_button(end, MouseButton::Left), drag, &mut session);
        tool.left_up(MouseEvent::with_button(end, MouseButton::Left), &mut session);

        // Columns follow the pointer; rows would leave the limits and stay
        assert_eq!(
            session.shapes.get(id).unwrap().image_coords(),
            &[ImagePoint::new(10.0, 15.0), ImagePoint::new(40.0, 45.0)]
        );
        let events = session.drain_events();
        assert!(matches!(events.last(), Some(CanvasEvent::ShapeCoordsFinalized { .. })));
    }

    #[test]
    fn empty_canvas_press_is_harmless() {
        let mut session = CanvasSession::identity_for_tests();
        let mut tool = ShiftShapeTool;
        let pos = Point::new(5.0, 5.0);
        tool.left_down(MouseEvent::with_button(pos, MouseButton::Left), &mut session);
        tool.left_up(MouseEvent::with_button(pos, MouseButton::Left), &mut session);
        assert_eq!(session.current_shape_id(), None);
        assert!(session.drain_events().is_empty());
    }
}
