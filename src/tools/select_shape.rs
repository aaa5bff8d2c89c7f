// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Shape-select tool: a press makes the nearest shape current

use crate::editing::{CanvasSession, MouseDelegate, MouseEvent};
use crate::tools::{Tool, ToolId};

#[derive(Debug, Clone, Default)]
pub struct SelectShapeTool;

impl Tool for SelectShapeTool {
    fn id(&self) -> ToolId {
        ToolId::SelectClosestShape
    }
}

impl MouseDelegate for SelectShapeTool {
    type Data = CanvasSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        session.select_closest_shape(event.pos, true);
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
    use crate::editing::MouseButton;
    use crate::model::ShapeKind;
    use kurbo::Point;

    #[test]
    fn equidistant_click_picks_earlier_shape() {
        let mut session = CanvasSession::identity_for_tests();
        let a = session
            .create_shape_from_canvas(ShapeKind::Line, &[Point::new(10.0, 50.0), Point::new(100.0, 50.0)])
            .unwrap();
        let _b = session
            .create_shape_from_canvas(ShapeKind::Line, &[Point::new(10.0, 56.0), Point::new(100.0, 56.0)])
            .unwrap();

        let mut tool = SelectShapeTool;
        tool.left_down(
            MouseEvent::with_button(Point::new(50.0, 53.0), MouseButton::Left),
            &mut session,
        );
        assert_eq!(session.current_shape_id(), Some(a));
    }

    #[test]
    fn click_far_from_everything_picks_global_nearest() {
        let mut session = CanvasSession::identity_for_tests();
        let _a = session
            .create_shape_from_canvas(ShapeKind::Point, &[Point::new(10.0, 10.0)])
            .unwrap();
        let b = session
            .create_shape_from_canvas(ShapeKind::Point, &[Point::new(150.0, 150.0)])
            .unwrap();
        SelectShapeTool.left_down(
            MouseEvent::with_button(Point::new(120.0, 120.0), MouseButton::Left),
            &mut session,
        );
        assert_eq!(session.current_shape_id(), Some(b));
    }
}
