// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer event routing.
//!
//! [`Mouse`] turns raw pointer input into gesture callbacks on a
//! [`MouseDelegate`]: a move with the left button held becomes a drag, a move
//! without it becomes a hover.

use kurbo::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub pos: Point,
    pub button: Option<MouseButton>,
}

impl MouseEvent {
    pub fn new(pos: Point) -> Self {
        Self { pos, button: None }
    }

    pub fn with_button(pos: Point, button: MouseButton) -> Self {
        Self {
            pos,
            button: Some(button),
        }
    }
}

/// Positions of an in-progress left-button drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub start: Point,
    pub prev: Point,
    pub current: Point,
}

/// Receiver of pointer gestures. Every method defaults to doing nothing.
pub trait MouseDelegate {
    type Data;

    fn left_down(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    /// Pointer moved with the left button held
    fn left_drag_changed(&mut self, _event: MouseEvent, _drag: Drag, _data: &mut Self::Data) {}

    fn left_up(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    fn right_down(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    /// Pointer moved with no button held
    fn mouse_moved(&mut self, _event: MouseEvent, _data: &mut Self::Data) {}

    /// Wheel turned; positive `delta` zooms in
    fn wheel(&mut self, _event: MouseEvent, _delta: f64, _data: &mut Self::Data) {}

    /// Abandon any gesture in progress
    fn cancel(&mut self, _data: &mut Self::Data) {}
}

/// Pointer state shared across delegates
#[derive(Debug, Clone, Default)]
pub struct Mouse {
    drag: Option<Drag>,
}

impl Mouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_down<D: MouseDelegate>(
        &mut self,
        event: MouseEvent,
        delegate: &mut D,
        data: &mut D::Data,
    ) {
        match event.button {
            Some(MouseButton::Left) => {
                self.drag = Some(Drag {
                    start: event.pos,
                    prev: event.pos,
                    current: event.pos,
                });
                delegate.left_down(event, data);
            }
            Some(MouseButton::Right) => delegate.right_down(event, data),
            _ => {}
        }
    }

    pub fn pointer_move<D: MouseDelegate>(
        &mut self,
        event: MouseEvent,
        delegate: &mut D,
        data: &mut D::Data,
    ) {
        match self.drag.as_mut() {
            Some(drag) => {
                drag.prev = drag.current;
                drag.current = event.pos;
                let drag = *drag;
                let event = MouseEvent::with_button(event.pos, MouseButton::Left);
                delegate.left_drag_changed(event, drag, data);
            }
            None => delegate.mouse_moved(event, data),
        }
    }

    pub fn pointer_up<D: MouseDelegate>(
        &mut self,
        event: MouseEvent,
        delegate: &mut D,
        data: &mut D::Data,
    ) {
        if event.button == Some(MouseButton::Left) && self.drag.take().is_some() {
            delegate.left_up(event, data);
        }
    }

    pub fn wheel<D: MouseDelegate>(
        &mut self,
        event: MouseEvent,
        delta: f64,
        delegate: &mut D,
        data: &mut D::Data,
    ) {
        if delta != 0.0 {
            delegate.wheel(event, delta, data);
        }
    }

    /// Forget any drag in progress.
    pub fn cancel(&mut self) {
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl MouseDelegate for Recorder {
        type Data = ();

        fn left_down(&mut self, event: MouseEvent, _data: &mut ()) {
            self.calls.push(format!("down {}", event.pos.x));
        }

        fn left_drag_changed(&mut self, _event: MouseEvent, drag: Drag, _data: &mut ()) {
            self.calls
                .push(format!("drag {} {} {}", drag.start.x, drag.prev.x, drag.current.x));
        }

        fn left_up(&mut self, event: MouseEvent, _data: &mut ()) {
            self.calls.push(format!("up {}", event.pos.x));
        }

        fn mouse_moved(&mut self, event: MouseEvent, _data: &mut ()) {
            self.calls.push(format!("hover {}", event.pos.x));
        }

        fn right_down(&mut self, event: MouseEvent, _data: &mut ()) {
            self.calls.push(format!("right {}", event.pos.x));
        }
    }

    #[test]
    fn moves_become_drags_while_left_is_held() {
        let mut mouse = Mouse::new();
        let mut rec = Recorder::default();
        let at = |x: f64| Point::new(x, 0.0);

        mouse.pointer_move(MouseEvent::new(at(1.0)), &mut rec, &mut ());
        mouse.pointer_down(MouseEvent::with_button(at(2.0), MouseButton::Left), &mut rec, &mut ());
        mouse.pointer_move(MouseEvent::new(at(3.0)), &mut rec, &mut ());
        mouse.pointer_move(MouseEvent::new(at(4.0)), &mut rec, &mut ());
        mouse.pointer_up(MouseEvent::with_button(at(5.0), MouseButton::Left), &mut rec, &mut ());
        mouse.pointer_move(MouseEvent::new(at(6.0)), &mut rec, &mut ());
        mouse.pointer_down(MouseEvent::with_button(at(7.0), MouseButton::Right), &mut rec, &mut ());

        assert_eq!(
            rec.calls,
            vec![
                "hover 1",
                "down 2",
                "drag 2 2 3",
                "drag 2 3 4",
                "up 5",
                "hover 6",
                "right 7"
            ]
        );
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut mouse = Mouse::new();
        let mut rec = Recorder::default();
        mouse.pointer_up(MouseEvent::with_button(Point::ZERO, MouseButton::Left), &mut rec, &mut ());
        assert!(rec.calls.is_empty());
        assert!(!mouse.is_dragging());
    }
}
