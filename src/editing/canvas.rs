// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! The image canvas: a session, the active tool and the pointer state.
//!
//! All input enters through [`ImageCanvas`]. Pointer events run through the
//! [`Mouse`] into the current tool, then any tool switch the tool asked for
//! is applied and any error it hit is returned to the caller.

use super::events::CanvasEvent;
use super::mouse::{Mouse, MouseButton, MouseDelegate, MouseEvent};
use super::session::{CanvasSession, CursorHint, ShapeDrawingState};
use crate::config::CanvasConfig;
use crate::error::Result;
use crate::model::{ImageSource, ShapeId, ShapeKind};
use crate::tools::{ToolBox, ToolId};
use kurbo::Point;

#[derive(Debug)]
pub struct ImageCanvas {
    session: CanvasSession,
    tool: ToolBox,
    mouse: Mouse,
}

impl ImageCanvas {
    pub fn new(config: CanvasConfig) -> Self {
        let mut session = CanvasSession::new(config);
        let mut tool = ToolBox::for_id(ToolId::View);
        tool.activate(&mut session);
        Self {
            session,
            tool,
            mouse: Mouse::new(),
        }
    }

    pub fn session(&self) -> &CanvasSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CanvasSession {
        &mut self.session
    }

    pub fn current_tool(&self) -> ToolId {
        self.tool.id()
    }

    pub fn current_shape_id(&self) -> Option<ShapeId> {
        self.session.current_shape_id()
    }

    pub fn cursor(&self) -> CursorHint {
        self.session.cursor
    }

    /// Switch tools. Any gesture in progress is abandoned and the drawing
    /// state is cleared.
    pub fn set_tool(&mut self, id: ToolId) {
        self.switch_tool(id, true);
    }

    /// Kind drawn by the NEW_SHAPE tool.
    pub fn set_new_shape_kind(&mut self, kind: ShapeKind) {
        self.session.new_shape_kind = kind;
    }

    pub fn attach_source(&mut self, source: Box<dyn ImageSource>) -> Result<()> {
        self.session.attach_source(source)
    }

    // ===== Pointer input =====

    pub fn pointer_down(&mut self, pos: Point, button: MouseButton) -> Result<()> {
        let event = MouseEvent::with_button(pos, button);
        self.mouse.pointer_down(event, &mut self.tool, &mut self.session);
        self.after_event()
    }

    pub fn pointer_move(&mut self, pos: Point) -> Result<()> {
        let event = MouseEvent::new(pos);
        self.mouse.pointer_move(event, &mut self.tool, &mut self.session);
        self.after_event()
    }

    pub fn pointer_up(&mut self, pos: Point, button: MouseButton) -> Result<()> {
        let event = MouseEvent::with_button(pos, button);
        self.mouse.pointer_up(event, &mut self.tool, &mut self.session);
        self.after_event()
    }

    /// Wheel input; a positive `delta` zooms in.
    pub fn wheel(&mut self, pos: Point, delta: f64) -> Result<()> {
        let event = MouseEvent::new(pos);
        self.mouse.wheel(event, delta, &mut self.tool, &mut self.session);
        self.after_event()
    }

    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        self.session.drain_events()
    }

    fn after_event(&mut self) -> Result<()> {
        if let Some(id) = self.session.take_requested_tool() {
            self.switch_tool(id, false);
        }
        match self.session.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Replace the active tool. Switches requested by a tool mid-gesture
    /// keep the drag and drawing state so the new tool can continue it.
    fn switch_tool(&mut self, id: ToolId, external: bool) {
        self.tool.deactivate(&mut self.session);
        if external {
            self.mouse.cancel();
            self.tool.cancel(&mut self.session);
            self.session.drawing = ShapeDrawingState::default();
        }
        tracing::debug!("switching tool {} -> {}", self.tool.id(), id);
        self.tool = ToolBox::for_id(id);
        self.tool.activate(&mut self.session);
        self.session.cursor = CursorHint::Arrow;
        self.session.emit(CanvasEvent::ToolChanged { tool: id });
    }
}
