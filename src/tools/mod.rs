// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Tool system for canvas interaction

use crate::editing::{CanvasSession, Drag, MouseDelegate, MouseEvent};
use crate::error::CanvasError;
use std::fmt;
use std::str::FromStr;

pub mod edit_shape;
pub mod new_shape;
pub mod pan;
mod rubber_band;
pub mod select_region;
pub mod select_shape;
pub mod shift_shape;
pub mod view;
pub mod zoom;

// ===== Tool Identifier =====

/// Tool identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    /// Idle; hover reports coordinates, wheel zooms
    View,
    /// Drag the image around
    Pan,
    /// Rubber-band a region to zoom into
    ZoomIn,
    /// Rubber-band a region to zoom out from
    ZoomOut,
    /// Rubber-band a selection box
    SelectRegion,
    /// Place a new shape of the pending kind
    NewShape,
    /// Edit the vertices of the current shape
    EditShape,
    /// Translate the current shape
    ShiftShape,
    /// Click to pick the nearest shape
    SelectClosestShape,
}

impl ToolId {
    pub const ALL: [ToolId; 9] = [
        ToolId::View,
        ToolId::Pan,
        ToolId::ZoomIn,
        ToolId::ZoomOut,
        ToolId::SelectRegion,
        ToolId::NewShape,
        ToolId::EditShape,
        ToolId::ShiftShape,
        ToolId::SelectClosestShape,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolId::View => "VIEW",
            ToolId::Pan => "PAN",
            ToolId::ZoomIn => "ZOOM_IN",
            ToolId::ZoomOut => "ZOOM_OUT",
            ToolId::SelectRegion => "SELECT",
            ToolId::NewShape => "NEW_SHAPE",
            ToolId::EditShape => "EDIT_SHAPE",
            ToolId::ShiftShape => "SHIFT_SHAPE",
            ToolId::SelectClosestShape => "SHAPE_SELECT",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolId {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let alias = match wanted.to_ascii_uppercase().as_str() {
            "SELECT_REGION" => Some(ToolId::SelectRegion),
            "SELECT_CLOSEST_SHAPE" => Some(ToolId::SelectClosestShape),
            _ => None,
        };
        alias
            .or_else(|| {
                ToolId::ALL
                    .into_iter()
                    .find(|tool| tool.name().eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| CanvasError::UnknownTool(s.to_string()))
    }
}

// ===== Tool Trait =====

/// A canvas tool
pub trait Tool: MouseDelegate<Data = CanvasSession> {
    /// Get the tool identifier
    fn id(&self) -> ToolId;

    /// Called when the tool becomes current
    fn activate(&mut self, _session: &mut CanvasSession) {}

    /// Called when the tool is replaced
    fn deactivate(&mut self, _session: &mut CanvasSession) {}
}

// ===== ToolBox Enum =====

/// Enum wrapping all tool types
#[derive(Debug, Clone)]
pub enum ToolBox {
    View(view::ViewTool),
    Pan(pan::PanTool),
    Zoom(zoom::ZoomTool),
    SelectRegion(select_region::SelectRegionTool),
    NewShape(new_shape::NewShapeTool),
    EditShape(edit_shape::EditShapeTool),
    ShiftShape(shift_shape::ShiftShapeTool),
    SelectShape(select_shape::SelectShapeTool),
}

// ===== ToolBox Implementation =====

impl ToolBox {
    /// Create a tool by ID
    pub fn for_id(id: ToolId) -> Self {
        match id {
            ToolId::View => ToolBox::View(view::ViewTool),
            ToolId::Pan => ToolBox::Pan(pan::PanTool::default()),
            ToolId::ZoomIn => ToolBox::Zoom(zoom::ZoomTool::new(zoom::ZoomDirection::In)),
            ToolId::ZoomOut => ToolBox::Zoom(zoom::ZoomTool::new(zoom::ZoomDirection::Out)),
            ToolId::SelectRegion => ToolBox::SelectRegion(select_region::SelectRegionTool::default()),
            ToolId::NewShape => ToolBox::NewShape(new_shape::NewShapeTool),
            ToolId::EditShape => ToolBox::EditShape(edit_shape::EditShapeTool::default()),
            ToolId::ShiftShape => ToolBox::ShiftShape(shift_shape::ShiftShapeTool),
            ToolId::SelectClosestShape => ToolBox::SelectShape(select_shape::SelectShapeTool),
        }
    }

    /// Get the tool ID
    pub fn id(&self) -> ToolId {
        match self {
            ToolBox::View(tool) => tool.id(),
            ToolBox::Pan(tool) => tool.id(),
            ToolBox::Zoom(tool) => tool.id(),
            ToolBox::SelectRegion(tool) => tool.id(),
            ToolBox::NewShape(tool) => tool.id(),
            ToolBox::EditShape(tool) => tool.id(),
            ToolBox::ShiftShape(tool) => tool.id(),
            ToolBox::SelectShape(tool) => tool.id(),
        }
    }

    pub fn activate(&mut self, session: &mut CanvasSession) {
        match self {
            ToolBox::View(tool) => tool.activate(session),
            ToolBox::Pan(tool) => tool.activate(session),
            ToolBox::Zoom(tool) => tool.activate(session),
            ToolBox::SelectRegion(tool) => tool.activate(session),
            ToolBox::NewShape(tool) => tool.activate(session),
            ToolBox::EditShape(tool) => tool.activate(session),
            ToolBox::ShiftShape(tool) => tool.activate(session),
            ToolBox::SelectShape(tool) => tool.activate(session),
        }
    }

    pub fn deactivate(&mut self, session: &mut CanvasSession) {
        match self {
            ToolBox::View(tool) => tool.deactivate(session),
            ToolBox::Pan(tool) => tool.deactivate(session),
            ToolBox::Zoom(tool) => tool.deactivate(session),
            ToolBox::SelectRegion(tool) => tool.deactivate(session),
            ToolBox::NewShape(tool) => tool.deactivate(session),
            ToolBox::EditShape(tool) => tool.deactivate(session),
            ToolBox::ShiftShape(tool) => tool.deactivate(session),
            ToolBox::SelectShape(tool) => tool.deactivate(session),
        }
    }
}

// ===== MouseDelegate Implementation =====

/// Forward every gesture to the wrapped tool so the ToolBox can sit behind
/// the Mouse state machine
impl MouseDelegate for ToolBox {
    type Data = CanvasSession;

    fn left_down(&mut self, event: MouseEvent, data: &mut CanvasSession) {
        match self {
            ToolBox::View(tool) => tool.left_down(event, data),
            ToolBox::Pan(tool) => tool.left_down(event, data),
            ToolBox::Zoom(tool) => tool.left_down(event, data),
            ToolBox::SelectRegion(tool) => tool.left_down(event, data),
            ToolBox::NewShape(tool) => tool.left_down(event, data),
            ToolBox::EditShape(tool) => tool.left_down(event, data),
            ToolBox::ShiftShape(tool) => tool.left_down(event, data),
            ToolBox::SelectShape(tool) => tool.left_down(event, data),
        }
    }

    fn left_drag_changed(&mut self, event: MouseEvent, drag: Drag, data: &mut CanvasSession) {
        match self {
            ToolBox::View(tool) => tool.left_drag_changed(event, drag, data),
            ToolBox::Pan(tool) => tool.left_drag_changed(event, drag, data),
            ToolBox::Zoom(tool) => tool.left_drag_changed(event, drag, data),
            ToolBox::SelectRegion(tool) => tool.left_drag_changed(event, drag, data),
            ToolBox::NewShape(tool) => tool.left_drag_changed(event, drag, data),
            ToolBox::EditShape(tool) => tool.left_drag_changed(event, drag, data),
            ToolBox::ShiftShape(tool) => tool.left_drag_changed(event, drag, data),
            ToolBox::SelectShape(tool) => tool.left_drag_changed(event, drag, data),
        }
    }

    fn left_up(&mut self, event: MouseEvent, data: &mut CanvasSession) {
        match self {
            ToolBox::View(tool) => tool.left_up(event, data),
            ToolBox::Pan(tool) => tool.left_up(event, data),
            ToolBox::Zoom(tool) => tool.left_up(event, data),
            ToolBox::SelectRegion(tool) => tool.left_up(event, data),
            ToolBox::NewShape(tool) => tool.left_up(event, data),
            ToolBox::EditShape(tool) => tool.left_up(event, data),
            ToolBox::ShiftShape(tool) => tool.left_up(event, data),
            ToolBox::SelectShape(tool) => tool.left_up(event, data),
        }
    }

    fn right_down(&mut self, event: MouseEvent, data: &mut CanvasSession) {
        match self {
            ToolBox::View(tool) => tool.right_down(event, data),
            ToolBox::Pan(tool) => tool.right_down(event, data),
            ToolBox::Zoom(tool) => tool.right_down(event, data),
            ToolBox::SelectRegion(tool) => tool.right_down(event, data),
            ToolBox::NewShape(tool) => tool.right_down(event, data),
            ToolBox::EditShape(tool) => tool.right_down(event, data),
            ToolBox::ShiftShape(tool) => tool.right_down(event, data),
            ToolBox::SelectShape(tool) => tool.right_down(event, data),
        }
    }

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut CanvasSession) {
        match self {
            ToolBox::View(tool) => tool.mouse_moved(event, data),
            ToolBox::Pan(tool) => tool.mouse_moved(event, data),
            ToolBox::Zoom(tool) => tool.mouse_moved(event, data),
            ToolBox::SelectRegion(tool) => tool.mouse_moved(event, data),
            ToolBox::NewShape(tool) => tool.mouse_moved(event, data),
            ToolBox::EditShape(tool) => tool.mouse_moved(event, data),
            ToolBox::ShiftShape(tool) => tool.mouse_moved(event, data),
            ToolBox::SelectShape(tool) => tool.mouse_moved(event, data),
        }
    }

    fn wheel(&mut self, event: MouseEvent, delta: f64, data: &mut CanvasSession) {
        match self {
            ToolBox::View(tool) => tool.wheel(event, delta, data),
            ToolBox::Pan(tool) => tool.wheel(event, delta, data),
            ToolBox::Zoom(tool) => tool.wheel(event, delta, data),
            ToolBox::SelectRegion(tool) => tool.wheel(event, delta, data),
            ToolBox::NewShape(tool) => tool.wheel(event, delta, data),
            ToolBox::EditShape(tool) => tool.wheel(event, delta, data),
            ToolBox::ShiftShape(tool) => tool.wheel(event, delta, data),
            ToolBox::SelectShape(tool) => tool.wheel(event, delta, data),
        }
    }

    fn cancel(&mut self, data: &mut CanvasSession) {
        match self {
            ToolBox::View(tool) => tool.cancel(data),
            ToolBox::Pan(tool) => tool.cancel(data),
            ToolBox::Zoom(tool) => tool.cancel(data),
            ToolBox::SelectRegion(tool) => tool.cancel(data),
            ToolBox::NewShape(tool) => tool.cancel(data),
            ToolBox::EditShape(tool) => tool.cancel(data),
            ToolBox::ShiftShape(tool) => tool.cancel(data),
            ToolBox::SelectShape(tool) => tool.cancel(data),
        }
    }
}
