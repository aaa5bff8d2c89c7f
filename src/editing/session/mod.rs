// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Canvas session - the state every tool works against

mod hit_testing;
mod shape_editing;

pub use hit_testing::VertexHit;

use super::events::{CanvasEvent, EventQueue};
use super::viewport::{ViewPort, ZoomOutcome};
use crate::config::CanvasConfig;
use crate::error::{CanvasError, Result};
use crate::geometry::{ImagePoint, ImageRect};
use crate::model::{
    ImageSource, PixelTile, RemapFn, ShapeId, ShapeKind, ShapeRegistry, ShapeStyle, VectorShape,
};
use crate::tools::ToolId;
use kurbo::{Point, Rect, Vec2};

/// Transient state of the shape being drawn or edited.
///
/// Reset whenever the tool is switched from outside.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapeDrawingState {
    /// Set while a shape fresh from NEW_SHAPE is being sized
    pub actively_drawing: bool,
    /// Vertex that drags move and clicks insert after
    pub insert_at_index: usize,
    /// Canvas anchor of the current gesture
    pub anchor: Point,
}

/// Advisory pointer cursor for the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Arrow,
    Cross,
    Move,
    TopLeftCorner,
    TopRightCorner,
    BottomRightCorner,
    BottomLeftCorner,
}

impl CursorHint {
    /// Corner cursor for an index into upper-left, upper-right, lower-right,
    /// lower-left order.
    pub fn corner(index: usize) -> Self {
        match index {
            0 => CursorHint::TopLeftCorner,
            1 => CursorHint::TopRightCorner,
            2 => CursorHint::BottomRightCorner,
            _ => CursorHint::BottomLeftCorner,
        }
    }
}

/// Everything a tool handler may read or mutate.
///
/// The session is the single owner of the viewport and shape registry; tools
/// receive it by `&mut` for the duration of one event.
#[derive(Debug)]
pub struct CanvasSession {
    pub config: CanvasConfig,
    pub viewport: ViewPort,
    pub shapes: ShapeRegistry,
    pub drawing: ShapeDrawingState,
    /// Kind drawn by NEW_SHAPE
    pub new_shape_kind: ShapeKind,
    pub cursor: CursorHint,
    current_shape: Option<ShapeId>,
    events: EventQueue,
    requested_tool: Option<ToolId>,
    failure: Option<CanvasError>,
}

impl CanvasSession {
    pub fn new(config: CanvasConfig) -> Self {
        let viewport = ViewPort::new(&config);
        let shapes = ShapeRegistry::new(config.zoom_rect_style(), config.select_rect_style());
        Self {
            config,
            viewport,
            shapes,
            drawing: ShapeDrawingState::default(),
            new_shape_kind: ShapeKind::Point,
            cursor: CursorHint::Arrow,
            current_shape: None,
            events: EventQueue::default(),
            requested_tool: None,
            failure: None,
        }
    }

    // ===== Events =====

    pub fn emit(&mut self, event: CanvasEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        self.events.drain()
    }

    pub fn pending_events(&self) -> &EventQueue {
        &self.events
    }

    /// Ask the canvas to switch tools once the current event is handled.
    pub(crate) fn request_tool(&mut self, tool: ToolId) {
        self.requested_tool = Some(tool);
    }

    pub(crate) fn take_requested_tool(&mut self) -> Option<ToolId> {
        self.requested_tool.take()
    }

    /// Park an error raised inside a tool handler.
    pub(crate) fn record_failure(&mut self, err: CanvasError) {
        tracing::error!("canvas operation failed: {}", err);
        self.failure = Some(err);
    }

    pub(crate) fn take_failure(&mut self) -> Option<CanvasError> {
        self.failure.take()
    }

    // ===== Current shape =====

    pub fn current_shape_id(&self) -> Option<ShapeId> {
        self.current_shape
    }

    /// Change the current shape, firing deselect/select notifications.
    pub fn set_current_shape(&mut self, id: Option<ShapeId>) {
        let id = id.filter(|id| self.shapes.get(*id).is_some() && !self.shapes.is_tool_shape(*id));
        if id == self.current_shape {
            return;
        }
        if let Some(old) = self.current_shape.take() {
            if let Some(kind) = self.shape_kind(old) {
                self.emit(CanvasEvent::ShapeDeselected { id: old, kind });
            }
        }
        if let Some(new) = id {
            if let Some(kind) = self.shape_kind(new) {
                self.emit(CanvasEvent::ShapeSelected { id: new, kind });
            }
        }
        self.current_shape = id;
    }

    pub fn current_shape(&self) -> Option<&VectorShape> {
        self.current_shape.and_then(|id| self.shapes.get(id))
    }

    fn shape_kind(&self, id: ShapeId) -> Option<ShapeKind> {
        self.shapes.get(id).map(VectorShape::kind)
    }

    // ===== Shape registry =====

    /// Create a shape from full-image vertices.
    ///
    /// `style` defaults to the configured foreground style.
    pub fn create_shape(
        &mut self,
        kind: ShapeKind,
        image_coords: Vec<ImagePoint>,
        style: Option<ShapeStyle>,
    ) -> Result<ShapeId> {
        let style = style.unwrap_or_else(|| self.config.shape_style());
        let id = self.shapes.create(kind, image_coords, style)?;
        self.emit(CanvasEvent::ShapeCreated { id, kind });
        Ok(id)
    }

    /// Create a shape from canvas-space vertices.
    pub fn create_shape_from_canvas(&mut self, kind: ShapeKind, canvas_coords: &[Point]) -> Result<ShapeId> {
        let coords = canvas_coords
            .iter()
            .map(|p| self.viewport.canvas_to_full_image(*p))
            .collect();
        self.create_shape(kind, coords, None)
    }

    /// Delete a shape. Tool shapes and unknown ids are ignored.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        let Some(shape) = self.shapes.delete(id) else {
            return false;
        };
        if self.current_shape == Some(id) {
            self.current_shape = None;
            self.drawing = ShapeDrawingState::default();
        }
        self.emit(CanvasEvent::ShapeDeleted { id, kind: shape.kind });
        true
    }

    /// Delete every user shape.
    pub fn clear_shapes(&mut self) {
        self.current_shape = None;
        self.drawing = ShapeDrawingState::default();
        for shape in self.shapes.clear() {
            self.emit(CanvasEvent::ShapeDeleted {
                id: shape.id(),
                kind: shape.kind(),
            });
        }
    }

    /// Replace a shape's full-image vertices.
    ///
    /// Tool shapes are refused with a warning and `Ok(false)`.
    pub fn set_shape_coords(&mut self, id: ShapeId, image_coords: Vec<ImagePoint>) -> Result<bool> {
        if !self.shapes.set_coords(id, image_coords)? {
            return Ok(false);
        }
        if let Some(kind) = self.shape_kind(id) {
            self.emit(CanvasEvent::ShapeCoordsEdited { id, kind });
        }
        Ok(true)
    }

    pub fn set_shape_style(&mut self, id: ShapeId, style: ShapeStyle) -> Result<()> {
        let shape = self.shapes.get_mut(id).ok_or(CanvasError::UnknownShape(id))?;
        shape.style = style;
        Ok(())
    }

    /// Confine a shape's vertices to `limits` while it is edited.
    pub fn set_drag_limits(&mut self, id: ShapeId, limits: Option<ImageRect>) -> Result<()> {
        let shape = self.shapes.get_mut(id).ok_or(CanvasError::UnknownShape(id))?;
        shape.drag_limits = limits;
        Ok(())
    }

    pub fn set_shape_hidden(&mut self, id: ShapeId, hidden: bool) -> Result<()> {
        let shape = self.shapes.get_mut(id).ok_or(CanvasError::UnknownShape(id))?;
        shape.hidden = hidden;
        Ok(())
    }

    pub fn show_shape(&mut self, id: ShapeId) -> Result<()> {
        self.set_shape_hidden(id, false)
    }

    /// Hide a shape. Hidden shapes are skipped by closest-shape search.
    pub fn hide_shape(&mut self, id: ShapeId) -> Result<()> {
        self.set_shape_hidden(id, true)
    }

    /// Set or clear the label drawn by a text shape.
    pub fn set_shape_text(&mut self, id: ShapeId, text: Option<String>) -> Result<()> {
        let shape = self.shapes.get_mut(id).ok_or(CanvasError::UnknownShape(id))?;
        shape.text = text;
        Ok(())
    }

    /// A shape's vertices mapped into canvas space.
    pub fn shape_canvas_coords(&self, id: ShapeId) -> Option<Vec<Point>> {
        let shape = self.shapes.get(id)?;
        Some(
            shape
                .image_coords
                .iter()
                .map(|p| self.viewport.full_image_to_canvas(*p))
                .collect(),
        )
    }

    // ===== Viewport =====

    /// Attach an image, dropping the old one and showing the whole image.
    pub fn attach_source(&mut self, source: Box<dyn ImageSource>) -> Result<()> {
        self.viewport.attach(source)?;
        self.emit_extent_changed();
        Ok(())
    }

    /// Drop the attached image and return to an identity mapping.
    pub fn detach_source(&mut self) -> Option<Box<dyn ImageSource>> {
        let source = self.viewport.detach()?;
        self.emit_extent_changed();
        Some(source)
    }

    pub fn viewport_extent(&self) -> (ImageRect, u32) {
        (self.viewport.region(), self.viewport.decimation())
    }

    pub fn zoom_to_full_image_rect(&mut self, rect: ImageRect, decimation: Option<u32>) -> Result<ZoomOutcome> {
        let outcome = self.viewport.zoom_to_full_image_rect(rect, decimation)?;
        if outcome.is_applied() {
            self.emit_extent_changed();
        }
        Ok(outcome)
    }

    pub fn zoom_to_canvas_rect(&mut self, rect: Rect, decimation: Option<u32>) -> Result<ZoomOutcome> {
        let outcome = self.viewport.zoom_to_canvas_rect(rect, decimation)?;
        if outcome.is_applied() {
            self.emit_extent_changed();
        }
        Ok(outcome)
    }

    pub fn pan(&mut self, delta: Vec2) -> Result<ZoomOutcome> {
        let outcome = self.viewport.pan(delta)?;
        if outcome.is_applied() {
            self.emit_extent_changed();
        }
        Ok(outcome)
    }

    /// Zoom about a canvas point by the configured wheel factor.
    pub fn zoom_on_wheel(&mut self, pos: Point, delta: f64) -> Result<ZoomOutcome> {
        let factor = self.config.mouse_wheel_zoom_factor.max(1.0);
        let rect = self.viewport.wheel_zoom_rect(pos, factor, delta > 0.0);
        self.zoom_to_canvas_rect(rect, None)
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) -> Result<ZoomOutcome> {
        let outcome = self.viewport.set_canvas_size(width, height)?;
        if outcome.is_applied() {
            self.emit_extent_changed();
        }
        Ok(outcome)
    }

    /// Install a radiometric remap on the source and rebuild the display.
    pub fn set_display_remap(&mut self, remap: Option<RemapFn>) -> Result<bool> {
        let applied = self.viewport.set_display_remap(remap)?;
        if applied {
            self.emit(CanvasEvent::RemapChanged);
        }
        Ok(applied)
    }

    /// Source pixels under a shape's bounding box.
    pub fn region_pixels(&self, id: ShapeId, decimation: Option<u32>) -> Result<PixelTile> {
        let shape = self.shapes.get(id).ok_or(CanvasError::UnknownShape(id))?;
        let rect = ImageRect::bounding(&shape.image_coords).ok_or(CanvasError::DegenerateRegion(id))?;
        if rect.is_degenerate() {
            return Err(CanvasError::DegenerateRegion(id));
        }
        self.viewport.read_full_image_rect(&rect, decimation)
    }

    pub fn emit_pointer_coordinate(&mut self, canvas: Point) {
        let image = self.viewport.canvas_to_full_image(canvas);
        self.emit(CanvasEvent::PointerCoordinateChanged { canvas, image });
    }

    fn emit_extent_changed(&mut self) {
        let (region, decimation) = self.viewport_extent();
        self.emit(CanvasEvent::ViewportExtentChanged { region, decimation });
    }
}

#[cfg(test)]
impl CanvasSession {
    /// Session on a 200x200 image shown 1:1 on a 200x200 canvas.
    pub(crate) fn identity_for_tests() -> Self {
        let config = CanvasConfig {
            canvas_width: 200,
            canvas_height: 200,
            ..CanvasConfig::default()
        };
        let mut session = CanvasSession::new(config);
        session
            .attach_source(Box::new(crate::model::GradientSource::new(200, 200)))
            .unwrap();
        session.drain_events();
        session
    }
}
