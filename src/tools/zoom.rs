// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Zoom tools
//!
//! Drag a box with the zoom rectangle. Zooming in shows the boxed region;
//! zooming out grows the view by how far each side of the box sits from the
//! matching canvas edge.

use super::rubber_band::RubberBand;
use crate::editing::{CanvasSession, Drag, MouseDelegate, MouseEvent};
use crate::tools::{Tool, ToolId};
use kurbo::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone)]
pub struct ZoomTool {
    direction: ZoomDirection,
    band: Option<RubberBand>,
}

impl ZoomTool {
    pub fn new(direction: ZoomDirection) -> Self {
        Self {
            direction,
            band: None,
        }
    }

    pub fn direction(&self) -> ZoomDirection {
        self.direction
    }

    /// Canvas rectangle to zoom to for a committed box.
    fn target_rect(&self, boxed: Rect, canvas: Rect) -> Rect {
        match self.direction {
            ZoomDirection::In => boxed,
            ZoomDirection::Out => {
                let (w, h) = (canvas.width(), canvas.height());
                Rect::new(-boxed.x0, -boxed.y0, w + (w - boxed.x1), h + (h - boxed.y1))
            }
        }
    }

    fn clear(&mut self, session: &mut CanvasSession) {
        self.band = None;
        let id = session.shapes.zoom_rect_id();
        session.reset_tool_rect(id);
    }
}

impl Tool for ZoomTool {
    fn id(&self) -> ToolId {
        match self.direction {
            ZoomDirection::In => ToolId::ZoomIn,
            ZoomDirection::Out => ToolId::ZoomOut,
        }
    }

    fn deactivate(&mut self, session: &mut CanvasSession) {
        self.clear(session);
    }
}

impl MouseDelegate for ZoomTool {
    type Data = CanvasSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        let band = RubberBand::new(event.pos);
        let id = session.shapes.zoom_rect_id();
        session.set_tool_rect(id, band.anchor, band.current);
        self.band = Some(band);
    }

    fn left_drag_changed(&mut self, event: MouseEvent, _drag: Drag, session: &mut CanvasSession) {
        let Some(band) = self.band.as_mut() else {
            return;
        };
        band.current = event.pos;
        let (anchor, current) = (band.anchor, band.current);
        let id = session.shapes.zoom_rect_id();
        session.set_tool_rect(id, anchor, current);
    }

    fn left_up(&mut self, event: MouseEvent, session: &mut CanvasSession) {
        let Some(mut band) = self.band else {
            return;
        };
        band.current = event.pos;
        self.clear(session);

        let threshold = session.config.zoom_box_size_threshold;
        if !band.exceeds(threshold) {
            tracing::debug!("Zoom tool: box {:?} below {} px, ignored", band.rect(), threshold);
            return;
        }
        let target = self.target_rect(band.rect(), session.viewport.canvas_rect());
        tracing::debug!("Zoom tool: {:?} to canvas rect {:?}", self.direction, target);
        if let Err(err) = session.zoom_to_canvas_rect(target, None) {
            session.record_failure(err);
        }
    }

    fn wheel(&mut self, event: MouseEvent, delta: f64, session: &mut CanvasSession) {
        super::view::wheel_zoom(session, event.pos, delta);
    }

    fn cancel(&mut self, session: &mut CanvasSession) {
        self.clear(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::editing::{CanvasEvent, MouseButton};
    use crate::model::GradientSource;
    use kurbo::Point;

    /// 800x600 canvas over a 600x800 image, one image pixel per canvas pixel.
    fn session() -> CanvasSession {
        let config = CanvasConfig {
            canvas_width: 800,
            canvas_height: 600,
            ..CanvasConfig::default()
        };
        let mut session = CanvasSession::new(config);
        session
            .attach_source(Box::new(GradientSource::new(600, 800)))
            .unwrap();
        session.drain_events();
        session
    }

    fn drag_box(tool: &mut ZoomTool, session: &mut CanvasSession, from: Point, to: Point) {
        tool.left_down(MouseEvent::with_button(from, MouseButton::Left), session);
        let drag = Drag {
            start: from,
            prev: from,
            current: to,
        };
        tool.left_drag_changed(MouseEvent::new(to), drag, session);
        tool.left_up(MouseEvent::with_button(to, MouseButton::Left), session);
    }

    #[test]
    fn square_box_is_widened_to_canvas_aspect() {
        let mut session = session();
        let mut tool = ZoomTool::new(ZoomDirection::In);
        drag_box(&mut tool, &mut session, Point::new(20.0, 20.0), Point::new(100.0, 100.0));

        let region = session.viewport.region();
        assert_eq!((region.row_min, region.row_max), (20.0, 100.0));
        // Columns were extended, not rows cropped
        assert!(region.cols() > region.rows());
        assert!((region.cols() / region.rows() - 4.0 / 3.0).abs() < 0.02);
        assert!(region.col_min >= 0.0);
        assert!(session
            .drain_events()
            .iter()
            .any(|e| matches!(e, CanvasEvent::ViewportExtentChanged { .. })));
        let id = session.shapes.zoom_rect_id();
        assert!(session.tool_rect(id).is_none());
    }

    #[test]
    fn small_box_is_ignored() {
        let mut session = session();
        let before = session.viewport.region();
        let mut tool = ZoomTool::new(ZoomDirection::In);
        drag_box(&mut tool, &mut session, Point::new(20.0, 20.0), Point::new(24.0, 60.0));
        assert_eq!(session.viewport.region(), before);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn zoom_rect_tracks_drag() {
        let mut session = session();
        let mut tool = ZoomTool::new(ZoomDirection::In);
        let from = Point::new(10.0, 10.0);
        tool.left_down(MouseEvent::with_button(from, MouseButton::Left), &mut session);
        let to = Point::new(50.0, 40.0);
        let drag = Drag {
            start: from,
            prev: from,
            current: to,
        };
        tool.left_drag_changed(MouseEvent::new(to), drag, &mut session);
        let id = session.shapes.zoom_rect_id();
        assert_eq!(session.tool_rect(id), Some(Rect::new(10.0, 10.0, 50.0, 40.0)));
    }

    #[test]
    fn zoom_out_grows_the_view() {
        let mut session = session();
        let mut zoom_in = ZoomTool::new(ZoomDirection::In);
        drag_box(&mut zoom_in, &mut session, Point::new(20.0, 20.0), Point::new(100.0, 100.0));
        let zoomed = session.viewport.region();

        let mut zoom_out = ZoomTool::new(ZoomDirection::Out);
        assert_eq!(zoom_out.id(), ToolId::ZoomOut);
        drag_box(&mut zoom_out, &mut session, Point::new(300.0, 200.0), Point::new(500.0, 400.0));
        let widened = session.viewport.region();
        assert!(widened.rows() > zoomed.rows());
        assert!(widened.cols() > zoomed.cols());
    }

    #[test]
    fn zoom_out_box_offsets_each_side() {
        let tool = ZoomTool::new(ZoomDirection::Out);
        let canvas = Rect::new(0.0, 0.0, 800.0, 600.0);
        let target = tool.target_rect(Rect::new(100.0, 50.0, 700.0, 500.0), canvas);
        assert_eq!(target, Rect::new(-100.0, -50.0, 900.0, 700.0));
    }
}
