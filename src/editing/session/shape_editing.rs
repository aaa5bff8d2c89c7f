// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Vertex and shift edits for CanvasSession

use super::CanvasSession;
use crate::editing::events::CanvasEvent;
use crate::geometry::{ImagePoint, ImageRect};
use crate::model::ShapeId;
use kurbo::{Point, Rect, Vec2};

/// Clamp a point into optional limits.
fn clamp_point(p: ImagePoint, limits: Option<ImageRect>) -> ImagePoint {
    match limits {
        Some(l) => ImagePoint::new(
            p.row.clamp(l.row_min, l.row_max),
            p.col.clamp(l.col_min, l.col_max),
        ),
        None => p,
    }
}

/// Translate every vertex, rolling back any axis on which a vertex would
/// leave `limits`. Returns the new coordinates.
pub(crate) fn shift_coords(
    coords: &[ImagePoint],
    d_row: f64,
    d_col: f64,
    limits: Option<ImageRect>,
) -> Vec<ImagePoint> {
    let (mut d_row, mut d_col) = (d_row, d_col);
    if let Some(l) = limits {
        let rows_ok = coords
            .iter()
            .all(|p| (l.row_min..=l.row_max).contains(&(p.row + d_row)));
        let cols_ok = coords
            .iter()
            .all(|p| (l.col_min..=l.col_max).contains(&(p.col + d_col)));
        if !rows_ok {
            d_row = 0.0;
        }
        if !cols_ok {
            d_col = 0.0;
        }
    }
    coords.iter().map(|p| p.translate(d_row, d_col)).collect()
}

impl CanvasSession {
    fn commit_coords(&mut self, id: ShapeId, coords: Vec<ImagePoint>, emit: bool) -> bool {
        let Some(shape) = self.shapes.get_mut(id) else {
            return false;
        };
        if !shape.kind.accepts_vertex_count(coords.len()) {
            tracing::warn!("{} edit would leave {} vertices, ignored", shape.kind, coords.len());
            return false;
        }
        shape.image_coords = coords;
        let kind = shape.kind;
        if emit {
            self.emit(CanvasEvent::ShapeCoordsEdited { id, kind });
        }
        true
    }

    /// Move vertex `index` to the canvas position `pos`, kept inside the
    /// shape's drag limits.
    pub fn move_vertex(&mut self, id: ShapeId, index: usize, pos: Point, emit: bool) -> bool {
        let target = self.viewport.canvas_to_full_image(pos);
        let Some(shape) = self.shapes.get(id) else {
            return false;
        };
        let mut coords = shape.image_coords.clone();
        let Some(slot) = coords.get_mut(index) else {
            return false;
        };
        *slot = clamp_point(target, shape.drag_limits);
        self.commit_coords(id, coords, emit)
    }

    /// Insert a vertex after `after` (appending past the end) and return its
    /// index.
    pub fn insert_vertex(&mut self, id: ShapeId, after: usize, pos: Point, emit: bool) -> Option<usize> {
        let target = self.viewport.canvas_to_full_image(pos);
        let shape = self.shapes.get(id)?;
        let mut coords = shape.image_coords.clone();
        let at = (after + 1).min(coords.len());
        coords.insert(at, clamp_point(target, shape.drag_limits));
        self.commit_coords(id, coords, emit).then_some(at)
    }

    /// Replace every vertex of a shape from canvas positions.
    pub fn set_canvas_vertices(&mut self, id: ShapeId, points: &[Point], emit: bool) -> bool {
        let Some(shape) = self.shapes.get(id) else {
            return false;
        };
        let limits = shape.drag_limits;
        let coords = points
            .iter()
            .map(|p| clamp_point(self.viewport.canvas_to_full_image(*p), limits))
            .collect();
        self.commit_coords(id, coords, emit)
    }

    /// Translate a whole shape by a canvas-space delta.
    ///
    /// With drag limits set, each axis is checked on its own: an axis that
    /// would push any vertex out of bounds stays put while the other moves.
    pub fn shift_shape(&mut self, id: ShapeId, delta: Vec2, emit: bool) -> bool {
        let (d_row, d_col) = self.viewport.canvas_delta_to_full_image(delta);
        let Some(shape) = self.shapes.get(id) else {
            return false;
        };
        let coords = shift_coords(&shape.image_coords, d_row, d_col, shape.drag_limits);
        self.commit_coords(id, coords, emit)
    }

    /// Drop vertex `index` from a line, arrow or polygon.
    ///
    /// Refused when the shape would fall below its minimum vertex count.
    /// Returns the insertion index to use afterwards.
    pub fn remove_vertex(&mut self, id: ShapeId, index: usize) -> Option<usize> {
        let shape = self.shapes.get(id)?;
        let min = shape.kind.min_vertices_after_removal()?;
        let len = shape.image_coords.len();
        if len <= min {
            tracing::debug!("{} {} already at {} vertices", shape.kind, id, len);
            return None;
        }
        let mut coords = shape.image_coords.clone();
        let next_index = if index == 0 {
            coords.remove(0);
            0
        } else {
            let at = index.min(len - 1);
            coords.remove(at);
            at - 1
        };
        self.commit_coords(id, coords, false).then_some(next_index)
    }

    /// Announce the end of an edit gesture.
    pub fn finalize_shape(&mut self, id: ShapeId) {
        if let Some(shape) = self.shapes.get(id) {
            let kind = shape.kind;
            self.emit(CanvasEvent::ShapeCoordsFinalized { id, kind });
        }
    }

    // ===== Tool shapes =====

    /// Show a tool rectangle spanning two canvas corners.
    ///
    /// Moving the selection box fires `SelectionChanged`.
    pub(crate) fn set_tool_rect(&mut self, id: ShapeId, a: Point, b: Point) {
        let coords = vec![
            self.viewport.canvas_to_full_image(a),
            self.viewport.canvas_to_full_image(b),
        ];
        let select = id == self.shapes.select_rect_id();
        let Some(shape) = self.shapes.tool_shape_mut(id) else {
            return;
        };
        shape.image_coords = coords;
        shape.hidden = false;
        if select {
            let rect = self.selection_rect();
            self.emit(CanvasEvent::SelectionChanged { rect });
        }
    }

    /// Shift the selection box by a canvas delta under its drag limits.
    pub(crate) fn shift_selection(&mut self, delta: Vec2) {
        let (d_row, d_col) = self.viewport.canvas_delta_to_full_image(delta);
        let id = self.shapes.select_rect_id();
        let Some(shape) = self.shapes.tool_shape_mut(id) else {
            return;
        };
        shape.image_coords = shift_coords(&shape.image_coords, d_row, d_col, shape.drag_limits);
        let rect = self.selection_rect();
        self.emit(CanvasEvent::SelectionChanged { rect });
    }

    /// Hide a tool rectangle and collapse it to a point.
    pub(crate) fn reset_tool_rect(&mut self, id: ShapeId) {
        if let Some(shape) = self.shapes.tool_shape_mut(id) {
            shape.image_coords = vec![ImagePoint::default(); 2];
            shape.hidden = true;
        }
    }

    /// A tool rectangle in canvas space, `None` while hidden.
    pub fn tool_rect(&self, id: ShapeId) -> Option<Rect> {
        let shape = self.shapes.get(id).filter(|s| !s.hidden)?;
        match shape.image_coords.as_slice() {
            [a, b] => Some(Rect::from_points(
                self.viewport.full_image_to_canvas(*a),
                self.viewport.full_image_to_canvas(*b),
            )),
            _ => None,
        }
    }

    /// The selection box in full-image space.
    pub fn selection_rect(&self) -> ImageRect {
        self.shapes
            .get(self.shapes.select_rect_id())
            .and_then(|s| ImageRect::bounding(&s.image_coords))
            .unwrap_or_default()
    }

    /// Keep the selection box inside `limits` when it is shifted.
    pub fn set_selection_limits(&mut self, limits: Option<ImageRect>) {
        let id = self.shapes.select_rect_id();
        if let Some(shape) = self.shapes.tool_shape_mut(id) {
            shape.drag_limits = limits;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn shift_clamps_each_axis_separately() {
        let mut session = CanvasSession::identity_for_tests();
        let id = session
            .create_shape_from_canvas(ShapeKind::Rect, &[p(10.0, 10.0), p(20.0, 20.0)])
            .unwrap();
        session
            .set_drag_limits(id, Some(ImageRect::new(0.0, 0.0, 100.0, 100.0)))
            .unwrap();

        // +5 in x is fine, +200 in y leaves the limits
        assert!(session.shift_shape(id, Vec2::new(5.0, 200.0), true));
        assert_eq!(
            session.shape_canvas_coords(id).unwrap(),
            vec![p(15.0, 10.0), p(25.0, 20.0)]
        );
    }

    #[test]
    fn shift_without_limits_moves_freely() {
        let mut session = CanvasSession::identity_for_tests();
        let id = session
            .create_shape_from_canvas(ShapeKind::Point, &[p(10.0, 10.0)])
            .unwrap();
        session.shift_shape(id, Vec2::new(-30.0, 7.0), false);
        assert_eq!(session.shape_canvas_coords(id).unwrap(), vec![p(-20.0, 17.0)]);
    }

    #[test]
    fn vertex_moves_are_trimmed_to_limits() {
        let mut session = CanvasSession::identity_for_tests();
        let id = session
            .create_shape_from_canvas(ShapeKind::Line, &[p(10.0, 10.0), p(20.0, 20.0)])
            .unwrap();
        session
            .set_drag_limits(id, Some(ImageRect::new(0.0, 0.0, 50.0, 40.0)))
            .unwrap();
        assert!(session.move_vertex(id, 1, p(90.0, 30.0), true));
        assert_eq!(session.shape_canvas_coords(id).unwrap()[1], p(40.0, 30.0));
        assert!(!session.move_vertex(id, 5, p(1.0, 1.0), true));
    }

    #[test]
    fn insert_after_last_appends() {
        let mut session = CanvasSession::identity_for_tests();
        let id = session
            .create_shape_from_canvas(ShapeKind::Polygon, &[p(0.0, 0.0), p(10.0, 0.0)])
            .unwrap();
        assert_eq!(session.insert_vertex(id, 1, p(10.0, 10.0), false), Some(2));
        assert_eq!(session.insert_vertex(id, 0, p(5.0, -5.0), false), Some(1));
        assert_eq!(
            session.shape_canvas_coords(id).unwrap(),
            vec![p(0.0, 0.0), p(5.0, -5.0), p(10.0, 0.0), p(10.0, 10.0)]
        );
    }

    #[test]
    fn polygon_removal_stops_at_three_vertices() {
        let mut session = CanvasSession::identity_for_tests();
        let pts = [p(0.0, 0.0), p(50.0, 0.0), p(60.0, 40.0), p(20.0, 60.0), p(0.0, 30.0)];
        let id = session.create_shape_from_canvas(ShapeKind::Polygon, &pts).unwrap();
        let mut index = 4;
        for _ in 0..3 {
            if let Some(next) = session.remove_vertex(id, index) {
                index = next;
            }
        }
        assert_eq!(session.shapes.get(id).unwrap().vertex_count(), 3);
        assert_eq!(index, 2);
        assert_eq!(session.remove_vertex(id, 0), None);
    }

    #[test]
    fn line_removal_keeps_two_and_boxes_refuse() {
        let mut session = CanvasSession::identity_for_tests();
        let line = session
            .create_shape_from_canvas(ShapeKind::Line, &[p(0.0, 0.0), p(5.0, 5.0), p(9.0, 0.0)])
            .unwrap();
        assert_eq!(session.remove_vertex(line, 0), Some(0));
        assert_eq!(session.remove_vertex(line, 0), None);
        assert_eq!(session.shapes.get(line).unwrap().vertex_count(), 2);

        let rect = session
            .create_shape_from_canvas(ShapeKind::Rect, &[p(0.0, 0.0), p(5.0, 5.0)])
            .unwrap();
        assert_eq!(session.remove_vertex(rect, 1), None);
    }

    #[test]
    fn selection_rect_changes_fire_events() {
        let mut session = CanvasSession::identity_for_tests();
        let select = session.shapes.select_rect_id();
        session.set_tool_rect(select, p(30.0, 10.0), p(10.0, 40.0));
        let rect = ImageRect::new(10.0, 10.0, 40.0, 30.0);
        assert_eq!(session.selection_rect(), rect);
        assert_eq!(session.tool_rect(select), Some(Rect::new(10.0, 10.0, 30.0, 40.0)));

        session.set_selection_limits(Some(ImageRect::new(0.0, 0.0, 45.0, 200.0)));
        session.shift_selection(Vec2::new(20.0, 20.0));
        let shifted = ImageRect::new(10.0, 30.0, 40.0, 50.0);
        assert_eq!(session.selection_rect(), shifted);

        let zoom = session.shapes.zoom_rect_id();
        session.set_tool_rect(zoom, p(0.0, 0.0), p(5.0, 5.0));
        session.reset_tool_rect(zoom);
        assert_eq!(session.tool_rect(zoom), None);

        assert_eq!(
            session.drain_events(),
            vec![
                CanvasEvent::SelectionChanged { rect },
                CanvasEvent::SelectionChanged { rect: shifted },
            ]
        );
    }
}
