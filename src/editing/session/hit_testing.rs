// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing and closest-shape selection for CanvasSession

use super::CanvasSession;
use crate::geometry::{ImagePoint, ImageRect};
use crate::model::shape::{self, ShapeKind};
use crate::model::ShapeId;
use kurbo::Point;

/// The stored vertex nearest a pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexHit {
    pub index: usize,
    /// Canvas-pixel distance to the pointer
    pub distance: f64,
    /// Vertex position in canvas space
    pub point: Point,
}

impl CanvasSession {
    /// Find the stored vertex of `id` closest to `pos`.
    ///
    /// For rectangles and ellipses only two opposite corners are stored. If
    /// the corner nearest `pos` is not one of them, the shape is re-stored
    /// using that corner and its diagonal opposite first, so the returned
    /// index always names the grabbed corner. Ties go to the lower index.
    pub fn find_closest_shape_coord(&mut self, id: ShapeId, pos: Point) -> Option<VertexHit> {
        if self.shapes.get(id)?.kind.is_boxed() {
            self.restore_box_for_corner(id, pos);
        }
        let coords = self.shape_canvas_coords(id)?;
        let (index, distance) = shape::closest_vertex(&coords, pos)?;
        Some(VertexHit {
            index,
            distance,
            point: coords[index],
        })
    }

    fn restore_box_for_corner(&mut self, id: ShapeId, pos: Point) {
        let Some(current) = self.shapes.get(id) else {
            return;
        };
        let [a, b] = match current.image_coords.as_slice() {
            [a, b] => [*a, *b],
            _ => return,
        };
        let bounds = ImageRect::from_points(a, b);
        // Upper-left, upper-right, lower-right, lower-left
        let corners = [
            ImagePoint::new(bounds.row_min, bounds.col_min),
            ImagePoint::new(bounds.row_min, bounds.col_max),
            ImagePoint::new(bounds.row_max, bounds.col_max),
            ImagePoint::new(bounds.row_max, bounds.col_min),
        ];
        let canvas_corners = corners.map(|c| self.viewport.full_image_to_canvas(c));
        let Some((nearest, _)) = shape::closest_vertex(&canvas_corners, pos) else {
            return;
        };
        let grabbed = corners[nearest];
        if grabbed == a || grabbed == b {
            return;
        }
        let restored = match nearest {
            0 | 2 => vec![corners[0], corners[2]],
            1 => vec![corners[1], corners[3]],
            _ => vec![corners[3], corners[1]],
        };
        if let Some(shape) = self.shapes.get_mut(id) {
            shape.image_coords = restored;
        }
    }

    /// Canvas-pixel distance from `pos` to the outline of a shape.
    pub fn distance_from_shape(&self, id: ShapeId, pos: Point) -> Option<f64> {
        let kind = self.shapes.get(id)?.kind;
        let coords = self.shape_canvas_coords(id)?;
        Some(shape::outline_distance(kind, &coords, pos))
    }

    /// Whether `pos` falls inside the area of a rect, ellipse or polygon.
    pub fn shape_contains(&self, id: ShapeId, pos: Point) -> bool {
        let (Some(shape), Some(coords)) = (self.shapes.get(id), self.shape_canvas_coords(id)) else {
            return false;
        };
        shape::area_contains(shape.kind, &coords, pos)
    }

    /// Distance used to rank shapes for selection. Filled shapes count a
    /// pointer inside them as a direct hit.
    fn selection_distance(&self, id: ShapeId, pos: Point) -> Option<f64> {
        let shape = self.shapes.get(id)?;
        if shape.style.fill.is_some() && self.shape_contains(id, pos) {
            return Some(0.0);
        }
        self.distance_from_shape(id, pos)
    }

    /// The visible user shape nearest `pos`.
    ///
    /// Shapes are visited in creation order and the first one within the hit
    /// threshold wins outright, even if a later shape is closer.
    pub fn find_closest_shape(&self, pos: Point) -> Option<ShapeId> {
        let threshold = self.config.shape_hit_pixel_threshold;
        let mut best: Option<(ShapeId, f64)> = None;
        for shape in self.shapes.iter().filter(|s| !s.hidden) {
            let Some(distance) = self.selection_distance(shape.id, pos) else {
                continue;
            };
            if distance < threshold {
                return Some(shape.id);
            }
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((shape.id, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Find the closest shape and optionally make it current.
    pub fn select_closest_shape(&mut self, pos: Point, set_as_current: bool) -> Option<ShapeId> {
        let found = self.find_closest_shape(pos);
        tracing::debug!("closest shape to {:?}: {:?}", pos, found);
        if set_as_current {
            self.set_current_shape(found);
        }
        found
    }

    /// Length of a line or arrow in full-image pixels.
    pub fn shape_length(&self, id: ShapeId) -> Option<f64> {
        let shape = self.shapes.get(id)?;
        match shape.kind {
            ShapeKind::Line | ShapeKind::Arrow => Some(shape::polyline_length(&shape.image_coords)),
            _ => None,
        }
    }
}
