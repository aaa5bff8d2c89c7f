// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! The shape registry: owner of every vector shape on a canvas.
//!
//! Two reserved tool shapes (the zoom rubber band and the selection box) are
//! created with the registry and live as long as it does. They are hidden
//! from the public listing and cannot be deleted or edited through the
//! public API.

use super::shape::{ShapeKind, ShapeStyle, VectorShape};
use super::ShapeId;
use crate::error::{CanvasError, Result};
use crate::geometry::ImagePoint;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    /// Keyed by id; ids grow monotonically, so this iterates in creation order
    shapes: BTreeMap<ShapeId, VectorShape>,
    zoom_rect: ShapeId,
    select_rect: ShapeId,
}

impl ShapeRegistry {
    /// Create a registry holding only the two tool shapes.
    pub fn new(zoom_style: ShapeStyle, select_style: ShapeStyle) -> Self {
        let mut shapes = BTreeMap::new();
        let zoom_rect = Self::insert_tool_shape(&mut shapes, zoom_style);
        let select_rect = Self::insert_tool_shape(&mut shapes, select_style);
        Self {
            shapes,
            zoom_rect,
            select_rect,
        }
    }

    fn insert_tool_shape(
        shapes: &mut BTreeMap<ShapeId, VectorShape>,
        style: ShapeStyle,
    ) -> ShapeId {
        let id = ShapeId::next();
        let mut shape = VectorShape::new(id, ShapeKind::Rect, vec![ImagePoint::default(); 2], style);
        shape.hidden = true;
        shapes.insert(id, shape);
        id
    }

    pub fn zoom_rect_id(&self) -> ShapeId {
        self.zoom_rect
    }

    pub fn select_rect_id(&self) -> ShapeId {
        self.select_rect
    }

    pub fn is_tool_shape(&self, id: ShapeId) -> bool {
        id == self.zoom_rect || id == self.select_rect
    }

    /// Add a shape and return its new id.
    pub fn create(
        &mut self,
        kind: ShapeKind,
        coords: Vec<ImagePoint>,
        style: ShapeStyle,
    ) -> Result<ShapeId> {
        validate_coords(kind, &coords)?;
        let id = ShapeId::next();
        self.shapes.insert(id, VectorShape::new(id, kind, coords, style));
        tracing::debug!("created {} {}", kind, id);
        Ok(id)
    }

    /// Remove a shape, returning it.
    ///
    /// Tool shapes are refused with a warning.
    pub fn delete(&mut self, id: ShapeId) -> Option<VectorShape> {
        if self.is_tool_shape(id) {
            tracing::warn!("refusing to delete tool shape {}", id);
            return None;
        }
        self.shapes.remove(&id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&VectorShape> {
        self.shapes.get(&id)
    }

    /// Mutable access to a user shape. Tool shapes are not handed out.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut VectorShape> {
        if self.is_tool_shape(id) {
            tracing::warn!("refusing mutable access to tool shape {}", id);
            return None;
        }
        self.shapes.get_mut(&id)
    }

    pub(crate) fn tool_shape_mut(&mut self, id: ShapeId) -> Option<&mut VectorShape> {
        if !self.is_tool_shape(id) {
            return None;
        }
        self.shapes.get_mut(&id)
    }

    /// Replace the vertices of a user shape.
    ///
    /// Returns `Ok(false)` without changing anything for a tool shape.
    pub fn set_coords(&mut self, id: ShapeId, coords: Vec<ImagePoint>) -> Result<bool> {
        if self.is_tool_shape(id) {
            tracing::warn!("refusing to edit tool shape {} directly", id);
            return Ok(false);
        }
        let shape = self.shapes.get_mut(&id).ok_or(CanvasError::UnknownShape(id))?;
        validate_coords(shape.kind, &coords)?;
        shape.image_coords = coords;
        Ok(true)
    }

    /// Ids in creation order, optionally leaving out the tool shapes.
    pub fn ids(&self, exclude_tools: bool) -> Vec<ShapeId> {
        self.shapes
            .keys()
            .copied()
            .filter(|id| !exclude_tools || !self.is_tool_shape(*id))
            .collect()
    }

    /// User shapes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &VectorShape> {
        self.shapes
            .values()
            .filter(|shape| !self.is_tool_shape(shape.id))
    }

    /// Number of user shapes.
    pub fn len(&self) -> usize {
        self.shapes.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every user shape, returning them in creation order.
    pub fn clear(&mut self) -> Vec<VectorShape> {
        let ids = self.ids(true);
        ids.into_iter()
            .filter_map(|id| self.shapes.remove(&id))
            .collect()
    }
}

fn validate_coords(kind: ShapeKind, coords: &[ImagePoint]) -> Result<()> {
    if !kind.accepts_vertex_count(coords.len()) {
        return Err(CanvasError::VertexCount {
            kind,
            actual: coords.len(),
        });
    }
    if !coords.iter().all(ImagePoint::is_finite) {
        return Err(CanvasError::NonFiniteCoords);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;

    fn registry() -> ShapeRegistry {
        let config = CanvasConfig::default();
        ShapeRegistry::new(config.zoom_rect_style(), config.select_rect_style())
    }

    fn line() -> Vec<ImagePoint> {
        vec![ImagePoint::new(0.0, 0.0), ImagePoint::new(10.0, 10.0)]
    }

    #[test]
    fn new_registry_has_only_tool_shapes() {
        let reg = registry();
        assert!(reg.is_empty());
        assert_eq!(reg.ids(false).len(), 2);
        assert!(reg.ids(true).is_empty());
        assert!(reg.get(reg.zoom_rect_id()).is_some_and(|s| s.hidden));
        assert_ne!(reg.zoom_rect_id(), reg.select_rect_id());
    }

    #[test]
    fn created_ids_are_unique_and_never_tool_ids() {
        let mut reg = registry();
        let style = CanvasConfig::default().shape_style();
        let mut seen = Vec::new();
        for _ in 0..20 {
            let id = reg.create(ShapeKind::Line, line(), style.clone()).unwrap();
            assert!(!reg.is_tool_shape(id));
            assert!(!seen.contains(&id));
            seen.push(id);
        }
        // Deleted ids are not reused
        let gone = seen[3];
        reg.delete(gone).unwrap();
        let fresh = reg.create(ShapeKind::Line, line(), style).unwrap();
        assert_ne!(fresh, gone);
        assert!(!seen.contains(&fresh));
    }

    #[test]
    fn iteration_follows_creation_order() {
        let mut reg = registry();
        let style = CanvasConfig::default().shape_style();
        let a = reg.create(ShapeKind::Point, vec![ImagePoint::new(1.0, 1.0)], style.clone()).unwrap();
        let b = reg.create(ShapeKind::Line, line(), style.clone()).unwrap();
        let c = reg.create(ShapeKind::Point, vec![ImagePoint::new(2.0, 2.0)], style).unwrap();
        let order: Vec<_> = reg.iter().map(VectorShape::id).collect();
        assert_eq!(order, vec![a, b, c]);
        assert_eq!(reg.ids(true), vec![a, b, c]);
    }

    #[test]
    fn tool_shapes_are_protected() {
        let mut reg = registry();
        let zoom = reg.zoom_rect_id();
        assert!(reg.delete(zoom).is_none());
        assert!(reg.get(zoom).is_some());
        assert!(reg.get_mut(zoom).is_none());
        assert!(!reg.set_coords(zoom, line()).unwrap());
    }

    #[test]
    fn malformed_coords_are_rejected() {
        let mut reg = registry();
        let style = CanvasConfig::default().shape_style();
        assert!(matches!(
            reg.create(ShapeKind::Rect, vec![ImagePoint::default(); 3], style.clone()),
            Err(CanvasError::VertexCount { .. })
        ));
        assert!(matches!(
            reg.create(ShapeKind::Point, vec![ImagePoint::new(f64::NAN, 0.0)], style),
            Err(CanvasError::NonFiniteCoords)
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn clear_keeps_tool_shapes() {
        let mut reg = registry();
        let style = CanvasConfig::default().shape_style();
        reg.create(ShapeKind::Line, line(), style.clone()).unwrap();
        reg.create(ShapeKind::Line, line(), style).unwrap();
        assert_eq!(reg.clear().len(), 2);
        assert!(reg.is_empty());
        assert_eq!(reg.ids(false).len(), 2);
    }
}
