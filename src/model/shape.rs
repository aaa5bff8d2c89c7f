// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Vector shape records and their canvas-space geometry.
//!
//! Shapes store their vertices in full-image space so they survive any zoom
//! or pan. Distance and containment queries work on canvas-space points,
//! because pointer thresholds are expressed in screen pixels.

use super::ShapeId;
use crate::error::CanvasError;
use crate::geometry::ImagePoint;
use kurbo::{BezPath, Ellipse, Line, ParamCurveNearest, Point, Rect, Shape};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flattening tolerance for ellipse outlines, in screen pixels
const ELLIPSE_TOLERANCE: f64 = 0.1;

/// Accuracy passed to kurbo's nearest-point solver
const NEAREST_ACCURACY: f64 = 1e-6;

// ===== Shape Kind =====

/// The closed set of shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeKind {
    Point,
    Line,
    Arrow,
    Rect,
    Ellipse,
    Polygon,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Point,
        ShapeKind::Line,
        ShapeKind::Arrow,
        ShapeKind::Rect,
        ShapeKind::Ellipse,
        ShapeKind::Polygon,
        ShapeKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Point => "POINT",
            ShapeKind::Line => "LINE",
            ShapeKind::Arrow => "ARROW",
            ShapeKind::Rect => "RECT",
            ShapeKind::Ellipse => "ELLIPSE",
            ShapeKind::Polygon => "POLYGON",
            ShapeKind::Text => "TEXT",
        }
    }

    /// Single-vertex kinds
    pub fn is_point_like(self) -> bool {
        matches!(self, ShapeKind::Point | ShapeKind::Text)
    }

    /// Kinds defined by two diagonal corners
    pub fn is_boxed(self) -> bool {
        matches!(self, ShapeKind::Rect | ShapeKind::Ellipse)
    }

    /// Whether `count` vertices form a valid shape of this kind.
    pub fn accepts_vertex_count(self, count: usize) -> bool {
        match self {
            ShapeKind::Point | ShapeKind::Text => count == 1,
            ShapeKind::Rect | ShapeKind::Ellipse => count == 2,
            ShapeKind::Line | ShapeKind::Arrow | ShapeKind::Polygon => count >= 2,
        }
    }

    /// Fewest vertices a shape may be left with after a vertex removal.
    ///
    /// `None` for kinds whose vertices cannot be removed.
    pub fn min_vertices_after_removal(self) -> Option<usize> {
        match self {
            ShapeKind::Line | ShapeKind::Arrow => Some(2),
            ShapeKind::Polygon => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CanvasError::UnknownShapeKind(s.to_string()))
    }
}

// ===== Style =====

/// Presentation attributes of a shape
#[derive(Debug, Clone)]
pub struct ShapeStyle {
    pub color: Color,
    /// Fill colour; filled shapes are hit anywhere inside their area
    pub fill: Option<Color>,
    pub point_size: f64,
    pub border_width: f64,
}

// ===== Vector Shape =====

/// One shape on the canvas
#[derive(Debug, Clone)]
pub struct VectorShape {
    pub(crate) id: ShapeId,
    pub(crate) kind: ShapeKind,
    pub(crate) image_coords: Vec<ImagePoint>,
    pub style: ShapeStyle,
    /// Vertices are kept inside this rectangle while editing
    pub drag_limits: Option<crate::geometry::ImageRect>,
    /// Label for text shapes
    pub text: Option<String>,
    pub hidden: bool,
}

impl VectorShape {
    pub(crate) fn new(
        id: ShapeId,
        kind: ShapeKind,
        image_coords: Vec<ImagePoint>,
        style: ShapeStyle,
    ) -> Self {
        Self {
            id,
            kind,
            image_coords,
            style,
            drag_limits: None,
            text: None,
            hidden: false,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn image_coords(&self) -> &[ImagePoint] {
        &self.image_coords
    }

    pub fn vertex_count(&self) -> usize {
        self.image_coords.len()
    }
}

// ===== Canvas-space geometry =====

/// Corners of the box spanned by `a` and `b`: upper-left, upper-right,
/// lower-right, lower-left.
pub fn box_corners(a: Point, b: Point) -> [Point; 4] {
    let r = Rect::from_points(a, b);
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ]
}

/// Index and distance of the vertex nearest `p`. Ties go to the lower index.
pub fn closest_vertex(points: &[Point], p: Point) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, vertex) in points.iter().enumerate() {
        let dist = vertex.distance(p);
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best
}

/// Distance from `p` to the drawn outline of a shape.
///
/// `points` are the shape's vertices in canvas space. Returns infinity for an
/// empty vertex list.
pub fn outline_distance(kind: ShapeKind, points: &[Point], p: Point) -> f64 {
    match (kind, points) {
        (_, []) => f64::INFINITY,
        (ShapeKind::Point | ShapeKind::Text, [v, ..]) => v.distance(p),
        (ShapeKind::Line | ShapeKind::Arrow, _) => polyline_distance(points, p, false),
        (ShapeKind::Polygon, _) => polyline_distance(points, p, true),
        (ShapeKind::Rect, [a, b, ..]) => polyline_distance(&box_corners(*a, *b), p, true),
        (ShapeKind::Ellipse, [a, b, ..]) => {
            let rect = Rect::from_points(*a, *b);
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return polyline_distance(&box_corners(*a, *b), p, true);
            }
            Ellipse::from_rect(rect)
                .path_segments(ELLIPSE_TOLERANCE)
                .map(|seg| seg.nearest(p, NEAREST_ACCURACY).distance_sq)
                .fold(f64::INFINITY, f64::min)
                .sqrt()
        }
        (_, [v]) => v.distance(p),
    }
}

/// Whether `p` lies strictly inside the area of a rect, ellipse or polygon.
///
/// Always false for the open kinds.
pub fn area_contains(kind: ShapeKind, points: &[Point], p: Point) -> bool {
    match (kind, points) {
        (ShapeKind::Rect, [a, b, ..]) => {
            let r = Rect::from_points(*a, *b);
            p.x > r.x0 && p.x < r.x1 && p.y > r.y0 && p.y < r.y1
        }
        (ShapeKind::Ellipse, [a, b, ..]) => {
            let rect = Rect::from_points(*a, *b);
            rect.width() > 0.0 && rect.height() > 0.0 && Ellipse::from_rect(rect).winding(p) != 0
        }
        (ShapeKind::Polygon, _) if points.len() >= 3 => closed_path(points).winding(p) != 0,
        _ => false,
    }
}

fn closed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for pt in rest {
            path.line_to(*pt);
        }
        path.close_path();
    }
    path
}

fn polyline_distance(points: &[Point], p: Point, closed: bool) -> f64 {
    let mut best = match points.first() {
        Some(first) => first.distance_squared(p),
        None => return f64::INFINITY,
    };
    let closing = if closed && points.len() > 2 {
        points.last().zip(points.first())
    } else {
        None
    };
    let segments = points
        .windows(2)
        .map(|w| (w[0], w[1]))
        .chain(closing.map(|(a, b)| (*a, *b)));
    for (a, b) in segments {
        best = best.min(Line::new(a, b).nearest(p, NEAREST_ACCURACY).distance_sq);
    }
    best.sqrt()
}

/// Total length of a polyline in whatever space its points are in.
pub fn polyline_length(points: &[ImagePoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn kind_names_parse_case_insensitively() {
        assert_eq!("polygon".parse::<ShapeKind>().unwrap(), ShapeKind::Polygon);
        assert_eq!("ELLIPSE".parse::<ShapeKind>().unwrap(), ShapeKind::Ellipse);
        assert!(matches!(
            "hexagon".parse::<ShapeKind>(),
            Err(CanvasError::UnknownShapeKind(_))
        ));
    }

    #[test]
    fn vertex_count_rules() {
        assert!(ShapeKind::Point.accepts_vertex_count(1));
        assert!(!ShapeKind::Text.accepts_vertex_count(2));
        assert!(ShapeKind::Rect.accepts_vertex_count(2));
        assert!(!ShapeKind::Ellipse.accepts_vertex_count(3));
        assert!(ShapeKind::Polygon.accepts_vertex_count(2));
        assert!(!ShapeKind::Line.accepts_vertex_count(1));
        assert_eq!(ShapeKind::Polygon.min_vertices_after_removal(), Some(3));
        assert_eq!(ShapeKind::Rect.min_vertices_after_removal(), None);
    }

    #[test]
    fn closest_vertex_prefers_lower_index_on_ties() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 0.0)];
        assert_eq!(closest_vertex(&points, Point::new(1.0, 0.0)), Some((0, 1.0)));
        assert_eq!(closest_vertex(&[], Point::ZERO), None);
    }

    #[test]
    fn line_distance_uses_segments() {
        let points = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        assert!(approx(outline_distance(ShapeKind::Line, &points, Point::new(50.0, 7.0)), 7.0));
        assert!(approx(outline_distance(ShapeKind::Arrow, &points, Point::new(103.0, 4.0)), 5.0));
    }

    #[test]
    fn rect_distance_measures_to_edges() {
        let points = [Point::new(10.0, 10.0), Point::new(110.0, 60.0)];
        // Centre of the box is 25px from the nearest (top/bottom) edge
        assert!(approx(outline_distance(ShapeKind::Rect, &points, Point::new(60.0, 35.0)), 25.0));
        assert!(approx(outline_distance(ShapeKind::Rect, &points, Point::new(60.0, 8.0)), 2.0));
    }

    #[test]
    fn polygon_distance_includes_closing_edge() {
        let points = [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)];
        // Closing edge runs along the diagonal back to the origin
        let d = outline_distance(ShapeKind::Polygon, &points, Point::new(40.0, 50.0));
        assert!(approx(d, 10.0 / 2f64.sqrt()));
    }

    #[test]
    fn ellipse_distance_is_close_to_true_outline() {
        let points = [Point::new(0.0, 0.0), Point::new(200.0, 100.0)];
        // Rightmost point of the ellipse is (200, 50)
        let d = outline_distance(ShapeKind::Ellipse, &points, Point::new(210.0, 50.0));
        assert!((d - 10.0).abs() < 0.2);
    }

    #[test]
    fn containment() {
        let boxed = [Point::new(0.0, 0.0), Point::new(100.0, 50.0)];
        assert!(area_contains(ShapeKind::Rect, &boxed, Point::new(50.0, 25.0)));
        assert!(!area_contains(ShapeKind::Rect, &boxed, Point::new(0.0, 25.0)));
        assert!(area_contains(ShapeKind::Ellipse, &boxed, Point::new(50.0, 25.0)));
        assert!(!area_contains(ShapeKind::Ellipse, &boxed, Point::new(2.0, 2.0)));

        let triangle = [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(0.0, 100.0)];
        assert!(area_contains(ShapeKind::Polygon, &triangle, Point::new(10.0, 10.0)));
        assert!(!area_contains(ShapeKind::Polygon, &triangle, Point::new(90.0, 90.0)));
        assert!(!area_contains(ShapeKind::Line, &triangle, Point::new(10.0, 10.0)));
    }

    #[test]
    fn polyline_length_sums_segments() {
        let points = [
            ImagePoint::new(0.0, 0.0),
            ImagePoint::new(3.0, 4.0),
            ImagePoint::new(3.0, 10.0),
        ];
        assert!(approx(polyline_length(&points), 11.0));
    }
}
