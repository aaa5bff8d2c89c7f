// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the canvas.

use crate::model::{ShapeId, ShapeKind};
use thiserror::Error;

/// Errors surfaced by viewport, source and registry operations.
///
/// Rejected geometry (a degenerate zoom box, a pan past the edge) is not an
/// error; those come back as no-op outcomes.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("image source has an empty extent ({rows}x{cols})")]
    EmptySource { rows: usize, cols: usize },

    #[error("no image source is attached")]
    NoSource,

    #[error("region rows {row_start}..{row_end}, cols {col_start}..{col_end} is outside a {rows}x{cols} image")]
    RegionOutOfBounds {
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
        rows: usize,
        cols: usize,
    },

    #[error("pixel tile {rows}x{cols}x{bands} needs {expected} samples, got {actual}")]
    InvalidTile {
        rows: usize,
        cols: usize,
        bands: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported band count {0}, expected 1, 3 or 4")]
    UnsupportedBands(usize),

    #[error("unknown shape {0:?}")]
    UnknownShape(ShapeId),

    #[error("{kind:?} shape cannot have {actual} vertices")]
    VertexCount { kind: ShapeKind, actual: usize },

    #[error("shape coordinates must be finite")]
    NonFiniteCoords,

    #[error("unknown shape kind '{0}'")]
    UnknownShapeKind(String),

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("shape {0:?} covers no pixels")]
    DegenerateRegion(ShapeId),

    #[error("failed to read image region: {0}")]
    SourceRead(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
