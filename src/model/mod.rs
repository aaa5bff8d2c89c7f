// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Shape and image data model

pub mod entity_id;
pub mod registry;
pub mod shape;
pub mod source;

pub use entity_id::ShapeId;
pub use registry::ShapeRegistry;
pub use shape::{ShapeKind, ShapeStyle, VectorShape};
pub use source::{ArraySource, GradientSource, ImageSource, PixelRegion, PixelTile, RemapFn};
