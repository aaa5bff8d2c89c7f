// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Compiled-in defaults for the canvas.
//!
//! These values seed `CanvasConfig`. A config file can override any of them;
//! code that needs a fixed value (tests, tool-shape styling) reads them from
//! the public sub-modules below.

// ============================================================================
// CANVAS SIZE
// ============================================================================
/// Default canvas width in screen pixels
const CANVAS_WIDTH: u32 = 300;
/// Default canvas height in screen pixels
const CANVAS_HEIGHT: u32 = 200;

/// Smallest canvas the viewport will shrink to
const CANVAS_MIN_WIDTH: u32 = 100;
const CANVAS_MIN_HEIGHT: u32 = 100;

/// Largest canvas the viewport will grow to
const CANVAS_MAX_WIDTH: u32 = 4096;
const CANVAS_MAX_HEIGHT: u32 = 4096;

// ============================================================================
// INTERACTION THRESHOLDS (screen pixels)
// ============================================================================
/// Pointer must be this close to a vertex to grab it
const VERTEX_SELECTOR_THRESHOLD: f64 = 10.0;

/// A shape closer than this wins closest-shape selection immediately
const SHAPE_HIT_THRESHOLD: f64 = 5.0;

/// Pan moves smaller than this are ignored until the pointer is released
const PAN_THRESHOLD: f64 = 2.0;

/// Zoom boxes smaller than this on either side are discarded
const ZOOM_BOX_THRESHOLD: f64 = 5.0;

/// Selection boxes smaller than this on either side are discarded
const SELECT_BOX_THRESHOLD: f64 = 5.0;

// ============================================================================
// ZOOM
// ============================================================================
/// Smallest region (full-image pixels per side) a zoom may display
const MIN_ZOOM_PIXELS: f64 = 8.0;

/// Mouse wheel zoom factor per notch
const WHEEL_ZOOM_FACTOR: f64 = 1.5;

/// Whether the wheel zooms in the viewing tools
const ZOOM_ON_WHEEL: bool = true;

/// Whether the decimated tile is rescaled to fill the canvas
const SCALE_TO_FIT: bool = true;

// ============================================================================
// SHAPE STYLE
// ============================================================================
const FOREGROUND_COLOR: [u8; 3] = [255, 0, 0];
const ZOOM_RECT_COLOR: [u8; 3] = [0, 255, 255];
const SELECT_RECT_COLOR: [u8; 3] = [255, 0, 0];

/// Radius of a drawn point marker
const POINT_SIZE: f64 = 3.0;
/// Outline width for new shapes
const BORDER_WIDTH: f64 = 2.0;
/// Outline width for the zoom and selection rubber bands
const TOOL_RECT_BORDER_WIDTH: f64 = 2.0;

/// Label given to a freshly drawn text shape
const DEFAULT_TEXT: &str = "Text";

// ============================================================================
// PUBLIC API
// ============================================================================

/// Canvas size defaults and limits
pub mod canvas {
    pub const WIDTH: u32 = super::CANVAS_WIDTH;
    pub const HEIGHT: u32 = super::CANVAS_HEIGHT;
    pub const MIN_WIDTH: u32 = super::CANVAS_MIN_WIDTH;
    pub const MIN_HEIGHT: u32 = super::CANVAS_MIN_HEIGHT;
    pub const MAX_WIDTH: u32 = super::CANVAS_MAX_WIDTH;
    pub const MAX_HEIGHT: u32 = super::CANVAS_MAX_HEIGHT;
}

/// Pointer thresholds, all in screen pixels
pub mod thresholds {
    pub const VERTEX_SELECTOR: f64 = super::VERTEX_SELECTOR_THRESHOLD;
    pub const SHAPE_HIT: f64 = super::SHAPE_HIT_THRESHOLD;
    pub const PAN: f64 = super::PAN_THRESHOLD;
    pub const ZOOM_BOX: f64 = super::ZOOM_BOX_THRESHOLD;
    pub const SELECT_BOX: f64 = super::SELECT_BOX_THRESHOLD;
}

/// Zoom behaviour
pub mod zoom {
    pub const MIN_PIXELS: f64 = super::MIN_ZOOM_PIXELS;
    pub const WHEEL_FACTOR: f64 = super::WHEEL_ZOOM_FACTOR;
    pub const ON_WHEEL: bool = super::ZOOM_ON_WHEEL;
    pub const SCALE_TO_FIT: bool = super::SCALE_TO_FIT;
}

/// Default shape styling
pub mod style {
    pub const FOREGROUND: [u8; 3] = super::FOREGROUND_COLOR;
    pub const ZOOM_RECT: [u8; 3] = super::ZOOM_RECT_COLOR;
    pub const SELECT_RECT: [u8; 3] = super::SELECT_RECT_COLOR;
    pub const POINT_SIZE: f64 = super::POINT_SIZE;
    pub const BORDER_WIDTH: f64 = super::BORDER_WIDTH;
    pub const TOOL_RECT_BORDER_WIDTH: f64 = super::TOOL_RECT_BORDER_WIDTH;
    pub const DEFAULT_TEXT: &str = super::DEFAULT_TEXT;
}
