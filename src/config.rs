// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration, loadable from TOML.

use crate::error::Result;
use crate::model::ShapeStyle;
use crate::settings;
use peniko::Color;
use serde::Deserialize;
use std::path::Path;

/// Tunables for one canvas instance.
///
/// Every field falls back to the value in [`settings`], so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,

    pub vertex_selector_pixel_threshold: f64,
    pub shape_hit_pixel_threshold: f64,
    pub pan_pixel_threshold: f64,
    pub zoom_box_size_threshold: f64,
    pub select_size_threshold: f64,

    pub min_zoom_pixels: f64,
    pub mouse_wheel_zoom_factor: f64,
    pub zoom_on_wheel: bool,
    pub scale_to_fit: bool,

    pub foreground_color: [u8; 3],
    pub zoom_rect_color: [u8; 3],
    pub select_rect_color: [u8; 3],
    pub point_size: f64,
    pub border_width: f64,
    pub tool_rect_border_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_width: settings::canvas::WIDTH,
            canvas_height: settings::canvas::HEIGHT,
            min_width: settings::canvas::MIN_WIDTH,
            min_height: settings::canvas::MIN_HEIGHT,
            max_width: settings::canvas::MAX_WIDTH,
            max_height: settings::canvas::MAX_HEIGHT,
            vertex_selector_pixel_threshold: settings::thresholds::VERTEX_SELECTOR,
            shape_hit_pixel_threshold: settings::thresholds::SHAPE_HIT,
            pan_pixel_threshold: settings::thresholds::PAN,
            zoom_box_size_threshold: settings::thresholds::ZOOM_BOX,
            select_size_threshold: settings::thresholds::SELECT_BOX,
            min_zoom_pixels: settings::zoom::MIN_PIXELS,
            mouse_wheel_zoom_factor: settings::zoom::WHEEL_FACTOR,
            zoom_on_wheel: settings::zoom::ON_WHEEL,
            scale_to_fit: settings::zoom::SCALE_TO_FIT,
            foreground_color: settings::style::FOREGROUND,
            zoom_rect_color: settings::style::ZOOM_RECT,
            select_rect_color: settings::style::SELECT_RECT,
            point_size: settings::style::POINT_SIZE,
            border_width: settings::style::BORDER_WIDTH,
            tool_rect_border_width: settings::style::TOOL_RECT_BORDER_WIDTH,
        }
    }
}

impl CanvasConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Style applied to shapes drawn with NEW_SHAPE.
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            color: rgb(self.foreground_color),
            fill: None,
            point_size: self.point_size,
            border_width: self.border_width,
        }
    }

    pub(crate) fn zoom_rect_style(&self) -> ShapeStyle {
        ShapeStyle {
            color: rgb(self.zoom_rect_color),
            fill: None,
            point_size: self.point_size,
            border_width: self.tool_rect_border_width,
        }
    }

    pub(crate) fn select_rect_style(&self) -> ShapeStyle {
        ShapeStyle {
            color: rgb(self.select_rect_color),
            fill: None,
            point_size: self.point_size,
            border_width: self.tool_rect_border_width,
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgb8(r, g, b)
}
