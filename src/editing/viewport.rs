// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Viewport over a full-resolution image.
//!
//! Three coordinate spaces are in play:
//!
//! - full-image space, `(row, col)` over the undecimated image
//! - decimated space, full-image coordinates divided by the decimation factor
//! - canvas space, screen pixels with the origin at the canvas top-left
//!
//! The viewport loads one strided tile from the [`ImageSource`] for the
//! region in view, then rescales it uniformly so it fits the canvas. A
//! canvas point maps to full-image space by multiplying by
//! `decimation / display_scale` and adding the loaded region's upper-left
//! corner.

use crate::config::CanvasConfig;
use crate::error::{CanvasError, Result};
use crate::geometry::{ImageExtent, ImagePoint, ImageRect};
use crate::model::{ImageSource, PixelRegion, PixelTile, RemapFn};
use kurbo::{Point, Rect, Vec2};
use thiserror::Error;

/// Why a zoom request left the view unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ZoomRejection {
    #[error("no image is attached")]
    NoSource,
    #[error("zoom rectangle is not finite")]
    NonFinite,
    #[error("zoom rectangle has no area")]
    Degenerate,
    #[error("zoom rectangle lies outside the image")]
    OutsideImage,
    #[error("zoom rectangle {rows}x{cols} is below the minimum zoom size")]
    TooSmall { rows: f64, cols: f64 },
    #[error("pan is already at the image edge")]
    AtEdge,
}

/// Result of a zoom or pan request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomOutcome {
    /// A new region was loaded
    Applied,
    /// Nothing changed
    Rejected(ZoomRejection),
}

impl ZoomOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ZoomOutcome::Applied)
    }
}

/// The display image model: which part of the image is loaded and how it
/// maps onto the canvas.
#[derive(Debug)]
pub struct ViewPort {
    source: Option<Box<dyn ImageSource>>,
    extent: ImageExtent,
    canvas_width: u32,
    canvas_height: u32,
    min_size: (u32, u32),
    max_size: (u32, u32),
    min_zoom_pixels: f64,
    scale_to_fit: bool,
    decimation: u32,
    display_scale: f64,
    /// Full-image region covered by the loaded tile, in whole pixels
    region: ImageRect,
    tile: Option<PixelTile>,
    display: Option<PixelTile>,
}

impl ViewPort {
    pub fn new(config: &CanvasConfig) -> Self {
        let min_size = (config.min_width.max(1), config.min_height.max(1));
        let max_size = (
            config.max_width.max(min_size.0),
            config.max_height.max(min_size.1),
        );
        Self {
            source: None,
            extent: ImageExtent::default(),
            canvas_width: config.canvas_width.clamp(min_size.0, max_size.0),
            canvas_height: config.canvas_height.clamp(min_size.1, max_size.1),
            min_size,
            max_size,
            min_zoom_pixels: config.min_zoom_pixels,
            scale_to_fit: config.scale_to_fit,
            decimation: 1,
            display_scale: 1.0,
            region: ImageRect::default(),
            tile: None,
            display: None,
        }
    }

    // ===== Queries =====

    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn full_extent(&self) -> ImageExtent {
        self.extent
    }

    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Canvas bounds as a rectangle in canvas space.
    #[must_use]
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.canvas_width as f64, self.canvas_height as f64)
    }

    #[must_use]
    pub fn decimation(&self) -> u32 {
        self.decimation
    }

    #[must_use]
    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    /// Full-image region currently loaded.
    #[must_use]
    pub fn region(&self) -> ImageRect {
        self.region
    }

    #[must_use]
    pub fn upper_left(&self) -> ImagePoint {
        self.region.upper_left()
    }

    /// The strided tile as read from the source.
    #[must_use]
    pub fn decimated_tile(&self) -> Option<&PixelTile> {
        self.tile.as_ref()
    }

    /// The tile after rescaling to the canvas.
    #[must_use]
    pub fn display_image(&self) -> Option<&PixelTile> {
        self.display.as_ref()
    }

    /// Full-image pixels per canvas pixel.
    fn factor(&self) -> f64 {
        self.decimation as f64 / self.display_scale
    }

    // ===== Transforms =====

    #[must_use]
    pub fn canvas_to_full_image(&self, pt: Point) -> ImagePoint {
        let factor = self.factor();
        let ul = self.upper_left();
        ImagePoint::new(pt.y * factor + ul.row, pt.x * factor + ul.col)
    }

    #[must_use]
    pub fn full_image_to_canvas(&self, pt: ImagePoint) -> Point {
        let factor = self.factor();
        let ul = self.upper_left();
        Point::new((pt.col - ul.col) / factor, (pt.row - ul.row) / factor)
    }

    #[must_use]
    pub fn canvas_rect_to_full_image(&self, rect: Rect) -> ImageRect {
        ImageRect::from_points(
            self.canvas_to_full_image(Point::new(rect.x0, rect.y0)),
            self.canvas_to_full_image(Point::new(rect.x1, rect.y1)),
        )
    }

    #[must_use]
    pub fn full_image_rect_to_canvas(&self, rect: ImageRect) -> Rect {
        Rect::from_points(
            self.full_image_to_canvas(rect.upper_left()),
            self.full_image_to_canvas(rect.lower_right()),
        )
    }

    /// Convert a canvas-space displacement to full-image `(d_row, d_col)`.
    #[must_use]
    pub fn canvas_delta_to_full_image(&self, delta: Vec2) -> (f64, f64) {
        let factor = self.factor();
        (delta.y * factor, delta.x * factor)
    }

    // ===== Source management =====

    /// Attach a source and show the whole image.
    pub fn attach(&mut self, source: Box<dyn ImageSource>) -> Result<()> {
        let extent = source.full_extent();
        if extent.is_empty() {
            return Err(CanvasError::EmptySource {
                rows: extent.rows,
                cols: extent.cols,
            });
        }
        tracing::info!("attaching {}x{} image source", extent.rows, extent.cols);
        self.detach();
        self.source = Some(source);
        self.extent = extent;
        if let Err(err) = self.load_region(&extent.bounds(), None) {
            self.detach();
            return Err(err);
        }
        Ok(())
    }

    /// Drop the source and reset to an identity mapping.
    pub fn detach(&mut self) -> Option<Box<dyn ImageSource>> {
        self.extent = ImageExtent::default();
        self.decimation = 1;
        self.display_scale = 1.0;
        self.region = ImageRect::default();
        self.tile = None;
        self.display = None;
        self.source.take()
    }

    /// Install a remap on the source and reload the current view.
    ///
    /// Returns false when the source does not support remapping.
    pub fn set_display_remap(&mut self, remap: Option<RemapFn>) -> Result<bool> {
        let Some(source) = self.source.as_mut() else {
            return Err(CanvasError::NoSource);
        };
        if !source.set_display_remap(remap) {
            return Ok(false);
        }
        let region = self.region;
        self.load_region(&region, Some(self.decimation))?;
        Ok(true)
    }

    // ===== Loading =====

    /// Stride needed to fit `rect` into the canvas.
    #[must_use]
    pub fn decimation_for_region(&self, rect: &ImageRect) -> u32 {
        let rows = rect.rows().abs();
        let cols = rect.cols().abs();
        let by_rows = (rows / self.canvas_height as f64).ceil();
        let by_cols = (cols / self.canvas_width as f64).ceil();
        let max = (rows.min(cols) - 1.0).max(1.0);
        by_rows.max(by_cols).clamp(1.0, max) as u32
    }

    /// Read `rect` from the source and rebuild the display image.
    pub fn load_region(&mut self, rect: &ImageRect, decimation: Option<u32>) -> Result<()> {
        let Some(source) = self.source.as_ref() else {
            return Err(CanvasError::NoSource);
        };
        let region = PixelRegion::covering(rect, self.extent);
        region.check(self.extent)?;
        let loaded = ImageRect::new(
            region.row_start as f64,
            region.col_start as f64,
            region.row_end as f64,
            region.col_end as f64,
        );
        let decimation = decimation
            .unwrap_or_else(|| self.decimation_for_region(&loaded))
            .max(1);
        let tile = source.read_region(region, decimation as usize)?;

        let (canvas_w, canvas_h) = (self.canvas_width as f64, self.canvas_height as f64);
        let scale = if self.scale_to_fit {
            (canvas_w / tile.cols() as f64).min(canvas_h / tile.rows() as f64)
        } else {
            1.0
        };
        let display = if self.scale_to_fit {
            let width = (tile.cols() as f64 * scale).round().clamp(1.0, canvas_w) as u32;
            let height = (tile.rows() as f64 * scale).round().clamp(1.0, canvas_h) as u32;
            if width as usize == tile.cols() && height as usize == tile.rows() {
                tile.clone()
            } else {
                tile.resize(width, height)?
            }
        } else {
            tile.clone()
        };

        tracing::debug!(
            "loaded rows {}..{} cols {}..{} at decimation {}, scale {:.4}",
            region.row_start,
            region.row_end,
            region.col_start,
            region.col_end,
            decimation,
            scale
        );
        self.decimation = decimation;
        self.display_scale = scale;
        self.region = loaded;
        self.tile = Some(tile);
        self.display = Some(display);
        Ok(())
    }

    // ===== Zoom and pan =====

    /// Show `rect`, widened to the canvas aspect ratio and kept on the image.
    pub fn zoom_to_full_image_rect(
        &mut self,
        rect: ImageRect,
        decimation: Option<u32>,
    ) -> Result<ZoomOutcome> {
        let outcome = match self.fit_zoom_rect(rect) {
            Ok(fitted) => {
                self.load_region(&fitted, decimation)?;
                ZoomOutcome::Applied
            }
            Err(reason) => {
                tracing::info!("zoom ignored: {}", reason);
                ZoomOutcome::Rejected(reason)
            }
        };
        Ok(outcome)
    }

    /// Zoom to a rectangle given in canvas coordinates.
    pub fn zoom_to_canvas_rect(&mut self, rect: Rect, decimation: Option<u32>) -> Result<ZoomOutcome> {
        let image_rect = self.canvas_rect_to_full_image(rect);
        self.zoom_to_full_image_rect(image_rect, decimation)
    }

    fn fit_zoom_rect(&self, rect: ImageRect) -> std::result::Result<ImageRect, ZoomRejection> {
        if self.source.is_none() {
            return Err(ZoomRejection::NoSource);
        }
        if !rect.is_finite() {
            return Err(ZoomRejection::NonFinite);
        }
        let rect = ImageRect::from_points(rect.upper_left(), rect.lower_right());
        if rect.is_degenerate() {
            return Err(ZoomRejection::Degenerate);
        }
        if !rect.overlaps(self.extent) {
            return Err(ZoomRejection::OutsideImage);
        }

        // Extend the short side about the centre to match the canvas aspect
        let canvas_ratio = self.canvas_height as f64 / self.canvas_width as f64;
        let (mut rows, mut cols) = (rect.rows(), rect.cols());
        if rows / cols < canvas_ratio {
            rows = cols * canvas_ratio;
        } else {
            cols = rows / canvas_ratio;
        }
        let center = rect.center();
        let (row_min, row_max) = fit_axis(center.row, rows, self.extent.rows as f64);
        let (col_min, col_max) = fit_axis(center.col, cols, self.extent.cols as f64);
        let fitted = ImageRect::new(row_min, col_min, row_max, col_max).round();

        let min_rows = self.min_zoom_pixels.min(self.extent.rows as f64);
        let min_cols = self.min_zoom_pixels.min(self.extent.cols as f64);
        if fitted.rows() < min_rows || fitted.cols() < min_cols {
            return Err(ZoomRejection::TooSmall {
                rows: fitted.rows(),
                cols: fitted.cols(),
            });
        }
        Ok(fitted)
    }

    /// Move the view by a canvas-space delta, stopping at the image edges.
    pub fn pan(&mut self, delta: Vec2) -> Result<ZoomOutcome> {
        if self.source.is_none() {
            return Ok(ZoomOutcome::Rejected(ZoomRejection::NoSource));
        }
        let decimation = self.decimation as f64;
        let bounds = self.region;
        let d_row = clip_shift(delta.y * decimation, bounds.row_min, bounds.row_max, self.extent.rows as f64);
        let d_col = clip_shift(delta.x * decimation, bounds.col_min, bounds.col_max, self.extent.cols as f64);
        if d_row == 0.0 && d_col == 0.0 {
            return Ok(ZoomOutcome::Rejected(ZoomRejection::AtEdge));
        }
        self.zoom_to_full_image_rect(bounds.translate(d_row, d_col), Some(self.decimation))
    }

    /// Resize the canvas, keeping the same image centre in view.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) -> Result<ZoomOutcome> {
        self.canvas_width = width.clamp(self.min_size.0, self.max_size.0);
        self.canvas_height = height.clamp(self.min_size.1, self.max_size.1);
        if self.source.is_none() {
            return Ok(ZoomOutcome::Rejected(ZoomRejection::NoSource));
        }
        let region = self.region;
        self.zoom_to_full_image_rect(region, None)
    }

    /// Box for a wheel zoom about `pos`: zooming in when `zoom_in` is set.
    ///
    /// The point under the cursor keeps its canvas position.
    #[must_use]
    pub fn wheel_zoom_rect(&self, pos: Point, factor: f64, zoom_in: bool) -> Rect {
        let canvas = self.canvas_rect();
        let center = canvas.center();
        let offset = pos + (center - pos) / factor;
        let (half_w, half_h) = if zoom_in {
            (canvas.width() / factor / 2.0, canvas.height() / factor / 2.0)
        } else {
            (canvas.width() * factor / 2.0, canvas.height() * factor / 2.0)
        };
        Rect::new(
            offset.x - half_w,
            offset.y - half_h,
            offset.x + half_w,
            offset.y + half_h,
        )
    }

    /// Read full-image pixels under `rect` directly from the source.
    pub fn read_full_image_rect(&self, rect: &ImageRect, decimation: Option<u32>) -> Result<PixelTile> {
        let Some(source) = self.source.as_ref() else {
            return Err(CanvasError::NoSource);
        };
        let region = PixelRegion::covering(rect, self.extent);
        region.check(self.extent)?;
        let decimation = decimation.unwrap_or_else(|| self.decimation_for_region(rect)).max(1);
        source.read_region(region, decimation as usize)
    }
}

/// Place a span of `size` centred on `center` inside `[0, full]`.
fn fit_axis(center: f64, size: f64, full: f64) -> (f64, f64) {
    if size >= full {
        return (0.0, full);
    }
    let lo = (center - size / 2.0).clamp(0.0, full - size);
    (lo, lo + size)
}

/// Largest part of `shift` that keeps `[lower, upper]` inside `[0, limit]`.
fn clip_shift(shift: f64, lower: f64, upper: f64, limit: f64) -> f64 {
    if shift < 0.0 {
        shift.max(-lower)
    } else {
        shift.min(limit - upper).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GradientSource;

    fn viewport(width: u32, height: u32, rows: usize, cols: usize) -> ViewPort {
        let config = CanvasConfig {
            canvas_width: width,
            canvas_height: height,
            ..CanvasConfig::default()
        };
        let mut vp = ViewPort::new(&config);
        vp.attach(Box::new(GradientSource::new(rows, cols))).unwrap();
        vp
    }

    #[test]
    fn attach_large_image_picks_decimation_and_fits() {
        let vp = viewport(800, 600, 10000, 8000);
        assert_eq!(vp.decimation(), 17);

        let tile = vp.decimated_tile().unwrap();
        assert_eq!((tile.rows(), tile.cols()), (589, 471));

        let display = vp.display_image().unwrap();
        assert!(display.cols() <= 800 && display.rows() <= 600);
        // The limiting axis fills the canvas
        assert_eq!(display.rows(), 600);
        let tile_aspect = tile.cols() as f64 / tile.rows() as f64;
        let display_aspect = display.cols() as f64 / display.rows() as f64;
        assert!((tile_aspect - display_aspect).abs() < 0.01);
    }

    #[test]
    fn empty_source_is_rejected() {
        let mut vp = ViewPort::new(&CanvasConfig::default());
        let err = vp.attach(Box::new(GradientSource::new(0, 100))).unwrap_err();
        assert!(matches!(err, CanvasError::EmptySource { .. }));
        assert!(!vp.has_source());
    }

    #[test]
    fn canvas_and_image_transforms_round_trip() {
        let mut vp = viewport(800, 600, 10000, 8000);
        let outcome = vp
            .zoom_to_full_image_rect(ImageRect::new(1234.0, 2345.0, 3234.0, 4345.0), None)
            .unwrap();
        assert!(outcome.is_applied());
        let region = vp.region();
        for &(row, col) in &[(0.0, 0.0), (17.0, 33.0), (999.0, 1500.0)] {
            let p = ImagePoint::new(region.row_min + row, region.col_min + col);
            let back = vp.canvas_to_full_image(vp.full_image_to_canvas(p));
            assert!((back.row - p.row).abs() <= 1.0);
            assert!((back.col - p.col).abs() <= 1.0);
        }
        assert_eq!(vp.canvas_to_full_image(Point::ZERO), region.upper_left());
    }

    #[test]
    fn decimation_grows_with_region() {
        let vp = viewport(800, 600, 10000, 8000);
        let small = ImageRect::new(100.0, 100.0, 700.0, 900.0);
        let medium = ImageRect::new(50.0, 50.0, 3000.0, 2000.0);
        let large = ImageRect::new(0.0, 0.0, 10000.0, 8000.0);
        let d_small = vp.decimation_for_region(&small);
        let d_medium = vp.decimation_for_region(&medium);
        let d_large = vp.decimation_for_region(&large);
        assert_eq!(d_small, 1);
        assert!(d_small <= d_medium && d_medium <= d_large);
        // Never fewer than two samples on the short side
        assert_eq!(vp.decimation_for_region(&ImageRect::new(0.0, 0.0, 3.0, 9000.0)), 2);
    }

    #[test]
    fn zoom_extends_short_side_to_canvas_aspect() {
        let mut vp = viewport(800, 600, 10000, 8000);
        // A square request on a 4:3 canvas widens, never crops
        vp.zoom_to_full_image_rect(ImageRect::new(4000.0, 4000.0, 4600.0, 4600.0), None)
            .unwrap();
        let region = vp.region();
        assert_eq!(region.rows(), 600.0);
        assert_eq!(region.cols(), 800.0);
        assert!(region.row_min <= 4000.0 && region.row_max >= 4600.0);
        assert!(region.col_min <= 4000.0 && region.col_max >= 4600.0);
    }

    #[test]
    fn zoom_near_edge_shifts_inside_image() {
        let mut vp = viewport(800, 600, 10000, 8000);
        vp.zoom_to_full_image_rect(ImageRect::new(-100.0, 7900.0, 200.0, 8100.0), None)
            .unwrap();
        let region = vp.region();
        assert!(region.row_min >= 0.0 && region.col_max <= 8000.0);
        assert_eq!(region.col_max, 8000.0);
        assert_eq!(region.row_min, 0.0);
    }

    #[test]
    fn bad_zoom_requests_are_no_ops() {
        let mut vp = viewport(800, 600, 10000, 8000);
        let before = vp.region();
        let cases = [
            (ImageRect::new(10.0, 10.0, 10.0, 500.0), ZoomRejection::Degenerate),
            (ImageRect::new(f64::NAN, 0.0, 10.0, 10.0), ZoomRejection::NonFinite),
            (ImageRect::new(20000.0, 0.0, 21000.0, 100.0), ZoomRejection::OutsideImage),
        ];
        for (rect, reason) in cases {
            assert_eq!(
                vp.zoom_to_full_image_rect(rect, None).unwrap(),
                ZoomOutcome::Rejected(reason)
            );
            assert_eq!(vp.region(), before);
        }
        let tiny = vp
            .zoom_to_full_image_rect(ImageRect::new(10.0, 10.0, 12.0, 12.0), None)
            .unwrap();
        assert!(matches!(tiny, ZoomOutcome::Rejected(ZoomRejection::TooSmall { .. })));
    }

    #[test]
    fn pan_clamps_and_converges_at_edges() {
        let mut vp = viewport(800, 600, 10000, 8000);
        vp.zoom_to_full_image_rect(ImageRect::new(5000.0, 4000.0, 5600.0, 4800.0), None)
            .unwrap();
        let decimation = vp.decimation();
        for _ in 0..50 {
            vp.pan(Vec2::new(5000.0, 5000.0)).unwrap();
            let r = vp.region();
            assert!(r.row_min >= 0.0 && r.row_max <= 10000.0);
            assert!(r.col_min >= 0.0 && r.col_max <= 8000.0);
            assert_eq!(vp.decimation(), decimation);
        }
        let r = vp.region();
        assert_eq!((r.row_max, r.col_max), (10000.0, 8000.0));
        assert_eq!(
            vp.pan(Vec2::new(10.0, 10.0)).unwrap(),
            ZoomOutcome::Rejected(ZoomRejection::AtEdge)
        );
        // Partial pan back the other way still moves
        assert!(vp.pan(Vec2::new(-10.0, 0.0)).unwrap().is_applied());
        assert!(vp.region().col_max < 8000.0);
    }

    #[test]
    fn resize_clamps_to_limits() {
        let mut vp = viewport(800, 600, 1000, 1000);
        vp.set_canvas_size(10, 5000).unwrap();
        let config = CanvasConfig::default();
        assert_eq!(vp.canvas_size(), (config.min_width, config.max_height));
    }

    #[test]
    fn wheel_zoom_keeps_cursor_point() {
        let vp = viewport(800, 600, 10000, 8000);
        let pos = Point::new(200.0, 150.0);
        let rect = vp.wheel_zoom_rect(pos, 2.0, true);
        assert!((rect.width() - 400.0).abs() < 1e-9);
        assert!((rect.height() - 300.0).abs() < 1e-9);
        // The cursor sits at the same relative spot within the box
        let rel_x = (pos.x - rect.x0) / rect.width();
        let rel_y = (pos.y - rect.y0) / rect.height();
        assert!((rel_x - 0.25).abs() < 1e-9 && (rel_y - 0.25).abs() < 1e-9);

        let out = vp.wheel_zoom_rect(pos, 2.0, false);
        assert!((out.width() - 1600.0).abs() < 1e-9);
    }
}
