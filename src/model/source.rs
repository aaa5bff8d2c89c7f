// Copyright 2025 the Image Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Pixel sources and the tiles they produce.
//!
//! The viewport never holds a full image. It asks an [`ImageSource`] for a
//! strided sub-region and keeps only the decimated tile that comes back.

use crate::error::{CanvasError, Result};
use crate::geometry::{ImageExtent, ImageRect};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Luma, Pixel, Rgb, Rgba};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Maps a raw sample to a displayable 8-bit value
pub type RemapFn = Arc<dyn Fn(f32) -> u8 + Send + Sync>;

fn default_remap(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

// ===== Pixel Region =====

/// A half-open block of full-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl PixelRegion {
    pub const fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// Whole-pixel region covered by an image rectangle, clipped to `extent`.
    pub fn covering(rect: &ImageRect, extent: ImageExtent) -> Self {
        let clip = |v: f64, max: usize| v.max(0.0).min(max as f64) as usize;
        Self::new(
            clip(rect.row_min.floor(), extent.rows),
            clip(rect.row_max.ceil(), extent.rows),
            clip(rect.col_min.floor(), extent.cols),
            clip(rect.col_max.ceil(), extent.cols),
        )
    }

    pub fn rows(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }

    pub fn cols(&self) -> usize {
        self.col_end.saturating_sub(self.col_start)
    }

    /// Tile shape produced when sampling every `stride`-th pixel.
    pub fn strided_shape(&self, stride: usize) -> (usize, usize) {
        let stride = stride.max(1);
        (self.rows().div_ceil(stride), self.cols().div_ceil(stride))
    }

    /// Fail unless the region is non-empty and inside `extent`.
    pub fn check(&self, extent: ImageExtent) -> Result<()> {
        let inside = self.row_start < self.row_end
            && self.col_start < self.col_end
            && self.row_end <= extent.rows
            && self.col_end <= extent.cols;
        if inside {
            Ok(())
        } else {
            Err(CanvasError::RegionOutOfBounds {
                row_start: self.row_start,
                row_end: self.row_end,
                col_start: self.col_start,
                col_end: self.col_end,
                rows: extent.rows,
                cols: extent.cols,
            })
        }
    }
}

// ===== Pixel Tile =====

/// Row-major 8-bit pixels with 1, 3 or 4 interleaved bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelTile {
    rows: usize,
    cols: usize,
    bands: usize,
    data: Vec<u8>,
}

impl PixelTile {
    pub fn new(rows: usize, cols: usize, bands: usize, data: Vec<u8>) -> Result<Self> {
        if !matches!(bands, 1 | 3 | 4) {
            return Err(CanvasError::UnsupportedBands(bands));
        }
        let expected = rows * cols * bands;
        if data.len() != expected {
            return Err(CanvasError::InvalidTile {
                rows,
                cols,
                bands,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            bands,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Samples of one pixel, `None` outside the tile.
    pub fn pixel(&self, row: usize, col: usize) -> Option<&[u8]> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let start = (row * self.cols + col) * self.bands;
        self.data.get(start..start + self.bands)
    }

    /// Nearest-neighbour resample to `width` x `height`.
    pub fn resize(&self, width: u32, height: u32) -> Result<PixelTile> {
        let (w, h) = (dim(self.cols)?, dim(self.rows)?);
        let data = match self.bands {
            1 => resample::<Luma<u8>>(&self.data, w, h, width, height),
            3 => resample::<Rgb<u8>>(&self.data, w, h, width, height),
            4 => resample::<Rgba<u8>>(&self.data, w, h, width, height),
            n => return Err(CanvasError::UnsupportedBands(n)),
        }
        .ok_or_else(|| CanvasError::SourceRead(format!("cannot resample {w}x{h} tile")))?;
        PixelTile::new(height as usize, width as usize, self.bands, data)
    }
}

fn dim(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CanvasError::SourceRead(format!("tile side {len} too large")))
}

fn resample<P>(data: &[u8], w: u32, h: u32, new_w: u32, new_h: u32) -> Option<Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let buffer = ImageBuffer::<P, &[u8]>::from_raw(w, h, data)?;
    Some(imageops::resize(&buffer, new_w, new_h, FilterType::Nearest).into_raw())
}

// ===== Image Source =====

/// Something that can hand out strided regions of a (possibly huge) image.
pub trait ImageSource: fmt::Debug {
    /// Size of the undecimated image
    fn full_extent(&self) -> ImageExtent;

    /// Read every `stride`-th row and column of `region`.
    fn read_region(&self, region: PixelRegion, stride: usize) -> Result<PixelTile>;

    fn band_count(&self) -> usize {
        1
    }

    /// Install a radiometric remap. Returns false if the source has none.
    fn set_display_remap(&mut self, _remap: Option<RemapFn>) -> bool {
        false
    }
}

// ===== Array Source =====

/// In-memory samples, typically radiometric floats.
pub struct ArraySource {
    extent: ImageExtent,
    bands: usize,
    samples: Vec<f32>,
    remap: Option<RemapFn>,
}

impl ArraySource {
    pub fn new(rows: usize, cols: usize, bands: usize, samples: Vec<f32>) -> Result<Self> {
        if !matches!(bands, 1 | 3 | 4) {
            return Err(CanvasError::UnsupportedBands(bands));
        }
        let expected = rows * cols * bands;
        if samples.len() != expected {
            return Err(CanvasError::InvalidTile {
                rows,
                cols,
                bands,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            extent: ImageExtent::new(rows, cols),
            bands,
            samples,
            remap: None,
        })
    }

    /// Copy a decoded image, keeping alpha and colour when present.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (rows, cols) = (image.height() as usize, image.width() as usize);
        let color = image.color();
        let (bands, raw) = if color.has_alpha() {
            (4, image.to_rgba8().into_raw())
        } else if color.has_color() {
            (3, image.to_rgb8().into_raw())
        } else {
            (1, image.to_luma8().into_raw())
        };
        Self {
            extent: ImageExtent::new(rows, cols),
            bands,
            samples: raw.into_iter().map(f32::from).collect(),
            remap: None,
        }
    }

    /// Decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path.as_ref())?;
        Ok(Self::from_image(&image))
    }

    fn display_value(&self, sample: f32) -> u8 {
        match &self.remap {
            Some(remap) => remap(sample),
            None => default_remap(sample),
        }
    }
}

impl fmt::Debug for ArraySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySource")
            .field("extent", &self.extent)
            .field("bands", &self.bands)
            .field("remap", &self.remap.is_some())
            .finish_non_exhaustive()
    }
}

impl ImageSource for ArraySource {
    fn full_extent(&self) -> ImageExtent {
        self.extent
    }

    fn read_region(&self, region: PixelRegion, stride: usize) -> Result<PixelTile> {
        region.check(self.extent)?;
        let stride = stride.max(1);
        let (rows, cols) = region.strided_shape(stride);
        let mut data = Vec::with_capacity(rows * cols * self.bands);
        for r in (region.row_start..region.row_end).step_by(stride) {
            for c in (region.col_start..region.col_end).step_by(stride) {
                let base = (r * self.extent.cols + c) * self.bands;
                for sample in &self.samples[base..base + self.bands] {
                    data.push(self.display_value(*sample));
                }
            }
        }
        PixelTile::new(rows, cols, self.bands, data)
    }

    fn band_count(&self) -> usize {
        self.bands
    }

    fn set_display_remap(&mut self, remap: Option<RemapFn>) -> bool {
        self.remap = remap;
        true
    }
}

// ===== Gradient Source =====

/// A procedural single-band image whose samples are computed on read.
///
/// Useful for exercising very large extents without allocating them.
pub struct GradientSource {
    extent: ImageExtent,
    remap: Option<RemapFn>,
}

impl GradientSource {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            extent: ImageExtent::new(rows, cols),
            remap: None,
        }
    }

    /// Raw sample at a full-image pixel
    pub fn sample(row: usize, col: usize) -> f32 {
        ((row + col) % 256) as f32
    }
}

impl fmt::Debug for GradientSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientSource")
            .field("extent", &self.extent)
            .field("remap", &self.remap.is_some())
            .finish()
    }
}

impl ImageSource for GradientSource {
    fn full_extent(&self) -> ImageExtent {
        self.extent
    }

    fn read_region(&self, region: PixelRegion, stride: usize) -> Result<PixelTile> {
        region.check(self.extent)?;
        let stride = stride.max(1);
        let (rows, cols) = region.strided_shape(stride);
        let mut data = Vec::with_capacity(rows * cols);
        for r in (region.row_start..region.row_end).step_by(stride) {
            for c in (region.col_start..region.col_end).step_by(stride) {
                let sample = Self::sample(r, c);
                data.push(match &self.remap {
                    Some(remap) => remap(sample),
                    None => default_remap(sample),
                });
            }
        }
        PixelTile::new(rows, cols, 1, data)
    }

    fn set_display_remap(&mut self, remap: Option<RemapFn>) -> bool {
        self.remap = remap;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_read_takes_every_nth_pixel() {
        let samples: Vec<f32> = (0..20).map(|v| v as f32).collect();
        let source = ArraySource::new(4, 5, 1, samples).unwrap();
        let tile = source.read_region(PixelRegion::new(0, 4, 0, 5), 2).unwrap();
        assert_eq!((tile.rows(), tile.cols()), (2, 3));
        assert_eq!(tile.data(), &[0, 2, 4, 10, 12, 14]);
    }

    #[test]
    fn out_of_bounds_region_is_an_error() {
        let source = GradientSource::new(10, 10);
        assert!(matches!(
            source.read_region(PixelRegion::new(0, 11, 0, 5), 1),
            Err(CanvasError::RegionOutOfBounds { .. })
        ));
        assert!(source.read_region(PixelRegion::new(3, 3, 0, 5), 1).is_err());
    }

    #[test]
    fn remap_changes_display_values() {
        let mut source = ArraySource::new(1, 2, 1, vec![-5.0, 300.0]).unwrap();
        let region = PixelRegion::new(0, 1, 0, 2);
        assert_eq!(source.read_region(region, 1).unwrap().data(), &[0, 255]);

        assert!(source.set_display_remap(Some(Arc::new(|v: f32| if v > 0.0 { 1 } else { 2 }))));
        assert_eq!(source.read_region(region, 1).unwrap().data(), &[2, 1]);
    }

    #[test]
    fn tile_validates_shape() {
        assert!(matches!(
            PixelTile::new(2, 2, 1, vec![0; 3]),
            Err(CanvasError::InvalidTile { expected: 4, actual: 3, .. })
        ));
        assert!(matches!(
            PixelTile::new(1, 1, 2, vec![0; 2]),
            Err(CanvasError::UnsupportedBands(2))
        ));
    }

    #[test]
    fn resize_nearest_upsamples() {
        let tile = PixelTile::new(1, 2, 1, vec![10, 20]).unwrap();
        let big = tile.resize(4, 2).unwrap();
        assert_eq!((big.rows(), big.cols()), (2, 4));
        assert_eq!(big.pixel(1, 0), Some(&[10u8][..]));
        assert_eq!(big.pixel(1, 3), Some(&[20u8][..]));
        assert_eq!(big.pixel(2, 0), None);
    }

    #[test]
    fn covering_region_clips_to_image() {
        let extent = ImageExtent::new(100, 50);
        let region = PixelRegion::covering(&ImageRect::new(-3.0, 10.2, 40.5, 80.0), extent);
        assert_eq!(region, PixelRegion::new(0, 41, 10, 50));
    }

    #[test]
    fn image_conversion_keeps_colour() {
        let rgb = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(3, 2, Rgb([1u8, 2, 3])));
        let source = ArraySource::from_image(&rgb);
        assert_eq!(source.full_extent(), ImageExtent::new(2, 3));
        assert_eq!(source.band_count(), 3);
        let tile = source.read_region(PixelRegion::new(0, 2, 0, 3), 1).unwrap();
        assert_eq!(tile.pixel(1, 2), Some(&[1u8, 2, 3][..]));
    }
}
