//! One palette for several images.
//!
//! The images are stacked into a single canvas, the canvas is reduced as a
//! whole, and each image is then cut back out and indexed against the
//! shared palette.

use std::fmt;

use amiga_video::{ChunkyImage, Color, Palette, WIDTH_ALIGN};
use log::debug;

use crate::error::EncodeError;
use crate::pipeline::{Reduced, reduce};
use crate::quantize::Quantizer;
use crate::raster::Raster;
use crate::request::EncodeRequest;

/// A rectangle of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Images stacked top to bottom, left aligned.
///
/// Rows narrower than the canvas are extended with their last pixel so the
/// padding adds no colours.
#[derive(Debug, Clone)]
pub struct Canvas {
    raster: Raster,
    regions: Vec<Rect>,
}

impl Canvas {
    pub fn combine(images: &[Raster]) -> Result<Self, EncodeError> {
        let width = images.iter().map(Raster::width).max().unwrap_or(0);
        let height = images.iter().map(Raster::height).sum::<usize>();
        if width == 0 || height == 0 {
            return Err(EncodeError::EmptyImage { width, height });
        }

        let len = width * height;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| EncodeError::Allocation { bytes: len * 4 })?;
        let mut regions = Vec::with_capacity(images.len());
        let mut y = 0;
        for image in images {
            for row in 0..image.height() {
                let row = image.row(row);
                pixels.extend_from_slice(row);
                let last = row.last().copied().unwrap_or(Color::BLACK);
                pixels.extend(std::iter::repeat_n(last, width - row.len()));
            }
            regions.push(Rect {
                x: 0,
                y,
                width: image.width(),
                height: image.height(),
            });
            y += image.height();
        }
        debug!("combined {} images into a {width}x{height} canvas", images.len());
        Ok(Self {
            raster: Raster::new(width, height, pixels)?,
            regions,
        })
    }

    #[must_use]
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Where each input image sits, in input order.
    #[must_use]
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }
}

/// A reduced canvas and the palette every region is indexed with.
#[derive(Debug, Clone)]
pub struct SharedPalette {
    reduced: Reduced,
}

impl SharedPalette {
    /// The palette as written to each output.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.reduced.display
    }

    /// The reduced canvas.
    #[must_use]
    pub fn raster(&self) -> &Raster {
        &self.reduced.raster
    }
}

/// Reduce the whole canvas once with the request's pipeline.
pub fn build_shared_palette(
    canvas: &Canvas,
    request: &EncodeRequest,
    quantizer: &dyn Quantizer,
    space: &Palette,
) -> Result<SharedPalette, EncodeError> {
    request.validate()?;
    let reduced = reduce(canvas.raster(), request, quantizer, space)?;
    debug!("shared palette of {} colours", reduced.display.len());
    Ok(SharedPalette { reduced })
}

/// Cut `rect` out of the reduced canvas and index it.
pub fn extract_region(shared: &SharedPalette, rect: Rect) -> Result<ChunkyImage, EncodeError> {
    let raster = &shared.reduced.raster;
    if rect.x + rect.width > raster.width() || rect.y + rect.height > raster.height() {
        return Err(EncodeError::RegionOutOfBounds {
            rect,
            width: raster.width(),
            height: raster.height(),
        });
    }
    if rect.width == 0 || rect.width % WIDTH_ALIGN != 0 {
        return Err(EncodeError::InvalidWidth { width: rect.width });
    }

    let mut pixels = Vec::with_capacity(rect.width * rect.height);
    for y in rect.y..rect.y + rect.height {
        pixels.extend_from_slice(&raster.row(y)[rect.x..rect.x + rect.width]);
    }
    shared.reduced.index(rect.width, rect.height, &pixels)
}
