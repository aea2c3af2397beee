//! Colour reduction pipelines shared by single and batch encoding.

use amiga_video::{ChunkyImage, Color, Palette};
use log::debug;

use crate::error::EncodeError;
use crate::quantize::Quantizer;
use crate::raster::Raster;
use crate::request::{EncodeRequest, MIN_COLORS, Pipeline};

/// A quantized raster and the palettes that index it.
#[derive(Debug, Clone)]
pub(crate) struct Reduced {
    /// Every pixel is an entry of `palette`.
    pub raster: Raster,
    /// Unique colours of `raster` in canonical order.
    pub palette: Palette,
    /// `palette` as it is written out: same length and order.
    pub display: Palette,
}

impl Reduced {
    /// Index `pixels` (a `width`×`height` part of `raster`) and attach the
    /// display palette.
    pub fn index(
        &self,
        width: usize,
        height: usize,
        pixels: &[Color],
    ) -> Result<ChunkyImage, EncodeError> {
        let image = ChunkyImage::index_exact(width, height, pixels, self.palette.clone())?;
        Ok(image.with_palette(self.display.clone())?)
    }
}

pub(crate) fn reduce(
    raster: &Raster,
    request: &EncodeRequest,
    quantizer: &dyn Quantizer,
    space: &Palette,
) -> Result<Reduced, EncodeError> {
    let (raster, snap_palette) = match request.pipeline {
        Pipeline::QuantizeThenSnap => (quantize(raster, request, quantizer)?, true),
        Pipeline::SnapThenQuantize => {
            let snapped = raster.map_colors(|c| space.nearest_color(c));
            debug!("snapped input onto {} ({} colours)", request.color_space, space.len());
            (quantize(&snapped, request, quantizer)?, false)
        }
    };

    let palette = Palette::from_unique_colors_with_limit(raster.pixels().iter().copied(), request.colors)?
        .padded_to(MIN_COLORS);
    let display = if snap_palette {
        debug!("snapping {} palette entries onto {}", palette.len(), request.color_space);
        palette.map_onto(space)
    } else {
        palette.clone()
    };
    Ok(Reduced {
        raster,
        palette,
        display,
    })
}

fn quantize(raster: &Raster, request: &EncodeRequest, quantizer: &dyn Quantizer) -> Result<Raster, EncodeError> {
    let out = quantizer.quantize(raster, request.colors, request.dither);
    if (out.width(), out.height()) != (raster.width(), raster.height()) {
        return Err(EncodeError::RasterSizeMismatch {
            width: raster.width(),
            height: raster.height(),
            expected: raster.pixels().len(),
            actual: out.pixels().len(),
        });
    }
    debug!(
        "quantized {}x{} to {} colours (dither {})",
        raster.width(),
        raster.height(),
        request.colors,
        request.dither
    );
    Ok(out)
}
