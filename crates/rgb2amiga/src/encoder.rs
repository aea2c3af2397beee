//! Request-driven conversion from truecolor to Amiga output files.

use std::path::{Path, PathBuf};

use amiga_video::{ChunkyImage, ColorSpaceRegistry, Palette, chunky_to_planar};
use format_iff::{write_atomic, write_atomic_all};
use format_ilbm::IlbmImage;
use log::{debug, info};

use crate::batch::{Canvas, build_shared_palette, extract_region};
use crate::error::EncodeError;
use crate::io::encode_png;
use crate::pipeline::reduce;
use crate::quantize::Quantizer;
use crate::raster::Raster;
use crate::request::EncodeRequest;

/// A fully encoded image, held in memory until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedImage {
    /// A complete IFF file (FORM ILBM or FORM ACBM).
    Ilbm(Vec<u8>),
    /// An RGB PNG and the palette its colours come from.
    PngWithPalette { png: Vec<u8>, palette: Palette },
}

impl EncodedImage {
    /// Write to `path`. A PNG output also writes `<stem>.gpl` beside it.
    ///
    /// Each file is written to a temporary name and renamed into place. A
    /// PNG and its palette are committed together: a failure leaves
    /// neither.
    pub fn write(&self, path: &Path) -> Result<(), EncodeError> {
        match self {
            Self::Ilbm(bytes) => {
                write_atomic(path, bytes)?;
                info!("wrote {} ({} bytes)", path.display(), bytes.len());
            }
            Self::PngWithPalette { png, .. } => {
                let gpl_path = Self::palette_path(path);
                let name = path
                    .file_stem()
                    .map_or_else(|| "rgb2amiga".into(), |s| s.to_string_lossy());
                let gpl = self.gimp_palette(&name);
                write_atomic_all(&[(path, png.as_slice()), (gpl_path.as_path(), gpl.as_bytes())])?;
                info!("wrote {} and {}", path.display(), gpl_path.display());
            }
        }
        Ok(())
    }

    /// Where [`EncodedImage::write`] puts the palette of a PNG output.
    #[must_use]
    pub fn palette_path(path: &Path) -> PathBuf {
        path.with_extension("gpl")
    }

    /// GIMP palette text for a PNG output; empty for IFF output.
    #[must_use]
    pub fn gimp_palette(&self, name: &str) -> String {
        match self {
            Self::Ilbm(_) => String::new(),
            Self::PngWithPalette { palette, .. } => palette.to_gimp_palette(name),
        }
    }
}

/// Runs [`EncodeRequest`]s against a set of colour spaces.
#[derive(Debug, Clone, Copy)]
pub struct AmigaEncoder<'a> {
    registry: &'a ColorSpaceRegistry,
}

impl<'a> AmigaEncoder<'a> {
    #[must_use]
    pub fn new(registry: &'a ColorSpaceRegistry) -> Self {
        Self { registry }
    }

    /// The colour space a request snaps onto.
    pub fn space(&self, request: &EncodeRequest) -> Result<&'a Palette, EncodeError> {
        Ok(self.registry.get(request.color_space)?)
    }

    /// Convert one image: size it, reduce its colours, then encode.
    pub fn encode(
        &self,
        raster: &Raster,
        request: &EncodeRequest,
        quantizer: &dyn Quantizer,
    ) -> Result<EncodedImage, EncodeError> {
        request.validate()?;
        let space = self.space(request)?;
        let sized = request.sizing.apply(raster.clone())?;
        let reduced = reduce(&sized, request, quantizer, space)?;
        let image = reduced.index(sized.width(), sized.height(), reduced.raster.pixels())?;
        self.encode_indexed(&image, request)
    }

    /// Encode an already indexed image in the request's output format.
    pub fn encode_indexed(
        &self,
        image: &ChunkyImage,
        request: &EncodeRequest,
    ) -> Result<EncodedImage, EncodeError> {
        let Some(form_type) = request.format.form_type() else {
            let rgb = Raster::new(image.width(), image.height(), image.to_rgb())?;
            debug!("encoding {}x{} as PNG", image.width(), image.height());
            return Ok(EncodedImage::PngWithPalette {
                png: encode_png(&rgb)?,
                palette: image.palette().clone(),
            });
        };

        let mode = request.viewport_mode_for(image.width(), image.height());
        let screen = chunky_to_planar(image, mode)?;
        let ilbm = IlbmImage::from_screen(
            screen,
            image.palette().clone(),
            form_type,
            request.color_depth,
        )?;
        let bytes = ilbm.to_bytes()?;
        debug!(
            "encoded {} {}x{}, {} planes, mode {:#x}",
            form_type.id(),
            image.width(),
            image.height(),
            ilbm.header().planes,
            mode.bits()
        );
        Ok(EncodedImage::Ilbm(bytes))
    }

    /// Convert several images with one shared palette.
    ///
    /// Images that cannot be sized are reported in place and left out of
    /// the palette. A failure to build the shared palette fails the batch.
    pub fn encode_batch(
        &self,
        rasters: &[Raster],
        request: &EncodeRequest,
        quantizer: &dyn Quantizer,
    ) -> Result<Vec<Result<EncodedImage, EncodeError>>, EncodeError> {
        request.validate()?;
        let space = self.space(request)?;

        // `None` marks an image that joins the shared canvas.
        let mut good = Vec::with_capacity(rasters.len());
        let mut layout = Vec::with_capacity(rasters.len());
        for raster in rasters {
            match request.sizing.apply(raster.clone()) {
                Ok(sized) => {
                    good.push(sized);
                    layout.push(None);
                }
                Err(e) => layout.push(Some(e)),
            }
        }

        let mut encoded = Vec::with_capacity(good.len());
        if !good.is_empty() {
            let canvas = Canvas::combine(&good)?;
            let shared = build_shared_palette(&canvas, request, quantizer, space)?;
            for region in canvas.regions() {
                encoded.push(
                    extract_region(&shared, *region)
                        .and_then(|image| self.encode_indexed(&image, request)),
                );
            }
        }

        let mut encoded = encoded.into_iter();
        Ok(layout
            .into_iter()
            .filter_map(|slot| match slot {
                Some(e) => Some(Err(e)),
                None => encoded.next(),
            })
            .collect())
    }
}
