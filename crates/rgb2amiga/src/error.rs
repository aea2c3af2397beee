use std::io;

use amiga_video::{Color, VideoError, ViewportMode};
use format_iff::IffError;
use format_ilbm::IlbmError;
use thiserror::Error;

use crate::batch::Rect;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("colour count {colors} is outside {min}..={max}")]
    ColorCountOutOfRange { colors: usize, min: usize, max: usize },

    #[error("width {width} is not a positive multiple of 16")]
    InvalidWidth { width: usize },

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    #[error("raster of {width}x{height} needs {expected} pixels, got {actual}")]
    RasterSizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("quantizer produced {found} colours, more than the {max} requested")]
    TooManyColors { found: usize, max: usize },

    #[error("palette is too small: {color} has no entry")]
    PaletteTooSmall { color: Color },

    #[error("viewport mode {:#x} needs HAM or EHB pixel data, which this encoder does not produce", .0.bits())]
    UnsupportedViewportMode(ViewportMode),

    #[error("region {rect} lies outside the {width}x{height} canvas")]
    RegionOutOfBounds { rect: Rect, width: usize, height: usize },

    #[error("cannot allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error("unsupported PNG layout: {0:?}")]
    UnsupportedPng(png::ColorType),

    #[error("PNG decoding failed: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Video(VideoError),

    #[error(transparent)]
    Ilbm(IlbmError),

    #[error(transparent)]
    Iff(#[from] IffError),
}

impl From<VideoError> for EncodeError {
    fn from(err: VideoError) -> Self {
        match err {
            VideoError::TooManyColors { found, max } => Self::TooManyColors { found, max },
            VideoError::PaletteTooSmall { color } => Self::PaletteTooSmall { color },
            VideoError::InvalidWidth { width } => Self::InvalidWidth { width },
            VideoError::Allocation { bytes } => Self::Allocation { bytes },
            other => Self::Video(other),
        }
    }
}

impl From<IlbmError> for EncodeError {
    fn from(err: IlbmError) -> Self {
        match err {
            IlbmError::Video(inner) => inner.into(),
            IlbmError::Iff(inner) => Self::Iff(inner),
            IlbmError::Allocation { bytes } => Self::Allocation { bytes },
            other => Self::Ilbm(other),
        }
    }
}
