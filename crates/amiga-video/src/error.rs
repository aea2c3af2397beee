use thiserror::Error;

use crate::color::Color;
use crate::space::ColorSpaceId;

#[derive(Debug, Error, PartialEq)]
pub enum VideoError {
    #[error("palette has {found} distinct colours, at most {max} are allowed")]
    TooManyColors { found: usize, max: usize },

    #[error("palette is empty")]
    EmptyPalette,

    #[error("colour {color} is not in the palette")]
    PaletteTooSmall { color: Color },

    #[error("image width {width} is not a multiple of 16")]
    InvalidWidth { width: usize },

    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("pixel index {index} is out of range for a {len}-colour palette")]
    IndexOutOfRange { index: u8, len: usize },

    #[error("bitplane depth {0} is outside 1..=6")]
    InvalidBitDepth(u8),

    #[error("palette length {actual} does not match {expected}")]
    PaletteLengthMismatch { expected: usize, actual: usize },

    #[error("cannot allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error("colour space {0} is not registered")]
    UnknownColorSpace(ColorSpaceId),
}

/// Zeroed buffer of `len` bytes, reporting allocation failure instead of aborting.
pub(crate) fn zeroed(len: usize) -> Result<Vec<u8>, VideoError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| VideoError::Allocation { bytes: len })?;
    buf.resize(len, 0);
    Ok(buf)
}
