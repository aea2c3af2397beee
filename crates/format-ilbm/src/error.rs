use amiga_video::VideoError;
use format_iff::{ChunkId, IffError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IlbmError {
    #[error("required {0} chunk is missing")]
    MissingChunk(ChunkId),

    #[error("no ILBM or ACBM form found")]
    NoImageForm,

    #[error("BMHD is {len} bytes, expected 20")]
    BadHeaderSize { len: usize },

    #[error("unsupported compression type {0}")]
    UnsupportedCompression(u8),

    #[error("unsupported masking type {0}")]
    UnsupportedMasking(u8),

    #[error("bitplane data is {actual} bytes, expected {expected}")]
    BadBodySize { expected: usize, actual: usize },

    #[error("{planes} bitplanes exceed the hardware limit of 6")]
    TooManyPlanes { planes: u8 },

    #[error("{len} colours cannot be addressed by {planes} bitplanes")]
    PaletteTooLarge { len: usize, planes: u8 },

    #[error("{width}x{height} does not fit a 16-bit bitmap header")]
    ImageTooLarge { width: usize, height: usize },

    #[error("cannot allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error(transparent)]
    Iff(#[from] IffError),

    #[error(transparent)]
    Video(#[from] VideoError),
}
