use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IffError {
    #[error("truncated at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid chunk ID {bytes:02X?} at offset {offset}")]
    InvalidId { offset: usize, bytes: [u8; 4] },

    #[error("chunk of {len} bytes does not fit a 32-bit length field")]
    LengthOverflow { len: usize },

    #[error("unexpected data after the top-level chunk at offset {offset}")]
    TrailingData { offset: usize },

    #[error("groups nested deeper than {max} levels at offset {offset}")]
    NestingTooDeep { offset: usize, max: usize },

    #[error("cannot allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
