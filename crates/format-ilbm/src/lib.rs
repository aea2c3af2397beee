//! IFF ILBM (interleaved bitmap) and ACBM (contiguous bitmap) images.
//!
//! A FORM ILBM carries `BMHD` (geometry), `CMAP` (colour registers),
//! `CAMG` (viewport mode) and `BODY` (bitplane rows interleaved per
//! scanline). FORM ACBM is identical except that the bitplanes are stored
//! whole, one after another, in an `ABIT` chunk.

mod bmhd;
mod body;
mod cmap;
mod error;
mod image;

pub use bmhd::{BitMapHeader, Compression, Masking, X_ASPECT, Y_ASPECT};
pub use body::{deinterleave, interleave, join_planes, split_planes};
pub use cmap::{ColorDepth, decode_cmap, encode_cmap};
pub use error::IlbmError;
pub use image::{FormType, IlbmImage};

use format_iff::ChunkId;

pub const ILBM: ChunkId = ChunkId::new(b"ILBM");
pub const ACBM: ChunkId = ChunkId::new(b"ACBM");
pub const BMHD: ChunkId = ChunkId::new(b"BMHD");
pub const CMAP: ChunkId = ChunkId::new(b"CMAP");
pub const CAMG: ChunkId = ChunkId::new(b"CAMG");
pub const BODY: ChunkId = ChunkId::new(b"BODY");
pub const ABIT: ChunkId = ChunkId::new(b"ABIT");
