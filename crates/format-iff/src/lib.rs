//! EA IFF 85 container format.
//!
//! An IFF file is a tree of chunks. Every chunk is a four-character ID, a
//! big-endian 32-bit length and that many payload bytes, followed by a zero
//! pad byte when the length is odd. The pad byte is not counted in the
//! chunk's own length but is counted by any enclosing group. Groups (`FORM`,
//! `LIST`, `CAT `, `PROP`) are chunks whose payload is a type ID followed by
//! child chunks.

mod error;
mod file;
mod id;
mod node;
mod reader;

pub use error::IffError;
pub use file::{write_atomic, write_atomic_all, write_file};
pub use id::ChunkId;
pub use node::{Chunk, Group, GroupKind, Node};
pub use reader::{MAX_DEPTH, parse};
