//! Chunk tree parsing.

use log::debug;

use crate::error::IffError;
use crate::id::ChunkId;
use crate::node::{Chunk, Group, GroupKind, HEADER_LEN, Node};

/// Deepest node [`parse`] accepts, counting the top-level node as 0.
pub const MAX_DEPTH: usize = 32;

/// Parse one top-level node that spans the whole input.
///
/// A missing pad byte after an odd-length final chunk is accepted; any
/// other bytes after the top-level node are an error.
pub fn parse(data: &[u8]) -> Result<Node, IffError> {
    let mut reader = Reader { data, pos: 0 };
    let node = reader.node(data.len(), 0)?;
    if reader.pos != data.len() {
        return Err(IffError::TrailingData { offset: reader.pos });
    }
    debug!("parsed {} ({} bytes)", node.id(), data.len());
    Ok(node)
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn need(&self, len: usize, end: usize) -> Result<(), IffError> {
        let available = end.saturating_sub(self.pos);
        if len > available {
            return Err(IffError::Truncated {
                offset: self.pos,
                needed: len,
                available,
            });
        }
        Ok(())
    }

    fn id(&mut self, end: usize) -> Result<ChunkId, IffError> {
        self.need(4, end)?;
        let bytes = [
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ];
        let id = ChunkId::from_bytes(bytes).ok_or(IffError::InvalidId {
            offset: self.pos,
            bytes,
        })?;
        self.pos += 4;
        Ok(id)
    }

    fn u32(&mut self, end: usize) -> Result<u32, IffError> {
        self.need(4, end)?;
        let p = self.pos;
        let value = u32::from_be_bytes([
            self.data[p],
            self.data[p + 1],
            self.data[p + 2],
            self.data[p + 3],
        ]);
        self.pos += 4;
        Ok(value)
    }

    /// Read a node that must end at or before `end`, `depth` groups down.
    fn node(&mut self, end: usize, depth: usize) -> Result<Node, IffError> {
        if depth > MAX_DEPTH {
            return Err(IffError::NestingTooDeep {
                offset: self.pos,
                max: MAX_DEPTH,
            });
        }
        self.need(HEADER_LEN, end)?;
        let id = self.id(end)?;
        let len = self.u32(end)? as usize;
        self.need(len, end)?;
        let body_end = self.pos + len;

        let node = if let Some(kind) = GroupKind::from_id(id) {
            let form_type = self.id(body_end)?;
            let mut children = Vec::new();
            while self.pos < body_end {
                children.push(self.node(body_end, depth + 1)?);
            }
            Node::Group(Group {
                kind,
                form_type,
                children,
            })
        } else {
            let data = self.data[self.pos..body_end].to_vec();
            Node::Chunk(Chunk { id, data })
        };

        self.pos = body_end;
        if len & 1 == 1 && self.pos < end {
            self.pos += 1;
        }
        Ok(node)
    }
}
