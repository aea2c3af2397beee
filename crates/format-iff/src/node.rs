//! Chunk tree and its serialisation.

use std::io::Write;

use crate::error::IffError;
use crate::id::ChunkId;

/// Chunk header: ID plus 32-bit length.
pub(crate) const HEADER_LEN: usize = 8;

/// A leaf chunk holding raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub id: ChunkId,
    pub data: Vec<u8>,
}

impl Chunk {
    #[must_use]
    pub fn new(id: ChunkId, data: Vec<u8>) -> Self {
        Self { id, data }
    }
}

/// The group chunk kinds of IFF 85.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Form,
    List,
    Cat,
    Prop,
}

impl GroupKind {
    #[must_use]
    pub fn id(self) -> ChunkId {
        match self {
            Self::Form => ChunkId::FORM,
            Self::List => ChunkId::LIST,
            Self::Cat => ChunkId::CAT,
            Self::Prop => ChunkId::PROP,
        }
    }

    #[must_use]
    pub fn from_id(id: ChunkId) -> Option<Self> {
        match id {
            ChunkId::FORM => Some(Self::Form),
            ChunkId::LIST => Some(Self::List),
            ChunkId::CAT => Some(Self::Cat),
            ChunkId::PROP => Some(Self::Prop),
            _ => None,
        }
    }
}

/// A group chunk: kind, type ID and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub kind: GroupKind,
    pub form_type: ChunkId,
    pub children: Vec<Node>,
}

impl Group {
    #[must_use]
    pub fn form(form_type: ChunkId) -> Self {
        Self {
            kind: GroupKind::Form,
            form_type,
            children: Vec::new(),
        }
    }

    /// Append a leaf chunk.
    pub fn push_chunk(&mut self, id: ChunkId, data: Vec<u8>) {
        self.children.push(Node::Chunk(Chunk::new(id, data)));
    }

    /// First direct child chunk with this ID.
    #[must_use]
    pub fn find(&self, id: ChunkId) -> Option<&Chunk> {
        self.find_all(id).next()
    }

    /// Every direct child chunk with this ID, in file order.
    pub fn find_all(&self, id: ChunkId) -> impl Iterator<Item = &Chunk> {
        self.children.iter().filter_map(move |node| match node {
            Node::Chunk(chunk) if chunk.id == id => Some(chunk),
            _ => None,
        })
    }

    /// Every FORM of `form_type` in this subtree, depth first, including
    /// this group itself.
    #[must_use]
    pub fn forms(&self, form_type: ChunkId) -> Vec<&Group> {
        let mut found = Vec::new();
        collect_forms(self, form_type, &mut found);
        found
    }

    fn payload_len(&self) -> usize {
        4 + self.children.iter().map(Node::encoded_len).sum::<usize>()
    }
}

fn collect_forms<'a>(group: &'a Group, form_type: ChunkId, found: &mut Vec<&'a Group>) {
    if group.kind == GroupKind::Form && group.form_type == form_type {
        found.push(group);
    }
    for child in &group.children {
        if let Node::Group(inner) = child {
            collect_forms(inner, form_type, found);
        }
    }
}

/// Any node of the chunk tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Chunk(Chunk),
    Group(Group),
}

impl Node {
    #[must_use]
    pub fn id(&self) -> ChunkId {
        match self {
            Self::Chunk(chunk) => chunk.id,
            Self::Group(group) => group.kind.id(),
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Chunk(_) => None,
        }
    }

    /// Bytes this node occupies in a file, pad byte included.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        let payload = match self {
            Self::Chunk(chunk) => chunk.data.len(),
            Self::Group(group) => group.payload_len(),
        };
        HEADER_LEN + payload + (payload & 1)
    }

    /// All FORMs of `form_type` anywhere in the tree.
    #[must_use]
    pub fn forms(&self, form_type: ChunkId) -> Vec<&Group> {
        match self {
            Self::Group(group) => group.forms(form_type),
            Self::Chunk(_) => Vec::new(),
        }
    }

    /// Append this node's encoding to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), IffError> {
        match self {
            Self::Chunk(chunk) => {
                put_header(out, chunk.id, chunk.data.len())?;
                out.extend_from_slice(&chunk.data);
                if chunk.data.len() & 1 == 1 {
                    out.push(0);
                }
            }
            Self::Group(group) => {
                put_header(out, group.kind.id(), group.payload_len())?;
                out.extend_from_slice(group.form_type.as_bytes());
                for child in &group.children {
                    child.encode_into(out)?;
                }
            }
        }
        Ok(())
    }

    /// Serialise into a fresh buffer sized up front.
    pub fn to_bytes(&self) -> Result<Vec<u8>, IffError> {
        let len = self.encoded_len();
        let mut out = Vec::new();
        out.try_reserve_exact(len)
            .map_err(|_| IffError::Allocation { bytes: len })?;
        self.encode_into(&mut out)?;
        debug_assert_eq!(out.len(), len);
        Ok(out)
    }

    /// Serialise completely, then hand the bytes to `sink`.
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<(), IffError> {
        let bytes = self.to_bytes()?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }
}

impl From<Chunk> for Node {
    fn from(chunk: Chunk) -> Self {
        Self::Chunk(chunk)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

fn put_header(out: &mut Vec<u8>, id: ChunkId, len: usize) -> Result<(), IffError> {
    let len32 = u32::try_from(len).map_err(|_| IffError::LengthOverflow { len })?;
    out.extend_from_slice(id.as_bytes());
    out.extend_from_slice(&len32.to_be_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ILBM: ChunkId = ChunkId::new(b"ILBM");
    const BMHD: ChunkId = ChunkId::new(b"BMHD");
    const ANNO: ChunkId = ChunkId::new(b"ANNO");

    #[test]
    fn chunk_layout() {
        let node = Node::from(Chunk::new(BMHD, vec![1, 2, 3, 4]));
        assert_eq!(
            node.to_bytes().expect("valid"),
            vec![b'B', b'M', b'H', b'D', 0, 0, 0, 4, 1, 2, 3, 4]
        );
    }

    #[test]
    fn odd_chunk_is_padded_but_length_is_not() {
        let node = Node::from(Chunk::new(ANNO, vec![b'h', b'i', b'!']));
        let bytes = node.to_bytes().expect("valid");
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 3]);
        assert_eq!(bytes[11], 0);
        assert_eq!(node.encoded_len(), 12);
    }

    #[test]
    fn group_length_counts_child_padding() {
        let mut form = Group::form(ILBM);
        form.push_chunk(ANNO, vec![1, 2, 3]);
        form.push_chunk(BMHD, vec![0; 20]);
        let bytes = Node::from(form).to_bytes().expect("valid");
        // 4 (type) + 8+3+1 (ANNO, padded) + 8+20 (BMHD)
        assert_eq!(&bytes[..4], b"FORM");
        assert_eq!(u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 44);
        assert_eq!(&bytes[8..12], b"ILBM");
        assert_eq!(bytes.len(), 52);
    }

    #[test]
    fn empty_form_is_just_its_type() {
        let bytes = Node::from(Group::form(ILBM)).to_bytes().expect("valid");
        assert_eq!(bytes, b"FORM\0\0\0\x04ILBM");
    }

    #[test]
    fn find_and_forms() {
        let mut inner = Group::form(ILBM);
        inner.push_chunk(BMHD, vec![0; 20]);
        inner.push_chunk(ANNO, vec![1]);
        inner.push_chunk(ANNO, vec![2]);
        let list = Group {
            kind: GroupKind::List,
            form_type: ILBM,
            children: vec![Node::Group(inner.clone()), Node::Group(Group::form(ANNO))],
        };

        assert_eq!(inner.find(BMHD).map(|c| c.data.len()), Some(20));
        assert_eq!(inner.find(ChunkId::new(b"CMAP")), None);
        let annos: Vec<_> = inner.find_all(ANNO).map(|c| c.data[0]).collect();
        assert_eq!(annos, vec![1, 2]);

        let forms = Node::Group(list).forms(ILBM).len();
        assert_eq!(forms, 1);
    }

    #[test]
    fn write_to_streams_whole_encoding() {
        let node = Node::from(Chunk::new(ANNO, vec![7]));
        let mut sink = Vec::new();
        node.write_to(&mut sink).expect("valid");
        assert_eq!(sink, node.to_bytes().expect("valid"));
    }
}
