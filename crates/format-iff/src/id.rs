//! Four-character chunk identifiers.

use std::fmt;

/// A chunk or form type ID: four printable ASCII characters, space padded.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId([u8; 4]);

impl ChunkId {
    pub const FORM: Self = Self(*b"FORM");
    pub const LIST: Self = Self(*b"LIST");
    pub const CAT: Self = Self(*b"CAT ");
    pub const PROP: Self = Self(*b"PROP");

    /// ID from a literal; callers pass printable ASCII.
    #[must_use]
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    /// ID from raw file bytes, or `None` if any byte is not printable ASCII.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 4]) -> Option<Self> {
        if bytes.iter().all(|b| (0x20..=0x7E).contains(b)) {
            Some(Self(bytes))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_ids_only() {
        assert_eq!(ChunkId::from_bytes(*b"BMHD"), Some(ChunkId::new(b"BMHD")));
        assert_eq!(ChunkId::from_bytes(*b"CAT "), Some(ChunkId::CAT));
        assert_eq!(ChunkId::from_bytes([0, b'A', b'B', b'C']), None);
        assert_eq!(ChunkId::from_bytes([b'A', b'B', b'C', 0x7F]), None);
    }

    #[test]
    fn displays_as_text() {
        assert_eq!(ChunkId::new(b"ILBM").to_string(), "ILBM");
        assert_eq!(format!("{:?}", ChunkId::CAT), "ChunkId(CAT )");
    }
}
