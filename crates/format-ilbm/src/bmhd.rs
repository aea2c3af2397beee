//! `BMHD`: the bitmap header.

use crate::error::IlbmError;

/// Pixel aspect ratio of a 320×200 NTSC lowres screen.
pub const X_ASPECT: u8 = 11;
pub const Y_ASPECT: u8 = 10;

const LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Masking {
    #[default]
    None,
    HasMask,
    TransparentColor,
    Lasso,
}

impl Masking {
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::HasMask),
            2 => Some(Self::TransparentColor),
            3 => Some(Self::Lasso),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::HasMask => 1,
            Self::TransparentColor => 2,
            Self::Lasso => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    ByteRun1,
}

impl Compression {
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::ByteRun1),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::ByteRun1 => 1,
        }
    }
}

/// The 20-byte big-endian `BMHD` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitMapHeader {
    pub width: u16,
    pub height: u16,
    pub x: i16,
    pub y: i16,
    pub planes: u8,
    pub masking: Masking,
    pub compression: Compression,
    pub pad: u8,
    pub transparent_color: u16,
    pub x_aspect: u8,
    pub y_aspect: u8,
    pub page_width: u16,
    pub page_height: u16,
}

impl BitMapHeader {
    /// Header for an uncompressed, unmasked bitmap at the origin whose page
    /// is the bitmap itself.
    pub fn new(width: usize, height: usize, planes: u8) -> Result<Self, IlbmError> {
        let too_large = || IlbmError::ImageTooLarge { width, height };
        let w = u16::try_from(width).map_err(|_| too_large())?;
        let h = u16::try_from(height).map_err(|_| too_large())?;
        Ok(Self {
            width: w,
            height: h,
            x: 0,
            y: 0,
            planes,
            masking: Masking::None,
            compression: Compression::None,
            pad: 0,
            transparent_color: 0,
            x_aspect: X_ASPECT,
            y_aspect: Y_ASPECT,
            page_width: w,
            page_height: h,
        })
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; LEN] {
        let mut out = [0u8; LEN];
        out[0..2].copy_from_slice(&self.width.to_be_bytes());
        out[2..4].copy_from_slice(&self.height.to_be_bytes());
        out[4..6].copy_from_slice(&self.x.to_be_bytes());
        out[6..8].copy_from_slice(&self.y.to_be_bytes());
        out[8] = self.planes;
        out[9] = self.masking.to_u8();
        out[10] = self.compression.to_u8();
        out[11] = self.pad;
        out[12..14].copy_from_slice(&self.transparent_color.to_be_bytes());
        out[14] = self.x_aspect;
        out[15] = self.y_aspect;
        out[16..18].copy_from_slice(&self.page_width.to_be_bytes());
        out[18..20].copy_from_slice(&self.page_height.to_be_bytes());
        out
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, IlbmError> {
        if data.len() != LEN {
            return Err(IlbmError::BadHeaderSize { len: data.len() });
        }
        let be16 = |i: usize| [data[i], data[i + 1]];
        let masking = Masking::from_u8(data[9]).ok_or(IlbmError::UnsupportedMasking(data[9]))?;
        let compression =
            Compression::from_u8(data[10]).ok_or(IlbmError::UnsupportedCompression(data[10]))?;
        Ok(Self {
            width: u16::from_be_bytes(be16(0)),
            height: u16::from_be_bytes(be16(2)),
            x: i16::from_be_bytes(be16(4)),
            y: i16::from_be_bytes(be16(6)),
            planes: data[8],
            masking,
            compression,
            pad: data[11],
            transparent_color: u16::from_be_bytes(be16(12)),
            x_aspect: data[14],
            y_aspect: data[15],
            page_width: u16::from_be_bytes(be16(16)),
            page_height: u16::from_be_bytes(be16(18)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowres_header_bytes() {
        let header = BitMapHeader::new(320, 256, 5).expect("valid");
        assert_eq!(
            header.to_bytes(),
            [
                0x01, 0x40, 0x01, 0x00, // 320 x 256
                0, 0, 0, 0, // x, y
                5, 0, 0, 0, // planes, masking, compression, pad
                0, 0, // transparent colour
                11, 10, // aspect
                0x01, 0x40, 0x01, 0x00, // page
            ]
        );
    }

    #[test]
    fn bytes_read_back() {
        let mut header = BitMapHeader::new(640, 512, 4).expect("valid");
        header.x = -8;
        header.masking = Masking::TransparentColor;
        header.transparent_color = 3;
        assert_eq!(BitMapHeader::from_bytes(&header.to_bytes()).expect("valid"), header);
    }

    #[test]
    fn rejects_bad_length_and_codes() {
        assert!(matches!(
            BitMapHeader::from_bytes(&[0; 19]),
            Err(IlbmError::BadHeaderSize { len: 19 })
        ));
        let mut bytes = BitMapHeader::new(16, 16, 1).expect("valid").to_bytes();
        bytes[10] = 2;
        assert!(matches!(
            BitMapHeader::from_bytes(&bytes),
            Err(IlbmError::UnsupportedCompression(2))
        ));
        bytes[10] = 0;
        bytes[9] = 9;
        assert!(matches!(
            BitMapHeader::from_bytes(&bytes),
            Err(IlbmError::UnsupportedMasking(9))
        ));
    }

    #[test]
    fn oversized_images_are_rejected() {
        assert!(matches!(
            BitMapHeader::new(70_000, 16, 1),
            Err(IlbmError::ImageTooLarge { width: 70_000, .. })
        ));
    }

    #[test]
    fn page_size_uses_the_full_unsigned_range() {
        let header = BitMapHeader::new(40_000, 16, 1).expect("valid");
        assert_eq!((header.page_width, header.page_height), (40_000, 16));
        let bytes = header.to_bytes();
        assert_eq!(&bytes[16..18], &[0x9C, 0x40]);
        assert_eq!(BitMapHeader::from_bytes(&bytes).expect("valid"), header);
    }
}
