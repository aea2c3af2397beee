//! Whole ILBM/ACBM images.

use amiga_video::{MAX_BITPLANES, Palette, PlanarScreen, ViewportMode};
use format_iff::{ChunkId, Group, Node, parse};
use log::debug;

use crate::bmhd::{BitMapHeader, Compression, Masking};
use crate::body::{deinterleave, interleave, join_planes, split_planes};
use crate::cmap::{ColorDepth, decode_cmap, encode_cmap};
use crate::error::IlbmError;
use crate::{ABIT, ACBM, BMHD, BODY, CAMG, CMAP, ILBM};

/// How the bitplanes are laid out in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormType {
    /// FORM ILBM: rows interleaved in `BODY`.
    #[default]
    Ilbm,
    /// FORM ACBM: whole planes in `ABIT`.
    Acbm,
}

impl FormType {
    #[must_use]
    pub fn id(self) -> ChunkId {
        match self {
            Self::Ilbm => ILBM,
            Self::Acbm => ACBM,
        }
    }

    fn bitmap_chunk(self) -> ChunkId {
        match self {
            Self::Ilbm => BODY,
            Self::Acbm => ABIT,
        }
    }
}

/// A planar image with everything needed to write or display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IlbmImage {
    form_type: FormType,
    header: BitMapHeader,
    palette: Palette,
    color_depth: ColorDepth,
    screen: PlanarScreen,
}

impl IlbmImage {
    /// Wrap a screen and the palette its indices address.
    pub fn from_screen(
        screen: PlanarScreen,
        palette: Palette,
        form_type: FormType,
        color_depth: ColorDepth,
    ) -> Result<Self, IlbmError> {
        let planes = screen.bit_depth();
        if palette.len() > 1usize << planes {
            return Err(IlbmError::PaletteTooLarge {
                len: palette.len(),
                planes,
            });
        }
        let header = BitMapHeader::new(screen.width(), screen.height(), planes)?;
        Ok(Self {
            form_type,
            header,
            palette,
            color_depth,
            screen,
        })
    }

    #[must_use]
    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    #[must_use]
    pub fn header(&self) -> &BitMapHeader {
        &self.header
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn color_depth(&self) -> ColorDepth {
        self.color_depth
    }

    #[must_use]
    pub fn viewport_mode(&self) -> ViewportMode {
        self.screen.viewport_mode()
    }

    #[must_use]
    pub fn screen(&self) -> &PlanarScreen {
        &self.screen
    }

    /// `FORM` with `BMHD`, `CMAP`, `CAMG` and the bitmap chunk, in that order.
    pub fn to_form(&self) -> Result<Group, IlbmError> {
        let bitmap = match self.form_type {
            FormType::Ilbm => interleave(&self.screen)?,
            FormType::Acbm => join_planes(&self.screen)?,
        };
        let mut form = Group::form(self.form_type.id());
        form.push_chunk(BMHD, self.header.to_bytes().to_vec());
        form.push_chunk(CMAP, encode_cmap(&self.palette, self.color_depth));
        form.push_chunk(CAMG, self.viewport_mode().bits().to_be_bytes().to_vec());
        form.push_chunk(self.form_type.bitmap_chunk(), bitmap);
        Ok(form)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, IlbmError> {
        Ok(Node::Group(self.to_form()?).to_bytes()?)
    }

    /// Decode an ILBM or ACBM form.
    pub fn from_form(form: &Group) -> Result<Self, IlbmError> {
        let form_type = match form.form_type {
            ILBM => FormType::Ilbm,
            ACBM => FormType::Acbm,
            _ => return Err(IlbmError::NoImageForm),
        };

        let bmhd = form.find(BMHD).ok_or(IlbmError::MissingChunk(BMHD))?;
        let header = BitMapHeader::from_bytes(&bmhd.data)?;
        if header.compression != Compression::None {
            return Err(IlbmError::UnsupportedCompression(header.compression.to_u8()));
        }
        if header.masking == Masking::HasMask {
            return Err(IlbmError::UnsupportedMasking(header.masking.to_u8()));
        }
        if header.planes > MAX_BITPLANES {
            return Err(IlbmError::TooManyPlanes {
                planes: header.planes,
            });
        }

        let cmap = form.find(CMAP).ok_or(IlbmError::MissingChunk(CMAP))?;
        let (colors, color_depth) = decode_cmap(&cmap.data);
        let palette = Palette::from_colors(colors)?;

        let viewport_mode = match form.find(CAMG) {
            Some(camg) if camg.data.len() >= 4 => ViewportMode::from_bits_retain(u32::from_be_bytes(
                [camg.data[0], camg.data[1], camg.data[2], camg.data[3]],
            )),
            _ => ViewportMode::LOWRES,
        };

        let width = usize::from(header.width);
        let height = usize::from(header.height);
        let bitmap_id = form_type.bitmap_chunk();
        let bitmap = form
            .find(bitmap_id)
            .ok_or(IlbmError::MissingChunk(bitmap_id))?;
        let planes = match form_type {
            FormType::Ilbm => deinterleave(&bitmap.data, width, height, header.planes)?,
            FormType::Acbm => split_planes(&bitmap.data, width, height, header.planes)?,
        };
        let screen = PlanarScreen::from_planes(width, height, viewport_mode, planes)?;
        debug!(
            "decoded {} {}x{}, {} planes, {} colours, mode {:#x}",
            form_type.id(),
            width,
            height,
            header.planes,
            palette.len(),
            viewport_mode.bits()
        );

        Ok(Self {
            form_type,
            header,
            palette,
            color_depth,
            screen,
        })
    }

    /// Decode the first ILBM or ACBM form anywhere in an IFF file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, IlbmError> {
        let root = parse(data)?;
        let form = root
            .forms(ILBM)
            .into_iter()
            .chain(root.forms(ACBM))
            .next()
            .ok_or(IlbmError::NoImageForm)?;
        Self::from_form(form)
    }
}
