//! Chunky (one byte per pixel) indexed images.

use std::collections::HashMap;

use crate::color::Color;
use crate::error::VideoError;
use crate::palette::Palette;

/// Bitplane DMA fetches 16-bit words, so scanlines are whole words wide.
pub const WIDTH_ALIGN: usize = 16;

/// A width×height buffer of palette indices plus the palette they index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkyImage {
    width: usize,
    height: usize,
    indices: Vec<u8>,
    palette: Palette,
}

impl ChunkyImage {
    pub fn new(
        width: usize,
        height: usize,
        indices: Vec<u8>,
        palette: Palette,
    ) -> Result<Self, VideoError> {
        if width % WIDTH_ALIGN != 0 {
            return Err(VideoError::InvalidWidth { width });
        }
        let expected = width * height;
        if indices.len() != expected {
            return Err(VideoError::BufferSizeMismatch {
                expected,
                actual: indices.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|&&i| usize::from(i) >= palette.len()) {
            return Err(VideoError::IndexOutOfRange {
                index,
                len: palette.len(),
            });
        }
        Ok(Self {
            width,
            height,
            indices,
            palette,
        })
    }

    /// Index every pixel by exact lookup in `palette`.
    ///
    /// A pixel missing from the palette means the quantizer produced more
    /// colours than the palette was derived from.
    pub fn index_exact(
        width: usize,
        height: usize,
        pixels: &[Color],
        palette: Palette,
    ) -> Result<Self, VideoError> {
        let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(palette.len());
        for (i, c) in palette.colors().iter().enumerate().rev() {
            let Ok(index) = u8::try_from(i) else {
                return Err(VideoError::TooManyColors {
                    found: palette.len(),
                    max: usize::from(u8::MAX) + 1,
                });
            };
            lookup.insert(c.packed(), index);
        }

        let mut indices = Vec::new();
        indices
            .try_reserve_exact(pixels.len())
            .map_err(|_| VideoError::Allocation { bytes: pixels.len() })?;
        for &color in pixels {
            match lookup.get(&color.packed()) {
                Some(&index) => indices.push(index),
                None => return Err(VideoError::PaletteTooSmall { color }),
            }
        }
        Self::new(width, height, indices, palette)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn index_at(&self, x: usize, y: usize) -> u8 {
        self.indices[y * self.width + x]
    }

    /// Swap in a palette of the same length, e.g. after snapping the colours
    /// onto a hardware colour space. Indices are unchanged.
    pub fn with_palette(self, palette: Palette) -> Result<Self, VideoError> {
        if palette.len() != self.palette.len() {
            return Err(VideoError::PaletteLengthMismatch {
                expected: self.palette.len(),
                actual: palette.len(),
            });
        }
        Ok(Self { palette, ..self })
    }

    /// Resolve every index to its palette colour.
    #[must_use]
    pub fn to_rgb(&self) -> Vec<Color> {
        self.indices
            .iter()
            .map(|&i| self.palette.colors()[usize::from(i)])
            .collect()
    }
}
