//! Planar screens and chunky ↔ bitplane conversion.
//!
//! Bitplane `j` holds bit `j` of every pixel's colour index. Within a plane
//! each scanline is `pitch` bytes, the most significant bit of each byte
//! being the leftmost pixel. Scanlines are padded to a 16-pixel word.

use log::debug;

use crate::chunky::ChunkyImage;
use crate::error::{VideoError, zeroed};
use crate::palette::Palette;
use crate::viewport::ViewportMode;

/// OCS Denise has six bitplane shifters.
pub const MAX_BITPLANES: u8 = 6;

/// Bytes per bitplane scanline: width rounded up to a 16-bit word.
#[must_use]
pub fn pitch_for(width: usize) -> usize {
    width.div_ceil(16) * 2
}

/// A screen stored as separate, contiguous bitplanes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanarScreen {
    width: usize,
    height: usize,
    bit_depth: u8,
    viewport_mode: ViewportMode,
    planes: Vec<Vec<u8>>,
}

impl PlanarScreen {
    /// Screen with all planes cleared.
    pub fn new(
        width: usize,
        height: usize,
        bit_depth: u8,
        viewport_mode: ViewportMode,
    ) -> Result<Self, VideoError> {
        check_depth(bit_depth)?;
        let plane_len = pitch_for(width) * height;
        let planes = (0..bit_depth)
            .map(|_| zeroed(plane_len))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            width,
            height,
            bit_depth,
            viewport_mode,
            planes,
        })
    }

    /// Screen over existing plane buffers, each `pitch * height` bytes.
    pub fn from_planes(
        width: usize,
        height: usize,
        viewport_mode: ViewportMode,
        planes: Vec<Vec<u8>>,
    ) -> Result<Self, VideoError> {
        let bit_depth = u8::try_from(planes.len()).unwrap_or(u8::MAX);
        check_depth(bit_depth)?;
        let expected = pitch_for(width) * height;
        if let Some(plane) = planes.iter().find(|p| p.len() != expected) {
            return Err(VideoError::BufferSizeMismatch {
                expected,
                actual: plane.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bit_depth,
            viewport_mode,
            planes,
        })
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
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    #[must_use]
    pub fn pitch(&self) -> usize {
        pitch_for(self.width)
    }

    #[must_use]
    pub fn viewport_mode(&self) -> ViewportMode {
        self.viewport_mode
    }

    #[must_use]
    pub fn plane(&self, index: usize) -> &[u8] {
        &self.planes[index]
    }

    #[must_use]
    pub fn planes(&self) -> &[Vec<u8>] {
        &self.planes
    }

    /// One scanline of one plane.
    #[must_use]
    pub fn row(&self, plane: usize, y: usize) -> &[u8] {
        let pitch = self.pitch();
        &self.planes[plane][y * pitch..(y + 1) * pitch]
    }

    #[must_use]
    pub fn into_planes(self) -> Vec<Vec<u8>> {
        self.planes
    }

    /// Colour index of one pixel, assembled from every plane.
    #[must_use]
    pub fn pixel_index(&self, x: usize, y: usize) -> u8 {
        let byte = y * self.pitch() + x / 8;
        let mask = 0x80u8 >> (x % 8);
        let mut index = 0u8;
        for (j, plane) in self.planes.iter().enumerate() {
            if plane[byte] & mask != 0 {
                index |= 1 << j;
            }
        }
        index
    }

    /// Rebuild a chunky image indexing `palette`.
    pub fn to_chunky_image(&self, palette: Palette) -> Result<ChunkyImage, VideoError> {
        ChunkyImage::new(self.width, self.height, planar_to_chunky(self), palette)
    }
}

fn check_depth(bit_depth: u8) -> Result<(), VideoError> {
    if bit_depth == 0 || bit_depth > MAX_BITPLANES {
        return Err(VideoError::InvalidBitDepth(bit_depth));
    }
    Ok(())
}

/// Split a chunky image into `palette.bit_depth()` bitplanes.
///
/// Pixels are visited in raster order; padding bits at the end of each
/// scanline stay zero.
pub fn chunky_to_planar(
    image: &ChunkyImage,
    viewport_mode: ViewportMode,
) -> Result<PlanarScreen, VideoError> {
    let bit_depth = image.palette().bit_depth();
    let mut screen = PlanarScreen::new(image.width(), image.height(), bit_depth, viewport_mode)?;
    let pitch = screen.pitch();
    let width = image.width();
    debug!(
        "chunky to planar: {}x{} in {} planes, pitch {}",
        width,
        image.height(),
        bit_depth,
        pitch
    );

    for (i, &index) in image.indices().iter().enumerate() {
        let (y, x) = (i / width, i % width);
        let byte = y * pitch + x / 8;
        let mask = 0x80u8 >> (x % 8);
        for (j, plane) in screen.planes.iter_mut().enumerate() {
            if index & (1 << j) != 0 {
                plane[byte] |= mask;
            } else {
                plane[byte] &= !mask;
            }
        }
    }
    Ok(screen)
}

/// Recombine a screen's bitplanes into one index byte per pixel.
///
/// Padding bits are never read.
#[must_use]
pub fn planar_to_chunky(screen: &PlanarScreen) -> Vec<u8> {
    let width = screen.width;
    let pitch = screen.pitch();
    let mut indices = vec![0u8; width * screen.height];

    for (j, plane) in screen.planes.iter().enumerate() {
        let bit = 1u8 << j;
        for y in 0..screen.height {
            let row = &plane[y * pitch..(y + 1) * pitch];
            let out = &mut indices[y * width..(y + 1) * width];
            for (x, pixel) in out.iter_mut().enumerate() {
                if row[x / 8] & (0x80 >> (x % 8)) != 0 {
                    *pixel |= bit;
                }
            }
        }
    }
    indices
}
