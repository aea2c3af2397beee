//! Truecolor pixel buffers.

use std::collections::HashMap;

use amiga_video::Color;

use crate::error::EncodeError;

/// A width×height grid of RGBA pixels in raster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Raster {
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self, EncodeError> {
        if width == 0 || height == 0 {
            return Err(EncodeError::EmptyImage { width, height });
        }
        let expected = width * height;
        if pixels.len() != expected {
            return Err(EncodeError::RasterSizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// One colour everywhere.
    pub fn filled(width: usize, height: usize, color: Color) -> Result<Self, EncodeError> {
        Self::new(width, height, vec![color; width * height])
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
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    #[must_use]
    pub fn row(&self, y: usize) -> &[Color] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Replace every colour through `f`, calling it once per distinct colour.
    #[must_use]
    pub fn map_colors(&self, mut f: impl FnMut(Color) -> Color) -> Self {
        let mut cache: HashMap<u32, Color> = HashMap::new();
        let pixels = self
            .pixels
            .iter()
            .map(|&c| *cache.entry(c.packed()).or_insert_with(|| f(c)))
            .collect();
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
