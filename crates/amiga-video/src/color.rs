//! 8-bit RGB colour value.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Luma weights (ITU-R BT.601).
pub(crate) const LUMA_RED: f64 = 0.299;
pub(crate) const LUMA_GREEN: f64 = 0.587;
pub(crate) const LUMA_BLUE: f64 = 0.114;

/// An 8-bit RGB colour with alpha.
///
/// Equality and hashing look at the RGB channels only; alpha is carried
/// along for output but never distinguishes two colours.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Expand a 12-bit `0x0RGB` colour register value to 8 bits per channel.
    #[must_use]
    pub const fn from_rgb12(rgb12: u16) -> Self {
        let r = ((rgb12 >> 8) & 0xF) as u8;
        let g = ((rgb12 >> 4) & 0xF) as u8;
        let b = (rgb12 & 0xF) as u8;
        Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b)
    }

    /// Nearest 12-bit `0x0RGB` register value (each channel divided by 17).
    #[must_use]
    pub fn to_rgb12(self) -> u16 {
        let r = u16::from(self.r / 17);
        let g = u16::from(self.g / 17);
        let b = u16::from(self.b / 17);
        (r << 8) | (g << 4) | b
    }

    /// `0xRRGGBB`.
    #[must_use]
    pub fn packed(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    #[must_use]
    pub fn luma(self) -> f64 {
        LUMA_RED * f64::from(self.r) + LUMA_GREEN * f64::from(self.g) + LUMA_BLUE * f64::from(self.b)
    }

    /// Each channel shifted right by one (Extra-Half-Brite).
    #[must_use]
    pub fn half_bright(self) -> Self {
        Self::rgba(self.r >> 1, self.g >> 1, self.b >> 1, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.packed().hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.packed())
    }
}
