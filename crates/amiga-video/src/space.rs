//! Fixed hardware colour spaces.
//!
//! A colour space is the set of colours a target can actually display.
//! Image palettes are snapped onto one before encoding. The registry is
//! built by the caller and passed in with each request.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::VideoError;
use crate::palette::Palette;

/// OCS colour registers hold four bits per channel.
const OCS_CHANNEL_MAX: u8 = 15;

/// Reduced OCS set, as `0x0RGB` register values. 0xAAA appears twice.
const OCS_REDUCED: [u16; 32] = [
    0x000, 0xAAA, 0xE00, 0xA00, 0xD80, 0xFE0, 0x8F0, 0x080, 0x0B0, 0x0DD, 0x0AF, 0x07C, 0x00F,
    0x70F, 0xC0E, 0xC08, 0x620, 0xE52, 0xA52, 0xFCA, 0x333, 0x444, 0x555, 0x666, 0x777, 0x888,
    0x999, 0xAAA, 0xCCC, 0xDDD, 0xEEE, 0xFFF,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpaceId {
    /// All 4096 OCS colours.
    Ocs,
    /// 32 hand-picked OCS colours.
    OcsReduced,
}

impl fmt::Display for ColorSpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ocs => "ocs",
            Self::OcsReduced => "ocs-reduced",
        })
    }
}

impl FromStr for ColorSpaceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ocs" | "amiga" => Ok(Self::Ocs),
            "ocs-reduced" | "amiga_reduced" => Ok(Self::OcsReduced),
            other => Err(format!("unknown colour space: {other}")),
        }
    }
}

/// Every 12-bit OCS colour, red-major.
#[must_use]
pub fn ocs_space() -> Palette {
    let mut colors = Vec::with_capacity(4096);
    for r in 0..=OCS_CHANNEL_MAX {
        for g in 0..=OCS_CHANNEL_MAX {
            for b in 0..=OCS_CHANNEL_MAX {
                colors.push(Color::rgb(r * 17, g * 17, b * 17));
            }
        }
    }
    Palette::from_vec(colors)
}

#[must_use]
pub fn ocs_reduced_space() -> Palette {
    let colors = OCS_REDUCED.iter().map(|&rgb12| Color::from_rgb12(rgb12)).collect();
    Palette::from_vec(colors)
}

/// Immutable set of named colour spaces.
#[derive(Debug, Clone, Default)]
pub struct ColorSpaceRegistry {
    spaces: Vec<(ColorSpaceId, Palette)>,
}

impl ColorSpaceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the OCS and reduced OCS spaces.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with_space(ColorSpaceId::Ocs, ocs_space())
            .with_space(ColorSpaceId::OcsReduced, ocs_reduced_space())
    }

    /// Add or replace a space.
    #[must_use]
    pub fn with_space(mut self, id: ColorSpaceId, palette: Palette) -> Self {
        self.spaces.retain(|(existing, _)| *existing != id);
        self.spaces.push((id, palette));
        self
    }

    pub fn get(&self, id: ColorSpaceId) -> Result<&Palette, VideoError> {
        self.spaces
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, palette)| palette)
            .ok_or(VideoError::UnknownColorSpace(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ocs_space_has_4096_register_colours() {
        let space = ocs_space();
        assert_eq!(space.len(), 4096);
        assert_eq!(space.get(0), Some(Color::BLACK));
        assert_eq!(space.get(4095), Some(Color::WHITE));
        assert!(space.colors().iter().all(|c| c.r % 17 == 0 && c.g % 17 == 0 && c.b % 17 == 0));
    }

    #[test]
    fn ocs_nearest_rounds_to_register_values() {
        let space = ocs_space();
        assert_eq!(space.nearest_color(Color::rgb(250, 2, 1)), Color::rgb(255, 0, 0));
        assert_eq!(space.nearest_color(Color::rgb(0x88, 0x88, 0x88)), Color::rgb(0x88, 0x88, 0x88));
    }

    #[test]
    fn reduced_space_matches_register_table() {
        let space = ocs_reduced_space();
        assert_eq!(space.len(), 32);
        assert_eq!(space.get(2), Some(Color::rgb(0xEE, 0x00, 0x00)));
        assert_eq!(space.get(31), Some(Color::WHITE));
    }

    #[test]
    fn registry_lookup() {
        let registry = ColorSpaceRegistry::builtin();
        assert_eq!(registry.get(ColorSpaceId::Ocs).map(Palette::len), Ok(4096));
        assert_eq!(registry.get(ColorSpaceId::OcsReduced).map(Palette::len), Ok(32));
        assert_eq!(
            ColorSpaceRegistry::new().get(ColorSpaceId::Ocs),
            Err(VideoError::UnknownColorSpace(ColorSpaceId::Ocs))
        );
    }

    #[test]
    fn replacing_a_space() {
        let custom = Palette::from_colors(vec![Color::BLACK, Color::WHITE]).expect("valid");
        let registry = ColorSpaceRegistry::builtin().with_space(ColorSpaceId::Ocs, custom.clone());
        assert_eq!(registry.get(ColorSpaceId::Ocs), Ok(&custom));
    }

    #[test]
    fn ids_parse_from_text() {
        assert_eq!("ocs".parse::<ColorSpaceId>(), Ok(ColorSpaceId::Ocs));
        assert_eq!("AMIGA_REDUCED".parse::<ColorSpaceId>(), Ok(ColorSpaceId::OcsReduced));
        assert!("ega".parse::<ColorSpaceId>().is_err());
    }
}
