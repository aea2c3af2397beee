//! `CMAP`: colour registers, three bytes each.

use std::fmt;
use std::str::FromStr;

use amiga_video::{Color, Palette};

/// Resolution of the colour registers written to `CMAP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    /// OCS registers: four bits per channel, stored in the high nibble.
    #[default]
    Ocs4,
    /// Full eight bits per channel.
    Full8,
}

impl ColorDepth {
    fn encode(self, channel: u8) -> u8 {
        match self {
            Self::Ocs4 => (channel / 17) << 4,
            Self::Full8 => channel,
        }
    }

    fn decode(self, value: u8) -> u8 {
        match self {
            Self::Ocs4 => (value >> 4) * 17,
            Self::Full8 => value,
        }
    }
}

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ocs4 => "ocs4",
            Self::Full8 => "full8",
        })
    }
}

impl FromStr for ColorDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ocs4" | "4" => Ok(Self::Ocs4),
            "full8" | "8" => Ok(Self::Full8),
            other => Err(format!("unknown colour depth '{other}' (expected ocs4 or full8)")),
        }
    }
}

/// `CMAP` payload: one RGB triple per palette entry.
#[must_use]
pub fn encode_cmap(palette: &Palette, depth: ColorDepth) -> Vec<u8> {
    palette
        .colors()
        .iter()
        .flat_map(|c| [depth.encode(c.r), depth.encode(c.g), depth.encode(c.b)])
        .collect()
}

/// Colours of a `CMAP` payload and the register depth they were stored at.
///
/// A map whose every low nibble is zero is taken as 4-bit registers and
/// expanded to full range. A `Full8` map that happens to have only zero low
/// nibbles is therefore read as `Ocs4`; the file does not record which
/// was written. Trailing bytes short of a triple are ignored.
#[must_use]
pub fn decode_cmap(data: &[u8]) -> (Vec<Color>, ColorDepth) {
    let depth = if data.iter().all(|&v| v & 0x0F == 0) {
        ColorDepth::Ocs4
    } else {
        ColorDepth::Full8
    };
    let colors = data
        .chunks_exact(3)
        .map(|rgb| Color::rgb(depth.decode(rgb[0]), depth.decode(rgb[1]), depth.decode(rgb[2])))
        .collect();
    (colors, depth)
}
