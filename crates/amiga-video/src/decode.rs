//! Colour index → RGB resolution, including Hold-and-Modify and
//! Extra-Half-Brite.

use crate::color::Color;
use crate::palette::Palette;
use crate::planar::{PlanarScreen, planar_to_chunky};
use crate::viewport::ViewportMode;

/// Colour registers addressable by a screen of `bit_depth` planes.
///
/// Registers beyond the palette read as black. In EHB mode the upper half
/// of the registers mirrors the lower half at half brightness.
#[must_use]
pub fn expand_palette(palette: &Palette, bit_depth: u8, mode: ViewportMode) -> Vec<Color> {
    let count = 1usize << bit_depth;
    let mut colors: Vec<Color> = (0..count)
        .map(|i| palette.get(i).unwrap_or(Color::BLACK))
        .collect();
    if mode.is_extra_halfbrite() && bit_depth >= 2 {
        let half = count / 2;
        for i in 0..half {
            colors[half + i] = colors[i].half_bright();
        }
    }
    colors
}

/// Decode one HAM scanline of chunky values.
///
/// The top two bits of each `bit_depth`-bit value select the operation:
/// `00` loads a colour register, `01` modifies blue, `10` red and `11`
/// green of the previous pixel. The remaining bits are the register index
/// or the new channel level. Each row starts from register 0.
pub fn decode_ham_row(row: &[u8], bit_depth: u8, registers: &[Color], out: &mut Vec<Color>) {
    debug_assert!(bit_depth >= 3, "HAM needs at least one data bit");
    let data_bits = bit_depth - 2;
    let data_mask = (1u8 << data_bits) - 1;
    let level_shift = 8 - data_bits;
    let register = |i: usize| registers.get(i).copied().unwrap_or(Color::BLACK);

    let mut previous = register(0);
    for &value in row {
        let control = (value >> data_bits) & 0x3;
        let data = value & data_mask;
        let level = data << level_shift;
        let color = match control {
            0 => register(usize::from(data)),
            1 => Color { b: level, ..previous },
            2 => Color { r: level, ..previous },
            _ => Color { g: level, ..previous },
        };
        out.push(color);
        previous = color;
    }
}

/// Decode a whole HAM image, row by row.
#[must_use]
pub fn decode_ham(
    indices: &[u8],
    width: usize,
    bit_depth: u8,
    registers: &[Color],
) -> Vec<Color> {
    let mut out = Vec::with_capacity(indices.len());
    if width == 0 {
        return out;
    }
    for row in indices.chunks(width) {
        decode_ham_row(row, bit_depth, registers, &mut out);
    }
    out
}

impl PlanarScreen {
    /// Resolve every pixel to RGB using the screen's viewport mode.
    #[must_use]
    pub fn to_rgb(&self, palette: &Palette) -> Vec<Color> {
        let indices = planar_to_chunky(self);
        let mode = self.viewport_mode();
        if mode.is_hold_and_modify() && self.bit_depth() >= 3 {
            let registers = expand_palette(palette, self.bit_depth() - 2, ViewportMode::LOWRES);
            return decode_ham(&indices, self.width(), self.bit_depth(), &registers);
        }
        let registers = expand_palette(palette, self.bit_depth(), mode);
        indices
            .iter()
            .map(|&i| registers[usize::from(i)])
            .collect()
    }
}
