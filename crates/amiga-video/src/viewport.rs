//! Viewport mode flags, as stored in an ILBM `CAMG` chunk.

use bitflags::bitflags;

bitflags! {
    /// Amiga viewport mode register bits.
    ///
    /// Unknown bits are retained so a mode read from a file writes back
    /// unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewportMode: u32 {
        const LACE = 0x0004;
        const EXTRA_HALFBRITE = 0x0080;
        const HOLD_AND_MODIFY = 0x0800;
        const HIRES = 0x8000;
        const SUPERHIRES = 0x8020;
        const _ = !0;
    }
}

/// Widest lowres page including maximum overscan.
const LOWRES_MAX_WIDTH: usize = 368;
/// Widest hires page including maximum overscan.
const HIRES_MAX_WIDTH: usize = 736;
/// Tallest non-interlaced PAL page including overscan.
const NON_LACED_MAX_HEIGHT: usize = 290;

impl ViewportMode {
    /// Lowres, non-interlaced.
    pub const LOWRES: Self = Self::empty();

    #[must_use]
    pub fn is_laced(self) -> bool {
        self.contains(Self::LACE)
    }

    #[must_use]
    pub fn is_extra_halfbrite(self) -> bool {
        self.contains(Self::EXTRA_HALFBRITE)
    }

    #[must_use]
    pub fn is_hold_and_modify(self) -> bool {
        self.contains(Self::HOLD_AND_MODIFY)
    }

    #[must_use]
    pub fn is_hires(self) -> bool {
        self.contains(Self::HIRES)
    }

    #[must_use]
    pub fn is_super_hires(self) -> bool {
        self.contains(Self::SUPERHIRES)
    }

    /// Only the HAM and EHB bits.
    #[must_use]
    pub fn palette_flags(self) -> Self {
        self & (Self::HOLD_AND_MODIFY | Self::EXTRA_HALFBRITE)
    }

    /// Resolution flags suitable for a page of the given size.
    #[must_use]
    pub fn auto_select(width: usize, height: usize) -> Self {
        let mut mode = Self::LOWRES;
        if width > HIRES_MAX_WIDTH {
            mode |= Self::SUPERHIRES;
        } else if width > LOWRES_MAX_WIDTH {
            mode |= Self::HIRES;
        }
        if height > NON_LACED_MAX_HEIGHT {
            mode |= Self::LACE;
        }
        mode
    }

    /// Smallest integer scale that shows this mode's pixels at the correct
    /// aspect ratio on a square-pixel display.
    #[must_use]
    pub fn lowres_pixel_scale_factor(self) -> usize {
        if self.is_super_hires() {
            4
        } else if self.is_hires() {
            if self.is_laced() { 1 } else { 2 }
        } else if self.is_laced() {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_select_by_page_size() {
        assert_eq!(ViewportMode::auto_select(320, 256), ViewportMode::LOWRES);
        assert_eq!(ViewportMode::auto_select(640, 256), ViewportMode::HIRES);
        assert_eq!(
            ViewportMode::auto_select(640, 512),
            ViewportMode::HIRES | ViewportMode::LACE
        );
        assert_eq!(ViewportMode::auto_select(1280, 200), ViewportMode::SUPERHIRES);
        assert_eq!(ViewportMode::auto_select(368, 290), ViewportMode::LOWRES);
    }

    #[test]
    fn super_hires_implies_hires() {
        let mode = ViewportMode::SUPERHIRES;
        assert!(mode.is_hires());
        assert!(mode.is_super_hires());
        assert!(!ViewportMode::HIRES.is_super_hires());
    }

    #[test]
    fn palette_flags_strip_resolution() {
        let mode = ViewportMode::HIRES | ViewportMode::HOLD_AND_MODIFY | ViewportMode::LACE;
        assert_eq!(mode.palette_flags(), ViewportMode::HOLD_AND_MODIFY);
    }

    #[test]
    fn unknown_bits_survive() {
        let mode = ViewportMode::from_bits_retain(0x0001_1804);
        assert_eq!(mode.bits(), 0x0001_1804);
        assert!(mode.is_hold_and_modify());
        assert!(mode.is_laced());
    }

    #[test]
    fn scale_factors() {
        assert_eq!(ViewportMode::LOWRES.lowres_pixel_scale_factor(), 1);
        assert_eq!(ViewportMode::HIRES.lowres_pixel_scale_factor(), 2);
        assert_eq!((ViewportMode::HIRES | ViewportMode::LACE).lowres_pixel_scale_factor(), 1);
        assert_eq!(ViewportMode::LACE.lowres_pixel_scale_factor(), 2);
        assert_eq!(ViewportMode::SUPERHIRES.lowres_pixel_scale_factor(), 4);
    }
}
