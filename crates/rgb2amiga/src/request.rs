//! Encoding options.

use amiga_video::{ColorSpaceId, MAX_COLORS, ViewportMode};
use format_ilbm::{ColorDepth, FormType};

use crate::error::EncodeError;
use crate::geometry::Sizing;

/// One bitplane needs two colour registers.
pub const MIN_COLORS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// FORM ILBM with an interleaved `BODY`.
    #[default]
    Ilbm,
    /// FORM ACBM with contiguous planes in `ABIT`.
    Acbm,
    /// An RGB PNG of the reduced image and a GIMP palette beside it.
    PngWithPalette,
}

impl OutputFormat {
    pub(crate) fn form_type(self) -> Option<FormType> {
        match self {
            Self::Ilbm => Some(FormType::Ilbm),
            Self::Acbm => Some(FormType::Acbm),
            Self::PngWithPalette => None,
        }
    }
}

/// Order of the colour reduction steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pipeline {
    /// Quantize the truecolor image, then snap the palette onto the colour
    /// space.
    #[default]
    QuantizeThenSnap,
    /// Snap every pixel onto the colour space, then quantize.
    SnapThenQuantize,
}

/// Everything that controls one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    /// Palette size, `2..=64`.
    pub colors: usize,
    pub dither: bool,
    pub sizing: Sizing,
    pub format: OutputFormat,
    pub pipeline: Pipeline,
    pub color_space: ColorSpaceId,
    pub color_depth: ColorDepth,
    /// `None` picks resolution and interlace flags from the output size.
    pub viewport_mode: Option<ViewportMode>,
}

impl Default for EncodeRequest {
    fn default() -> Self {
        Self {
            colors: 32,
            dither: false,
            sizing: Sizing::default(),
            format: OutputFormat::default(),
            pipeline: Pipeline::default(),
            color_space: ColorSpaceId::Ocs,
            color_depth: ColorDepth::default(),
            viewport_mode: None,
        }
    }
}

impl EncodeRequest {
    /// Check every option before any work is done.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if !(MIN_COLORS..=MAX_COLORS).contains(&self.colors) {
            return Err(EncodeError::ColorCountOutOfRange {
                colors: self.colors,
                min: MIN_COLORS,
                max: MAX_COLORS,
            });
        }
        if let Some(mode) = self.viewport_mode {
            if !mode.palette_flags().is_empty() {
                return Err(EncodeError::UnsupportedViewportMode(mode));
            }
        }
        Ok(())
    }

    /// Viewport mode for an encoded image of this size.
    #[must_use]
    pub fn viewport_mode_for(&self, width: usize, height: usize) -> ViewportMode {
        self.viewport_mode
            .unwrap_or_else(|| ViewportMode::auto_select(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_command_line() {
        let request = EncodeRequest::default();
        assert_eq!(request.colors, 32);
        assert!(!request.dither);
        assert_eq!(request.sizing, Sizing::Fit { width: 320, height: 256 });
        assert!(request.validate().is_ok());
    }

    #[test]
    fn colour_count_bounds() {
        for colors in [0, 1, 65, 256] {
            let request = EncodeRequest {
                colors,
                ..EncodeRequest::default()
            };
            assert!(matches!(
                request.validate(),
                Err(EncodeError::ColorCountOutOfRange { min: 2, max: 64, .. })
            ));
        }
        for colors in [2, 64] {
            let request = EncodeRequest {
                colors,
                ..EncodeRequest::default()
            };
            assert!(request.validate().is_ok());
        }
    }

    #[test]
    fn ham_and_ehb_are_rejected() {
        let request = EncodeRequest {
            viewport_mode: Some(ViewportMode::HIRES | ViewportMode::EXTRA_HALFBRITE),
            ..EncodeRequest::default()
        };
        assert!(matches!(
            request.validate(),
            Err(EncodeError::UnsupportedViewportMode(_))
        ));
    }

    #[test]
    fn viewport_mode_defaults_to_page_size() {
        let request = EncodeRequest::default();
        assert_eq!(request.viewport_mode_for(320, 256), ViewportMode::LOWRES);
        assert_eq!(
            request.viewport_mode_for(640, 512),
            ViewportMode::HIRES | ViewportMode::LACE
        );
        let forced = EncodeRequest {
            viewport_mode: Some(ViewportMode::HIRES),
            ..EncodeRequest::default()
        };
        assert_eq!(forced.viewport_mode_for(320, 256), ViewportMode::HIRES);
    }
}
