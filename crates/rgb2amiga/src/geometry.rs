//! Output geometry: target size selection and point resampling.
//!
//! Bitplane rows are fetched in 16-bit words, so every encoded width is a
//! multiple of 16.

use std::fmt;
use std::str::FromStr;

use amiga_video::WIDTH_ALIGN;
use log::{debug, warn};

use crate::error::EncodeError;
use crate::raster::Raster;

/// How the input is sized before quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Scale to fit the box keeping the aspect ratio, then round the width
    /// down to a multiple of 16. Written `WxH`.
    Fit { width: usize, height: usize },
    /// Exactly this size, aspect ratio ignored. Written `WxH!`.
    Stretch { width: usize, height: usize },
    /// The input size, unchanged.
    Original,
}

impl Default for Sizing {
    fn default() -> Self {
        Self::Fit {
            width: 320,
            height: 256,
        }
    }
}

impl Sizing {
    /// Output dimensions for a `src_width`×`src_height` input.
    pub fn target_size(self, src_width: usize, src_height: usize) -> Result<(usize, usize), EncodeError> {
        match self {
            Self::Fit { width, height } => fit(src_width, src_height, width, height),
            Self::Stretch { width, height } => aligned(width).map(|w| (w, height)),
            Self::Original => aligned(src_width).map(|w| (w, src_height)),
        }
    }

    /// Resample `raster` to the target size. An input already at that size
    /// is returned as is.
    pub fn apply(self, raster: Raster) -> Result<Raster, EncodeError> {
        let (width, height) = self.target_size(raster.width(), raster.height())?;
        if (width, height) == (raster.width(), raster.height()) {
            return Ok(raster);
        }
        debug!(
            "resampling {}x{} to {}x{}",
            raster.width(),
            raster.height(),
            width,
            height
        );
        resample(&raster, width, height)
    }
}

fn aligned(width: usize) -> Result<usize, EncodeError> {
    if width == 0 || width % WIDTH_ALIGN != 0 {
        return Err(EncodeError::InvalidWidth { width });
    }
    Ok(width)
}

fn scaled(len: usize, num: usize, den: usize) -> usize {
    // Round half up, never below one pixel.
    ((len * num * 2 + den) / (den * 2)).max(1)
}

fn fit(
    src_width: usize,
    src_height: usize,
    box_width: usize,
    box_height: usize,
) -> Result<(usize, usize), EncodeError> {
    // The limiting side is whichever scales by the smaller factor.
    let (width, height) = if box_width * src_height <= box_height * src_width {
        (box_width, scaled(src_height, box_width, src_width))
    } else {
        (scaled(src_width, box_height, src_height), box_height)
    };

    let rounded = width - width % WIDTH_ALIGN;
    if rounded == 0 {
        return Err(EncodeError::InvalidWidth { width });
    }
    if rounded == width {
        return Ok((width, height));
    }
    let height = scaled(src_height, rounded, src_width);
    warn!("width {width} is not a multiple of {WIDTH_ALIGN}; using {rounded}x{height}");
    Ok((rounded, height))
}

/// Nearest-neighbour resampling, sampling each source pixel at its centre.
pub fn resample(raster: &Raster, width: usize, height: usize) -> Result<Raster, EncodeError> {
    let len = width * height;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| EncodeError::Allocation { bytes: len * 4 })?;
    for y in 0..height {
        let sy = (2 * y + 1) * raster.height() / (2 * height);
        let row = raster.row(sy);
        for x in 0..width {
            let sx = (2 * x + 1) * raster.width() / (2 * width);
            pixels.push(row[sx]);
        }
    }
    Raster::new(width, height, pixels)
}

impl fmt::Display for Sizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fit { width, height } => write!(f, "{width}x{height}"),
            Self::Stretch { width, height } => write!(f, "{width}x{height}!"),
            Self::Original => f.write_str("original"),
        }
    }
}

impl FromStr for Sizing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("original") {
            return Ok(Self::Original);
        }
        let (dims, stretch) = match s.strip_suffix('!') {
            Some(dims) => (dims, true),
            None => (s, false),
        };
        let parse = |part: &str| -> Result<usize, String> {
            match part.trim().parse::<usize>() {
                Ok(0) | Err(_) => Err(format!("invalid size '{s}': expected WxH, WxH! or original")),
                Ok(n) => Ok(n),
            }
        };
        let (w, h) = dims
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("invalid size '{s}': expected WxH, WxH! or original"))?;
        let (width, height) = (parse(w)?, parse(h)?);
        Ok(if stretch {
            Self::Stretch { width, height }
        } else {
            Self::Fit { width, height }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amiga_video::Color;
    use proptest::prelude::*;

    fn gradient(width: usize, height: usize) -> Raster {
        let pixels = (0..width * height)
            .map(|i| Color::rgb((i % width) as u8, (i / width) as u8, 0))
            .collect();
        Raster::new(width, height, pixels).expect("valid")
    }

    #[test]
    fn parses_each_form() {
        assert_eq!("320x256".parse::<Sizing>(), Ok(Sizing::Fit { width: 320, height: 256 }));
        assert_eq!("640X512!".parse::<Sizing>(), Ok(Sizing::Stretch { width: 640, height: 512 }));
        assert_eq!("Original".parse::<Sizing>(), Ok(Sizing::Original));
        assert!("320".parse::<Sizing>().is_err());
        assert!("0x256".parse::<Sizing>().is_err());
        assert!("axb!".parse::<Sizing>().is_err());
        assert_eq!(Sizing::Stretch { width: 16, height: 9 }.to_string(), "16x9!");
    }

    #[test]
    fn fit_rounds_317_down_to_304() {
        let sizing = Sizing::Fit { width: 317, height: 400 };
        assert_eq!(sizing.target_size(317, 200).expect("valid"), (304, 192));
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        let sizing = Sizing::default();
        assert_eq!(sizing.target_size(640, 512).expect("valid"), (320, 256));
        assert_eq!(sizing.target_size(640, 400).expect("valid"), (320, 200));
        // Height-limited: 1000x1000 fits as 256x256.
        assert_eq!(sizing.target_size(1000, 1000).expect("valid"), (256, 256));
    }

    #[test]
    fn fit_too_narrow_is_invalid() {
        let sizing = Sizing::Fit { width: 320, height: 10 };
        assert!(matches!(
            sizing.target_size(10, 1000),
            Err(EncodeError::InvalidWidth { width: 1 })
        ));
    }

    #[test]
    fn forced_sizes_require_alignment() {
        let stretch = Sizing::Stretch { width: 317, height: 200 };
        assert!(matches!(
            stretch.target_size(640, 480),
            Err(EncodeError::InvalidWidth { width: 317 })
        ));
        assert!(matches!(
            Sizing::Original.target_size(317, 200),
            Err(EncodeError::InvalidWidth { width: 317 })
        ));
        assert_eq!(Sizing::Original.target_size(320, 7).expect("valid"), (320, 7));
        let stretch = Sizing::Stretch { width: 32, height: 5 };
        assert_eq!(stretch.target_size(3, 1000).expect("valid"), (32, 5));
    }

    #[test]
    fn resample_picks_centre_pixels() {
        let src = gradient(4, 2);
        let halved = resample(&src, 2, 1).expect("valid");
        assert_eq!(halved.pixels(), &[Color::rgb(1, 1, 0), Color::rgb(3, 1, 0)]);
        let doubled = resample(&src, 8, 4).expect("valid");
        assert_eq!(doubled.pixel(7, 3), Color::rgb(3, 1, 0));
        assert_eq!(doubled.pixel(0, 0), Color::rgb(0, 0, 0));
    }

    #[test]
    fn apply_keeps_matching_input() {
        let src = gradient(32, 8);
        let out = Sizing::Original.apply(src.clone()).expect("valid");
        assert_eq!(out, src);
    }

    proptest! {
        #[test]
        fn fit_output_is_aligned_and_inside_the_box(
            src_w in 1usize..2000,
            src_h in 1usize..2000,
            box_w in 16usize..1000,
            box_h in 1usize..1000,
        ) {
            let sizing = Sizing::Fit { width: box_w, height: box_h };
            if let Ok((w, h)) = sizing.target_size(src_w, src_h) {
                prop_assert_eq!(w % 16, 0);
                prop_assert!(w <= box_w);
                prop_assert!(h <= box_h.max(1));
                prop_assert!(h >= 1);
            }
        }
    }
}
