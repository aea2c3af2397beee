//! Ordered colour palettes and nearest-colour search.

use std::collections::HashSet;
use std::fmt::Write;

use log::debug;

use crate::color::Color;
use crate::error::VideoError;
use crate::metric;

/// Six bitplanes address at most 64 colour registers.
pub const MAX_COLORS: usize = 64;

/// An ordered list of colours.
///
/// Palettes built from an image's unique colours are deduplicated and kept
/// in canonical order (see [`Palette::from_unique_colors`]). Palettes built
/// with [`Palette::from_colors`] keep the caller's order and may repeat
/// entries, which happens after snapping onto a coarser colour space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Palette in the given order.
    pub fn from_colors(colors: Vec<Color>) -> Result<Self, VideoError> {
        if colors.is_empty() {
            return Err(VideoError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub(crate) fn from_vec(colors: Vec<Color>) -> Self {
        debug_assert!(!colors.is_empty());
        Self { colors }
    }

    /// Deduplicated palette of every colour in `pixels`, in canonical order.
    pub fn from_unique_colors<I>(pixels: I) -> Result<Self, VideoError>
    where
        I: IntoIterator<Item = Color>,
    {
        Self::from_unique_colors_with_limit(pixels, MAX_COLORS)
    }

    /// As [`Palette::from_unique_colors`], failing when more than `max`
    /// distinct colours are present.
    pub fn from_unique_colors_with_limit<I>(pixels: I, max: usize) -> Result<Self, VideoError>
    where
        I: IntoIterator<Item = Color>,
    {
        let mut seen = HashSet::new();
        let mut colors = Vec::new();
        for pixel in pixels {
            if seen.insert(pixel.packed()) {
                colors.push(Color::rgb(pixel.r, pixel.g, pixel.b));
            }
        }
        if colors.len() > max {
            return Err(VideoError::TooManyColors {
                found: colors.len(),
                max,
            });
        }
        if colors.is_empty() {
            return Err(VideoError::EmptyPalette);
        }
        canonical_sort(&mut colors);
        debug!("built palette of {} unique colours", colors.len());
        Ok(Self { colors })
    }

    /// Add filler colours until the palette has at least `min_len` entries,
    /// then restore canonical order. A single-colour image still needs two
    /// registers to be encodable with one bitplane.
    #[must_use]
    pub fn padded_to(self, min_len: usize) -> Self {
        if self.colors.len() >= min_len {
            return self;
        }
        let mut colors = self.colors;
        let fillers = [Color::BLACK, Color::WHITE]
            .into_iter()
            .chain((1..15u8).map(|n| Color::rgb(n * 17, n * 17, n * 17)));
        for filler in fillers {
            if colors.len() >= min_len {
                break;
            }
            if !colors.contains(&filler) {
                colors.push(filler);
            }
        }
        canonical_sort(&mut colors);
        Self { colors }
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Position of the first entry equal to `color`.
    #[must_use]
    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Bitplanes needed to address every entry: `ceil(log2(len))`, at least 1.
    #[must_use]
    pub fn bit_depth(&self) -> u8 {
        let mut depth = 1u8;
        while (1usize << depth) < self.colors.len() {
            depth += 1;
        }
        depth
    }

    /// Index of the entry closest to `target`. The first of several
    /// equidistant entries wins.
    #[must_use]
    pub fn nearest_index(&self, target: Color) -> usize {
        let mut best = 0;
        let mut best_distance = f64::MAX;
        for (i, &c) in self.colors.iter().enumerate() {
            let d = metric::distance(c, target);
            if d < best_distance {
                best_distance = d;
                best = i;
            }
        }
        best
    }

    #[must_use]
    pub fn nearest_color(&self, target: Color) -> Color {
        self.colors[self.nearest_index(target)]
    }

    /// Snap every entry onto the closest colour of `space`, keeping length
    /// and order.
    #[must_use]
    pub fn map_onto(&self, space: &Palette) -> Palette {
        Palette {
            colors: self.colors.iter().map(|&c| space.nearest_color(c)).collect(),
        }
    }

    /// GIMP palette text: header lines, then one `R G B` line per entry.
    #[must_use]
    pub fn to_gimp_palette(&self, name: &str) -> String {
        let mut out = String::new();
        out.push_str("GIMP Palette\n");
        let _ = writeln!(out, "Name: {name}");
        out.push_str("Columns: 16\n");
        out.push_str("#\n");
        for c in &self.colors {
            let _ = writeln!(out, "{} {} {}", c.r, c.g, c.b);
        }
        out
    }
}

/// Sort by luma (darkest first), then move the lightest entry to index 1.
///
/// Index 0 stays the darkest colour so the border and background come out
/// black, and paint programs expect the lightest colour in register 1.
fn canonical_sort(colors: &mut [Color]) {
    colors.sort_by(|a, b| {
        a.luma()
            .total_cmp(&b.luma())
            .then_with(|| a.packed().cmp(&b.packed()))
    });
    if colors.len() >= 2 {
        let last = colors.len() - 1;
        colors.swap(1, last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn distinct(n: usize) -> Vec<Color> {
        (0..n)
            .map(|i| Color::rgb((i * 4) as u8, (255 - i * 3) as u8, (i * 7 % 256) as u8))
            .collect()
    }

    #[test]
    fn dedupes_by_rgb() {
        let pixels = [
            Color::rgb(1, 2, 3),
            Color::rgba(1, 2, 3, 0),
            Color::rgb(200, 0, 0),
            Color::rgb(1, 2, 3),
        ];
        let palette = Palette::from_unique_colors(pixels).expect("valid");
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn sixty_four_colours_fit() {
        let palette = Palette::from_unique_colors(distinct(64)).expect("valid");
        assert_eq!(palette.len(), 64);
        assert_eq!(palette.bit_depth(), 6);
    }

    #[test]
    fn sixty_five_colours_overflow() {
        assert_eq!(
            Palette::from_unique_colors(distinct(65)),
            Err(VideoError::TooManyColors { found: 65, max: 64 })
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            Palette::from_unique_colors(Vec::<Color>::new()),
            Err(VideoError::EmptyPalette)
        );
        assert_eq!(Palette::from_colors(Vec::new()), Err(VideoError::EmptyPalette));
    }

    #[test]
    fn canonical_order_darkest_first_lightest_second() {
        let pixels = [
            Color::rgb(128, 128, 128),
            Color::WHITE,
            Color::rgb(64, 64, 64),
            Color::BLACK,
        ];
        let palette = Palette::from_unique_colors(pixels).expect("valid");
        assert_eq!(
            palette.colors(),
            &[
                Color::BLACK,
                Color::WHITE,
                Color::rgb(128, 128, 128),
                Color::rgb(64, 64, 64),
            ]
        );
    }

    #[test]
    fn two_colour_palette_is_plain_luma_order() {
        let palette = Palette::from_unique_colors([Color::WHITE, Color::BLACK]).expect("valid");
        assert_eq!(palette.colors(), &[Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn nearest_colour_prefers_lower_index_on_tie() {
        // Snapped palettes can hold the same colour twice; the first copy wins.
        let blue = Color::rgb(0, 0, 255);
        let palette = Palette::from_colors(vec![Color::BLACK, blue, blue]).expect("valid");
        assert_eq!(palette.nearest_index(Color::rgb(0, 0, 250)), 1);

        let twins = Palette::from_colors(vec![Color::WHITE, Color::WHITE]).expect("valid");
        assert_eq!(twins.nearest_index(Color::rgb(3, 4, 5)), 0);
    }

    #[test]
    fn nearest_colour_breaks_metric_ties_by_index() {
        let (below, above) = (Color::rgb(0, 0, 0), Color::rgb(16, 16, 16));
        let target = Color::rgb(8, 8, 8);
        assert_eq!(
            metric::distance(below, target).to_bits(),
            metric::distance(above, target).to_bits()
        );

        let palette = Palette::from_colors(vec![Color::WHITE, above, below]).expect("valid");
        assert_eq!(palette.nearest_index(target), 1);
        let palette = Palette::from_colors(vec![Color::WHITE, below, above]).expect("valid");
        assert_eq!(palette.nearest_index(target), 1);
        assert_eq!(palette.nearest_color(target), below);
    }

    #[test]
    fn nearest_colour_uses_perceptual_metric() {
        let palette = Palette::from_colors(vec![Color::BLACK, Color::rgb(0, 0, 255), Color::rgb(0, 255, 0)])
            .expect("valid");
        assert_eq!(palette.nearest_color(Color::rgb(10, 10, 90)), Color::BLACK);
        assert_eq!(palette.nearest_color(Color::rgb(20, 220, 30)), Color::rgb(0, 255, 0));
    }

    #[test]
    fn map_onto_keeps_length_and_order() {
        let source = Palette::from_colors(vec![Color::rgb(250, 3, 3), Color::rgb(2, 2, 240)])
            .expect("valid");
        let space = Palette::from_colors(vec![Color::BLACK, Color::rgb(0, 0, 255), Color::rgb(255, 0, 0)])
            .expect("valid");
        let mapped = source.map_onto(&space);
        assert_eq!(mapped.colors(), &[Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)]);
    }

    #[test]
    fn padding_single_colour_adds_black() {
        let palette = Palette::from_unique_colors([Color::rgb(255, 0, 0)])
            .expect("valid")
            .padded_to(2);
        assert_eq!(palette.colors(), &[Color::BLACK, Color::rgb(255, 0, 0)]);
    }

    #[test]
    fn padding_black_adds_white() {
        let palette = Palette::from_unique_colors([Color::BLACK])
            .expect("valid")
            .padded_to(2);
        assert_eq!(palette.colors(), &[Color::BLACK, Color::WHITE]);
    }

    #[test]
    fn bit_depth_rounds_up() {
        for (len, depth) in [(1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (17, 5), (33, 6)] {
            let palette = Palette::from_colors(distinct(len)).expect("valid");
            assert_eq!(palette.bit_depth(), depth, "len {len}");
        }
    }

    #[test]
    fn gimp_palette_text() {
        let palette = Palette::from_colors(vec![Color::BLACK, Color::rgb(255, 136, 0)]).expect("valid");
        assert_eq!(
            palette.to_gimp_palette("out.gpl"),
            "GIMP Palette\nName: out.gpl\nColumns: 16\n#\n0 0 0\n255 136 0\n"
        );
    }

    proptest! {
        #[test]
        fn unique_palette_has_no_duplicates(raw in proptest::collection::vec((0u8..4, 0u8..4, 0u8..4), 1..200)) {
            let pixels: Vec<Color> = raw.iter().map(|&(r, g, b)| Color::rgb(r * 60, g * 60, b * 60)).collect();
            let distinct: HashSet<u32> = pixels.iter().map(|c| c.packed()).collect();
            let palette = Palette::from_unique_colors(pixels).expect("at most 64 colours");
            prop_assert_eq!(palette.len(), distinct.len());
            let entries: HashSet<u32> = palette.colors().iter().map(|c| c.packed()).collect();
            prop_assert_eq!(entries.len(), palette.len());
        }

        #[test]
        fn canonical_order_holds(raw in proptest::collection::vec(any::<(u8, u8, u8)>(), 2..64)) {
            let pixels: Vec<Color> = raw.iter().map(|&(r, g, b)| Color::rgb(r, g, b)).collect();
            let palette = Palette::from_unique_colors(pixels).expect("at most 64 colours");
            prop_assume!(palette.len() >= 2);
            let lumas: Vec<f64> = palette.colors().iter().map(|c| c.luma()).collect();
            let min = lumas.iter().copied().fold(f64::MAX, f64::min);
            let max = lumas.iter().copied().fold(f64::MIN, f64::max);
            prop_assert!((lumas[0] - min).abs() < 1e-9);
            prop_assert!((lumas[1] - max).abs() < 1e-9);
        }
    }
}
