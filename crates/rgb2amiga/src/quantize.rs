//! Colour reduction.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;

use amiga_video::{Color, Palette};
use log::debug;

use crate::raster::Raster;

/// Reduces a raster to at most `colors` distinct colours.
pub trait Quantizer {
    fn quantize(&self, raster: &Raster, colors: usize, dither: bool) -> Raster;
}

/// Weighted median cut over the image's histogram, with optional
/// Floyd–Steinberg error diffusion when mapping pixels to the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCutQuantizer;

impl Quantizer for MedianCutQuantizer {
    fn quantize(&self, raster: &Raster, colors: usize, dither: bool) -> Raster {
        let histogram = histogram(raster);
        if histogram.len() <= colors {
            return raster.clone();
        }
        let centroids = median_cut(histogram, colors.max(1));
        debug!(
            "median cut: {} centroids for {} requested colours",
            centroids.len(),
            colors
        );
        let Ok(palette) = Palette::from_colors(centroids) else {
            return raster.clone();
        };
        if dither {
            floyd_steinberg(raster, &palette)
        } else {
            raster.map_colors(|c| palette.nearest_color(c))
        }
    }
}

/// A colour and how many pixels have it.
#[derive(Debug, Clone, Copy)]
struct Entry {
    rgb: [f32; 3],
    weight: f32,
}

fn histogram(raster: &Raster) -> Vec<Entry> {
    let mut counts: HashMap<u32, (Color, u32)> = HashMap::new();
    for &c in raster.pixels() {
        counts.entry(c.packed()).or_insert((c, 0)).1 += 1;
    }
    let mut entries: Vec<_> = counts.into_values().collect();
    // Hash order is random; sort so the cut is deterministic.
    entries.sort_unstable_by_key(|(c, _)| c.packed());
    entries
        .into_iter()
        .map(|(c, n)| Entry {
            rgb: [f32::from(c.r), f32::from(c.g), f32::from(c.b)],
            weight: n as f32,
        })
        .collect()
}

struct ColorBox {
    entries: Vec<Entry>,
}

impl ColorBox {
    fn total_weight(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Widest channel and its range.
    fn widest_axis(&self) -> (usize, f32) {
        let mut best = (0, 0.0f32);
        for axis in 0..3 {
            let (lo, hi) = self
                .entries
                .iter()
                .fold((f32::MAX, f32::MIN), |(lo, hi), e| {
                    (lo.min(e.rgb[axis]), hi.max(e.rgb[axis]))
                });
            if hi - lo > best.1 {
                best = (axis, hi - lo);
            }
        }
        best
    }

    fn priority(&self) -> f32 {
        self.total_weight() * self.widest_axis().1
    }

    fn centroid(&self) -> Color {
        let mut sum = [0.0f32; 3];
        let mut total = 0.0f32;
        for e in &self.entries {
            for (s, v) in sum.iter_mut().zip(e.rgb) {
                *s += v * e.weight;
            }
            total += e.weight;
        }
        if total <= 0.0 {
            return Color::BLACK;
        }
        let channel = |s: f32| (s / total).round().clamp(0.0, 255.0) as u8;
        Color::rgb(channel(sum[0]), channel(sum[1]), channel(sum[2]))
    }

    /// Split at the weighted median of the widest channel.
    fn split(mut self) -> (Self, Self) {
        let (axis, _) = self.widest_axis();
        self.entries
            .sort_unstable_by(|a, b| a.rgb[axis].total_cmp(&b.rgb[axis]));
        let half = self.total_weight() / 2.0;
        let mut accumulated = 0.0;
        let mut at = 1;
        for (i, e) in self.entries.iter().enumerate() {
            accumulated += e.weight;
            if accumulated >= half {
                at = i + 1;
                break;
            }
        }
        let at = at.clamp(1, self.entries.len() - 1);
        let right = self.entries.split_off(at);
        (self, Self { entries: right })
    }
}

fn median_cut(histogram: Vec<Entry>, max_colors: usize) -> Vec<Color> {
    let mut boxes = vec![ColorBox { entries: histogram }];
    while boxes.len() < max_colors {
        let best = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.entries.len() >= 2)
            .max_by(|(_, a), (_, b)| a.priority().total_cmp(&b.priority()))
            .map(|(i, _)| i);
        let Some(index) = best else {
            break;
        };
        let (left, right) = boxes.swap_remove(index).split();
        boxes.push(left);
        boxes.push(right);
    }
    boxes.iter().map(ColorBox::centroid).collect()
}

/// Map to `palette` spreading each pixel's error onto its unvisited
/// neighbours with the 7/3/5/1 kernel.
fn floyd_steinberg(raster: &Raster, palette: &Palette) -> Raster {
    let (width, height) = (raster.width(), raster.height());
    let mut work: Vec<[f32; 3]> = raster
        .pixels()
        .iter()
        .map(|c| [f32::from(c.r), f32::from(c.g), f32::from(c.b)])
        .collect();
    let mut out = Vec::with_capacity(work.len());

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
            let [r, g, b] = work[i];
            let wanted = Color::rgb(channel(r), channel(g), channel(b));
            let chosen = palette.nearest_color(wanted);
            out.push(chosen);

            let error = [
                r - f32::from(chosen.r),
                g - f32::from(chosen.g),
                b - f32::from(chosen.b),
            ];
            let mut spread = |j: usize, factor: f32| {
                for (v, e) in work[j].iter_mut().zip(error) {
                    *v += e * factor;
                }
            };
            if x + 1 < width {
                spread(i + 1, 7.0 / 16.0);
            }
            if y + 1 < height {
                if x > 0 {
                    spread(i + width - 1, 3.0 / 16.0);
                }
                spread(i + width, 5.0 / 16.0);
                if x + 1 < width {
                    spread(i + width + 1, 1.0 / 16.0);
                }
            }
        }
    }

    // Dimensions are unchanged, so this cannot fail.
    Raster::new(width, height, out).unwrap_or_else(|_| raster.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn distinct(raster: &Raster) -> usize {
        raster
            .pixels()
            .iter()
            .map(|c| c.packed())
            .collect::<HashSet<_>>()
            .len()
    }

    fn ramp(width: usize, height: usize) -> Raster {
        let pixels = (0..width * height)
            .map(|i| {
                let x = (i % width) as u8;
                let y = (i / width) as u8;
                Color::rgb(x.wrapping_mul(8), y.wrapping_mul(16), x ^ y)
            })
            .collect();
        Raster::new(width, height, pixels).expect("valid")
    }

    #[test]
    fn few_colours_pass_through() {
        let raster = Raster::filled(16, 4, Color::rgb(200, 10, 10)).expect("valid");
        assert_eq!(MedianCutQuantizer.quantize(&raster, 32, false), raster);
    }

    #[test]
    fn output_respects_colour_count() {
        let raster = ramp(32, 16);
        for colors in [2, 5, 16, 32, 64] {
            for dither in [false, true] {
                let out = MedianCutQuantizer.quantize(&raster, colors, dither);
                assert!(distinct(&out) <= colors, "{colors} colours, dither {dither}");
                assert_eq!((out.width(), out.height()), (32, 16));
            }
        }
    }

    #[test]
    fn two_clusters_split_cleanly() {
        let mut pixels = vec![Color::rgb(250, 0, 0); 32];
        pixels.extend(vec![Color::rgb(0, 0, 250); 32]);
        pixels[1] = Color::rgb(240, 10, 0);
        pixels[40] = Color::rgb(0, 10, 240);
        let raster = Raster::new(16, 4, pixels).expect("valid");
        let out = MedianCutQuantizer.quantize(&raster, 2, false);
        assert_eq!(distinct(&out), 2);
        assert_ne!(out.pixel(0, 0), out.pixel(0, 3));
        assert_eq!(out.pixel(0, 0), out.pixel(1, 0));
    }

    #[test]
    fn deterministic() {
        let raster = ramp(32, 8);
        assert_eq!(
            MedianCutQuantizer.quantize(&raster, 8, true),
            MedianCutQuantizer.quantize(&raster, 8, true)
        );
    }
}
