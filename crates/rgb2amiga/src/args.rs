//! Command-line arguments and their conversion to an [`EncodeRequest`].

use std::path::PathBuf;

use amiga_video::{ColorSpaceId, ViewportMode};
use clap::{Parser, ValueEnum};
use format_ilbm::ColorDepth;
use rgb2amiga::{EncodeRequest, OutputFormat, Pipeline, Sizing};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum Format {
    /// IFF ILBM with interleaved bitplanes
    #[default]
    Ilbm,
    /// IFF ACBM with contiguous bitplanes
    Acbm,
    /// RGB PNG of the reduced image plus a GIMP palette
    Png,
}

impl Format {
    pub fn to_lib_format(self) -> OutputFormat {
        match self {
            Format::Ilbm => OutputFormat::Ilbm,
            Format::Acbm => OutputFormat::Acbm,
            Format::Png => OutputFormat::PngWithPalette,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum Order {
    /// Quantize in truecolor, then snap the palette onto the colour space
    #[default]
    QuantizeThenSnap,
    /// Snap every pixel onto the colour space, then quantize
    SnapThenQuantize,
}

impl Order {
    pub fn to_lib_pipeline(self) -> Pipeline {
        match self {
            Order::QuantizeThenSnap => Pipeline::QuantizeThenSnap,
            Order::SnapThenQuantize => Pipeline::SnapThenQuantize,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rgb2amiga", version, about = "Convert truecolor PNG images to Amiga IFF bitplane files")]
pub struct Args {
    /// Input PNG file(s); several inputs share one palette
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Output file(s), one per input
    #[arg(short, long, required = true, num_args = 1..)]
    pub output: Vec<PathBuf>,

    /// Number of palette colours (2-64)
    #[arg(short, long, default_value_t = 32)]
    pub colors: usize,

    /// Floyd-Steinberg dithering while quantizing
    #[arg(short, long)]
    pub dither: bool,

    /// Output size: WxH fits inside the box, WxH! stretches, "original" keeps the input size
    #[arg(short, long, default_value = "320x256")]
    pub size: Sizing,

    #[arg(long, value_enum, default_value_t = Format::Ilbm)]
    pub format: Format,

    #[arg(long, value_enum, default_value_t = Order::QuantizeThenSnap)]
    pub pipeline: Order,

    /// Colour space the palette is snapped onto (ocs, ocs-reduced)
    #[arg(long, default_value = "ocs")]
    pub palette: ColorSpaceId,

    /// CMAP precision (ocs4, full8)
    #[arg(long, default_value = "ocs4")]
    pub color_depth: ColorDepth,

    /// CAMG viewport mode in hex (e.g. 0x8004); chosen from the output size if omitted
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<ViewportMode>,
}

impl Args {
    pub fn to_request(&self) -> EncodeRequest {
        EncodeRequest {
            colors: self.colors,
            dither: self.dither,
            sizing: self.size,
            format: self.format.to_lib_format(),
            pipeline: self.pipeline.to_lib_pipeline(),
            color_space: self.palette,
            color_depth: self.color_depth,
            viewport_mode: self.mode,
        }
    }
}

fn parse_mode(s: &str) -> Result<ViewportMode, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16)
        .map(ViewportMode::from_bits_retain)
        .map_err(|e| format!("invalid viewport mode {s:?}: {e}"))
}
