//! PNG input and output.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use amiga_video::Color;
use log::info;

use crate::error::EncodeError;
use crate::raster::Raster;

/// Load a PNG file of any colour type as 8-bit RGBA.
pub fn load_png(path: &Path) -> Result<Raster, EncodeError> {
    let file = File::open(path)?;
    let raster = decode_png(BufReader::new(file))?;
    info!(
        "loaded {} ({}x{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

/// Decode a PNG stream. Palette and low bit depth images are expanded and
/// 16-bit channels truncated to 8 bits.
pub fn decode_png<R: Read>(source: R) -> Result<Raster, EncodeError> {
    let mut decoder = png::Decoder::new(source);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let size = reader.output_buffer_size();
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| EncodeError::Allocation { bytes: size })?;
    buf.resize(size, 0);
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];

    let pixels: Vec<Color> = match info.color_type {
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .map(|p| Color::rgb(p[0], p[1], p[2]))
            .collect(),
        png::ColorType::Rgba => bytes
            .chunks_exact(4)
            .map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
            .collect(),
        png::ColorType::Grayscale => bytes.iter().map(|&v| Color::rgb(v, v, v)).collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .map(|p| Color::rgba(p[0], p[0], p[0], p[1]))
            .collect(),
        other @ png::ColorType::Indexed => return Err(EncodeError::UnsupportedPng(other)),
    };
    Raster::new(info.width as usize, info.height as usize, pixels)
}

/// Encode a raster as an 8-bit RGB PNG. Alpha is dropped.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, EncodeError> {
    let too_large = || EncodeError::Allocation {
        bytes: raster.pixels().len() * 3,
    };
    let width = u32::try_from(raster.width()).map_err(|_| too_large())?;
    let height = u32::try_from(raster.height()).map_err(|_| too_large())?;

    let mut rgb = Vec::new();
    rgb.try_reserve_exact(raster.pixels().len() * 3)
        .map_err(|_| too_large())?;
    for c in raster.pixels() {
        rgb.extend_from_slice(&[c.r, c.g, c.b]);
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgb)?;
        writer.finish()?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().expect("header");
            writer.write_image_data(data).expect("data");
        }
        out
    }

    #[test]
    fn rgb_round_trip() {
        let pixels = vec![
            Color::rgb(1, 2, 3),
            Color::rgb(250, 128, 0),
            Color::WHITE,
            Color::BLACK,
        ];
        let raster = Raster::new(2, 2, pixels).expect("valid");
        let png = encode_png(&raster).expect("encode");
        assert_eq!(decode_png(png.as_slice()).expect("decode"), raster);
    }

    #[test]
    fn grey_is_expanded() {
        let png = encode_raw(2, 1, png::ColorType::Grayscale, &[0x10, 0xF0]);
        let raster = decode_png(png.as_slice()).expect("decode");
        assert_eq!(raster.pixels(), &[Color::rgb(0x10, 0x10, 0x10), Color::rgb(0xF0, 0xF0, 0xF0)]);
    }

    #[test]
    fn rgba_keeps_alpha() {
        let png = encode_raw(1, 1, png::ColorType::Rgba, &[9, 8, 7, 6]);
        let raster = decode_png(png.as_slice()).expect("decode");
        assert_eq!(raster.pixel(0, 0).a, 6);
        assert_eq!(raster.pixel(0, 0), Color::rgb(9, 8, 7));
    }

    #[test]
    fn garbage_is_a_png_error() {
        assert!(matches!(
            decode_png(&b"not a png"[..]),
            Err(EncodeError::PngDecode(_))
        ));
    }
}
