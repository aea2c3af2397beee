//! Truecolor to Amiga bitplane conversion.
//!
//! An [`AmigaEncoder`] takes a [`Raster`] through resampling to a 16-pixel
//! aligned width, colour reduction with a [`Quantizer`], snapping onto an
//! OCS colour space, and finally planar ILBM encoding (or a PNG plus GIMP
//! palette). Several images can share one palette through [`batch`].

pub mod batch;
mod encoder;
mod error;
pub mod geometry;
pub mod io;
mod pipeline;
mod quantize;
mod raster;
mod request;

pub use batch::{Canvas, Rect, SharedPalette, build_shared_palette, extract_region};
pub use encoder::{AmigaEncoder, EncodedImage};
pub use error::EncodeError;
pub use geometry::Sizing;
pub use quantize::{MedianCutQuantizer, Quantizer};
pub use raster::Raster;
pub use request::{EncodeRequest, MIN_COLORS, OutputFormat, Pipeline};
