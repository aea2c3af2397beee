//! Amiga video data model: colours, palettes, chunky and planar screens.
//!
//! The OCS display fetches up to six bitplanes per scanline and combines
//! one bit from each into a colour register index. This crate converts
//! between that planar layout and a chunky one-byte-per-pixel buffer, and
//! resolves indices to RGB, including the HAM and Extra-Half-Brite modes.

mod chunky;
mod color;
mod decode;
mod error;
pub mod metric;
mod palette;
mod planar;
mod space;
mod viewport;

pub use chunky::{ChunkyImage, WIDTH_ALIGN};
pub use color::Color;
pub use decode::{decode_ham, decode_ham_row, expand_palette};
pub use error::VideoError;
pub use palette::{MAX_COLORS, Palette};
pub use planar::{MAX_BITPLANES, PlanarScreen, chunky_to_planar, pitch_for, planar_to_chunky};
pub use space::{ColorSpaceId, ColorSpaceRegistry, ocs_reduced_space, ocs_space};
pub use viewport::ViewportMode;
