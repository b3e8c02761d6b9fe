//! # bmptile
//!
//! Fixed-header 24-bit BMP codec plus a small pixel-transform pipeline.
//!
//! ## Format
//!
//! Exactly one BMP variant is accepted: a 54-byte header (14-byte file
//! header + 40-byte BITMAPINFOHEADER), 1 plane, 24 bits per pixel, no
//! compression, no palette. The payload is `width * height * 3` bytes of
//! RGB, top-down, with no row padding. Every header invariant is checked on
//! decode and a violation reports the offending [`HeaderField`].
//!
//! ## Transforms
//!
//! - [`crop`] — rectangular sub-image
//! - [`grayscale`] — [`GrayMethod::Average`] or [`GrayMethod::Luminosity`]
//! - [`binarize`] — local mean thresholding over disjoint tiles, run on a
//!   fixed-size worker pool
//!
//! Every transform returns a fresh [`Image`] whose header is recomputed for
//! the new dimensions; inputs are never modified.
//!
//! ## Non-Goals
//!
//! - Compressed, palettized, or non-24-bit bitmaps
//! - Bottom-up or row-padded payloads written by other tools
//!
//! ## Usage
//!
//! ```no_run
//! use bmptile::{GrayMethod, binarize, crop, grayscale, read_image, write_image};
//!
//! let image = read_image("in.bmp")?;
//! let roi = crop(&image, 10, 110, 20, 120)?;
//! let gray = grayscale(&roi, GrayMethod::Luminosity)?;
//! let bw = binarize(&gray, 4, 8)?;
//! write_image(&bw, "out.bmp")?;
//! # Ok::<(), bmptile::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod image;
mod limits;
mod pixel;

pub mod binarize;
pub mod bmp;

mod crop;
mod decode;
mod grayscale;
mod io;

// Re-exports
pub use binarize::{Tile, TileGrid, binarize, tiles};
pub use bmp::{Header, HeaderField};
pub use crop::crop;
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BmpError;
pub use grayscale::{GrayMethod, grayscale};
pub use image::Image;
pub use io::{file_size, read_image, read_image_with_limits, write_image};
pub use limits::Limits;
pub use pixel::{BYTES_PER_PIXEL, Pixel, PixelBuffer};

/// Decode an in-memory BMP file.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Image, BmpError> {
    bmp::decode(data, None, &stop)
}

/// Encode an image to BMP bytes (header followed by the RGB payload).
pub fn encode_bmp(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    bmp::encode(image, &stop)
}
