//! Fixed-header 24-bit BMP codec (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.
//!
//! The payload is `width * height * 3` bytes of top-down RGB with no row
//! padding. Conventional BMP files store rows bottom-up in BGR order padded
//! to four bytes, so third-party files only round-trip through this codec
//! when they were written by it.

mod decode;
mod encode;
mod header;

pub use header::{DIB_HEADER_SIZE, HEADER_SIZE, Header, HeaderField, MAGIC};

use enough::Stop;

use crate::error::BmpError;
use crate::image::Image;
use crate::limits::Limits;

/// Decode a complete BMP file held in memory.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpError> {
    decode::decode_bmp(data, limits, stop)
}

/// Encode an image as a complete BMP file.
pub(crate) fn encode(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    encode::encode_bmp(image, stop)
}
