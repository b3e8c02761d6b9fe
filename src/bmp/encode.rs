//! BMP encoder: 54-byte header followed by the unpadded RGB payload.

use enough::Stop;

use crate::error::{BmpError, try_reserve};
use crate::image::Image;

pub(crate) fn encode_bmp(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let header = image.header();
    header.validate()?;

    let file_size = header.size as usize;
    let mut out = Vec::new();
    try_reserve(&mut out, file_size)?;
    out.extend_from_slice(&header.to_bytes());

    stop.check()?;
    image.pixels().write_bytes(&mut out, stop)?;
    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}
