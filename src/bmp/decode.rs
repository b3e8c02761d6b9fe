//! Whole-file decode: header, limits, then the RGB payload.

use enough::Stop;

use super::header::{HEADER_SIZE, Header};
use crate::error::BmpError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::PixelBuffer;

pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpError> {
    let header = Header::decode(data)?;
    let width = header.width_px();
    let height = header.height_px();
    if let Some(limits) = limits {
        check_limits(limits, width, height)?;
    }
    stop.check()?;

    let end = HEADER_SIZE
        .checked_add(header.image_size_bytes as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let payload = data.get(HEADER_SIZE..end).ok_or(BmpError::Truncated {
        needed: end as u64,
        actual: data.len() as u64,
    })?;
    if data.len() > end {
        tracing::debug!(
            trailing = data.len() - end,
            "ignoring bytes past declared BMP size"
        );
    }

    let pixels = PixelBuffer::from_bytes_with_stop(payload, width, height, stop)?;
    Image::from_parts(header, pixels)
}

fn check_limits(limits: &Limits, width: u32, height: u32) -> Result<(), BmpError> {
    limits.check(width, height)?;
    limits.check_grid_memory(width, height)
}
