//! Rectangular sub-image extraction.

use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::{Pixel, PixelBuffer};

/// Copy the half-open rectangle `[x1, x2) x [y1, y2)` into a new image.
///
/// Requires `x1 < x2 <= width` and `y1 < y2 <= height`. Source pixel
/// `(x1 + i, y1 + j)` lands at `(i, j)` in the result.
pub fn crop(image: &Image, x1: u32, x2: u32, y1: u32, y2: u32) -> Result<Image, BmpError> {
    let (width, height) = (image.width(), image.height());
    if x1 >= x2 || x2 > width {
        return Err(BmpError::InvalidParameter(format!(
            "crop columns [{x1}, {x2}) invalid for width {width}"
        )));
    }
    if y1 >= y2 || y2 > height {
        return Err(BmpError::InvalidParameter(format!(
            "crop rows [{y1}, {y2}) invalid for height {height}"
        )));
    }

    let (out_w, out_h) = (x2 - x1, y2 - y1);
    let mut out = PixelBuffer::new(out_w, out_h)?;

    let src_rows = image.pixels().rows().skip(y1 as usize).take(out_h as usize);
    let dst_rows = out.pixels_mut().chunks_exact_mut(out_w as usize);
    for (src, dst) in src_rows.zip(dst_rows) {
        for (s, d) in src[x1 as usize..x2 as usize].iter().zip(dst.iter_mut()) {
            // keep the destination's own coordinates
            *d = Pixel { x: d.x, y: d.y, ..*s };
        }
    }

    tracing::trace!(x1, x2, y1, y2, "cropped image");
    Image::derived(image.header(), out)
}
