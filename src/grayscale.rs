//! Channel reduction to gray.

use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::{Pixel, PixelBuffer};

/// How to collapse three channels into one gray value.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GrayMethod {
    /// `(r + g + b) / 3`, truncating. Harder edges, more contrast.
    Average,
    /// `0.3 r + 0.59 g + 0.11 b`, each term truncated. Smoother.
    ///
    /// Truncating per term (rather than flooring the weighted sum) means
    /// `(30, 60, 90)` maps to 53 and the brightest output is 254: pure white
    /// becomes `(254, 254, 254)`.
    #[default]
    Luminosity,
}

impl GrayMethod {
    pub fn apply(self, p: &Pixel) -> u8 {
        match self {
            Self::Average => p.average(),
            Self::Luminosity => p.luminosity(),
        }
    }
}

/// Set every pixel to `r = g = b = method(pixel)`. Dimensions are unchanged.
pub fn grayscale(image: &Image, method: GrayMethod) -> Result<Image, BmpError> {
    let src = image.pixels();
    let mut out = PixelBuffer::new(src.width(), src.height())?;
    for (d, s) in out.pixels_mut().iter_mut().zip(src.pixels()) {
        *d = s.with_value(method.apply(s));
    }
    Image::derived(image.header(), out)
}
