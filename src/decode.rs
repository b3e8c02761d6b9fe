use enough::Stop;

use crate::error::BmpError;
use crate::image::Image;
use crate::limits::Limits;

/// Builder for decoding an in-memory BMP file with optional limits.
///
/// ```
/// use bmptile::{DecodeRequest, Image, Limits, Unstoppable, encode_bmp};
///
/// let bytes = encode_bmp(&Image::new(4, 4)?, Unstoppable)?;
/// let limits = Limits { max_pixels: Some(64), ..Default::default() };
/// let image = DecodeRequest::new(&bytes)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(image.width(), 4);
/// # Ok::<(), bmptile::BmpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Validate the header and decode the pixel grid.
    pub fn decode(self, stop: impl Stop) -> Result<Image, BmpError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }
}
