use crate::bmp::Header;
use crate::error::BmpError;
use crate::pixel::{Pixel, PixelBuffer};

/// A validated header together with the pixel grid it describes.
///
/// Both halves are owned here and always agree on dimensions. Transforms
/// never hand back a grid on its own; they build a fresh `Image`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    header: Header,
    pixels: PixelBuffer,
}

impl Image {
    /// A black `width` x `height` image with a synthesized header.
    pub fn new(width: u32, height: u32) -> Result<Self, BmpError> {
        let header = Header::new(width, height)?;
        let pixels = PixelBuffer::new(width, height)?;
        Ok(Self { header, pixels })
    }

    /// Build an image from interleaved top-down RGB bytes.
    pub fn from_rgb(width: u32, height: u32, raw: &[u8]) -> Result<Self, BmpError> {
        let header = Header::new(width, height)?;
        let pixels = PixelBuffer::from_bytes(raw, width, height)?;
        Ok(Self { header, pixels })
    }

    /// Pair an existing header with a grid, validating both.
    pub fn from_parts(header: Header, pixels: PixelBuffer) -> Result<Self, BmpError> {
        header.validate()?;
        if header.width_px() != pixels.width() || header.height_px() != pixels.height() {
            return Err(BmpError::InvalidParameter(format!(
                "header describes {}x{} but grid is {}x{}",
                header.width_px(),
                header.height_px(),
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self { header, pixels })
    }

    /// Result of a transform: `source`'s header resized to the new grid.
    pub(crate) fn derived(source: &Header, pixels: PixelBuffer) -> Result<Self, BmpError> {
        let header = source.with_dimensions(pixels.width(), pixels.height())?;
        Self::from_parts(header, pixels)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn get(&self, x: u32, y: u32) -> Result<Pixel, BmpError> {
        self.pixels.get(x, y)
    }

    pub fn set(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<(), BmpError> {
        self.pixels.set(x, y, r, g, b)
    }

    /// Interleaved RGB payload, row-major, no padding.
    pub fn to_rgb(&self) -> Result<Vec<u8>, BmpError> {
        self.pixels.to_bytes()
    }

    pub fn into_parts(self) -> (Header, PixelBuffer) {
        (self.header, self.pixels)
    }

    /// Copy the grid into an [`imgref::ImgVec`] of [`rgb::RGB8`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        let buf: Vec<rgb::RGB8> = self.pixels.pixels().iter().map(|&p| p.into()).collect();
        imgref::ImgVec::new(buf, self.width() as usize, self.height() as usize)
    }

    /// Build an image from an [`imgref::ImgRef`], honoring its stride.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGB8>) -> Result<Self, BmpError> {
        let width = u32::try_from(img.width()).map_err(|_| BmpError::DimensionsTooLarge {
            width: u32::MAX,
            height: img.height() as u32,
        })?;
        let height = u32::try_from(img.height()).map_err(|_| BmpError::DimensionsTooLarge {
            width,
            height: u32::MAX,
        })?;
        let mut raw = Vec::new();
        crate::error::try_reserve(&mut raw, crate::pixel::payload_len(width, height)?)?;
        for row in img.rows() {
            for px in row {
                raw.extend_from_slice(&[px.r, px.g, px.b]);
            }
        }
        Self::from_rgb(width, height, &raw)
    }
}
