//! Addressable pixel grid backed by a contiguous row-major buffer.

use enough::Stop;

use crate::error::{BmpError, try_reserve};

/// Bytes per pixel in the interleaved RGB payload.
pub const BYTES_PER_PIXEL: usize = 3;

/// A single pixel record: grid coordinates plus 8-bit RGB channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub fn new(x: u32, y: u32, r: u8, g: u8, b: u8) -> Self {
        Self { x, y, r, g, b }
    }

    /// Channel triple in (R, G, B) order.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Truncating mean of the three channels.
    pub fn average(&self) -> u8 {
        ((u16::from(self.r) + u16::from(self.g) + u16::from(self.b)) / 3) as u8
    }

    /// Perceptually weighted gray value, 0.3 R + 0.59 G + 0.11 B.
    ///
    /// Each weighted channel is truncated before summing, so `(30, 60, 90)`
    /// gives `9 + 35 + 9 = 53`. The result never exceeds 254.
    pub fn luminosity(&self) -> u8 {
        let r = u16::from(self.r) * 30 / 100;
        let g = u16::from(self.g) * 59 / 100;
        let b = u16::from(self.b) * 11 / 100;
        (r + g + b) as u8
    }

    pub(crate) fn with_value(self, v: u8) -> Self {
        Self {
            r: v,
            g: v,
            b: v,
            ..self
        }
    }
}

/// Number of pixels in a `width` x `height` grid, with overflow checks.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, BmpError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}

/// Length in bytes of the interleaved RGB payload for a grid.
pub(crate) fn payload_len(width: u32, height: u32) -> Result<usize, BmpError> {
    pixel_count(width, height)?
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(BmpError::DimensionsTooLarge { width, height })
}

/// Owned grid of `width * height` pixels addressed by `x + width * y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Allocate a black grid with every pixel's coordinates filled in.
    pub fn new(width: u32, height: u32) -> Result<Self, BmpError> {
        check_dimensions(width, height)?;
        let count = pixel_count(width, height)?;
        let mut pixels = Vec::new();
        try_reserve(&mut pixels, count)?;
        for y in 0..height {
            for x in 0..width {
                pixels.push(Pixel::new(x, y, 0, 0, 0));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid from interleaved top-down RGB bytes with stride `width * 3`.
    ///
    /// `raw` must hold exactly `width * height * 3` bytes.
    pub fn from_bytes(raw: &[u8], width: u32, height: u32) -> Result<Self, BmpError> {
        Self::from_bytes_with_stop(raw, width, height, &enough::Unstoppable)
    }

    pub(crate) fn from_bytes_with_stop(
        raw: &[u8],
        width: u32,
        height: u32,
        stop: &dyn Stop,
    ) -> Result<Self, BmpError> {
        check_dimensions(width, height)?;
        let expected = payload_len(width, height)?;
        if raw.len() < expected {
            return Err(BmpError::Truncated {
                needed: expected as u64,
                actual: raw.len() as u64,
            });
        }
        if raw.len() > expected {
            return Err(BmpError::InvalidParameter(format!(
                "{} pixel bytes for a {width}x{height} grid, expected {expected}",
                raw.len()
            )));
        }

        let mut pixels = Vec::new();
        try_reserve(&mut pixels, expected / BYTES_PER_PIXEL)?;

        let stride = width as usize * BYTES_PER_PIXEL;
        for (y, row) in raw.chunks_exact(stride).enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            for (x, rgb) in row.chunks_exact(BYTES_PER_PIXEL).enumerate() {
                pixels.push(Pixel::new(x as u32, y as u32, rgb[0], rgb[1], rgb[2]));
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Serialize back to interleaved RGB bytes; exact inverse of [`Self::from_bytes`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, BmpError> {
        let mut out = Vec::new();
        self.write_bytes(&mut out, &enough::Unstoppable)?;
        Ok(out)
    }

    pub(crate) fn write_bytes(&self, out: &mut Vec<u8>, stop: &dyn Stop) -> Result<(), BmpError> {
        try_reserve(out, payload_len(self.width, self.height)?)?;
        for (y, row) in self.rows().enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            for p in row {
                out.extend_from_slice(&[p.r, p.g, p.b]);
            }
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> core::slice::ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Result<Pixel, BmpError> {
        let idx = self.index(x, y)?;
        Ok(self.pixels[idx])
    }

    pub fn set(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<(), BmpError> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = Pixel::new(x, y, r, g, b);
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, BmpError> {
        if x >= self.width || y >= self.height {
            return Err(BmpError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x as usize + self.width as usize * y as usize)
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), BmpError> {
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidParameter(format!(
            "pixel grid must be non-empty, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB8 {
    fn from(p: Pixel) -> Self {
        rgb::RGB8::new(p.r, p.g, p.b)
    }
}
