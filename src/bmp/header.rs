//! The fixed 54-byte BMP header: 14-byte file header plus a 40-byte
//! BITMAPINFOHEADER, always little-endian.

use core::fmt;

use crate::error::BmpError;
use crate::pixel::payload_len;

/// Size of the combined file + DIB header.
pub const HEADER_SIZE: usize = 54;
/// Size of the BITMAPINFOHEADER.
pub const DIB_HEADER_SIZE: u32 = 40;
/// "BM" read as a little-endian u16.
pub const MAGIC: u16 = 0x4D42;

/// Resolution written into synthesized headers (72 DPI).
const DEFAULT_PPM: u32 = 2835;

/// Header fields, used to name the field a validation failure refers to.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderField {
    Magic,
    FileSize,
    PixelDataOffset,
    DibHeaderSize,
    Width,
    Height,
    Planes,
    BitsPerPixel,
    Compression,
    ImageSizeBytes,
    ColorsUsed,
    ImportantColors,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Magic => "magic",
            Self::FileSize => "file_size",
            Self::PixelDataOffset => "pixel_data_offset",
            Self::DibHeaderSize => "dib_header_size",
            Self::Width => "width",
            Self::Height => "height",
            Self::Planes => "planes",
            Self::BitsPerPixel => "bits_per_pixel",
            Self::Compression => "compression",
            Self::ImageSizeBytes => "image_size_bytes",
            Self::ColorsUsed => "colors_used",
            Self::ImportantColors => "important_colors",
        };
        f.write_str(name)
    }
}

/// Decoded header. Field order matches the on-disk layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    pub magic: u16,
    /// Total file size: pixel data bytes + 54.
    pub size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub offset: u32,
    pub dib_header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size_bytes: u32,
    pub x_resolution_ppm: u32,
    pub y_resolution_ppm: u32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl Header {
    /// A valid header for a `width` x `height` 24-bit image.
    pub fn new(width: u32, height: u32) -> Result<Self, BmpError> {
        let base = Self {
            magic: MAGIC,
            size: 0,
            reserved1: 0,
            reserved2: 0,
            offset: HEADER_SIZE as u32,
            dib_header_size: DIB_HEADER_SIZE,
            width: 0,
            height: 0,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size_bytes: 0,
            x_resolution_ppm: DEFAULT_PPM,
            y_resolution_ppm: DEFAULT_PPM,
            colors_used: 0,
            important_colors: 0,
        };
        base.with_dimensions(width, height)
    }

    /// Deserialize every field at its fixed offset. Does not validate.
    pub fn from_bytes(b: &[u8; HEADER_SIZE]) -> Self {
        let mut c = FieldReader { data: b, pos: 0 };
        Self {
            magic: c.u16(),
            size: c.u32(),
            reserved1: c.u16(),
            reserved2: c.u16(),
            offset: c.u32(),
            dib_header_size: c.u32(),
            width: c.i32(),
            height: c.i32(),
            planes: c.u16(),
            bits_per_pixel: c.u16(),
            compression: c.u32(),
            image_size_bytes: c.u32(),
            x_resolution_ppm: c.u32(),
            y_resolution_ppm: c.u32(),
            colors_used: c.u32(),
            important_colors: c.u32(),
        }
    }

    /// Parse and validate the first 54 bytes of `data`.
    pub fn decode(data: &[u8]) -> Result<Self, BmpError> {
        let bytes: &[u8; HEADER_SIZE] = data
            .get(..HEADER_SIZE)
            .and_then(|s| s.try_into().ok())
            .ok_or(BmpError::Truncated {
                needed: HEADER_SIZE as u64,
                actual: data.len() as u64,
            })?;
        let header = Self::from_bytes(bytes);
        if let Err(e) = header.validate() {
            tracing::debug!(error = %e, "rejected BMP header");
            return Err(e);
        }
        Ok(header)
    }

    /// Serialize every field at its fixed offset, whatever its value.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut w = FieldWriter {
            out: &mut out,
            pos: 0,
        };
        // File header (14 bytes)
        w.put(&self.magic.to_le_bytes());
        w.put(&self.size.to_le_bytes());
        w.put(&self.reserved1.to_le_bytes());
        w.put(&self.reserved2.to_le_bytes());
        w.put(&self.offset.to_le_bytes());
        // DIB header (BITMAPINFOHEADER, 40 bytes)
        w.put(&self.dib_header_size.to_le_bytes());
        w.put(&self.width.to_le_bytes());
        w.put(&self.height.to_le_bytes());
        w.put(&self.planes.to_le_bytes());
        w.put(&self.bits_per_pixel.to_le_bytes());
        w.put(&self.compression.to_le_bytes());
        w.put(&self.image_size_bytes.to_le_bytes());
        w.put(&self.x_resolution_ppm.to_le_bytes());
        w.put(&self.y_resolution_ppm.to_le_bytes());
        w.put(&self.colors_used.to_le_bytes());
        w.put(&self.important_colors.to_le_bytes());
        debug_assert_eq!(w.pos, HEADER_SIZE);
        out
    }

    /// Check every format invariant, reporting the first violated field.
    pub fn validate(&self) -> Result<(), BmpError> {
        if self.magic != MAGIC {
            return Err(BmpError::format(
                HeaderField::Magic,
                format!("{:#06x}, expected {MAGIC:#06x}", self.magic),
            ));
        }
        if self.offset != HEADER_SIZE as u32 {
            return Err(BmpError::format(
                HeaderField::PixelDataOffset,
                format!("{}, expected {HEADER_SIZE}", self.offset),
            ));
        }
        if self.dib_header_size != DIB_HEADER_SIZE {
            return Err(BmpError::format(
                HeaderField::DibHeaderSize,
                format!("{}, expected {DIB_HEADER_SIZE}", self.dib_header_size),
            ));
        }
        if self.planes != 1 {
            return Err(BmpError::format(
                HeaderField::Planes,
                format!("{}, expected 1", self.planes),
            ));
        }
        if self.compression != 0 {
            return Err(BmpError::format(
                HeaderField::Compression,
                format!("{}, only uncompressed (0) is supported", self.compression),
            ));
        }
        if self.colors_used != 0 {
            return Err(BmpError::format(
                HeaderField::ColorsUsed,
                format!("{}, expected 0", self.colors_used),
            ));
        }
        if self.important_colors != 0 {
            return Err(BmpError::format(
                HeaderField::ImportantColors,
                format!("{}, expected 0", self.important_colors),
            ));
        }
        if self.bits_per_pixel != 24 {
            return Err(BmpError::format(
                HeaderField::BitsPerPixel,
                format!("{}, only 24-bit RGB is supported", self.bits_per_pixel),
            ));
        }
        if u64::from(self.image_size_bytes) + HEADER_SIZE as u64 != u64::from(self.size) {
            return Err(BmpError::format(
                HeaderField::FileSize,
                format!(
                    "{}, expected image_size_bytes {} + {HEADER_SIZE}",
                    self.size, self.image_size_bytes
                ),
            ));
        }
        if self.width <= 0 {
            return Err(BmpError::format(
                HeaderField::Width,
                format!("{}, must be positive", self.width),
            ));
        }
        if self.height <= 0 {
            return Err(BmpError::format(
                HeaderField::Height,
                format!("{}, must be positive", self.height),
            ));
        }
        let expected = u64::from(self.width.unsigned_abs())
            * u64::from(self.height.unsigned_abs())
            * 3;
        if expected != u64::from(self.image_size_bytes) {
            return Err(BmpError::format(
                HeaderField::ImageSizeBytes,
                format!(
                    "{}, expected width * height * 3 = {expected}",
                    self.image_size_bytes
                ),
            ));
        }
        Ok(())
    }

    /// Boolean form of [`Self::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Copy of this header resized to `width` x `height`, with the pixel
    /// data size and file size recomputed. Every other field is kept.
    pub fn with_dimensions(&self, width: u32, height: u32) -> Result<Self, BmpError> {
        if width == 0 || height == 0 {
            return Err(BmpError::InvalidParameter(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }
        let w = i32::try_from(width).map_err(|_| BmpError::DimensionsTooLarge { width, height })?;
        let h = i32::try_from(height).map_err(|_| BmpError::DimensionsTooLarge { width, height })?;
        let image_size_bytes = u32::try_from(payload_len(width, height)?)
            .map_err(|_| BmpError::DimensionsTooLarge { width, height })?;
        let size = image_size_bytes
            .checked_add(HEADER_SIZE as u32)
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            width: w,
            height: h,
            image_size_bytes,
            size,
            ..*self
        })
    }

    /// Width in pixels. Only meaningful on a validated header.
    pub fn width_px(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Height in pixels. Only meaningful on a validated header.
    pub fn height_px(&self) -> u32 {
        self.height.unsigned_abs()
    }
}

struct FieldReader<'a> {
    data: &'a [u8; HEADER_SIZE],
    pos: usize,
}

impl FieldReader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        buf
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }
}

struct FieldWriter<'a> {
    out: &'a mut [u8; HEADER_SIZE],
    pos: usize,
}

impl FieldWriter<'_> {
    fn put(&mut self, bytes: &[u8]) {
        self.out[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        Header::new(4, 3).unwrap()
    }

    #[test]
    fn synthesized_header_is_valid() {
        let h = sample();
        assert!(h.is_valid());
        assert_eq!(h.image_size_bytes, 36);
        assert_eq!(h.size, 90);
        assert_eq!(h.offset, 54);
    }

    #[test]
    fn fields_land_at_fixed_offsets() {
        let mut h = sample();
        h.reserved1 = 0xBEEF;
        h.x_resolution_ppm = 0x0102_0304;
        h.important_colors = 7;
        let b = h.to_bytes();
        assert_eq!(&b[0..2], b"BM");
        assert_eq!(&b[2..6], &90u32.to_le_bytes());
        assert_eq!(&b[6..8], &[0xEF, 0xBE]);
        assert_eq!(&b[10..14], &54u32.to_le_bytes());
        assert_eq!(&b[14..18], &40u32.to_le_bytes());
        assert_eq!(&b[18..22], &4i32.to_le_bytes());
        assert_eq!(&b[22..26], &3i32.to_le_bytes());
        assert_eq!(&b[26..28], &1u16.to_le_bytes());
        assert_eq!(&b[28..30], &24u16.to_le_bytes());
        assert_eq!(&b[34..38], &36u32.to_le_bytes());
        assert_eq!(&b[38..42], &[4, 3, 2, 1]);
        assert_eq!(&b[50..54], &7u32.to_le_bytes());
        assert_eq!(Header::from_bytes(&b), h);
    }

    #[test]
    fn rejects_8_bit() {
        let mut h = sample();
        h.bits_per_pixel = 8;
        let err = Header::decode(&h.to_bytes()).unwrap_err();
        assert!(matches!(
            err,
            BmpError::Format {
                field: HeaderField::BitsPerPixel,
                ..
            }
        ));
    }

    #[test]
    fn rejects_each_fixed_field() {
        let cases: [(fn(&mut Header), HeaderField); 9] = [
            (|h| h.magic = 0x4141, HeaderField::Magic),
            (|h| h.offset = 58, HeaderField::PixelDataOffset),
            (|h| h.dib_header_size = 124, HeaderField::DibHeaderSize),
            (|h| h.planes = 2, HeaderField::Planes),
            (|h| h.compression = 1, HeaderField::Compression),
            (|h| h.colors_used = 256, HeaderField::ColorsUsed),
            (|h| h.important_colors = 1, HeaderField::ImportantColors),
            (|h| h.size += 1, HeaderField::FileSize),
            (|h| h.height = -3, HeaderField::Height),
        ];
        for (mutate, field) in cases {
            let mut h = sample();
            mutate(&mut h);
            match h.validate() {
                Err(BmpError::Format { field: got, .. }) => assert_eq!(got, field),
                other => panic!("expected {field} failure, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_size_that_disagrees_with_dimensions() {
        let mut h = sample();
        h.image_size_bytes += 3;
        h.size += 3;
        assert!(matches!(
            h.validate(),
            Err(BmpError::Format {
                field: HeaderField::ImageSizeBytes,
                ..
            })
        ));
    }

    #[test]
    fn short_input_is_truncated() {
        assert!(matches!(
            Header::decode(b"BM\0\0"),
            Err(BmpError::Truncated {
                needed: 54,
                actual: 4
            })
        ));
    }

    #[test]
    fn with_dimensions_keeps_other_fields() {
        let mut h = sample();
        h.reserved2 = 9;
        let d = h.with_dimensions(2, 5).unwrap();
        assert_eq!((d.width, d.height), (2, 5));
        assert_eq!(d.image_size_bytes, 30);
        assert_eq!(d.size, 84);
        assert_eq!(d.reserved2, 9);
        assert!(d.is_valid());
        assert!(matches!(
            h.with_dimensions(u32::MAX, 2),
            Err(BmpError::DimensionsTooLarge { .. })
        ));
    }
}
