use crate::error::BmpError;
use crate::pixel::Pixel;

/// Caps applied to a BMP header before any pixel memory is allocated.
///
/// All fields default to `None` (no limit). Dimension caps are checked
/// against the header's width and height; `max_memory_bytes` bounds the
/// decoded [`PixelBuffer`](crate::PixelBuffer), which costs
/// `size_of::<Pixel>()` bytes per pixel rather than the three payload bytes.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded `Pixel` grid.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject a `width` x `height` header that breaks a dimension cap.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BmpError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(BmpError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(BmpError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(BmpError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Reject a grid whose decoded `Pixel` records would exceed
    /// `max_memory_bytes`.
    pub(crate) fn check_grid_memory(&self, width: u32, height: u32) -> Result<(), BmpError> {
        let Some(max_mem) = self.max_memory_bytes else {
            return Ok(());
        };
        let bytes = grid_bytes(width, height);
        if bytes > max_mem {
            return Err(BmpError::LimitExceeded(format!(
                "{width}x{height} pixel grid needs {bytes} bytes, memory limit is {max_mem}"
            )));
        }
        Ok(())
    }
}

/// Bytes held by a decoded grid of `width * height` pixel records.
fn grid_bytes(width: u32, height: u32) -> u64 {
    (u64::from(width) * u64::from(height)).saturating_mul(size_of::<Pixel>() as u64)
}
