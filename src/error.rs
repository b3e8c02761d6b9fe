use std::path::PathBuf;

use enough::StopReason;

use crate::bmp::HeaderField;

/// Errors from BMP decoding, encoding, file I/O and pixel transforms.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated input: need {needed} bytes, got {actual}")]
    Truncated { needed: u64, actual: u64 },

    #[error("invalid header field {field}: {detail}")]
    Format { field: HeaderField, detail: String },

    #[error("pixel ({x}, {y}) outside {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("failed to allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[error("worker pool failure: {0}")]
    WorkerPool(String),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}

impl BmpError {
    pub(crate) fn format(field: HeaderField, detail: impl Into<String>) -> Self {
        BmpError::Format {
            field,
            detail: detail.into(),
        }
    }
}

/// Reserve room for `additional` elements, mapping failure to [`BmpError::Allocation`].
pub(crate) fn try_reserve<T>(vec: &mut Vec<T>, additional: usize) -> Result<(), BmpError> {
    vec.try_reserve_exact(additional)
        .map_err(|_| BmpError::Allocation {
            bytes: additional.saturating_mul(core::mem::size_of::<T>()),
        })
}
