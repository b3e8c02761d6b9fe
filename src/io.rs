//! Reading and writing BMP files on disk.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use enough::Unstoppable;

use crate::bmp::HEADER_SIZE;
use crate::error::{BmpError, try_reserve};
use crate::image::Image;
use crate::limits::Limits;

/// Size of the file at `path` in bytes.
pub fn file_size(path: impl AsRef<Path>) -> Result<u64, BmpError> {
    let path = path.as_ref();
    let meta = fs::metadata(path).map_err(|e| open_error(path, e))?;
    Ok(meta.len())
}

/// Read and validate a BMP file.
pub fn read_image(path: impl AsRef<Path>) -> Result<Image, BmpError> {
    read(path.as_ref(), None)
}

/// Read and validate a BMP file, rejecting images beyond `limits`.
pub fn read_image_with_limits(path: impl AsRef<Path>, limits: &Limits) -> Result<Image, BmpError> {
    read(path.as_ref(), Some(limits))
}

fn read(path: &Path, limits: Option<&Limits>) -> Result<Image, BmpError> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let len = file_size(path)?;
    if len < HEADER_SIZE as u64 {
        return Err(BmpError::Truncated {
            needed: HEADER_SIZE as u64,
            actual: len,
        });
    }

    let len = usize::try_from(len).map_err(|_| BmpError::Allocation { bytes: usize::MAX })?;
    let mut data = Vec::new();
    try_reserve(&mut data, len)?;
    file.read_to_end(&mut data)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read BMP file");

    crate::bmp::decode(&data, limits, &Unstoppable)
}

/// Encode `image` and write it to `path`.
///
/// The bytes go to a temporary file next to `path` that is renamed into
/// place once fully written. On failure the temporary file is removed and
/// any existing file at `path` is left untouched.
pub fn write_image(image: &Image, path: impl AsRef<Path>) -> Result<(), BmpError> {
    let path = path.as_ref();
    let data = crate::bmp::encode(image, &Unstoppable)?;

    let tmp = temp_path(path);
    let written = write_all(&tmp, &data).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %tmp.display(),
                    error = %cleanup,
                    "failed to remove partial file"
                );
            }
        }
        return Err(open_error(path, e));
    }

    tracing::debug!(path = %path.display(), bytes = data.len(), "wrote BMP file");
    Ok(())
}

fn write_all(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.partial", std::process::id()));
    path.with_file_name(name)
}

fn open_error(path: &Path, e: io::Error) -> BmpError {
    match e.kind() {
        io::ErrorKind::NotFound => BmpError::FileNotFound(path.to_path_buf()),
        _ => BmpError::Io(e),
    }
}
