//! Filesystem primitives that attach path context to failures.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{OverlayError, OverlayResult};

/// Read a fragment file into a string.
///
/// # Errors
///
/// Returns [`OverlayError::NotFound`] when `path` does not exist and
/// [`OverlayError::Io`] for any other read failure.
pub fn read_file(path: &Utf8Path) -> OverlayResult<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(OverlayError::not_found(path))
        }
        Err(source) => Err(OverlayError::io(path, source)),
    }
}

/// Write `contents` to `path`, creating missing parent directories and
/// truncating any existing file. Returns the written path.
///
/// # Errors
///
/// Returns [`OverlayError::Io`] when directory creation or the write fails.
pub fn write_file(path: &Utf8Path, contents: &[u8]) -> OverlayResult<Utf8PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| OverlayError::io(parent, source))?;
    }
    std::fs::write(path, contents).map_err(|source| OverlayError::io(path, source))?;
    Ok(path.to_path_buf())
}

/// Whether `path` refers to an existing regular file.
#[must_use]
pub fn file_exists(path: &Utf8Path) -> bool {
    path.is_file()
}
