//! Error taxonomy for fragment resolution, splitting, and merging.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Crate-wide result alias.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Errors that can occur while assembling configuration fragments.
///
/// An ambiguous merge match is never an error: first-match-wins is the
/// defined resolution. Failures carry the path that triggered them and
/// propagate to the immediate caller without retries or rollback, so files
/// created before a failure remain on disk for the caller to clean up.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OverlayError {
    /// An input path did not exist.
    #[error("fragment path '{path}' does not exist")]
    NotFound {
        /// Path that was requested.
        path: Utf8PathBuf,
    },

    /// A read, write, or directory enumeration failed at the filesystem
    /// boundary.
    #[error("I/O failure on '{path}': {source}")]
    Io {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File contents could not be decoded as structured text.
    #[error("failed to decode '{path}': {source}")]
    Decode {
        /// Path of the offending document.
        path: Utf8PathBuf,
        /// Underlying decoder error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An archive container was corrupt or could not be extracted.
    #[error("failed to extract archive '{path}': {source}")]
    Archive {
        /// Path of the archive.
        path: Utf8PathBuf,
        /// Underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },

    /// A merge was invoked on a value that is neither a sequence nor a
    /// mapping. Callers must guarantee container shape before merging.
    #[error("cannot merge into a {found} value; expected a sequence or mapping")]
    UnsupportedShape {
        /// Name of the rejected shape.
        found: &'static str,
    },
}

impl OverlayError {
    /// Construct a [`OverlayError::NotFound`] for `path`.
    pub(crate) fn not_found(path: &Utf8Path) -> Self {
        Self::NotFound {
            path: path.to_path_buf(),
        }
    }

    /// Construct a [`OverlayError::Io`] for `path`.
    pub(crate) fn io(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Construct a [`OverlayError::Decode`] for `path`.
    pub(crate) fn decode(
        path: &Utf8Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Construct a [`OverlayError::Archive`] for `path`.
    pub(crate) fn archive(path: &Utf8Path, source: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.to_path_buf(),
            source,
        }
    }
}
