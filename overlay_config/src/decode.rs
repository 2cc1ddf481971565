//! Decoding fragment files into generic document trees.
//!
//! The merge engine operates on already-decoded [`serde_yaml::Value`] trees;
//! this module is the codec boundary that produces them.

use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::error::{OverlayError, OverlayResult};
use crate::fs;

/// Decode one single-document fragment file into a generic value tree.
///
/// A file that is empty (or whitespace only) decodes to [`Value::Null`].
///
/// # Errors
///
/// Returns [`OverlayError::NotFound`] / [`OverlayError::Io`] when the file
/// cannot be read and [`OverlayError::Decode`] when its contents are not
/// well-formed.
pub fn decode_document(path: &Utf8Path) -> OverlayResult<Value> {
    let contents = fs::read_file(path)?;
    if contents.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(&contents).map_err(|source| OverlayError::decode(path, source))
}

/// Decode a set of fragment files, preserving input order.
///
/// # Errors
///
/// Propagates the first [`decode_document`] failure; fragments decoded
/// before it are discarded.
pub fn decode_fragments(paths: &[Utf8PathBuf]) -> OverlayResult<Vec<(Utf8PathBuf, Value)>> {
    paths
        .iter()
        .map(|path| decode_document(path).map(|document| (path.clone(), document)))
        .collect()
}

/// Decode a fragment file into a typed value.
///
/// For callers that know a fragment's schema and want a concrete struct
/// rather than a generic tree.
///
/// # Errors
///
/// Returns [`OverlayError::NotFound`] / [`OverlayError::Io`] when the file
/// cannot be read and [`OverlayError::Decode`] when its contents do not
/// deserialize into `T`.
pub fn decode_as<T: DeserializeOwned>(path: &Utf8Path) -> OverlayResult<T> {
    let contents = fs::read_file(path)?;
    serde_yaml::from_str(&contents).map_err(|source| OverlayError::decode(path, source))
}
