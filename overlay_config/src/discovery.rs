//! Recursive resolution of fragment paths across files, directories, and
//! archive containers.

use std::collections::BTreeSet;
use std::fs::File;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use zip::ZipArchive;

use crate::error::{OverlayError, OverlayResult};
use crate::session::SessionLayout;

/// Extension identifying archive containers. Extension is the primary
/// discriminator; everything else is treated as a plain fragment file.
const ARCHIVE_EXTENSION: &str = "zip";

/// Append every fragment file reachable from `path` to `found`.
///
/// Traversal is depth-first: a plain file is appended as-is, a directory is
/// walked with its children in lexicographic order, and a zip archive is
/// extracted under the [`SessionLayout`] placement directory for the
/// archive's parent (members keep their internal relative paths, directory
/// members are never emitted as leaves) before the extracted trees are
/// walked in turn. Extraction overwrites, so resolving the same archive
/// twice neither corrupts nor duplicates state.
///
/// The accumulator style composes: calling this repeatedly against the same
/// `found` vector concatenates multiple input roots in call order.
///
/// # Errors
///
/// Returns [`OverlayError::NotFound`] when `path` does not exist,
/// [`OverlayError::Archive`] when an archive is corrupt, and
/// [`OverlayError::Io`] for filesystem failures (including non-UTF-8 child
/// names). Members extracted before a failure are left in place.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use overlay_config::{SessionLayout, resolve_fragments};
///
/// let mut fragments = Vec::new();
/// let layout = SessionLayout::flat();
/// resolve_fragments(Utf8Path::new("conf/base.yml"), &layout, &mut fragments)?;
/// resolve_fragments(Utf8Path::new("conf/overrides.zip"), &layout, &mut fragments)?;
/// # Ok::<(), overlay_config::OverlayError>(())
/// ```
pub fn resolve_fragments(
    path: &Utf8Path,
    layout: &SessionLayout,
    found: &mut Vec<Utf8PathBuf>,
) -> OverlayResult<()> {
    if !path.exists() {
        return Err(OverlayError::not_found(path));
    }
    if path.is_dir() {
        for child in sorted_children(path)? {
            resolve_fragments(&child, layout, found)?;
        }
        return Ok(());
    }
    if is_archive(path) {
        for root in extract_archive(path, layout)? {
            resolve_fragments(&root, layout, found)?;
        }
        return Ok(());
    }
    found.push(path.to_path_buf());
    Ok(())
}

fn is_archive(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}

/// Immediate children of `dir` in lexicographic order of their full path.
fn sorted_children(dir: &Utf8Path) -> OverlayResult<Vec<Utf8PathBuf>> {
    let entries = dir
        .read_dir_utf8()
        .map_err(|source| OverlayError::io(dir, source))?;
    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| OverlayError::io(dir, source))?;
        children.push(entry.into_path());
    }
    children.sort();
    Ok(children)
}

/// Extract every member of the archive at `path` and return the distinct
/// top-level extracted paths, sorted, for the caller to walk.
///
/// The extraction root is the placement directory for the archive's parent,
/// so a flat layout materialises members directly beside the archive while a
/// scoped layout keeps them inside the session subdirectory.
fn extract_archive(
    path: &Utf8Path,
    layout: &SessionLayout,
) -> OverlayResult<Vec<Utf8PathBuf>> {
    let parent = path.parent().unwrap_or(Utf8Path::new(""));
    let root = layout.placement_dir(parent);
    let file = File::open(path).map_err(|source| OverlayError::io(path, source))?;
    let mut archive = ZipArchive::new(file).map_err(|source| OverlayError::archive(path, source))?;

    let mut tops: BTreeSet<Utf8PathBuf> = BTreeSet::new();
    for name in archive.file_names() {
        if let Some(Utf8Component::Normal(first)) = Utf8Path::new(name).components().next() {
            tops.insert(root.join(first));
        }
    }
    archive
        .extract(&root)
        .map_err(|source| OverlayError::archive(path, source))?;
    tracing::debug!(
        archive = %path,
        root = %root,
        members = archive.len(),
        "extracted archive container"
    );
    Ok(tops.into_iter().collect())
}
