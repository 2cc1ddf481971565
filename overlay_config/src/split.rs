//! Splitting composite fragment files into one file per document.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::OverlayResult;
use crate::fs;
use crate::session::SessionLayout;

/// Line that separates documents inside a composite fragment file.
const DOCUMENT_SEPARATOR: &str = "---";

/// Split a composite fragment file into independently parseable files.
///
/// A document boundary is a line consisting solely of the three-dash marker.
/// A file with no boundaries is returned as-is in a single-element sequence
/// and no file is created. Otherwise each document is trimmed, empty
/// documents are dropped (a file ending in a trailing separator produces no
/// empty tail file), and every surviving document is written to a file named
/// `<stem>_<index>` with the source's extension, placed by `layout` either
/// in the session subdirectory or beside the source. The returned paths
/// preserve document order; re-splitting the same input produces the same
/// names and contents.
///
/// # Errors
///
/// Returns [`OverlayError::NotFound`] or [`OverlayError::Io`] when the
/// source cannot be read, and [`OverlayError::Io`] when a derived file
/// cannot be written. Files written before a failure remain on disk.
///
/// [`OverlayError::NotFound`]: crate::OverlayError::NotFound
/// [`OverlayError::Io`]: crate::OverlayError::Io
pub fn split_documents(
    path: &Utf8Path,
    layout: &SessionLayout,
) -> OverlayResult<Vec<Utf8PathBuf>> {
    let contents = fs::read_file(path)?;
    let documents = split_boundaries(&contents);
    if documents.len() == 1 {
        return Ok(vec![path.to_path_buf()]);
    }

    let parent = path.parent().unwrap_or(Utf8Path::new(""));
    let directory = layout.placement_dir(parent);
    let stem = path.file_stem().unwrap_or("fragment");
    let mut produced = Vec::new();
    for document in documents.iter().map(|doc| doc.trim()) {
        if document.is_empty() {
            continue;
        }
        let name = match path.extension() {
            Some(extension) => format!("{stem}_{}.{extension}", produced.len()),
            None => format!("{stem}_{}", produced.len()),
        };
        let target = fs::write_file(&directory.join(name), document.as_bytes())?;
        tracing::debug!(source = %path, target = %target, "materialised split document");
        produced.push(target);
    }
    Ok(produced)
}

/// Cut `contents` at separator lines, yielding one entry per document.
fn split_boundaries(contents: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current = String::new();
    for line in contents.lines() {
        if line.trim_end() == DOCUMENT_SEPARATOR {
            documents.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    documents.push(current);
    documents
}
