//! Test helpers shared across crates in the overlay-config workspace.
//!
//! This crate currently provides fixture builders for fragment files and
//! zip archive containers.

use std::fs::File;
use std::io::Write;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// View a std path as UTF-8.
///
/// # Panics
///
/// Panics when the platform hands out a non-UTF-8 temporary path; fixtures
/// cannot be built there.
#[must_use]
pub fn utf8(path: &std::path::Path) -> &Utf8Path {
    Utf8Path::from_path(path).expect("temporary path should be UTF-8")
}

/// Write a fragment file named `name` under `dir`, creating intermediate
/// directories.
///
/// # Errors
///
/// Returns an error when a directory or the file itself cannot be written.
pub fn write_fragment(dir: &Utf8Path, name: &str, contents: &str) -> anyhow::Result<Utf8PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {parent}"))?;
    }
    std::fs::write(&path, contents).with_context(|| format!("writing {path}"))?;
    Ok(path)
}

/// Build a zip archive named `name` under `dir` from `(member, contents)`
/// pairs. Members are stored uncompressed; their paths may contain `/`
/// separators to form an internal tree.
///
/// # Errors
///
/// Returns an error when the archive cannot be created or a member cannot
/// be written.
pub fn build_zip(
    dir: &Utf8Path,
    name: &str,
    members: &[(&str, &str)],
) -> anyhow::Result<Utf8PathBuf> {
    let path = dir.join(name);
    let file = File::create(&path).with_context(|| format!("creating {path}"))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (member, contents) in members {
        writer
            .start_file(*member, options)
            .with_context(|| format!("adding {member} to {path}"))?;
        writer
            .write_all(contents.as_bytes())
            .with_context(|| format!("writing {member} in {path}"))?;
    }
    writer.finish().with_context(|| format!("finalising {path}"))?;
    Ok(path)
}
