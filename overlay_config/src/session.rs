//! Placement of generated files within a resolution session.

use camino::{Utf8Path, Utf8PathBuf};

/// Controls where derived files land: split documents and extracted archive
/// members are written either into a session-scoped subdirectory or flat
/// beside their source.
///
/// The layout is threaded explicitly into [`split_documents`] and
/// [`resolve_fragments`], so concurrent sessions with different settings do
/// not interfere.
///
/// [`split_documents`]: crate::split_documents
/// [`resolve_fragments`]: crate::resolve_fragments
///
/// # Examples
///
/// ```rust
/// use camino::Utf8Path;
/// use overlay_config::SessionLayout;
///
/// let scoped = SessionLayout::scoped("task-42");
/// assert_eq!(scoped.placement_dir(Utf8Path::new("conf")), "conf/task-42");
///
/// let flat = SessionLayout::flat();
/// assert_eq!(flat.placement_dir(Utf8Path::new("conf")), "conf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLayout {
    scope: Option<String>,
}

impl SessionLayout {
    /// Place generated files in a subdirectory named after the session.
    #[must_use]
    pub fn scoped<S: Into<String>>(id: S) -> Self {
        Self {
            scope: Some(id.into()),
        }
    }

    /// Write generated files directly beside their source.
    #[must_use]
    pub const fn flat() -> Self {
        Self { scope: None }
    }

    /// Directory that generated files belong in, for sources under `parent`.
    ///
    /// The directory is not created here; writers create it on demand.
    #[must_use]
    pub fn placement_dir(&self, parent: &Utf8Path) -> Utf8PathBuf {
        match &self.scope {
            Some(scope) => parent.join(scope),
            None => parent.to_path_buf(),
        }
    }

    /// Derive a session-qualified file name.
    ///
    /// Scoped layouts prefix `name` with the session identifier; flat layouts
    /// return it unchanged. Launchers use this to keep per-task file names
    /// from colliding.
    #[must_use]
    pub fn prefixed(&self, name: &str) -> String {
        match &self.scope {
            Some(scope) => format!("{scope}_{name}"),
            None => name.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::scoped(SessionLayout::scoped("session"), "conf/session")]
    #[case::flat(SessionLayout::flat(), "conf")]
    fn placement_dir_honours_scope(#[case] layout: SessionLayout, #[case] expected: &str) {
        assert_eq!(layout.placement_dir(Utf8Path::new("conf")), expected);
    }

    #[test]
    fn prefixed_joins_scope_and_name() {
        let name = SessionLayout::scoped("taskid").prefixed("session");
        let parts: Vec<&str> = name.split('_').collect();
        assert_eq!(parts, ["taskid", "session"]);
    }

    #[test]
    fn prefixed_is_identity_for_flat_layouts() {
        assert_eq!(SessionLayout::flat().prefixed("app.yml"), "app.yml");
    }
}
