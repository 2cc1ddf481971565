//! Configuration-fragment assembly for orchestration launchers.
//!
//! Given a set of base definitions plus environment-specific overlay files,
//! or archives containing such files, this crate discovers the concrete set
//! of fragment files to use, splits composite multi-document fragments into
//! one-document-per-file units, and merges elements across document trees so
//! later fragments can replace or append to values defined earlier.
//!
//! The pieces compose in a fixed order: [`resolve_fragments`] flattens an
//! input path (plain file, directory, or zip archive) into an ordered list
//! of fragment paths; [`split_documents`] materialises one file per
//! document; [`decode_document`] turns each file into the generic value tree
//! that [`replace_element`] and [`append_element`] operate over. The
//! surrounding launcher owns the final composition loop and the lifetime of
//! any files these helpers create.
//!
//! Generated files are placed according to a [`SessionLayout`] threaded into
//! each call, so concurrent sessions with different placement settings do
//! not interfere.

mod decode;
mod discovery;
mod error;
pub mod fs;
mod merge;
mod pattern;
mod session;
mod split;

pub use decode::{decode_as, decode_document, decode_fragments};
pub use discovery::resolve_fragments;
pub use error::{OverlayError, OverlayResult};
pub use merge::{append_element, replace_element, sequence_to_map};
pub use pattern::MatchPattern;
pub use session::SessionLayout;
pub use split::split_documents;
