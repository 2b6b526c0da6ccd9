//! Delta classification: which documents does a lint cycle touch, and what is their new
//! message list.
//!
//! Lists are always rebuilt by filtering the authoritative full set instead of patching
//! them with `added`/`removed`, so a document's list can never drift from the linter's view.

use crate::diagnostics::{DeltaEvent, DocumentId, Message};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Set of file paths referenced by `added ∪ removed`.
pub fn touched_paths(delta: &DeltaEvent) -> HashSet<&Path> {
    delta
        .changed()
        .map(|message| message.location.file.as_path())
        .collect()
}

/// Return the documents (in iteration order) whose path appears in `added ∪ removed`.
///
/// Documents without a path are never touched.
pub fn touched_documents<'a, I>(delta: &DeltaEvent, documents: I) -> Vec<DocumentId>
where
    I: IntoIterator<Item = (DocumentId, Option<&'a Path>)>,
{
    if delta.is_noop() {
        return Vec::new();
    }

    let paths = touched_paths(delta);
    documents
        .into_iter()
        .filter_map(|(id, path)| path.filter(|p| paths.contains(*p)).map(|_| id))
        .collect()
}

/// Filter `messages` down to `path` and sort by start position.
///
/// The sort is stable: messages sharing a start position keep their order in `messages`.
pub fn partition(messages: &[Arc<Message>], path: &Path) -> Vec<Arc<Message>> {
    let mut out: Vec<Arc<Message>> = messages
        .iter()
        .filter(|message| message.is_in(path))
        .cloned()
        .collect();
    out.sort_by_key(|message| message.location.position.start);
    out
}
