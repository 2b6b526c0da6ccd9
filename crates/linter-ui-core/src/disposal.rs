//! Teardown bookkeeping.
//!
//! Everything the engine asks a host to create for a document (region groups, the inspection
//! overlay, the document entry itself) is recorded here when it is first created. Closing the
//! document drains the list in reverse order, so teardown never depends on remembering what
//! was created.

use crate::diagnostics::DocumentId;
use crate::processing::OverlayEdit;
use crate::regions::RegionGroupKey;

/// One resource that must be released on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teardown {
    /// The document entry (store + host-side document state).
    Document,
    /// A region group.
    RegionGroup(RegionGroupKey),
    /// The inspection overlay.
    Inspection,
}

impl Teardown {
    /// Edit that releases the resource on the host side.
    pub fn edit(self, document: DocumentId) -> OverlayEdit {
        match self {
            Self::Document => OverlayEdit::DisposeDocument { document },
            Self::RegionGroup(group) => OverlayEdit::ClearRegions { document, group },
            Self::Inspection => OverlayEdit::HideInspection { document },
        }
    }
}

/// Ordered list of teardown entries for a single document.
#[derive(Debug, Clone, Default)]
pub struct DisposalList {
    entries: Vec<Teardown>,
}

impl DisposalList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resource. Registering the same resource twice keeps one entry.
    pub fn register(&mut self, entry: Teardown) {
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    /// Remove an entry whose resource was already released.
    pub fn forget(&mut self, entry: Teardown) {
        self.entries.retain(|e| *e != entry);
    }

    /// Whether `entry` is registered.
    pub fn contains(&self, entry: Teardown) -> bool {
        self.entries.contains(&entry)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain in reverse registration order, producing release edits.
    ///
    /// A drained list is empty, so disposing twice yields nothing the second time.
    pub fn dispose(&mut self, document: DocumentId) -> Vec<OverlayEdit> {
        self.entries
            .drain(..)
            .rev()
            .map(|entry| entry.edit(document))
            .collect()
    }
}
