//! Renderer-facing edit stream.
//!
//! The engine never draws anything. Every change to what should be on screen is described as
//! an [`OverlayEdit`]; hosts forward the edits to their rendering layer through an
//! [`OverlayRenderer`]. [`RenderedOverlays`] is an in-memory renderer that mirrors the edits,
//! useful for headless hosts and tests.

use crate::diagnostics::{DocumentId, Message};
use crate::position::{Position, Range};
use crate::regions::RegionGroupKey;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A change to renderer-owned state.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEdit {
    /// Replace every range of one region group.
    ReplaceRegions {
        /// Target document.
        document: DocumentId,
        /// Target group.
        group: RegionGroupKey,
        /// The full, ordered set of ranges for the group.
        ranges: Vec<Range>,
    },
    /// Clear one region group.
    ClearRegions {
        /// Target document.
        document: DocumentId,
        /// Target group.
        group: RegionGroupKey,
    },
    /// Show the inspection overlay for one message.
    ShowInspection {
        /// Target document.
        document: DocumentId,
        /// Inspected message.
        message: Arc<Message>,
        /// Where the overlay is anchored.
        anchor: Position,
    },
    /// Hide the document's inspection overlay.
    HideInspection {
        /// Target document.
        document: DocumentId,
    },
    /// Release every host resource tied to the document.
    DisposeDocument {
        /// Target document.
        document: DocumentId,
    },
}

impl OverlayEdit {
    /// The document an edit applies to.
    pub fn document(&self) -> DocumentId {
        match self {
            Self::ReplaceRegions { document, .. }
            | Self::ClearRegions { document, .. }
            | Self::ShowInspection { document, .. }
            | Self::HideInspection { document }
            | Self::DisposeDocument { document } => *document,
        }
    }
}

/// A rendering backend that consumes [`OverlayEdit`]s.
pub trait OverlayRenderer {
    /// The error type returned by [`OverlayRenderer::apply`].
    type Error;

    /// Apply a single edit.
    fn apply(&mut self, edit: &OverlayEdit) -> Result<(), Self::Error>;

    /// Apply edits in order, stopping at the first failure.
    fn apply_all<'a, I>(&mut self, edits: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = &'a OverlayEdit>,
    {
        for edit in edits {
            self.apply(edit)?;
        }
        Ok(())
    }
}

/// An inspection overlay as seen by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedInspection {
    /// Inspected message.
    pub message: Arc<Message>,
    /// Overlay anchor.
    pub anchor: Position,
}

/// In-memory renderer that mirrors the current overlay state.
#[derive(Debug, Clone, Default)]
pub struct RenderedOverlays {
    regions: BTreeMap<(DocumentId, RegionGroupKey), Vec<Range>>,
    inspections: BTreeMap<DocumentId, RenderedInspection>,
}

impl RenderedOverlays {
    /// Create an empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranges currently drawn for a group (empty if none).
    pub fn regions(&self, document: DocumentId, group: RegionGroupKey) -> &[Range] {
        self.regions
            .get(&(document, group))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Currently shown inspection overlay of a document.
    pub fn inspection(&self, document: DocumentId) -> Option<&RenderedInspection> {
        self.inspections.get(&document)
    }

    /// Number of inspection overlays shown across all documents.
    pub fn inspection_count(&self) -> usize {
        self.inspections.len()
    }

    /// Returns `true` if nothing is drawn for `document`.
    pub fn is_document_clear(&self, document: DocumentId) -> bool {
        !self.inspections.contains_key(&document)
            && !self.regions.keys().any(|(doc, _)| *doc == document)
    }
}

impl OverlayRenderer for RenderedOverlays {
    type Error = std::convert::Infallible;

    fn apply(&mut self, edit: &OverlayEdit) -> Result<(), Self::Error> {
        match edit {
            OverlayEdit::ReplaceRegions {
                document,
                group,
                ranges,
            } => {
                if ranges.is_empty() {
                    self.regions.remove(&(*document, *group));
                } else {
                    self.regions.insert((*document, *group), ranges.clone());
                }
            }
            OverlayEdit::ClearRegions { document, group } => {
                self.regions.remove(&(*document, *group));
            }
            OverlayEdit::ShowInspection {
                document,
                message,
                anchor,
            } => {
                self.inspections.insert(
                    *document,
                    RenderedInspection {
                        message: Arc::clone(message),
                        anchor: *anchor,
                    },
                );
            }
            OverlayEdit::HideInspection { document } => {
                self.inspections.remove(document);
            }
            OverlayEdit::DisposeDocument { document } => {
                self.inspections.remove(document);
                self.regions.retain(|(doc, _), _| doc != document);
            }
        }
        Ok(())
    }
}
