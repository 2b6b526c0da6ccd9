//! The inspection overlay: a single transient annotation anchored to one message.
//!
//! A document has at most one active inspection. Showing a new one hides the previous one
//! first, and [`InspectionSlot::dismiss`] is safe to call when nothing is shown.

use crate::diagnostics::{DocumentId, Message};
use crate::position::Position;
use crate::processing::OverlayEdit;
use std::sync::Arc;

/// The currently shown inspection overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveInspection {
    /// Inspected message.
    pub message: Arc<Message>,
    /// Overlay anchor.
    pub anchor: Position,
}

/// Holder for a document's (optional) inspection overlay.
#[derive(Debug, Clone, Default)]
pub struct InspectionSlot {
    active: Option<ActiveInspection>,
    // Cursor position the host is about to move to because of the jump that opened the
    // overlay; that one move must not dismiss it.
    jump_target: Option<Position>,
}

impl InspectionSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently shown overlay, if any.
    pub fn active(&self) -> Option<&ActiveInspection> {
        self.active.as_ref()
    }

    /// Whether an overlay is shown.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Show an overlay for `message` at `anchor`, hiding the current one first.
    pub fn show(
        &mut self,
        document: DocumentId,
        message: Arc<Message>,
        anchor: Position,
    ) -> Vec<OverlayEdit> {
        let mut edits = Vec::with_capacity(2);
        edits.extend(self.dismiss(document));
        edits.push(OverlayEdit::ShowInspection {
            document,
            message: Arc::clone(&message),
            anchor,
        });
        self.active = Some(ActiveInspection { message, anchor });
        edits
    }

    /// Like [`show`](Self::show), for an overlay opened by a jump: the host's cursor move to
    /// `anchor` that follows is not treated as a dismissal.
    pub fn show_after_jump(
        &mut self,
        document: DocumentId,
        message: Arc<Message>,
        anchor: Position,
    ) -> Vec<OverlayEdit> {
        let edits = self.show(document, message, anchor);
        self.jump_target = Some(anchor);
        edits
    }

    /// React to a cursor move: the overlay is dismissed unless this is the move to the jump
    /// target that opened it.
    pub fn cursor_moved(&mut self, document: DocumentId, cursor: Position) -> Option<OverlayEdit> {
        if self.jump_target.take() == Some(cursor) && self.active.is_some() {
            return None;
        }
        self.dismiss(document)
    }

    /// Hide the overlay. Returns the hide edit only if something was shown.
    pub fn dismiss(&mut self, document: DocumentId) -> Option<OverlayEdit> {
        self.jump_target = None;
        self.active
            .take()
            .map(|_| OverlayEdit::HideInspection { document })
    }
}
