//! Per-document message storage.

use crate::diagnostics::Message;
use std::sync::Arc;

/// Shared, immutable, sorted list of messages for one document.
pub type MessageList = Arc<[Arc<Message>]>;

/// Sorted message list of a single document plus its dirty flag.
///
/// The list is only ever swapped as a whole, so readers never observe a partially sorted
/// list. Untouched documents keep the very same [`MessageList`] allocation across deltas.
#[derive(Debug, Clone)]
pub struct MessageStore {
    messages: MessageList,
    dirty: bool,
}

impl MessageStore {
    /// Create an empty, clean store.
    pub fn new() -> Self {
        Self {
            messages: Arc::from(Vec::new()),
            dirty: false,
        }
    }

    /// Replace the whole list and mark the store dirty.
    ///
    /// `sorted` must already be ordered by start position.
    pub(crate) fn replace(&mut self, sorted: Vec<Arc<Message>>) {
        debug_assert!(is_sorted_by_start(&sorted));
        self.messages = Arc::from(sorted);
        self.dirty = true;
    }

    /// Sorted messages.
    pub fn get(&self) -> &MessageList {
        &self.messages
    }

    /// Whether the list changed since the last projection.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn is_sorted_by_start(messages: &[Arc<Message>]) -> bool {
    messages
        .windows(2)
        .all(|w| w[0].location.position.start <= w[1].location.position.start)
}
