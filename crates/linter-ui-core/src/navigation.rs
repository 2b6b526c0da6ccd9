//! Cursor-relative navigation over a sorted message list.
//!
//! All queries are pure functions of the cursor and the list. `next`/`prev` wrap around, so a
//! non-empty list always yields a result.

use crate::diagnostics::Message;
use crate::position::{Anchor, Position};
use std::sync::Arc;

/// First message whose range contains `cursor` (see [`crate::Range::contains_point`]).
pub fn containing(messages: &[Arc<Message>], cursor: Position) -> Option<&Arc<Message>> {
    messages
        .iter()
        .find(|message| message.location.position.contains_point(cursor))
}

/// First message whose `anchor` endpoint is strictly after `cursor`, wrapping to the first
/// message when there is none.
pub fn next(messages: &[Arc<Message>], cursor: Position, anchor: Anchor) -> Option<&Arc<Message>> {
    messages
        .iter()
        .find(|message| message.location.position.anchor(anchor) > cursor)
        .or_else(|| messages.first())
}

/// Last message whose `anchor` endpoint is strictly before `cursor`, wrapping to the last
/// message when there is none.
pub fn prev(messages: &[Arc<Message>], cursor: Position, anchor: Anchor) -> Option<&Arc<Message>> {
    messages
        .iter()
        .rev()
        .find(|message| message.location.position.anchor(anchor) < cursor)
        .or_else(|| messages.last())
}
