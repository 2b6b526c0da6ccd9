//! Decoding lint deltas from the linter's JSON shape.
//!
//! ```json
//! {
//!   "added":    [Message...],
//!   "removed":  [Message...],
//!   "messages": [Message...]
//! }
//! ```
//!
//! A message is `{ "severity", "linterName", "excerpt", "location": { "file", "position" } }`
//! where `position` is either `[[row, column], [row, column]]` or
//! `{ "start": { "row", "column" }, "end": { ... } }`.

use crate::error::{DecodeError, MessageError};
use linter_ui_core::{DeltaEvent, Location, Message, Position, Range, Severity};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// A decoded delta plus the number of malformed messages that were dropped.
#[derive(Debug, Clone, Default)]
pub struct DecodedDelta {
    /// The typed delta.
    pub delta: DeltaEvent,
    /// Messages skipped because they could not be decoded.
    pub skipped: usize,
}

fn index_from_value(value: &Value) -> Option<usize> {
    usize::try_from(value.as_u64()?).ok()
}

fn position_from_pair(value: &Value) -> Option<Position> {
    match value.as_array()?.as_slice() {
        [row, column] => Some(Position::new(
            index_from_value(row)?,
            index_from_value(column)?,
        )),
        _ => None,
    }
}

fn position_from_object(value: &Value) -> Option<Position> {
    let row = index_from_value(value.get("row")?)?;
    let column = index_from_value(value.get("column")?)?;
    Some(Position::new(row, column))
}

/// Parse a range in either the pair form or the object form.
pub fn range_from_value(value: &Value) -> Option<Range> {
    match value {
        Value::Array(pair) => match pair.as_slice() {
            [start, end] => Some(Range::new(
                position_from_pair(start)?,
                position_from_pair(end)?,
            )),
            _ => None,
        },
        Value::Object(_) => Some(Range::new(
            position_from_object(value.get("start")?)?,
            position_from_object(value.get("end")?)?,
        )),
        _ => None,
    }
}

fn str_field<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, MessageError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or(MessageError::InvalidField(field))
}

/// Decode one message.
pub fn decode_message(value: &Value) -> Result<Message, MessageError> {
    if !value.is_object() {
        return Err(MessageError::NotAnObject);
    }

    let label = str_field(value, "severity")?;
    let severity =
        Severity::from_label(label).ok_or_else(|| MessageError::UnknownSeverity(label.into()))?;
    let linter_name = str_field(value, "linterName")?;
    let excerpt = str_field(value, "excerpt")?;

    let location = value
        .get("location")
        .filter(|location| location.is_object())
        .ok_or(MessageError::InvalidField("location"))?;
    let file = str_field(location, "file")?;
    let position = location
        .get("position")
        .ok_or(MessageError::InvalidField("position"))?;
    let position = range_from_value(position).ok_or(MessageError::InvalidPosition)?;

    Ok(Message::new(
        severity,
        linter_name,
        excerpt,
        Location::new(file, position),
    ))
}

struct Interner {
    seen: HashSet<Arc<Message>>,
    skipped: usize,
}

impl Interner {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            skipped: 0,
        }
    }

    // Equal messages decoded from different arrays share one handle.
    fn intern(&mut self, message: Message) -> Arc<Message> {
        if let Some(existing) = self.seen.get(&message) {
            return Arc::clone(existing);
        }
        let handle = Arc::new(message);
        self.seen.insert(Arc::clone(&handle));
        handle
    }

    fn decode_array(
        &mut self,
        payload: &Value,
        field: &'static str,
    ) -> Result<Vec<Arc<Message>>, DecodeError> {
        let items = payload
            .get(field)
            .and_then(Value::as_array)
            .ok_or(DecodeError::MissingArray(field))?;

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match decode_message(item) {
                Ok(message) => out.push(self.intern(message)),
                Err(error) => {
                    self.skipped += 1;
                    tracing::debug!(field, index, %error, "skipping malformed message");
                }
            }
        }
        Ok(out)
    }
}

/// Decode a delta from a parsed JSON value.
pub fn decode_delta(payload: &Value) -> Result<DecodedDelta, DecodeError> {
    if !payload.is_object() {
        return Err(DecodeError::NotAnObject);
    }

    let mut interner = Interner::new();
    // `messages` first so added/removed entries reuse its handles.
    let messages = interner.decode_array(payload, "messages")?;
    let added = interner.decode_array(payload, "added")?;
    let removed = interner.decode_array(payload, "removed")?;

    if interner.skipped > 0 {
        tracing::debug!(skipped = interner.skipped, "dropped malformed messages");
    }

    Ok(DecodedDelta {
        delta: DeltaEvent::new(added, removed, messages),
        skipped: interner.skipped,
    })
}

/// Decode a delta from JSON text.
pub fn decode_delta_str(text: &str) -> Result<DecodedDelta, DecodeError> {
    let payload: Value = serde_json::from_str(text)?;
    decode_delta(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_range_forms() {
        let expected = Range::from_coords((1, 2), (3, 4));
        assert_eq!(range_from_value(&json!([[1, 2], [3, 4]])), Some(expected));
        assert_eq!(
            range_from_value(&json!({
                "start": { "row": 1, "column": 2 },
                "end": { "row": 3, "column": 4 }
            })),
            Some(expected)
        );
        assert_eq!(range_from_value(&json!([[1, 2]])), None);
        assert_eq!(range_from_value(&json!([[1, -2], [3, 4]])), None);
        assert_eq!(range_from_value(&json!("1:2")), None);
    }

    #[test]
    fn test_decode_message_errors() {
        assert_eq!(decode_message(&json!(3)), Err(MessageError::NotAnObject));
        assert_eq!(
            decode_message(&json!({
                "severity": "hint",
                "linterName": "x",
                "excerpt": "y",
                "location": { "file": "/a", "position": [[0, 0], [0, 1]] }
            })),
            Err(MessageError::UnknownSeverity("hint".to_string()))
        );
        assert_eq!(
            decode_message(&json!({
                "severity": "info",
                "linterName": "x",
                "excerpt": "y"
            })),
            Err(MessageError::InvalidField("location"))
        );
        assert_eq!(
            decode_message(&json!({
                "severity": "info",
                "linterName": "x",
                "excerpt": "y",
                "location": { "file": "/a", "position": [0, 1] }
            })),
            Err(MessageError::InvalidPosition)
        );
    }

    #[test]
    fn test_interning_shares_handles() {
        let message = json!({
            "severity": "error",
            "linterName": "eslint",
            "excerpt": "no-undef",
            "location": { "file": "/a.js", "position": [[0, 0], [0, 3]] }
        });
        let decoded = decode_delta(&json!({
            "added": [message.clone()],
            "removed": [],
            "messages": [message]
        }))
        .unwrap();
        assert!(Arc::ptr_eq(
            &decoded.delta.added[0],
            &decoded.delta.messages[0]
        ));
        assert_eq!(decoded.skipped, 0);
    }
}
