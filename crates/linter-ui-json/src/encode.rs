//! Encoding messages and view models for JSON hosts.

use linter_ui_core::{Message, PanelRow, Range, SeverityCounts, StatusView};
use serde_json::{Value, json};

fn range_to_value(range: Range) -> Value {
    json!([
        [range.start.row, range.start.column],
        [range.end.row, range.end.column]
    ])
}

/// Encode a message in the linter's wire shape (the inverse of
/// [`decode_message`](crate::decode_message)).
pub fn encode_message(message: &Message) -> Value {
    json!({
        "severity": message.severity.label(),
        "linterName": message.linter_name,
        "excerpt": message.excerpt,
        "location": {
            "file": message.location.file.to_string_lossy(),
            "position": range_to_value(message.location.position),
        }
    })
}

/// Encode panel rows.
pub fn encode_panel_rows(rows: &[PanelRow]) -> serde_json::Result<Value> {
    serde_json::to_value(rows)
}

/// Encode the status tile.
pub fn encode_status(status: &StatusView) -> serde_json::Result<Value> {
    serde_json::to_value(status)
}

/// Encode per-severity counts.
pub fn encode_counts(counts: &SeverityCounts) -> serde_json::Result<Value> {
    serde_json::to_value(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_message;
    use linter_ui_core::{Location, Severity};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_message_wire_shape() {
        let message = Message::new(
            Severity::Warning,
            "clippy",
            "needless borrow",
            Location::new("/src/lib.rs", Range::from_coords((4, 1), (4, 7))),
        );
        let value = encode_message(&message);
        assert_eq!(
            value,
            json!({
                "severity": "warning",
                "linterName": "clippy",
                "excerpt": "needless borrow",
                "location": { "file": "/src/lib.rs", "position": [[4, 1], [4, 7]] }
            })
        );
        assert_eq!(decode_message(&value), Ok(message));
    }

    #[test]
    fn test_encode_counts() {
        let counts = SeverityCounts {
            error: 2,
            warning: 1,
            info: 0,
        };
        assert_eq!(
            encode_counts(&counts).unwrap(),
            json!({ "error": 2, "warning": 1, "info": 0 })
        );
    }
}
