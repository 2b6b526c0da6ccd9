//! List panel view model: one row per diagnostic of the active document.

use crate::diagnostics::{Message, Severity};
use crate::position::Position;
use serde::Serialize;
use std::sync::Arc;

/// A single row of the diagnostics panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelRow {
    /// Message severity.
    pub severity: Severity,
    /// Capitalized severity label.
    pub severity_title: &'static str,
    /// Linter that produced the message.
    pub provider: String,
    /// 1-based `row:column` of the message start.
    pub position: String,
    /// Last component of the message's file path.
    pub file_name: String,
    /// Message excerpt.
    pub excerpt: String,
    /// Whether the cursor is inside the message range.
    pub is_current: bool,
    /// Where clicking the row should move the cursor.
    pub jump_target: Position,
}

impl PanelRow {
    /// Build a row for `message` given the current cursor.
    pub fn new(message: &Message, cursor: Option<Position>) -> Self {
        let range = message.location.position;
        Self {
            severity: message.severity,
            severity_title: message.severity.title(),
            provider: message.linter_name.clone(),
            position: range.start.to_string(),
            file_name: message
                .location
                .file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            excerpt: message.excerpt.clone(),
            is_current: cursor.is_some_and(|c| range.contains_point(c)),
            jump_target: range.start,
        }
    }
}

/// Build all rows for a sorted message list.
pub fn panel_rows(messages: &[Arc<Message>], cursor: Option<Position>) -> Vec<PanelRow> {
    messages
        .iter()
        .map(|message| PanelRow::new(message, cursor))
        .collect()
}

/// Index of the first row marked current (the row a panel should scroll to).
pub fn current_row(rows: &[PanelRow]) -> Option<usize> {
    rows.iter().position(|row| row.is_current)
}
