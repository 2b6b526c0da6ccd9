//! Buffer coordinates used by diagnostics and the navigation cursor.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Position coordinates (row and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column within the row.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    /// Formats as 1-based `row:column`, the way positions are shown to users.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Widened so `usize::MAX` coordinates cannot overflow.
        write!(f, "{}:{}", self.row as u128 + 1, self.column as u128 + 1)
    }
}

/// A source range (`start..end`) in buffer coordinates.
///
/// A range with `start == end` is degenerate and anchors a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    /// Range start (inclusive).
    pub start: Position,
    /// Range end (exclusive, unless the range is degenerate).
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Shorthand for a range built from raw `(row, column)` pairs.
    pub const fn from_coords(start: (usize, usize), end: (usize, usize)) -> Self {
        Self {
            start: Position::new(start.0, start.1),
            end: Position::new(end.0, end.1),
        }
    }

    /// Check whether the range anchors a single point.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Check if the range contains `point`.
    ///
    /// Non-degenerate ranges are half-open (`start <= point < end`). A degenerate range
    /// contains exactly its own point.
    pub fn contains_point(&self, point: Position) -> bool {
        if self.is_degenerate() {
            return point == self.start;
        }
        self.start <= point && point < self.end
    }

    /// Return the endpoint selected by `anchor`.
    pub fn anchor(&self, anchor: Anchor) -> Position {
        match anchor {
            Anchor::Start => self.start,
            Anchor::End => self.end,
        }
    }
}

/// Which endpoint of a range a comparison is made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Compare against `range.start` (where a jump lands).
    #[default]
    Start,
    /// Compare against `range.end` (whether the cursor already passed the range).
    End,
}
