//! Diagnostics data model.
//!
//! A [`Message`] is one reported issue: a severity, the linter that produced it, a short
//! excerpt, and the document location it is attached to. Messages arrive from the linter in
//! [`DeltaEvent`]s and are shared as [`Arc<Message>`] handles; the engine never copies or
//! rewrites them.

use crate::position::Range;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error diagnostics.
    Error,
    /// Warning diagnostics.
    Warning,
    /// Informational diagnostics.
    Info,
}

impl Severity {
    /// All severities, in display order.
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    /// Lowercase label (`"error"`, `"warning"`, `"info"`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Capitalized label used in list panels.
    pub fn title(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }

    /// Parse a lowercase label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

/// Where a message points: the owning file and a range inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// Path of the document the message belongs to.
    pub file: PathBuf,
    /// Source range of the message.
    pub position: Range,
}

impl Location {
    /// Create a new location.
    pub fn new(file: impl Into<PathBuf>, position: Range) -> Self {
        Self {
            file: file.into(),
            position,
        }
    }
}

/// A single diagnostic produced by a linter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    /// Diagnostic severity.
    pub severity: Severity,
    /// Name of the linter that produced the message.
    pub linter_name: String,
    /// Short description (may contain host-rendered markup).
    pub excerpt: String,
    /// Owning file and range.
    pub location: Location,
}

impl Message {
    /// Create a new message.
    pub fn new(
        severity: Severity,
        linter_name: impl Into<String>,
        excerpt: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            severity,
            linter_name: linter_name.into(),
            excerpt: excerpt.into(),
            location,
        }
    }

    /// Check whether the message belongs to `path`.
    pub fn is_in(&self, path: &Path) -> bool {
        self.location.file == path
    }
}

/// One lint cycle reported by the linter.
///
/// `added` and `removed` only tell which documents were touched; `messages` is the
/// authoritative full set every touched document is rebuilt from.
#[derive(Debug, Clone, Default)]
pub struct DeltaEvent {
    /// Messages that appeared since the previous cycle.
    pub added: Vec<Arc<Message>>,
    /// Messages that disappeared since the previous cycle.
    pub removed: Vec<Arc<Message>>,
    /// Every message that is still valid after this cycle.
    pub messages: Vec<Arc<Message>>,
}

impl DeltaEvent {
    /// Create a delta from its three message sets.
    pub fn new(
        added: Vec<Arc<Message>>,
        removed: Vec<Arc<Message>>,
        messages: Vec<Arc<Message>>,
    ) -> Self {
        Self {
            added,
            removed,
            messages,
        }
    }

    /// Iterate over `added ∪ removed`.
    pub fn changed(&self) -> impl Iterator<Item = &Arc<Message>> {
        self.added.iter().chain(self.removed.iter())
    }

    /// Returns `true` if the delta neither adds nor removes anything.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Opaque identifier for a document tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(pub(crate) u64);

impl DocumentId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}
