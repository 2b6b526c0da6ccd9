//! Region groups: the ranges a renderer highlights, bucketed by severity and style.
//!
//! Each document owns one group per `(severity, style)` pair. Groups are rebuilt wholesale
//! from the document's sorted message list; registration order within a group follows the
//! message order, so renderers that resolve overlaps by "first match wins" stay deterministic.

use crate::diagnostics::Severity;
use crate::position::Range;
use serde::{Deserialize, Serialize};

/// How a region group is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionStyle {
    /// Decoration applied to the text itself (underline/colored text).
    Inline,
    /// Background highlight of the whole range.
    Block,
}

impl RegionStyle {
    /// All styles, in projection order.
    pub const ALL: [RegionStyle; 2] = [RegionStyle::Inline, RegionStyle::Block];

    /// Lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Block => "block",
        }
    }
}

/// Identifies one region group of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionGroupKey {
    /// Severity of the messages in the group.
    pub severity: Severity,
    /// Rendering style of the group.
    pub style: RegionStyle,
}

impl RegionGroupKey {
    /// Every group key, severity-major.
    pub const ALL: [RegionGroupKey; 6] = [
        RegionGroupKey::new(Severity::Error, RegionStyle::Inline),
        RegionGroupKey::new(Severity::Error, RegionStyle::Block),
        RegionGroupKey::new(Severity::Warning, RegionStyle::Inline),
        RegionGroupKey::new(Severity::Warning, RegionStyle::Block),
        RegionGroupKey::new(Severity::Info, RegionStyle::Inline),
        RegionGroupKey::new(Severity::Info, RegionStyle::Block),
    ];

    /// Create a group key.
    pub const fn new(severity: Severity, style: RegionStyle) -> Self {
        Self { severity, style }
    }

    /// CSS-like class name a host can map to a theme (e.g. `linter-text error`).
    pub fn class_name(self) -> String {
        let prefix = match self.style {
            RegionStyle::Inline => "linter-text",
            RegionStyle::Block => "linter-high",
        };
        format!("{prefix} {}", self.severity.label())
    }

    fn slot(self) -> usize {
        let severity = match self.severity {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        };
        let style = match self.style {
            RegionStyle::Inline => 0,
            RegionStyle::Block => 1,
        };
        severity * 2 + style
    }
}

/// The six region groups of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionGroups {
    groups: [Vec<Range>; 6],
}

impl RegionGroups {
    /// Create empty groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranges registered in one group, in registration order.
    pub fn get(&self, key: RegionGroupKey) -> &[Range] {
        &self.groups[key.slot()]
    }

    /// Register `range` into the group for `(severity, style)`.
    ///
    /// Degenerate and out-of-document ranges are kept as-is.
    pub fn register(&mut self, key: RegionGroupKey, range: Range) {
        self.groups[key.slot()].push(range);
    }

    /// Total number of registered ranges across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Check if every group is empty.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }
}
