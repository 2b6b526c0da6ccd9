//! Aggregate state for status displays.
//!
//! [`SeverityCounts`] is a single-pass tally of a message list; [`StatusView`] is what a status
//! bar tile shows for the active document.

use crate::commands::NavigationCommand;
use crate::diagnostics::{Message, Severity};
use serde::Serialize;
use std::sync::Arc;

/// Number of messages per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeverityCounts {
    /// Error count.
    pub error: usize,
    /// Warning count.
    pub warning: usize,
    /// Info count.
    pub info: usize,
}

impl SeverityCounts {
    /// Tally `messages` by severity.
    pub fn from_messages(messages: &[Arc<Message>]) -> Self {
        let mut counts = Self::default();
        for message in messages {
            match message.severity {
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    /// Count for one severity.
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    /// Total across severities.
    pub fn total(&self) -> usize {
        self.error + self.warning + self.info
    }
}

/// Status tile contents for the active document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusView {
    /// Whether the tile should be shown at all (false when no document is active).
    pub visible: bool,
    /// Counts of the active document.
    pub counts: SeverityCounts,
}

impl StatusView {
    /// The hidden, all-zero tile.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// A visible tile for `counts`.
    pub fn for_counts(counts: SeverityCounts) -> Self {
        Self {
            visible: true,
            counts,
        }
    }

    /// Whether the severity's counter should be drawn in its severity color.
    pub fn is_highlighted(&self, severity: Severity) -> bool {
        self.counts.get(severity) > 0
    }

    /// Compact summary such as `"E:2 W:1 I:0"`; empty when hidden.
    pub fn summary(&self) -> String {
        if !self.visible {
            return String::new();
        }
        format!(
            "E:{} W:{} I:{}",
            self.counts.error, self.counts.warning, self.counts.info
        )
    }
}

/// Mouse button used on the status tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClick {
    /// Left click.
    Primary,
    /// Right click.
    Secondary,
    /// Any other button.
    Other,
}

impl StatusClick {
    /// Command a click on the status tile triggers, if any.
    pub fn command(self) -> Option<NavigationCommand> {
        match self {
            Self::Primary => Some(NavigationCommand::TogglePanel),
            Self::Secondary => Some(NavigationCommand::InspectAtCursor),
            Self::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Location;
    use crate::position::Range;

    fn msg(severity: Severity) -> Arc<Message> {
        Arc::new(Message::new(
            severity,
            "lint",
            "m",
            Location::new("a", Range::default()),
        ))
    }

    #[test]
    fn test_counts_partition_by_severity() {
        let counts = SeverityCounts::from_messages(&[
            msg(Severity::Error),
            msg(Severity::Warning),
            msg(Severity::Error),
        ]);
        assert_eq!(
            counts,
            SeverityCounts {
                error: 2,
                warning: 1,
                info: 0
            }
        );
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.get(Severity::Info), 0);
    }

    #[test]
    fn test_empty_counts() {
        assert_eq!(SeverityCounts::from_messages(&[]), SeverityCounts::default());
    }

    #[test]
    fn test_status_view_summary_and_highlight() {
        let view = StatusView::for_counts(SeverityCounts {
            error: 2,
            warning: 0,
            info: 1,
        });
        assert_eq!(view.summary(), "E:2 W:0 I:1");
        assert!(view.is_highlighted(Severity::Error));
        assert!(!view.is_highlighted(Severity::Warning));
        assert!(view.is_highlighted(Severity::Info));

        let hidden = StatusView::hidden();
        assert!(!hidden.visible);
        assert_eq!(hidden.summary(), "");
    }

    #[test]
    fn test_status_clicks() {
        assert_eq!(
            StatusClick::Primary.command(),
            Some(NavigationCommand::TogglePanel)
        );
        assert_eq!(
            StatusClick::Secondary.command(),
            Some(NavigationCommand::InspectAtCursor)
        );
        assert_eq!(StatusClick::Other.command(), None);
    }
}
