//! Command interface exposed to keybinding/menu layers.
//!
//! Every command runs against one document and the cursor the host reports for it.
//! Navigation and inspection commands answer with the message to land on and the position
//! to anchor at, or [`CommandOutcome::NoIssues`] when the document has no diagnostics.

use crate::diagnostics::{DocumentId, Message};
use crate::position::Position;
use crate::processing::OverlayEdit;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Commands understood by [`crate::DiagnosticsEngine::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCommand {
    /// Jump to the next diagnostic (wrapping).
    Next,
    /// Jump to the previous diagnostic (wrapping).
    Prev,
    /// Show the diagnostic under the cursor.
    InspectAtCursor,
    /// Jump to the next diagnostic and show it.
    InspectNext,
    /// Jump to the previous diagnostic and show it.
    InspectPrev,
    /// Hide the inspection overlay.
    Dismiss,
    /// Show or hide the diagnostics panel.
    TogglePanel,
}

impl NavigationCommand {
    /// Stable command name (e.g. for keymaps).
    pub fn name(self) -> &'static str {
        match self {
            Self::Next => "linter-ui:next-diagnostic",
            Self::Prev => "linter-ui:prev-diagnostic",
            Self::InspectAtCursor => "linter-ui:inspect",
            Self::InspectNext => "linter-ui:next",
            Self::InspectPrev => "linter-ui:prev",
            Self::Dismiss => "linter-ui:dismiss",
            Self::TogglePanel => "linter-ui:toggle",
        }
    }

    /// Look a command up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::Next,
            Self::Prev,
            Self::InspectAtCursor,
            Self::InspectNext,
            Self::InspectPrev,
            Self::Dismiss,
            Self::TogglePanel,
        ]
        .into_iter()
        .find(|command| command.name() == name)
    }
}

/// Result of executing a [`NavigationCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A diagnostic to land on: the host moves the cursor to `position` (for jumps) or
    /// anchors a notification there.
    Target {
        /// The selected message.
        message: Arc<Message>,
        /// Cursor destination / overlay anchor.
        position: Position,
        /// Renderer edits caused by the command.
        edits: Vec<OverlayEdit>,
    },
    /// No diagnostic matched; render a neutral "no issues" state.
    NoIssues {
        /// Renderer edits caused by the command.
        edits: Vec<OverlayEdit>,
    },
    /// The panel visibility changed.
    PanelToggled {
        /// New visibility.
        visible: bool,
    },
    /// The command succeeded with nothing to report.
    Done {
        /// Renderer edits caused by the command.
        edits: Vec<OverlayEdit>,
    },
}

impl CommandOutcome {
    /// The `(message, position)` pair, if the command landed on a diagnostic.
    pub fn target(&self) -> Option<(&Arc<Message>, Position)> {
        match self {
            Self::Target {
                message, position, ..
            } => Some((message, *position)),
            _ => None,
        }
    }

    /// Renderer edits produced by the command.
    pub fn edits(&self) -> &[OverlayEdit] {
        match self {
            Self::Target { edits, .. } | Self::NoIssues { edits } | Self::Done { edits } => edits,
            Self::PanelToggled { .. } => &[],
        }
    }
}

/// Engine-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The document id is not (or no longer) tracked.
    #[error("unknown document {0}")]
    UnknownDocument(DocumentId),
    /// A document with this path is already tracked.
    #[error("document already open: {}", .0.display())]
    DocumentAlreadyOpen(PathBuf),
}
