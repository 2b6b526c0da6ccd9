//! The diagnostics engine: per-document state, delta synchronization and commands.
//!
//! [`DiagnosticsEngine`] owns one entry per tracked document, keyed by a [`DocumentId`] it
//! allocates on [`open_document`](DiagnosticsEngine::open_document). Nothing is attached to
//! host objects; hosts report events (lint deltas, cursor moves, active document switches,
//! commands) and forward the returned [`OverlayEdit`]s to their renderer.
//!
//! Every call runs to completion synchronously: a delta is classified, stored and projected
//! before the call returns, so queries made afterwards always see consistent state.

use crate::classifier;
use crate::commands::{CommandOutcome, EngineError, NavigationCommand};
use crate::config::{ConfigError, EngineConfig};
use crate::diagnostics::{DeltaEvent, DocumentId, Message, Severity};
use crate::disposal::{DisposalList, Teardown};
use crate::inspection::{ActiveInspection, InspectionSlot};
use crate::navigation;
use crate::panel::{self, PanelRow};
use crate::position::{Anchor, Position, Range};
use crate::processing::OverlayEdit;
use crate::projector;
use crate::regions::{RegionGroupKey, RegionGroups, RegionStyle};
use crate::state::{SeverityCounts, StatusView};
use crate::store::{MessageList, MessageStore};
use crate::throttle::Throttle;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Result of opening a document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenDocumentResult {
    /// The allocated document id.
    pub document: DocumentId,
    /// Edits for diagnostics already known for the document's path.
    pub edits: Vec<OverlayEdit>,
}

/// Outcome of applying one [`DeltaEvent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Documents whose message list was rebuilt, in id order.
    pub changed: Vec<DocumentId>,
    /// Renderer edits, grouped by document in id order.
    pub edits: Vec<OverlayEdit>,
}

impl SyncReport {
    /// Whether the delta changed anything.
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Outcome of switching the active document.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDocumentChange {
    /// Status tile for the new active document.
    pub status: StatusView,
    /// Edits for the previously active document (its inspection is hidden).
    pub edits: Vec<OverlayEdit>,
}

/// A throttled panel refresh released by [`DiagnosticsEngine::poll_panel`].
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRefresh {
    /// Document the rows belong to.
    pub document: DocumentId,
    /// Cursor the rows were computed for.
    pub cursor: Position,
    /// Panel rows.
    pub rows: Vec<PanelRow>,
    /// Index of the current row, if the cursor is inside a diagnostic.
    pub current: Option<usize>,
}

struct DocumentEntry {
    path: Option<PathBuf>,
    store: MessageStore,
    regions: RegionGroups,
    inspection: InspectionSlot,
    disposal: DisposalList,
}

impl DocumentEntry {
    fn new(path: Option<PathBuf>) -> Self {
        let mut disposal = DisposalList::new();
        disposal.register(Teardown::Document);
        Self {
            path,
            store: MessageStore::new(),
            regions: RegionGroups::new(),
            inspection: InspectionSlot::new(),
            disposal,
        }
    }

    fn rebuild(&mut self, messages: &[Arc<Message>]) {
        let sorted = match self.path.as_deref() {
            Some(path) => classifier::partition(messages, path),
            None => Vec::new(),
        };
        self.store.replace(sorted);
    }

    fn project(&mut self, document: DocumentId, styles: &[RegionStyle]) -> Vec<OverlayEdit> {
        let edits = projector::project(document, &mut self.store, &mut self.regions, styles);
        for edit in &edits {
            match edit {
                OverlayEdit::ReplaceRegions { group, .. } => {
                    self.disposal.register(Teardown::RegionGroup(*group));
                }
                OverlayEdit::ClearRegions { group, .. } => {
                    self.disposal.forget(Teardown::RegionGroup(*group));
                }
                _ => {}
            }
        }
        edits
    }

    fn dismiss(&mut self, document: DocumentId) -> Option<OverlayEdit> {
        let edit = self.inspection.dismiss(document);
        if edit.is_some() {
            self.disposal.forget(Teardown::Inspection);
        }
        edit
    }

    fn inspection_is_stale(&self) -> bool {
        self.inspection.active().is_some_and(|active| {
            !self
                .store
                .get()
                .iter()
                .any(|message| Arc::ptr_eq(message, &active.message))
        })
    }

    fn show(
        &mut self,
        document: DocumentId,
        message: Arc<Message>,
        anchor: Position,
        after_jump: bool,
    ) -> Vec<OverlayEdit> {
        self.disposal.register(Teardown::Inspection);
        if after_jump {
            self.inspection.show_after_jump(document, message, anchor)
        } else {
            self.inspection.show(document, message, anchor)
        }
    }
}

/// Synchronizes linter output with per-document overlays and answers navigation queries.
pub struct DiagnosticsEngine {
    config: EngineConfig,
    styles: Vec<RegionStyle>,

    next_document_id: u64,
    documents: BTreeMap<DocumentId, DocumentEntry>,
    path_to_document: HashMap<PathBuf, DocumentId>,

    // Last authoritative full set, used to seed documents opened between deltas.
    latest: Vec<Arc<Message>>,

    active: Option<DocumentId>,
    panel_visible: bool,
    cursor_throttle: Throttle<(DocumentId, Position)>,
}

impl std::fmt::Debug for DiagnosticsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsEngine")
            .field("document_count", &self.documents.len())
            .field("message_count", &self.latest.len())
            .field("active", &self.active)
            .field("panel_visible", &self.panel_visible)
            .finish()
    }
}

impl Default for DiagnosticsEngine {
    fn default() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }
}

impl DiagnosticsEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        Self {
            styles: config.normalized_styles(),
            next_document_id: 0,
            documents: BTreeMap::new(),
            path_to_document: HashMap::new(),
            latest: Vec::new(),
            active: None,
            panel_visible: config.panel_visible,
            cursor_throttle: Throttle::new(config.cursor_throttle()),
            config,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of tracked documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no document is tracked.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether `document` is tracked.
    pub fn contains(&self, document: DocumentId) -> bool {
        self.documents.contains_key(&document)
    }

    /// Look up a document by path.
    pub fn document_for_path(&self, path: &Path) -> Option<DocumentId> {
        self.path_to_document.get(path).copied()
    }

    /// Path of a tracked document.
    pub fn document_path(&self, document: DocumentId) -> Option<&Path> {
        self.documents.get(&document)?.path.as_deref()
    }

    // ----------------------------------------------------------------------------------------
    // Document lifecycle
    // ----------------------------------------------------------------------------------------

    /// Start tracking a document.
    ///
    /// `path` is what message locations are matched against; untitled documents pass `None`
    /// and never receive diagnostics. If the last delta already reported messages for `path`
    /// the document is seeded with them.
    pub fn open_document(
        &mut self,
        path: Option<PathBuf>,
    ) -> Result<OpenDocumentResult, EngineError> {
        if let Some(path) = path.as_ref()
            && self.path_to_document.contains_key(path)
        {
            return Err(EngineError::DocumentAlreadyOpen(path.clone()));
        }

        let document = DocumentId(self.next_document_id);
        self.next_document_id = self.next_document_id.saturating_add(1);

        if let Some(path) = path.as_ref() {
            self.path_to_document.insert(path.clone(), document);
        }

        let mut entry = DocumentEntry::new(path);
        let mut edits = Vec::new();
        if entry
            .path
            .as_deref()
            .is_some_and(|p| self.latest.iter().any(|m| m.is_in(p)))
        {
            entry.rebuild(&self.latest);
            edits = entry.project(document, &self.styles);
        }

        tracing::debug!(
            %document,
            path = ?entry.path,
            seeded = entry.store.len(),
            "opened document"
        );
        self.documents.insert(document, entry);

        Ok(OpenDocumentResult { document, edits })
    }

    /// Stop tracking a document, releasing everything created for it.
    pub fn close_document(&mut self, document: DocumentId) -> Result<Vec<OverlayEdit>, EngineError> {
        let Some(mut entry) = self.documents.remove(&document) else {
            return Err(EngineError::UnknownDocument(document));
        };

        if let Some(path) = entry.path.as_ref() {
            self.path_to_document.remove(path);
        }
        if self.active == Some(document) {
            self.active = None;
        }
        if self
            .cursor_throttle
            .pending()
            .is_some_and(|(pending, _)| *pending == document)
        {
            self.cursor_throttle.cancel();
        }

        let edits = entry.disposal.dispose(document);
        tracing::debug!(%document, edits = edits.len(), "closed document");
        Ok(edits)
    }

    /// Change (or clear) a document's path, e.g. after "save as".
    ///
    /// The document is rebuilt from the last full message set for its new path.
    pub fn set_document_path(
        &mut self,
        document: DocumentId,
        path: Option<PathBuf>,
    ) -> Result<Vec<OverlayEdit>, EngineError> {
        if !self.documents.contains_key(&document) {
            return Err(EngineError::UnknownDocument(document));
        }
        if let Some(path) = path.as_ref()
            && self
                .path_to_document
                .get(path)
                .is_some_and(|owner| *owner != document)
        {
            return Err(EngineError::DocumentAlreadyOpen(path.clone()));
        }

        let Some(entry) = self.documents.get_mut(&document) else {
            return Err(EngineError::UnknownDocument(document));
        };
        if let Some(old) = entry.path.take() {
            self.path_to_document.remove(&old);
        }
        if let Some(new) = path.as_ref() {
            self.path_to_document.insert(new.clone(), document);
        }
        entry.path = path;

        let mut edits = Vec::new();
        edits.extend(entry.dismiss(document));
        entry.rebuild(&self.latest);
        edits.extend(entry.project(document, &self.styles));
        Ok(edits)
    }

    /// Report that a document's text changed; its inspection overlay is hidden.
    pub fn document_changed(
        &mut self,
        document: DocumentId,
    ) -> Result<Vec<OverlayEdit>, EngineError> {
        let entry = self.entry_mut(document)?;
        Ok(entry.dismiss(document).into_iter().collect())
    }

    /// Tear down every document. The engine stays usable afterwards.
    pub fn shutdown(&mut self) -> Vec<OverlayEdit> {
        let mut edits = Vec::new();
        for (document, mut entry) in std::mem::take(&mut self.documents) {
            edits.extend(entry.disposal.dispose(document));
        }
        self.path_to_document.clear();
        self.active = None;
        self.cursor_throttle.cancel();
        tracing::debug!(edits = edits.len(), "engine shut down");
        edits
    }

    // ----------------------------------------------------------------------------------------
    // Synchronization
    // ----------------------------------------------------------------------------------------

    /// Apply one lint cycle.
    ///
    /// Documents whose path appears in `added ∪ removed` are rebuilt from `messages` and
    /// re-projected. An inspection overlay survives the rebuild only while its message is
    /// still part of the document's list. Other documents are left untouched, down to their
    /// message list allocation.
    pub fn apply_delta(&mut self, delta: &DeltaEvent) -> SyncReport {
        let changed = classifier::touched_documents(
            delta,
            self.documents
                .iter()
                .map(|(id, entry)| (*id, entry.path.as_deref())),
        );

        let mut edits = Vec::new();
        for &document in &changed {
            if let Some(entry) = self.documents.get_mut(&document) {
                entry.rebuild(&delta.messages);
                tracing::trace!(%document, messages = entry.store.len(), "rebuilt message list");
                if entry.inspection_is_stale() {
                    edits.extend(entry.dismiss(document));
                }
            }
        }
        self.latest = delta.messages.clone();

        for &document in &changed {
            if let Some(entry) = self.documents.get_mut(&document) {
                edits.extend(entry.project(document, &self.styles));
            }
        }

        tracing::debug!(
            added = delta.added.len(),
            removed = delta.removed.len(),
            messages = delta.messages.len(),
            changed = changed.len(),
            edits = edits.len(),
            "applied lint delta"
        );
        SyncReport { changed, edits }
    }

    // ----------------------------------------------------------------------------------------
    // Queries
    // ----------------------------------------------------------------------------------------

    /// Sorted messages of a document (empty for unknown documents).
    pub fn sorted_messages(&self, document: DocumentId) -> &[Arc<Message>] {
        self.documents
            .get(&document)
            .map(|entry| &entry.store.get()[..])
            .unwrap_or(&[])
    }

    /// The shared message list of a document.
    ///
    /// The same allocation is returned until a delta touches the document.
    pub fn message_list(&self, document: DocumentId) -> Option<&MessageList> {
        self.documents.get(&document).map(|entry| entry.store.get())
    }

    /// Ranges of one region group (empty for unknown documents).
    pub fn regions(&self, document: DocumentId, severity: Severity, style: RegionStyle) -> &[Range] {
        self.documents
            .get(&document)
            .map(|entry| entry.regions.get(RegionGroupKey::new(severity, style)))
            .unwrap_or(&[])
    }

    /// Per-severity counts of a document (all zero for unknown documents).
    pub fn counts(&self, document: DocumentId) -> SeverityCounts {
        SeverityCounts::from_messages(self.sorted_messages(document))
    }

    /// Whether a document's list changed without being projected yet.
    ///
    /// Always `false` between engine calls.
    pub fn is_dirty(&self, document: DocumentId) -> bool {
        self.documents
            .get(&document)
            .is_some_and(|entry| entry.store.is_dirty())
    }

    /// The document's active inspection overlay.
    pub fn inspection(&self, document: DocumentId) -> Option<&ActiveInspection> {
        self.documents.get(&document)?.inspection.active()
    }

    /// The active document.
    pub fn active_document(&self) -> Option<DocumentId> {
        self.active
    }

    /// Status tile for the active document.
    pub fn status(&self) -> StatusView {
        match self.active {
            Some(document) if self.documents.contains_key(&document) => {
                StatusView::for_counts(self.counts(document))
            }
            _ => StatusView::hidden(),
        }
    }

    /// Panel rows for a document, marking the row under `cursor`.
    pub fn panel_rows(&self, document: DocumentId, cursor: Option<Position>) -> Vec<PanelRow> {
        panel::panel_rows(self.sorted_messages(document), cursor)
    }

    /// Whether the panel is shown.
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Show or hide the panel, returning the new visibility.
    pub fn toggle_panel(&mut self) -> bool {
        self.panel_visible = !self.panel_visible;
        self.panel_visible
    }

    // ----------------------------------------------------------------------------------------
    // Host events
    // ----------------------------------------------------------------------------------------

    /// Switch the active document (`None` when a non-document item gains focus).
    ///
    /// The previously active document's inspection overlay is hidden.
    pub fn set_active_document(
        &mut self,
        document: Option<DocumentId>,
    ) -> Result<ActiveDocumentChange, EngineError> {
        if let Some(document) = document
            && !self.documents.contains_key(&document)
        {
            return Err(EngineError::UnknownDocument(document));
        }

        let mut edits = Vec::new();
        if self.active != document {
            if let Some(previous) = self.active
                && let Some(entry) = self.documents.get_mut(&previous)
            {
                edits.extend(entry.dismiss(previous));
            }
            self.cursor_throttle.cancel();
            self.active = document;
        }

        Ok(ActiveDocumentChange {
            status: self.status(),
            edits,
        })
    }

    /// Report a cursor move.
    ///
    /// The document's inspection overlay is hidden (unless this is the move to the jump target
    /// that opened it). For the active document the move also feeds the panel throttle; see
    /// [`poll_panel`](Self::poll_panel).
    pub fn cursor_moved(
        &mut self,
        document: DocumentId,
        cursor: Position,
        now: Instant,
    ) -> Result<Vec<OverlayEdit>, EngineError> {
        let entry = self.entry_mut(document)?;
        let mut edits = Vec::new();
        if let Some(edit) = entry.inspection.cursor_moved(document, cursor) {
            entry.disposal.forget(Teardown::Inspection);
            edits.push(edit);
        }

        if self.active == Some(document) {
            self.cursor_throttle.push((document, cursor), now);
        }
        Ok(edits)
    }

    /// Release the latest throttled cursor position as a panel refresh, once the throttle
    /// window has elapsed.
    pub fn poll_panel(&mut self, now: Instant) -> Option<PanelRefresh> {
        let (document, cursor) = self.cursor_throttle.poll(now)?;
        if self.active != Some(document) || !self.documents.contains_key(&document) {
            tracing::trace!(%document, "dropping stale panel refresh");
            return None;
        }

        let rows = self.panel_rows(document, Some(cursor));
        let current = panel::current_row(&rows);
        Some(PanelRefresh {
            document,
            cursor,
            rows,
            current,
        })
    }

    /// Instant at which [`poll_panel`](Self::poll_panel) will release a refresh.
    pub fn panel_deadline(&self) -> Option<Instant> {
        self.cursor_throttle.deadline()
    }

    // ----------------------------------------------------------------------------------------
    // Commands
    // ----------------------------------------------------------------------------------------

    /// Execute a command against `document` with the host's current `cursor`.
    pub fn execute(
        &mut self,
        document: DocumentId,
        cursor: Position,
        command: NavigationCommand,
    ) -> Result<CommandOutcome, EngineError> {
        let entry = self
            .documents
            .get_mut(&document)
            .ok_or(EngineError::UnknownDocument(document))?;
        let outcome = match command {
            NavigationCommand::Next | NavigationCommand::Prev => {
                let messages = entry.store.get();
                let found = if command == NavigationCommand::Next {
                    navigation::next(messages, cursor, Anchor::Start)
                } else {
                    navigation::prev(messages, cursor, Anchor::Start)
                };
                match found {
                    Some(message) => CommandOutcome::Target {
                        message: Arc::clone(message),
                        position: message.location.position.start,
                        edits: Vec::new(),
                    },
                    None => CommandOutcome::NoIssues { edits: Vec::new() },
                }
            }
            NavigationCommand::InspectAtCursor => {
                let mut edits: Vec<OverlayEdit> = entry.dismiss(document).into_iter().collect();
                match navigation::containing(entry.store.get(), cursor).cloned() {
                    Some(message) => {
                        edits.extend(entry.show(document, Arc::clone(&message), cursor, false));
                        CommandOutcome::Target {
                            message,
                            position: cursor,
                            edits,
                        }
                    }
                    None => CommandOutcome::NoIssues { edits },
                }
            }
            NavigationCommand::InspectNext | NavigationCommand::InspectPrev => {
                let mut edits: Vec<OverlayEdit> = entry.dismiss(document).into_iter().collect();
                let messages = entry.store.get();
                let found = if command == NavigationCommand::InspectNext {
                    navigation::next(messages, cursor, Anchor::Start)
                } else {
                    navigation::prev(messages, cursor, Anchor::Start)
                };
                match found.cloned() {
                    Some(message) => {
                        let position = message.location.position.start;
                        edits.extend(entry.show(document, Arc::clone(&message), position, true));
                        CommandOutcome::Target {
                            message,
                            position,
                            edits,
                        }
                    }
                    None => CommandOutcome::NoIssues { edits },
                }
            }
            NavigationCommand::Dismiss => CommandOutcome::Done {
                edits: entry.dismiss(document).into_iter().collect(),
            },
            NavigationCommand::TogglePanel => {
                self.panel_visible = !self.panel_visible;
                CommandOutcome::PanelToggled {
                    visible: self.panel_visible,
                }
            }
        };

        tracing::trace!(%document, command = command.name(), ?cursor, "executed command");
        Ok(outcome)
    }

    /// Jump to the next diagnostic after `cursor` (wrapping).
    pub fn navigate_next(
        &mut self,
        document: DocumentId,
        cursor: Position,
    ) -> Result<CommandOutcome, EngineError> {
        self.execute(document, cursor, NavigationCommand::Next)
    }

    /// Jump to the previous diagnostic before `cursor` (wrapping).
    pub fn navigate_prev(
        &mut self,
        document: DocumentId,
        cursor: Position,
    ) -> Result<CommandOutcome, EngineError> {
        self.execute(document, cursor, NavigationCommand::Prev)
    }

    /// Show the diagnostic under `cursor`.
    pub fn inspect_at_cursor(
        &mut self,
        document: DocumentId,
        cursor: Position,
    ) -> Result<CommandOutcome, EngineError> {
        self.execute(document, cursor, NavigationCommand::InspectAtCursor)
    }

    /// Jump to the next diagnostic and show it.
    pub fn inspect_next(
        &mut self,
        document: DocumentId,
        cursor: Position,
    ) -> Result<CommandOutcome, EngineError> {
        self.execute(document, cursor, NavigationCommand::InspectNext)
    }

    /// Jump to the previous diagnostic and show it.
    pub fn inspect_prev(
        &mut self,
        document: DocumentId,
        cursor: Position,
    ) -> Result<CommandOutcome, EngineError> {
        self.execute(document, cursor, NavigationCommand::InspectPrev)
    }

    /// Hide the document's inspection overlay (no-op if none is shown).
    pub fn dismiss(&mut self, document: DocumentId) -> Result<Vec<OverlayEdit>, EngineError> {
        let entry = self.entry_mut(document)?;
        Ok(entry.dismiss(document).into_iter().collect())
    }

    fn entry_mut(&mut self, document: DocumentId) -> Result<&mut DocumentEntry, EngineError> {
        self.documents
            .get_mut(&document)
            .ok_or(EngineError::UnknownDocument(document))
    }
}
