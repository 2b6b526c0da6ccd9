#![warn(missing_docs)]
//! Linter UI Core - Headless Diagnostics Presentation Engine
//!
//! # Overview
//!
//! `linter-ui-core` turns the output of a linting service into per-document presentation state:
//! highlighted regions grouped by severity, a single inspection overlay, status counts and
//! panel rows. It draws nothing itself. Hosts report events (lint cycles, cursor moves, focus
//! changes, commands) and forward the resulting [`OverlayEdit`]s to their renderer.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  DiagnosticsEngine (documents, commands)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Inspection / Panel / Status / Throttle     │  ← Presentation state
//! ├─────────────────────────────────────────────┤
//! │  Projector → OverlayEdit stream             │  ← Renderer boundary
//! ├─────────────────────────────────────────────┤
//! │  Classifier + per-document MessageStore     │  ← Delta synchronization
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use linter_ui_core::{
//!     DeltaEvent, DiagnosticsEngine, Location, Message, Position, Range, RegionStyle, Severity,
//! };
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let mut engine = DiagnosticsEngine::new();
//! let doc = engine
//!     .open_document(Some(PathBuf::from("/src/main.rs")))
//!     .unwrap()
//!     .document;
//!
//! let unused = Arc::new(Message::new(
//!     Severity::Warning,
//!     "clippy",
//!     "unused variable",
//!     Location::new("/src/main.rs", Range::from_coords((2, 4), (2, 9))),
//! ));
//! let report = engine.apply_delta(&DeltaEvent::new(
//!     vec![Arc::clone(&unused)],
//!     vec![],
//!     vec![unused],
//! ));
//! assert_eq!(report.changed, vec![doc]);
//! assert_eq!(
//!     engine.regions(doc, Severity::Warning, RegionStyle::Inline).len(),
//!     1
//! );
//!
//! let outcome = engine.navigate_next(doc, Position::new(0, 0)).unwrap();
//! assert_eq!(outcome.target().map(|(_, at)| at), Some(Position::new(2, 4)));
//! ```
//!
//! # Module Description
//!
//! - [`diagnostics`] - Messages, severities and lint deltas
//! - [`classifier`] - Which documents a delta touches, and their sorted partitions
//! - [`store`] - Per-document sorted message list with a dirty flag
//! - [`projector`] - Message list to region groups
//! - [`navigation`] - Containing / next / previous diagnostic queries
//! - [`inspection`] - The single transient inspection overlay
//! - [`engine`] - The public facade

pub mod classifier;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod disposal;
pub mod engine;
pub mod inspection;
pub mod navigation;
pub mod panel;
pub mod position;
pub mod processing;
pub mod projector;
pub mod regions;
pub mod state;
pub mod store;
pub mod throttle;

pub use commands::{CommandOutcome, EngineError, NavigationCommand};
pub use config::{ConfigError, DEFAULT_CURSOR_THROTTLE_MS, EngineConfig};
pub use diagnostics::{DeltaEvent, DocumentId, Location, Message, Severity};
pub use disposal::{DisposalList, Teardown};
pub use engine::{
    ActiveDocumentChange, DiagnosticsEngine, OpenDocumentResult, PanelRefresh, SyncReport,
};
pub use inspection::{ActiveInspection, InspectionSlot};
pub use panel::PanelRow;
pub use position::{Anchor, Position, Range};
pub use processing::{OverlayEdit, OverlayRenderer, RenderedInspection, RenderedOverlays};
pub use regions::{RegionGroupKey, RegionGroups, RegionStyle};
pub use state::{SeverityCounts, StatusClick, StatusView};
pub use store::{MessageList, MessageStore};
pub use throttle::Throttle;
