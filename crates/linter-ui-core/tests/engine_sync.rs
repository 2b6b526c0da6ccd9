use linter_ui_core::{
    DeltaEvent, DiagnosticsEngine, DocumentId, Location, Message, OverlayEdit, OverlayRenderer,
    Range, RegionGroupKey, RegionStyle, RenderedOverlays, Severity,
};
use pretty_assertions::assert_eq;
use rand::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

fn msg(file: &str, severity: Severity, start: (usize, usize), end: (usize, usize)) -> Arc<Message> {
    Arc::new(Message::new(
        severity,
        "unit-test",
        format!("{} {}:{}", severity.label(), start.0, start.1),
        Location::new(file, Range::from_coords(start, end)),
    ))
}

fn open(engine: &mut DiagnosticsEngine, path: &str) -> DocumentId {
    engine
        .open_document(Some(PathBuf::from(path)))
        .unwrap()
        .document
}

fn full(messages: &[Arc<Message>]) -> DeltaEvent {
    DeltaEvent::new(messages.to_vec(), Vec::new(), messages.to_vec())
}

#[test]
fn test_touched_document_is_rebuilt_sorted() {
    let mut engine = DiagnosticsEngine::new();
    let doc = open(&mut engine, "/a.rs");

    let late = msg("/a.rs", Severity::Info, (9, 0), (9, 2));
    let early = msg("/a.rs", Severity::Error, (1, 4), (1, 6));
    let middle = msg("/a.rs", Severity::Warning, (4, 0), (5, 0));
    let other = msg("/b.rs", Severity::Error, (0, 0), (0, 1));

    let report = engine.apply_delta(&full(&[
        Arc::clone(&late),
        Arc::clone(&other),
        Arc::clone(&early),
        Arc::clone(&middle),
    ]));
    assert_eq!(report.changed, vec![doc]);

    let sorted = engine.sorted_messages(doc);
    assert_eq!(sorted.len(), 3);
    assert!(Arc::ptr_eq(&sorted[0], &early));
    assert!(Arc::ptr_eq(&sorted[1], &middle));
    assert!(Arc::ptr_eq(&sorted[2], &late));
    assert!(!engine.is_dirty(doc));
}

#[test]
fn test_equal_starts_keep_input_order() {
    let mut engine = DiagnosticsEngine::new();
    let doc = open(&mut engine, "/a.rs");

    let first = msg("/a.rs", Severity::Warning, (2, 0), (2, 5));
    let second = msg("/a.rs", Severity::Error, (2, 0), (2, 1));
    let third = msg("/a.rs", Severity::Info, (2, 0), (3, 0));
    engine.apply_delta(&full(&[
        Arc::clone(&first),
        Arc::clone(&second),
        Arc::clone(&third),
    ]));

    let sorted = engine.sorted_messages(doc);
    assert!(Arc::ptr_eq(&sorted[0], &first));
    assert!(Arc::ptr_eq(&sorted[1], &second));
    assert!(Arc::ptr_eq(&sorted[2], &third));
}

#[test]
fn test_untouched_document_keeps_its_list() {
    let mut engine = DiagnosticsEngine::new();
    let a = open(&mut engine, "/a.rs");
    let b = open(&mut engine, "/b.rs");

    let in_a = msg("/a.rs", Severity::Error, (0, 0), (0, 3));
    let in_b = msg("/b.rs", Severity::Warning, (1, 0), (1, 3));
    engine.apply_delta(&full(&[Arc::clone(&in_a), Arc::clone(&in_b)]));
    let before = Arc::clone(engine.message_list(b).unwrap());

    // Only /a.rs changes; /b.rs's message is still part of the full set.
    let in_a2 = msg("/a.rs", Severity::Info, (5, 0), (5, 1));
    let report = engine.apply_delta(&DeltaEvent::new(
        vec![Arc::clone(&in_a2)],
        vec![Arc::clone(&in_a)],
        vec![Arc::clone(&in_a2), Arc::clone(&in_b)],
    ));

    assert_eq!(report.changed, vec![a]);
    assert!(report.edits.iter().all(|edit| edit.document() == a));
    assert!(Arc::ptr_eq(&before, engine.message_list(b).unwrap()));
    assert_eq!(engine.sorted_messages(a).len(), 1);
}

#[test]
fn test_noop_delta_changes_nothing() {
    let mut engine = DiagnosticsEngine::new();
    let doc = open(&mut engine, "/a.rs");
    let m = msg("/a.rs", Severity::Error, (0, 0), (0, 3));
    engine.apply_delta(&full(&[Arc::clone(&m)]));
    let before = Arc::clone(engine.message_list(doc).unwrap());

    let report = engine.apply_delta(&DeltaEvent::new(Vec::new(), Vec::new(), vec![m]));
    assert!(report.is_empty());
    assert!(report.edits.is_empty());
    assert!(Arc::ptr_eq(&before, engine.message_list(doc).unwrap()));
}

#[test]
fn test_removing_last_message_clears_regions() {
    let mut engine = DiagnosticsEngine::new();
    let doc = open(&mut engine, "/a.rs");
    let m = msg("/a.rs", Severity::Error, (3, 1), (3, 4));
    engine.apply_delta(&full(&[Arc::clone(&m)]));
    assert_eq!(
        engine.regions(doc, Severity::Error, RegionStyle::Inline),
        &[Range::from_coords((3, 1), (3, 4))]
    );

    let report = engine.apply_delta(&DeltaEvent::new(Vec::new(), vec![m], Vec::new()));
    assert_eq!(report.changed, vec![doc]);
    assert!(engine.sorted_messages(doc).is_empty());
    for key in RegionGroupKey::ALL {
        assert!(engine.regions(doc, key.severity, key.style).is_empty());
    }

    let cleared: Vec<_> = report
        .edits
        .iter()
        .filter(|edit| matches!(edit, OverlayEdit::ClearRegions { .. }))
        .collect();
    assert_eq!(cleared.len(), 2);
}

#[test]
fn test_regions_are_grouped_by_severity_and_style() {
    let mut engine = DiagnosticsEngine::new();
    let doc = open(&mut engine, "/a.rs");
    engine.apply_delta(&full(&[
        msg("/a.rs", Severity::Error, (0, 0), (0, 1)),
        msg("/a.rs", Severity::Error, (2, 0), (2, 1)),
        msg("/a.rs", Severity::Info, (1, 0), (1, 1)),
    ]));

    for style in RegionStyle::ALL {
        assert_eq!(
            engine.regions(doc, Severity::Error, style),
            &[
                Range::from_coords((0, 0), (0, 1)),
                Range::from_coords((2, 0), (2, 1))
            ]
        );
        assert_eq!(
            engine.regions(doc, Severity::Info, style),
            &[Range::from_coords((1, 0), (1, 1))]
        );
        assert!(engine.regions(doc, Severity::Warning, style).is_empty());
    }
}

#[test]
fn test_mirror_matches_engine_after_many_deltas() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut engine = DiagnosticsEngine::new();
    let files = ["/a.rs", "/b.rs", "/c.rs"];
    let docs: Vec<DocumentId> = files.iter().map(|f| open(&mut engine, f)).collect();
    let mut mirror = RenderedOverlays::new();

    let mut current: Vec<Arc<Message>> = Vec::new();
    for _ in 0..50 {
        let mut next: Vec<Arc<Message>> = current
            .iter()
            .filter(|_| rng.gen_bool(0.7))
            .cloned()
            .collect();
        for _ in 0..rng.gen_range(0..4) {
            let file = files[rng.gen_range(0..files.len())];
            let severity = Severity::ALL[rng.gen_range(0..3)];
            let row = rng.gen_range(0..20);
            let col = rng.gen_range(0..10);
            next.push(msg(file, severity, (row, col), (row, col + 1)));
        }

        let added: Vec<_> = next
            .iter()
            .filter(|m| !current.iter().any(|c| Arc::ptr_eq(c, m)))
            .cloned()
            .collect();
        let removed: Vec<_> = current
            .iter()
            .filter(|c| !next.iter().any(|m| Arc::ptr_eq(c, m)))
            .cloned()
            .collect();

        let report = engine.apply_delta(&DeltaEvent::new(added, removed, next.clone()));
        mirror.apply_all(&report.edits).unwrap();
        current = next;

        for &doc in &docs {
            let sorted = engine.sorted_messages(doc);
            assert!(sorted.windows(2).all(|w| {
                w[0].location.position.start <= w[1].location.position.start
            }));
            for key in RegionGroupKey::ALL {
                assert_eq!(
                    mirror.regions(doc, key),
                    engine.regions(doc, key.severity, key.style)
                );
            }
        }
    }
}

#[test]
fn test_untitled_document_never_receives_messages() {
    let mut engine = DiagnosticsEngine::new();
    let doc = engine.open_document(None).unwrap().document;
    let report = engine.apply_delta(&full(&[msg("/a.rs", Severity::Error, (0, 0), (0, 1))]));
    assert!(report.is_empty());
    assert!(engine.sorted_messages(doc).is_empty());
}

#[test]
fn test_open_seeds_from_last_full_set() {
    let mut engine = DiagnosticsEngine::new();
    let m = msg("/late.rs", Severity::Warning, (2, 0), (2, 3));
    engine.apply_delta(&full(&[Arc::clone(&m)]));

    let opened = engine
        .open_document(Some(PathBuf::from("/late.rs")))
        .unwrap();
    assert_eq!(engine.sorted_messages(opened.document).len(), 1);
    assert!(opened.edits.iter().any(|edit| matches!(
        edit,
        OverlayEdit::ReplaceRegions { group, .. }
            if *group == RegionGroupKey::new(Severity::Warning, RegionStyle::Inline)
    )));
}

#[test]
fn test_set_document_path_rebuilds() {
    let mut engine = DiagnosticsEngine::new();
    let doc = engine.open_document(None).unwrap().document;
    engine.apply_delta(&full(&[msg("/saved.rs", Severity::Error, (0, 0), (0, 1))]));
    assert!(engine.sorted_messages(doc).is_empty());

    engine
        .set_document_path(doc, Some(PathBuf::from("/saved.rs")))
        .unwrap();
    assert_eq!(engine.sorted_messages(doc).len(), 1);
    assert_eq!(
        engine.document_for_path(std::path::Path::new("/saved.rs")),
        Some(doc)
    );
}
