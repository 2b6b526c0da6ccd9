//! Projection of a document's sorted messages onto its region groups.

use crate::diagnostics::DocumentId;
use crate::processing::OverlayEdit;
use crate::regions::{RegionGroupKey, RegionGroups, RegionStyle};
use crate::store::MessageStore;

/// Rebuild `groups` from `store` if the store is dirty, then clear the dirty flag.
///
/// Every group is cleared first; then each message registers its range into its severity's
/// group for every style in `styles`, in sorted message order. Returns the edits a renderer
/// needs to mirror the change: a `ReplaceRegions` for every non-empty group and a
/// `ClearRegions` for every group that just became empty. A clean store yields no edits.
pub fn project(
    document: DocumentId,
    store: &mut MessageStore,
    groups: &mut RegionGroups,
    styles: &[RegionStyle],
) -> Vec<OverlayEdit> {
    if !store.is_dirty() {
        return Vec::new();
    }

    let previous = std::mem::take(groups);
    for message in store.get().iter() {
        for &style in styles {
            groups.register(
                RegionGroupKey::new(message.severity, style),
                message.location.position,
            );
        }
    }
    store.clear_dirty();

    let mut edits = Vec::new();
    for group in RegionGroupKey::ALL {
        let ranges = groups.get(group);
        if !ranges.is_empty() {
            edits.push(OverlayEdit::ReplaceRegions {
                document,
                group,
                ranges: ranges.to_vec(),
            });
        } else if !previous.get(group).is_empty() {
            edits.push(OverlayEdit::ClearRegions { document, group });
        }
    }

    tracing::trace!(
        %document,
        messages = store.len(),
        regions = groups.len(),
        edits = edits.len(),
        "projected region groups"
    );
    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Location, Message, Severity};
    use crate::position::Range;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn msg(severity: Severity, row: usize) -> Arc<Message> {
        Arc::new(Message::new(
            severity,
            "lint",
            "m",
            Location::new("a.rs", Range::from_coords((row, 0), (row, 2))),
        ))
    }

    #[test]
    fn test_clean_store_is_not_projected() {
        let mut store = MessageStore::new();
        let mut groups = RegionGroups::new();
        let edits = project(DocumentId(0), &mut store, &mut groups, &RegionStyle::ALL);
        assert!(edits.is_empty());
    }

    #[test]
    fn test_projection_buckets_by_severity_for_both_styles() {
        let mut store = MessageStore::new();
        store.replace(vec![
            msg(Severity::Error, 1),
            msg(Severity::Warning, 2),
            msg(Severity::Error, 3),
        ]);
        let mut groups = RegionGroups::new();
        let edits = project(DocumentId(0), &mut store, &mut groups, &RegionStyle::ALL);

        assert!(!store.is_dirty());
        let error_inline = groups.get(RegionGroupKey::new(Severity::Error, RegionStyle::Inline));
        assert_eq!(
            error_inline,
            &[
                Range::from_coords((1, 0), (1, 2)),
                Range::from_coords((3, 0), (3, 2))
            ]
        );
        assert_eq!(
            groups.get(RegionGroupKey::new(Severity::Error, RegionStyle::Block)),
            error_inline
        );
        assert!(
            groups
                .get(RegionGroupKey::new(Severity::Info, RegionStyle::Inline))
                .is_empty()
        );
        // error × 2 styles + warning × 2 styles
        assert_eq!(edits.len(), 4);
    }

    #[test]
    fn test_transition_to_empty_clears_once() {
        let doc = DocumentId(1);
        let mut store = MessageStore::new();
        store.replace(vec![msg(Severity::Info, 0)]);
        let mut groups = RegionGroups::new();
        project(doc, &mut store, &mut groups, &[RegionStyle::Inline]);

        store.replace(Vec::new());
        let edits = project(doc, &mut store, &mut groups, &[RegionStyle::Inline]);
        assert_eq!(
            edits,
            vec![OverlayEdit::ClearRegions {
                document: doc,
                group: RegionGroupKey::new(Severity::Info, RegionStyle::Inline),
            }]
        );
        assert!(groups.is_empty());

        store.replace(Vec::new());
        assert!(project(doc, &mut store, &mut groups, &[RegionStyle::Inline]).is_empty());
    }

    #[test]
    fn test_disabled_style_stays_empty() {
        let mut store = MessageStore::new();
        store.replace(vec![msg(Severity::Warning, 4)]);
        let mut groups = RegionGroups::new();
        project(DocumentId(0), &mut store, &mut groups, &[RegionStyle::Block]);
        assert!(
            groups
                .get(RegionGroupKey::new(Severity::Warning, RegionStyle::Inline))
                .is_empty()
        );
        assert_eq!(
            groups
                .get(RegionGroupKey::new(Severity::Warning, RegionStyle::Block))
                .len(),
            1
        );
    }
}
