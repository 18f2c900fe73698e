mod common;

use casedocs_index::{Change, IndexError, ViewIndex, ViewRow};
use casedocs_model::{Document, IdentifierKind};
use casedocs_views::{ByIdentifierView, external_id_key, phone_number_key};
use common::{case_doc, deleted_case_doc, form_doc, init_tracing};
use pretty_assertions::assert_eq;
use serde_json::json;

fn make_index() -> ViewIndex<ByIdentifierView> {
    init_tracing();
    ViewIndex::new(ByIdentifierView)
}

// ── Indexing ─────────────────────────────────────────────────────

#[test]
fn new_index_is_empty() {
    let index = make_index();
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(index.doc_count(), 0);
    assert_eq!(index.update_seq(), 0);
}

#[test]
fn index_case_with_both_identifiers() {
    let mut index = make_index();
    let rows = index.index_document(&case_doc("c1", "d1", "E1", "555")).unwrap();
    assert_eq!(rows, 2);
    assert_eq!(index.len(), 2);
    assert_eq!(index.doc_count(), 1);
}

#[test]
fn non_case_documents_add_no_rows() {
    let mut index = make_index();
    assert_eq!(index.index_document(&form_doc("f1", "d1")).unwrap(), 0);
    assert_eq!(index.index_document(&deleted_case_doc("c1", "d1", "E1", "555")).unwrap(), 0);
    assert!(index.is_empty());
    assert_eq!(index.doc_count(), 0);
}

#[test]
fn missing_id_is_an_error() {
    let mut index = make_index();
    let doc = Document::new(json!({"doc_type": "CommCareCase", "domain": "d1", "external_id": "E1"}));
    let err = index.index_document(&doc).unwrap_err();
    assert!(matches!(err, IndexError::MissingDocId));
    assert!(index.is_empty());
}

#[test]
fn index_raw_parses_json() {
    let mut index = make_index();
    let raw = br#"{"_id": "c1", "doc_type": "CommCareCase", "domain": "d1", "contact_phone_number": "555"}"#;
    assert_eq!(index.index_raw(raw).unwrap(), 1);
    assert_eq!(index.doc_ids(&phone_number_key(Some("d1"), "555")), vec!["c1".to_string()]);
}

#[test]
fn index_raw_rejects_malformed_json() {
    let mut index = make_index();
    let err = index.index_raw(b"{\"_id\": ").unwrap_err();
    assert!(matches!(err, IndexError::Model(_)));
}

#[test]
fn reindex_replaces_previous_rows() {
    let mut index = make_index();
    index.index_document(&case_doc("c1", "d1", "E1", "555")).unwrap();
    index.index_document(&case_doc("c1", "d1", "E2", "")).unwrap();

    assert_eq!(index.len(), 1);
    assert!(index.query(&external_id_key(Some("d1"), "E1")).is_empty());
    assert!(index.query(&phone_number_key(Some("d1"), "555")).is_empty());
    assert_eq!(index.doc_ids(&external_id_key(Some("d1"), "E2")), vec!["c1".to_string()]);
}

#[test]
fn soft_delete_drops_rows_on_reindex() {
    let mut index = make_index();
    index.index_document(&case_doc("c1", "d1", "E1", "555")).unwrap();
    index.index_document(&deleted_case_doc("c1", "d1", "E1", "555")).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.doc_count(), 0);
}

#[test]
fn remove_document_reports_rows_removed() {
    let mut index = make_index();
    index.index_document(&case_doc("c1", "d1", "E1", "555")).unwrap();
    assert_eq!(index.remove_document("c1"), 2);
    assert_eq!(index.remove_document("c1"), 0);
    assert_eq!(index.remove_document("never-seen"), 0);
    assert!(index.is_empty());
}

#[test]
fn build_from_batch() {
    init_tracing();
    let docs = vec![
        case_doc("c1", "d1", "E1", "555"),
        form_doc("f1", "d1"),
        case_doc("c2", "d2", "E2", ""),
    ];
    let index = ViewIndex::build(ByIdentifierView, &docs).unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(index.doc_count(), 2);
}

// ── Queries ──────────────────────────────────────────────────────

#[test]
fn exact_query_finds_all_matching_docs_in_id_order() {
    let mut index = make_index();
    index.index_document(&case_doc("c2", "d1", "DUP", "")).unwrap();
    index.index_document(&case_doc("c1", "d1", "DUP", "")).unwrap();
    index.index_document(&case_doc("c3", "d2", "DUP", "")).unwrap();

    let rows = index.query(&external_id_key(Some("d1"), "DUP"));
    assert_eq!(
        rows,
        vec![
            ViewRow { id: "c1".into(), key: external_id_key(Some("d1"), "DUP"), value: () },
            ViewRow { id: "c2".into(), key: external_id_key(Some("d1"), "DUP"), value: () },
        ]
    );
}

#[test]
fn exact_query_is_scoped_by_kind() {
    let mut index = make_index();
    index.index_document(&case_doc("c1", "d1", "555", "555")).unwrap();
    assert_eq!(index.doc_ids(&external_id_key(Some("d1"), "555")), vec!["c1".to_string()]);
    assert_eq!(index.doc_ids(&phone_number_key(Some("d1"), "555")), vec!["c1".to_string()]);
    assert!(index.doc_ids(&phone_number_key(Some("d2"), "555")).is_empty());
}

#[test]
fn prefix_query_returns_one_domain_in_key_order() {
    let mut index = make_index();
    index.index_document(&case_doc("c1", "d1", "B", "1")).unwrap();
    index.index_document(&case_doc("c2", "d1", "A", "2")).unwrap();
    index.index_document(&case_doc("c3", "d2", "A", "3")).unwrap();

    let values: Vec<String> = index
        .query_prefix(IdentifierKind::ExternalId, Some("d1"))
        .into_iter()
        .map(|row| row.key.value)
        .collect();
    assert_eq!(values, vec!["A".to_string(), "B".to_string()]);

    let phones = index.query_prefix(IdentifierKind::PhoneNumber, Some("d2"));
    assert_eq!(phones.len(), 1);
    assert_eq!(phones[0].id, "c3");
}

#[test]
fn prefix_query_with_null_domain() {
    let mut index = make_index();
    let doc = Document::new(json!({"_id": "c1", "doc_type": "CommCareCase", "external_id": "E1"}));
    index.index_document(&doc).unwrap();
    index.index_document(&case_doc("c2", "d1", "E2", "")).unwrap();

    let rows = index.query_prefix(IdentifierKind::ExternalId, None);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "c1");
}

#[test]
fn kind_query_spans_domains() {
    let mut index = make_index();
    index.index_document(&case_doc("c1", "d2", "E1", "555")).unwrap();
    index.index_document(&case_doc("c2", "d1", "E2", "")).unwrap();

    let ids: Vec<String> = index
        .query_kind(IdentifierKind::ExternalId)
        .into_iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(ids, vec!["c2".to_string(), "c1".to_string()]);
    assert_eq!(index.query_kind(IdentifierKind::PhoneNumber).len(), 1);
}

#[test]
fn kind_query_includes_null_domain_rows() {
    let mut index = make_index();
    let no_domain = Document::new(json!({
        "_id": "c0",
        "doc_type": "CommCareCase",
        "contact_phone_number": "111",
    }));
    index.index_document(&no_domain).unwrap();
    index.index_document(&case_doc("c1", "d1", "E1", "222")).unwrap();

    let phones: Vec<ViewRow> = index.query_kind(IdentifierKind::PhoneNumber);
    let ids: Vec<&str> = phones.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["c0", "c1"]);
    assert_eq!(phones[0].key.domain, None);

    let external: Vec<String> = index
        .query_kind(IdentifierKind::ExternalId)
        .into_iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(external, vec!["c1".to_string()]);
}

#[test]
fn rows_iterate_in_collation_order() {
    let mut index = make_index();
    index.index_document(&case_doc("c1", "d1", "E1", "555")).unwrap();
    let kinds: Vec<IdentifierKind> = index.rows().map(|row| row.key.kind).collect();
    assert_eq!(kinds, vec![IdentifierKind::ExternalId, IdentifierKind::PhoneNumber]);
}

#[test]
fn row_serializes_like_a_view_row() {
    let mut index = make_index();
    index.index_document(&case_doc("c1", "d1", "E1", "")).unwrap();
    let row = index.rows().next().unwrap();
    assert_eq!(
        serde_json::to_value(&row).unwrap(),
        json!({"id": "c1", "key": ["external_id", "d1", "E1"], "value": null})
    );
}

// ── Changes ──────────────────────────────────────────────────────

#[test]
fn apply_change_indexes_and_tracks_seq() {
    let mut index = make_index();
    index.apply_change(&Change::updated(7, case_doc("c1", "d1", "E1", ""))).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.update_seq(), 7);
}

#[test]
fn apply_removal_drops_rows() {
    let mut index = make_index();
    index.apply_change(&Change::updated(1, case_doc("c1", "d1", "E1", "555"))).unwrap();
    index.apply_change(&Change::removed(2, "c1")).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.update_seq(), 2);
}

#[test]
fn apply_tombstone_body_drops_rows() {
    let mut index = make_index();
    index.apply_change(&Change::updated(1, case_doc("c1", "d1", "E1", ""))).unwrap();
    let tombstone = Change {
        seq: 2,
        id: "c1".into(),
        deleted: false,
        doc: Some(Document::new(json!({"_id": "c1", "_rev": "2-x", "_deleted": true}))),
    };
    index.apply_change(&tombstone).unwrap();
    assert!(index.is_empty());
}

#[test]
fn apply_change_without_body_keeps_rows() {
    let mut index = make_index();
    index.apply_change(&Change::updated(1, case_doc("c1", "d1", "E1", ""))).unwrap();
    let bare = Change { seq: 2, id: "c1".into(), deleted: false, doc: None };
    index.apply_change(&bare).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.update_seq(), 2);
}

#[test]
fn stale_change_after_removal_is_skipped() {
    let mut index = make_index();
    assert!(index.apply_change(&Change::removed(5, "c1")).unwrap());
    let applied = index.apply_change(&Change::updated(3, case_doc("c1", "d1", "E1", ""))).unwrap();
    assert!(!applied);
    assert!(index.is_empty());
    assert_eq!(index.update_seq(), 5);
}

#[test]
fn replayed_change_is_skipped() {
    let mut index = make_index();
    index.apply_change(&Change::updated(2, case_doc("c1", "d1", "E1", ""))).unwrap();
    let replay = Change::updated(2, case_doc("c1", "d1", "E2", ""));
    assert!(!index.apply_change(&replay).unwrap());
    assert_eq!(index.doc_ids(&external_id_key(Some("d1"), "E1")), vec!["c1".to_string()]);
}

#[test]
fn apply_change_rejects_mismatched_id() {
    let mut index = make_index();
    let change = Change {
        seq: 1,
        id: "other".into(),
        deleted: false,
        doc: Some(case_doc("c1", "d1", "E1", "")),
    };
    let err = index.apply_change(&change).unwrap_err();
    assert!(matches!(err, IndexError::IdMismatch { .. }));
    assert!(index.is_empty());
    assert_eq!(index.update_seq(), 0);
}
