//! Shared test helpers for index tests.

#![allow(dead_code)]

use casedocs_model::Document;
use serde_json::json;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A live case with both identifiers.
pub fn case_doc(id: &str, domain: &str, external_id: &str, phone: &str) -> Document {
    Document::new(json!({
        "_id": id,
        "doc_type": "CommCareCase",
        "domain": domain,
        "external_id": external_id,
        "contact_phone_number": phone,
    }))
}

/// A soft-deleted case with both identifiers.
pub fn deleted_case_doc(id: &str, domain: &str, external_id: &str, phone: &str) -> Document {
    Document::new(json!({
        "_id": id,
        "doc_type": "CommCareCase-Deleted",
        "domain": domain,
        "external_id": external_id,
        "contact_phone_number": phone,
    }))
}

/// A non-case document that shares the change stream.
pub fn form_doc(id: &str, domain: &str) -> Document {
    Document::new(json!({
        "_id": id,
        "doc_type": "XFormInstance",
        "domain": domain,
        "external_id": "not-a-case",
    }))
}
