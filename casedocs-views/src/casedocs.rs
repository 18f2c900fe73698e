use crate::ChangeFilter;
use casedocs_model::{DocType, Document, FilterRequest};

/// Returns true for case documents, live or soft-deleted.
///
/// Deletion is a `doc_type` transition rather than a removal, so change
/// consumers need to see both kinds. Everything else, including documents
/// without a `doc_type`, is rejected.
pub fn is_case_doc(doc: &Document) -> bool {
    match doc.doc_type() {
        Some(DocType::Case | DocType::DeletedCase) => true,
        Some(DocType::Other(_)) | None => false,
    }
}

/// The `case/casedocs` filter used by the case change listener.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseDocsFilter;

impl CaseDocsFilter {
    pub const NAME: &'static str = "case/casedocs";
}

impl ChangeFilter for CaseDocsFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn filter(&self, doc: &Document, _req: &FilterRequest) -> bool {
        is_case_doc(doc)
    }
}
