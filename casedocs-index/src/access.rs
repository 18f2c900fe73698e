use crate::config::LookupConfig;
use crate::error::AccessError;
use casedocs_model::{DocType, Document};

/// Checks whether a fetched document may be served as a case.
///
/// Checks run in order: domain, then deletion, then kind. A document with
/// no `doc_type` is not a case. A configured domain that is empty is treated
/// as unset.
#[derive(Debug, Clone, Default)]
pub struct CaseAccess {
    config: LookupConfig,
}

impl CaseAccess {
    pub fn new(config: LookupConfig) -> Self {
        Self { config }
    }

    /// Accepts live cases in any domain; rejects deleted ones.
    pub fn any_domain() -> Self {
        Self::default()
    }

    /// Accepts live cases in `domain` only.
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self::new(LookupConfig {
            domain: Some(domain.into()),
            deleted_ok: false,
        })
    }

    /// Also accept soft-deleted cases.
    pub fn allow_deleted(mut self) -> Self {
        self.config.deleted_ok = true;
        self
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn check(&self, doc: &Document) -> Result<(), AccessError> {
        let case_id = || doc.id().unwrap_or_default().to_string();

        // An empty configured domain means any domain.
        if let Some(expected) = self.config.domain.as_deref().filter(|d| !d.is_empty()) {
            if doc.domain() != Some(expected) {
                return Err(AccessError::WrongDomain {
                    case_id: case_id(),
                    expected: expected.to_string(),
                });
            }
        }

        match doc.doc_type() {
            Some(DocType::Case) => Ok(()),
            Some(DocType::DeletedCase) if self.config.deleted_ok => Ok(()),
            Some(DocType::DeletedCase) => Err(AccessError::Deleted(case_id())),
            Some(DocType::Other(doc_type)) => Err(AccessError::NotACase {
                case_id: case_id(),
                doc_type,
            }),
            None => Err(AccessError::NotACase {
                case_id: case_id(),
                doc_type: "<missing>".to_string(),
            }),
        }
    }

    /// Keeps only the documents that pass [`CaseAccess::check`].
    pub fn filter_accessible<'a, I>(&'a self, docs: I) -> impl Iterator<Item = &'a Document> + 'a
    where
        I: IntoIterator<Item = &'a Document>,
        I::IntoIter: 'a,
    {
        docs.into_iter().filter(move |doc| self.check(doc).is_ok())
    }
}
