use crate::MapView;
use casedocs_model::{DocType, Document, IdentifierKind, IndexEntry, IndexKey};
use std::iter::FusedIterator;

/// Lookup key for "the case with this external id in this domain".
pub fn external_id_key(domain: Option<&str>, external_id: &str) -> IndexKey {
    IndexKey::new(IdentifierKind::ExternalId, domain, external_id)
}

/// Lookup key for "the case with this phone number in this domain".
pub fn phone_number_key(domain: Option<&str>, phone_number: &str) -> IndexKey {
    IndexKey::new(IdentifierKind::PhoneNumber, domain, phone_number)
}

/// Index entries for a document, computed lazily.
///
/// Only live cases (`CommCareCase`) are indexed; soft-deleted cases emit
/// nothing, even though [`crate::CaseDocsFilter`] admits them. Calling this
/// again on the same document restarts the sequence.
pub fn identifier_entries(doc: &Document) -> IdentifierEntries<'_> {
    let live_case = matches!(doc.doc_type(), Some(DocType::Case));
    IdentifierEntries {
        doc,
        next: if live_case {
            Some(IdentifierKind::ExternalId)
        } else {
            None
        },
    }
}

/// Iterator returned by [`identifier_entries`].
///
/// Yields at most two entries: the external id entry, then the phone number
/// entry.
#[derive(Debug, Clone)]
pub struct IdentifierEntries<'a> {
    doc: &'a Document,
    next: Option<IdentifierKind>,
}

impl Iterator for IdentifierEntries<'_> {
    type Item = IndexEntry;

    fn next(&mut self) -> Option<IndexEntry> {
        while let Some(kind) = self.next.take() {
            let value = match kind {
                IdentifierKind::ExternalId => {
                    self.next = Some(IdentifierKind::PhoneNumber);
                    self.doc.external_id()
                }
                IdentifierKind::PhoneNumber => self.doc.contact_phone_number(),
            };
            if let Some(value) = value {
                return Some(IndexEntry::new(IndexKey::new(kind, self.doc.domain(), value)));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(IdentifierKind::ExternalId) => (0, Some(2)),
            Some(IdentifierKind::PhoneNumber) => (0, Some(1)),
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for IdentifierEntries<'_> {}

/// The `case/by_identifier` view.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByIdentifierView;

impl ByIdentifierView {
    pub const NAME: &'static str = "case/by_identifier";
}

impl MapView for ByIdentifierView {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn map(&self, doc: &Document) -> Vec<IndexEntry> {
        identifier_entries(doc).collect()
    }
}
