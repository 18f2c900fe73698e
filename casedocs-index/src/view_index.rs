//! In-memory materialisation of a map view.
//!
//! Rows are kept sorted by `(key, doc id)`, the order a host view returns
//! them in. Each document's rows are replaced wholesale whenever the document
//! is re-indexed.

use crate::change::Change;
use crate::error::{IndexError, IndexResult};
use casedocs_model::{Document, IdentifierKind, IndexKey};
use casedocs_views::MapView;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;
use tracing::{debug, trace};

/// One row returned from a view query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRow {
    pub id: String,
    pub key: IndexKey,
    pub value: (),
}

/// A sorted, queryable index over the output of one [`MapView`].
pub struct ViewIndex<V: MapView> {
    view: V,
    rows: BTreeSet<(IndexKey, String)>,
    /// Keys currently emitted per document id, for replacement on re-index.
    by_doc: HashMap<String, Vec<IndexKey>>,
    update_seq: u64,
}

impl<V: MapView> ViewIndex<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            rows: BTreeSet::new(),
            by_doc: HashMap::new(),
            update_seq: 0,
        }
    }

    /// Builds an index from a batch of documents.
    pub fn build<'a, I>(view: V, docs: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut index = Self::new(view);
        for doc in docs {
            index.index_document(doc)?;
        }
        Ok(index)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of documents with at least one row.
    pub fn doc_count(&self) -> usize {
        self.by_doc.len()
    }

    /// Sequence number of the last change applied.
    pub fn update_seq(&self) -> u64 {
        self.update_seq
    }

    /// Replaces the rows of `doc` with the view's current output for it.
    /// Returns the number of rows now held for the document.
    pub fn index_document(&mut self, doc: &Document) -> IndexResult<usize> {
        let id = doc.id().ok_or(IndexError::MissingDocId)?.to_string();
        self.remove_rows(&id);

        let keys: Vec<IndexKey> = self.view.map(doc).into_iter().map(|e| e.key).collect();
        let count = keys.len();
        for key in &keys {
            self.rows.insert((key.clone(), id.clone()));
        }
        if !keys.is_empty() {
            self.by_doc.insert(id.clone(), keys);
        }

        debug!("Indexed {} in {} ({} rows)", id, self.view.name(), count);
        Ok(count)
    }

    /// Parses raw JSON and indexes the resulting document.
    pub fn index_raw(&mut self, bytes: &[u8]) -> IndexResult<usize> {
        let doc = Document::from_slice(bytes)?;
        self.index_document(&doc)
    }

    /// Drops every row emitted for `id`. Returns the number of rows removed.
    pub fn remove_document(&mut self, id: &str) -> usize {
        let removed = self.remove_rows(id);
        if removed > 0 {
            debug!("Removed {} from {} ({} rows)", id, self.view.name(), removed);
        }
        removed
    }

    fn remove_rows(&mut self, id: &str) -> usize {
        let Some(keys) = self.by_doc.remove(id) else {
            return 0;
        };
        let mut removed = 0;
        for key in keys {
            if self.rows.remove(&(key, id.to_string())) {
                removed += 1;
            }
        }
        removed
    }

    /// Applies one change from a change stream. Removals and tombstones drop
    /// the document's rows; anything else re-indexes it.
    ///
    /// Changes at or before [`ViewIndex::update_seq`] are stale and skipped.
    /// Returns whether the change was applied.
    pub fn apply_change(&mut self, change: &Change) -> IndexResult<bool> {
        if change.seq <= self.update_seq {
            trace!("Skipping stale change {} (update_seq={})", change.seq, self.update_seq);
            return Ok(false);
        }

        match &change.doc {
            Some(doc) if !change.deleted && !doc.is_deleted_tombstone() => {
                if let Some(doc_id) = doc.id() {
                    if doc_id != change.id {
                        return Err(IndexError::IdMismatch {
                            change_id: change.id.clone(),
                            doc_id: doc_id.to_string(),
                        });
                    }
                }
                self.index_document(doc)?;
            }
            Some(_) if !change.deleted => {
                self.remove_document(&change.id);
            }
            _ if change.deleted => {
                self.remove_document(&change.id);
            }
            // No body to map; keep the rows we have.
            _ => {}
        }
        self.update_seq = change.seq;
        Ok(true)
    }

    /// Rows whose key equals `key`, ordered by document id.
    pub fn query(&self, key: &IndexKey) -> Vec<ViewRow> {
        let start = (key.clone(), String::new());
        self.rows
            .range((Bound::Included(start), Bound::Unbounded))
            .take_while(|(k, _)| k == key)
            .map(Self::to_row)
            .collect()
    }

    /// Document ids whose rows carry `key`.
    pub fn doc_ids(&self, key: &IndexKey) -> Vec<String> {
        self.query(key).into_iter().map(|row| row.id).collect()
    }

    /// Rows under the `(kind, domain)` prefix, in key order.
    pub fn query_prefix(&self, kind: IdentifierKind, domain: Option<&str>) -> Vec<ViewRow> {
        let start = (IndexKey::new(kind, domain, ""), String::new());
        self.rows
            .range((Bound::Included(start), Bound::Unbounded))
            .take_while(|(k, _)| k.has_prefix(kind, domain))
            .map(Self::to_row)
            .collect()
    }

    /// Rows of one identifier kind across all domains, in key order.
    pub fn query_kind(&self, kind: IdentifierKind) -> Vec<ViewRow> {
        // A null domain and empty value sort first within a kind.
        let start = (IndexKey::new(kind, None, ""), String::new());
        self.rows
            .range((Bound::Included(start), Bound::Unbounded))
            .take_while(|(k, _)| k.kind == kind)
            .map(Self::to_row)
            .collect()
    }

    /// All rows, in key order.
    pub fn rows(&self) -> impl Iterator<Item = ViewRow> + '_ {
        self.rows.iter().map(Self::to_row)
    }

    fn to_row((key, id): &(IndexKey, String)) -> ViewRow {
        ViewRow {
            id: id.clone(),
            key: key.clone(),
            value: (),
        }
    }
}
