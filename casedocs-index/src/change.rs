//! Change-feed consumption through a [`ChangeFilter`].

use casedocs_model::{Document, FilterRequest};
use casedocs_views::ChangeFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

/// One row of a host change stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// Host sequence number; strictly increasing within a stream.
    pub seq: u64,
    /// Id of the changed document.
    pub id: String,
    /// True when the document was removed outright.
    #[serde(default)]
    pub deleted: bool,
    /// Current document body. Absent for removals and for feeds run without
    /// `include_docs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
}

impl Change {
    pub fn updated(seq: u64, doc: Document) -> Self {
        Self {
            seq,
            id: doc.id().unwrap_or_default().to_string(),
            deleted: false,
            doc: Some(doc),
        }
    }

    pub fn removed(seq: u64, id: impl Into<String>) -> Self {
        Self {
            seq,
            id: id.into(),
            deleted: true,
            doc: None,
        }
    }
}

/// Consumes a change stream, passing on only the changes a filter admits.
///
/// A removal is either a change flagged `deleted` or one whose body is a
/// `_deleted` tombstone. Removals carry nothing for the filter to inspect, so
/// they are passed on only for ids this listener has admitted before.
/// Non-removal changes without a body are never passed on.
///
/// The set of admitted ids is held in memory and only shrinks on removals or
/// when a document stops passing the filter, so it grows with the number of
/// live matching documents seen on the stream.
pub struct ChangeListener<F: ChangeFilter> {
    filter: F,
    request: FilterRequest,
    last_seq: u64,
    admitted_ids: HashSet<String>,
}

impl<F: ChangeFilter> ChangeListener<F> {
    /// Creates a listener starting from the beginning of the stream.
    pub fn new(filter: F) -> Self {
        Self::since(filter, 0)
    }

    /// Creates a listener that ignores changes at or before `seq`.
    pub fn since(filter: F, seq: u64) -> Self {
        Self {
            filter,
            request: FilterRequest::default(),
            last_seq: seq,
            admitted_ids: HashSet::new(),
        }
    }

    /// Sets the request context handed to the filter.
    pub fn with_request(mut self, request: FilterRequest) -> Self {
        self.request = request;
        self
    }

    /// Highest sequence number seen so far, admitted or not.
    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Number of distinct document ids currently tracked.
    pub fn tracked(&self) -> usize {
        self.admitted_ids.len()
    }

    /// Decides a single change. Replays (`seq <= last_seq`) are dropped.
    pub fn accept(&mut self, change: &Change) -> bool {
        if change.seq <= self.last_seq {
            trace!("Skipping replayed change {} (last_seq={})", change.seq, self.last_seq);
            return false;
        }
        self.last_seq = change.seq;

        let removal = change.deleted
            || change.doc.as_ref().is_some_and(Document::is_deleted_tombstone);

        let admitted = if removal {
            self.admitted_ids.remove(&change.id)
        } else if let Some(doc) = &change.doc {
            let admitted = self.filter.filter(doc, &self.request);
            if admitted {
                self.admitted_ids.insert(change.id.clone());
            } else {
                // The document may have changed kind since it was last admitted.
                self.admitted_ids.remove(&change.id);
            }
            admitted
        } else {
            trace!("Skipping change {} for {} with no body", change.seq, change.id);
            false
        };

        if admitted {
            debug!(
                "Admitted change {} for {} via {} (removal={})",
                change.seq,
                change.id,
                self.filter.name(),
                removal
            );
        }
        admitted
    }

    /// Processes a batch, returning the admitted changes in stream order.
    pub fn process<I>(&mut self, changes: I) -> Vec<Change>
    where
        I: IntoIterator<Item = Change>,
    {
        changes
            .into_iter()
            .filter(|change| self.accept(change))
            .collect()
    }
}
