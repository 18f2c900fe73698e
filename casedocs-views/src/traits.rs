use casedocs_model::{Document, FilterRequest, IndexEntry};

/// A change-feed filter: decides whether a document is passed on to the
/// consumer of a filtered change stream.
///
/// Implementations must be total over arbitrary document shapes.
pub trait ChangeFilter: Send + Sync {
    /// Qualified name the host registers the filter under (e.g. "case/casedocs").
    fn name(&self) -> &str;

    /// Returns true if `doc` belongs in the filtered stream.
    fn filter(&self, doc: &Document, req: &FilterRequest) -> bool;
}

/// A map view: turns one document into zero or more index entries.
///
/// The host collects the entries of every document into a sorted index.
/// Output order within a single document is significant and must be stable.
pub trait MapView: Send + Sync {
    /// Qualified name the host registers the view under (e.g. "case/by_identifier").
    fn name(&self) -> &str;

    /// Entries emitted for `doc`, in emission order.
    fn map(&self, doc: &Document) -> Vec<IndexEntry>;
}
