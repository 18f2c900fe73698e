//! View functions over case documents.
//!
//! A host database invokes these per document:
//! - [`CaseDocsFilter`] decides which documents of a shared change stream
//!   are case documents (live or soft-deleted).
//! - [`ByIdentifierView`] emits `(kind, domain, value)` lookup keys for live
//!   cases, so a case can be found by external id or by phone number.
//!
//! Both are pure: no state survives between calls, and the same document
//! always yields the same result. The [`ChangeFilter`] and [`MapView`] traits
//! are the seams hosts program against.

mod by_identifier;
mod casedocs;
mod traits;

pub use by_identifier::{
    ByIdentifierView, IdentifierEntries, external_id_key, identifier_entries, phone_number_key,
};
pub use casedocs::{CaseDocsFilter, is_case_doc};
pub use traits::{ChangeFilter, MapView};
