//! Document model for case change filtering and identifier indexing.
//!
//! Defines the types shared by the view functions and their hosts:
//! - [`Document`]: a read-only JSON record handed over by the host database
//! - [`DocType`]: the `doc_type` discriminant, with an open [`DocType::Other`] arm
//! - [`IndexKey`] / [`IndexEntry`]: composite `(kind, domain, value)` keys with a null payload
//! - [`FilterRequest`]: the host's request context passed to change filters
//!
//! Nothing here performs I/O. The only fallible operations are the JSON
//! parsing constructors on [`Document`].

mod doc_type;
mod document;
mod key;
mod request;

pub use doc_type::DocType;
pub use document::Document;
pub use key::{IdentifierKind, IndexEntry, IndexKey};
pub use request::FilterRequest;

/// Result type alias using the crate's error type.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while reading documents.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
