//! Error types for the index layer.

use thiserror::Error;

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while materialising a view.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The document has no `_id`, so its rows cannot be tracked.
    #[error("document has no _id")]
    MissingDocId,

    /// A change carried a document whose `_id` differs from the change id.
    #[error("change id {change_id} does not match document id {doc_id}")]
    IdMismatch { change_id: String, doc_id: String },

    /// Document parsing error.
    #[error("model error: {0}")]
    Model(#[from] casedocs_model::ModelError),
}

/// Reasons a fetched document may not be used as a case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The case belongs to a different domain than the one being served.
    #[error("case {case_id} is not in domain {expected}")]
    WrongDomain { case_id: String, expected: String },

    /// The case has been soft-deleted and deleted cases were not allowed.
    #[error("case {0} is deleted")]
    Deleted(String),

    /// The document is not a case at all.
    #[error("document {case_id} is not a case (doc_type={doc_type})")]
    NotACase { case_id: String, doc_type: String },
}

/// Errors that can occur while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
