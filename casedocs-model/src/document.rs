use crate::{DocType, ModelResult};
use serde::{Deserialize, Serialize};

/// A single stored record as handed over by the host database.
///
/// Documents are read-only and may have any JSON shape. Accessors never fail:
/// a missing field, a field of the wrong type, or a non-object document all
/// read as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(serde_json::Value);

impl Document {
    /// Wraps an already-parsed JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Parses a document from JSON text.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(Self(serde_json::from_str(json)?))
    }

    /// Parses a document from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> ModelResult<Self> {
        Ok(Self(serde_json::from_slice(bytes)?))
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    /// The document id (`_id`), if present.
    pub fn id(&self) -> Option<&str> {
        self.get_str("/_id")
    }

    /// The document kind, or `None` when `doc_type` is absent or not a string.
    pub fn doc_type(&self) -> Option<DocType> {
        self.get_str("/doc_type").map(DocType::parse)
    }

    /// The tenant the document belongs to.
    pub fn domain(&self) -> Option<&str> {
        self.get_str("/domain")
    }

    /// The case's identifier in an external system, when set and non-empty.
    pub fn external_id(&self) -> Option<&str> {
        self.non_empty_str("/external_id")
    }

    /// The case's contact phone number, when set and non-empty.
    pub fn contact_phone_number(&self) -> Option<&str> {
        self.non_empty_str("/contact_phone_number")
    }

    /// True for a deletion tombstone (`"_deleted": true`).
    pub fn is_deleted_tombstone(&self) -> bool {
        self.get_bool("/_deleted").unwrap_or(false)
    }

    /// Extract a string value using a JSON pointer (e.g., "/domain").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.0.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.0.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Like [`Document::get_str`], but an empty string reads as absent.
    pub fn non_empty_str(&self, pointer: &str) -> Option<&str> {
        self.get_str(pointer).filter(|s| !s.is_empty())
    }
}

impl From<serde_json::Value> for Document {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
