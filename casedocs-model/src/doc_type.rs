use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const CASE: &str = "CommCareCase";
const DELETED_CASE: &str = "CommCareCase-Deleted";

/// The logical kind of a stored document, read from its `doc_type` field.
///
/// Only the case kinds are closed variants. Every other tag is kept verbatim
/// in [`DocType::Other`] so unknown kinds pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocType {
    /// A live case (`"CommCareCase"`).
    Case,
    /// A soft-deleted case (`"CommCareCase-Deleted"`).
    DeletedCase,
    /// Any other document kind.
    Other(String),
}

impl DocType {
    /// Classifies a raw `doc_type` tag. Matching is exact and case-sensitive.
    pub fn parse(tag: &str) -> Self {
        match tag {
            CASE => Self::Case,
            DELETED_CASE => Self::DeletedCase,
            other => Self::Other(other.to_string()),
        }
    }

    /// The tag as stored in the document.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Case => CASE,
            Self::DeletedCase => DELETED_CASE,
            Self::Other(tag) => tag,
        }
    }

    /// True for both the live and the soft-deleted case kinds.
    pub fn is_case(&self) -> bool {
        matches!(self, Self::Case | Self::DeletedCase)
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for DocType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}
