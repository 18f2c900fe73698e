use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Which identifier an index key looks a case up by.
///
/// The derived ordering matches the byte order of the serialized tags, so
/// keys sort the same way the host collates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// The case's id in an external system.
    ExternalId,
    /// The case's contact phone number.
    PhoneNumber,
}

impl IdentifierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExternalId => "external_id",
            Self::PhoneNumber => "phone_number",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite lookup key `(kind, domain, value)`.
///
/// Serialized as a three-element JSON array, e.g.
/// `["external_id", "demo", "E1"]`. A case with no `domain` keys under a
/// null domain, which sorts before every named domain.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexKey {
    pub kind: IdentifierKind,
    pub domain: Option<String>,
    pub value: String,
}

impl IndexKey {
    pub fn new(kind: IdentifierKind, domain: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            kind,
            domain: domain.map(str::to_string),
            value: value.into(),
        }
    }

    /// True when this key falls under the `(kind, domain)` prefix.
    pub fn has_prefix(&self, kind: IdentifierKind, domain: Option<&str>) -> bool {
        self.kind == kind && self.domain.as_deref() == domain
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.domain {
            Some(domain) => write!(f, "[{}, {}, {}]", self.kind, domain, self.value),
            None => write!(f, "[{}, null, {}]", self.kind, self.value),
        }
    }
}

impl Serialize for IndexKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.kind, &self.domain, &self.value).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IndexKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (kind, domain, value) = <(IdentifierKind, Option<String>, String)>::deserialize(deserializer)?;
        Ok(Self { kind, domain, value })
    }
}

/// One emitted index row: a key paired with a null payload.
///
/// The index records key existence only, so the value is always `()` and
/// serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: IndexKey,
    pub value: (),
}

impl IndexEntry {
    pub fn new(key: IndexKey) -> Self {
        Self { key, value: () }
    }
}
