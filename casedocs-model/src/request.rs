use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request context the host passes alongside each document to a change filter.
///
/// Carries the query parameters of the change-feed request. Filters may
/// ignore it entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub query: BTreeMap<String, String>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter, builder style.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}
