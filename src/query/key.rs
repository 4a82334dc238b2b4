//! Query keys — composite identifiers indexing one cached result set.

use serde::{Deserialize, Serialize};

/// Composite cache key: a query name plus an optional parameter.
///
/// Two keys are equal iff both components match exactly; distinct coin ids
/// therefore index distinct entries. The display form is `name` or
/// `name:param`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    name: String,
    param: Option<String>,
}

impl QueryKey {
    /// A key with a parameter, e.g. `QueryKey::new("ohlcv", "btc-bitcoin")`.
    pub fn new(name: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param: Some(param.into()),
        }
    }

    /// A parameterless key, e.g. the global coin list.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.param {
            Some(p) => write!(f, "{}:{}", self.name, p),
            None => write!(f, "{}", self.name),
        }
    }
}
