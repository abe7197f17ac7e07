//! Types shared by the configurator operations.

use paramconf_core::NOT_DEFINED;
use serde::{Deserialize, Serialize};

/// One line of the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Namespace-qualified name
    #[serde(rename = "Name")]
    pub name: String,

    /// Last known value, or the `not-defined` sentinel
    #[serde(rename = "Value")]
    pub value: String,
}

impl CacheEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Entry for a parameter with no known value.
    pub fn undefined(name: impl Into<String>) -> Self {
        Self::new(name, NOT_DEFINED)
    }

    pub fn is_defined(&self) -> bool {
        self.value != NOT_DEFINED
    }
}

/// A value the operator supplied for one parameter definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidedValue {
    /// Namespace-qualified name
    pub name: String,

    pub value: String,

    /// Description written to the store
    pub description: String,
}

/// Whether `value` may be stored for `name`.
///
/// Empty input and the reserved sentinel both mean "no value".
pub(crate) fn is_storable(name: &str, value: &str) -> bool {
    if value == NOT_DEFINED {
        tracing::warn!(
            "Ignoring value for {}: '{}' is reserved and cannot be stored",
            name,
            NOT_DEFINED
        );
        return false;
    }
    !value.is_empty()
}

/// Per-parameter result of a store operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreReport {
    /// Names written successfully, in order
    pub stored: Vec<String>,

    /// Names that failed, with the error message
    pub failed: Vec<(String, String)>,
}

impl StoreReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Names the store reported as deleted
    pub deleted: Vec<String>,

    /// Set when the bulk request itself failed
    pub error: Option<String>,

    /// Whether a cache file was removed
    pub cache_removed: bool,
}
