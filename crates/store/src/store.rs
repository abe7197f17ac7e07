//! Parameter store abstraction.
//!
//! This module defines the operations the configurator consumes from a
//! remote key-value store.

use paramconf_core::AppResult;

/// Result of looking up a single parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The parameter exists with this value
    Found(String),

    /// The store holds no parameter under the requested name
    NotFound,
}

impl Lookup {
    /// The found value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

/// Trait for parameter store backends.
///
/// Names passed to every method are already namespace-qualified.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    /// Get the backend name (e.g., "ssm", "memory").
    fn store_name(&self) -> &str;

    /// Create or overwrite a string parameter.
    async fn put(&self, name: &str, value: &str, description: &str) -> AppResult<()>;

    /// Look up a parameter by name.
    ///
    /// A missing parameter is `Ok(Lookup::NotFound)`, never an error.
    async fn get(&self, name: &str) -> AppResult<Lookup>;

    /// Delete parameters in a single request.
    ///
    /// # Returns
    /// The names that were actually deleted
    async fn delete(&self, names: &[String]) -> AppResult<Vec<String>>;
}
