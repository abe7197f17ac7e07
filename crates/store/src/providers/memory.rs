//! In-memory parameter store.

use crate::store::{Lookup, ParameterStore};
use paramconf_core::AppResult;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A stored value with its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEntry {
    pub value: String,
    pub description: String,
}

/// Process-local store for testing and development.
///
/// Behaves like the remote store for the operations the configurator uses:
/// `put` always overwrites and `delete` reports only names that existed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, MemoryEntry>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored entry, ordered by name.
    pub fn entries(&self) -> BTreeMap<String, MemoryEntry> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, MemoryEntry>> {
        // A poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl ParameterStore for MemoryStore {
    fn store_name(&self) -> &str {
        "memory"
    }

    async fn put(&self, name: &str, value: &str, description: &str) -> AppResult<()> {
        self.lock().insert(
            name.to_string(),
            MemoryEntry {
                value: value.to_string(),
                description: description.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, name: &str) -> AppResult<Lookup> {
        Ok(match self.lock().get(name) {
            Some(entry) => Lookup::Found(entry.value.clone()),
            None => Lookup::NotFound,
        })
    }

    async fn delete(&self, names: &[String]) -> AppResult<Vec<String>> {
        let mut entries = self.lock();
        Ok(names
            .iter()
            .filter(|name| entries.remove(name.as_str()).is_some())
            .cloned()
            .collect())
    }
}
