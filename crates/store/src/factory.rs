//! Parameter store factory.
//!
//! This module creates a store backend from the configured backend name.

use crate::providers::{MemoryStore, SsmStore};
use crate::store::ParameterStore;
use paramconf_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;

/// Connection options shared by the remote backends.
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// AWS region override
    pub region: Option<String>,

    /// AWS shared-config profile
    pub profile: Option<String>,
}

impl StoreOptions {
    /// Take the connection options from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            region: config.region.clone(),
            profile: config.profile.clone(),
        }
    }
}

/// Create a parameter store based on the backend name.
///
/// # Arguments
/// * `kind` - Backend identifier ("ssm", "memory")
/// * `options` - Region/profile overrides for remote backends
///
/// # Errors
/// Returns `AppError::Config` if the backend is unknown.
pub async fn create_store(
    kind: &str,
    options: &StoreOptions,
) -> AppResult<Arc<dyn ParameterStore>> {
    match kind.to_lowercase().as_str() {
        "ssm" => {
            let store =
                SsmStore::from_env(options.region.as_deref(), options.profile.as_deref()).await;
            Ok(Arc::new(store))
        }
        "memory" => {
            tracing::warn!("Using the in-memory parameter store; nothing will be persisted");
            Ok(Arc::new(MemoryStore::new()))
        }
        _ => Err(AppError::Config(format!(
            "Unknown parameter store: '{}'. Supported stores: ssm, memory",
            kind
        ))),
    }
}
