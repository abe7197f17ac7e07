//! Parameter store integration for paramconf.
//!
//! This crate provides a backend-agnostic abstraction over a remote,
//! namespaced key-value store. Callers hand it fully qualified names; the
//! namespace is applied by the configurator.
//!
//! # Backends
//! - **ssm**: AWS Systems Manager Parameter Store (default)
//! - **memory**: In-process map for tests and rehearsals
//!
//! # Example
//! ```no_run
//! use paramconf_store::{create_store, Lookup, StoreOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = create_store("ssm", &StoreOptions::default()).await?;
//! store.put("/MyApp/DbHost", "localhost", "Database host under /MyApp/").await?;
//! if let Lookup::Found(value) = store.get("/MyApp/DbHost").await? {
//!     println!("{}", value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod providers;
pub mod store;

// Re-export main types
pub use factory::{create_store, StoreOptions};
pub use providers::{MemoryStore, SsmStore};
pub use store::{Lookup, ParameterStore};
