//! Parameter configurator for paramconf.
//!
//! Reconciles operator-supplied values with the namespaced parameter store
//! and keeps a local cache of the last-known values so interactive sessions
//! can offer them as defaults.
//!
//! The cache is a disposable projection. It is never read back as a source
//! of truth for deployment.

pub mod cache;
pub mod configurator;
pub mod elicit;
pub mod mode;
pub mod types;

pub use cache::CacheFile;
pub use configurator::Configurator;
pub use elicit::elicit_values;
pub use mode::{Mode, Outcome, Source};
pub use types::{CacheEntry, DeleteReport, ProvidedValue, StoreReport};
