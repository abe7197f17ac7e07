//! paramconf Core Library
//!
//! This crate provides the foundational utilities for the `configure` CLI:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Application settings
//! - The parameter definition file (`config.params.json`)

pub mod config;
pub mod error;
pub mod logging;
pub mod params;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use params::{OptionDefinition, ParameterDefinition, ParamsConfig, NOT_DEFINED};
