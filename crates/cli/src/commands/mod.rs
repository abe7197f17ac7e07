//! Command handlers for the paramconf CLI.
//!
//! The flag surface is not fixed at compile time: parameter and option flags
//! come from the definition file and are attached to the static global flags.

pub mod configure;

// Re-export command helpers for convenience
pub use configure::{build_command, select_mode};
