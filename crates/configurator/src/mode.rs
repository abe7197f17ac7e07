//! Command mode selection.

use crate::types::{CacheEntry, DeleteReport, ProvidedValue, StoreReport};

/// Where parameter values come from for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Prompt for each parameter, seeded with cached defaults
    Interactive,

    /// Values given as command-line flags
    Arguments(Vec<ProvidedValue>),
}

/// What one invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Delete every managed parameter and the cache
    Delete,

    /// Write the would-be cache without touching the store
    Trial(Source),

    /// Store values, reload them and refresh the cache
    Apply(Source),
}

impl Mode {
    /// Pick the mode from the option flags.
    ///
    /// Delete wins over everything, then test. `interactive` only chooses
    /// the value source.
    pub fn select(delete: bool, test: bool, interactive: bool, provided: Vec<ProvidedValue>) -> Self {
        if delete {
            return Mode::Delete;
        }

        let source = if interactive {
            Source::Interactive
        } else {
            Source::Arguments(provided)
        };

        if test {
            Mode::Trial(source)
        } else {
            Mode::Apply(source)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Delete => "delete",
            Mode::Trial(_) => "test",
            Mode::Apply(_) => "apply",
        }
    }
}

/// What an invocation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Deleted(DeleteReport),

    /// Cache written from provided values; store untouched
    Trialed(Vec<CacheEntry>),

    Applied {
        report: StoreReport,
        loaded: Vec<CacheEntry>,
    },

    /// No value was supplied; nothing was contacted or written
    Aborted(String),
}
