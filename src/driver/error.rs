//! Runtime errors for the driver.

use crate::core::{HookError, HookKind};
use thiserror::Error;

/// Errors that can abort a run.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A finished scene named a successor that is not in the table. This
    /// is a configuration mistake; the run is over.
    #[error("no scene registered under id '{id}'")]
    UnknownScene { id: String },

    /// A scene hook failed. Hooks are assumed non-idempotent, so the
    /// driver never retries; the run is over.
    #[error("scene '{scene}' failed in {hook}: {source}")]
    Hook {
        scene: String,
        hook: HookKind,
        source: HookError,
    },
}

impl DriverError {
    /// Whether this error is a table-configuration mistake rather than a
    /// failing hook.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownScene { .. })
    }
}
