//! Build errors for director construction.

use crate::core::HookError;
use thiserror::Error;

/// Errors that can occur when assembling a director.
///
/// All of these are configuration mistakes: the table the host handed over
/// cannot support the run it asked for. None are recoverable; fix the
/// table.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no scenes registered. Add at least one scene before .build()")]
    NoScenes,

    #[error("scene '{id}' registered twice")]
    DuplicateScene { id: String },

    #[error("start scene not specified. Call .start(id) before .build()")]
    MissingStart,

    #[error("start scene '{id}' is not in the table")]
    UnknownStart { id: String },

    #[error("scene '{from}' declares a route to '{to}', which is not in the table")]
    UnknownRoute { from: String, to: String },

    #[error("setup of start scene '{id}' failed: {source}")]
    StartSetup { id: String, source: HookError },
}
