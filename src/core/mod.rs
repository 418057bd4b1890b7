//! Core scene-machine vocabulary.
//!
//! This module contains the pure vocabulary of the driver:
//! - Scene behavior via the `Scene` trait and `SceneId` identifiers
//! - Semantic input events
//! - The cross-scene shared store
//! - The transition log
//!
//! Nothing here runs a loop or owns a scene; that is the `driver`
//! module's job.

mod event;
mod history;
mod scene;
mod store;

pub use event::{InputEvent, SignalId};
pub use history::{TransitionLog, TransitionRecord};
pub use scene::{HookError, HookKind, Scene, SceneId, SceneStatus, Surface};
pub use store::{SharedStore, StoreError};
