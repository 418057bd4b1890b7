//! Scene trait and lifecycle vocabulary.
//!
//! A scene is one mode of the application (a menu, gameplay, a pause
//! overlay). Scenes expose lifecycle hooks (`setup`/`cleanup`) and per-frame
//! hooks (`handle_input`/`update`/`render`); the director decides which
//! scene receives them.

use crate::core::event::InputEvent;
use crate::core::store::SharedStore;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Trait for scene identifiers.
///
/// Hosts define a closed enum of identifiers, one variant per scene, so an
/// invalid transition target is unrepresentable rather than a runtime
/// string lookup. The [`crate::scene_ids!`] macro generates the enum and
/// this impl in one step.
///
/// # Required Traits
///
/// - `Clone + Eq + Hash`: identifiers are table keys
/// - `Debug`: identifiers appear in diagnostics
/// - `Serialize` + `Deserialize`: identifiers appear in transition logs
///
/// # Example
///
/// ```rust
/// use stagehand::core::SceneId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Mode {
///     Menu,
///     Game,
/// }
///
/// impl SceneId for Mode {
///     fn name(&self) -> &str {
///         match self {
///             Self::Menu => "Menu",
///             Self::Game => "Game",
///         }
///     }
/// }
///
/// assert_eq!(Mode::Menu.name(), "Menu");
/// ```
pub trait SceneId:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the identifier's name for display/logging.
    fn name(&self) -> &str;
}

/// What the active scene wants to happen next.
///
/// Read by the director once per frame, after input has been dispatched.
/// This replaces the classic pair of a boolean "done" flag and a nullable
/// "next" string: a finished scene must name its successor, so the two can
/// never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneStatus<I> {
    /// Keep receiving frames.
    Running,
    /// Hand control to the named scene.
    Finished {
        /// Identifier of the successor scene.
        next: I,
    },
}

/// The hook a failure originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookKind {
    Setup,
    Cleanup,
    HandleInput,
    Update,
    Render,
}

impl HookKind {
    /// Hook name as it appears in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Cleanup => "cleanup",
            Self::HandleInput => "handle_input",
            Self::Update => "update",
            Self::Render => "render",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised by a scene hook.
///
/// Hooks are expected not to fail under normal operation; a failure is
/// fatal for the current run. The director wraps this with the scene and
/// hook it came from, so the message only needs to say what went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    /// Create a hook error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Opaque draw target handed to [`Scene::render`].
///
/// The driver never inspects the surface, it only passes it through.
/// Concrete scenes downcast via [`Surface::as_any`] to reach their
/// rendering backend.
pub trait Surface {
    /// Escape hatch for scenes that know the concrete backend type.
    fn as_any(&mut self) -> &mut dyn Any;
}

/// One mode of application behavior.
///
/// Every hook has a default no-op implementation, so concrete scenes
/// override only the subset they need. Only the director invokes these
/// hooks, and only on the single active scene.
///
/// # Lifecycle
///
/// A scene instance is constructed once, before the director starts, and
/// may be entered many times over the application's life. Each activation
/// span is bracketed by exactly one `setup` and one `cleanup`:
///
/// ```text
/// setup -> (handle_input* update render)* -> cleanup
/// ```
///
/// `setup` must fully reinitialize whatever `cleanup` released, including
/// resetting the value reported by [`Scene::status`]; a re-entered scene
/// that still reports `Finished` from its previous visit would transition
/// away immediately.
///
/// # Example
///
/// ```rust
/// use stagehand::core::{HookError, Scene, SceneStatus, SharedStore};
/// use stagehand::scene_ids;
///
/// scene_ids! {
///     enum Mode {
///         Menu,
///         Game,
///     }
/// }
///
/// #[derive(Default)]
/// struct Menu {
///     chosen: bool,
/// }
///
/// impl Scene<Mode> for Menu {
///     fn setup(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
///         self.chosen = false;
///         Ok(())
///     }
///
///     fn status(&self) -> SceneStatus<Mode> {
///         if self.chosen {
///             SceneStatus::Finished { next: Mode::Game }
///         } else {
///             SceneStatus::Running
///         }
///     }
///
///     fn routes(&self) -> Vec<Mode> {
///         vec![Mode::Game]
///     }
/// }
/// ```
pub trait Scene<I: SceneId> {
    /// Allocate per-activation resources.
    ///
    /// Called exactly once per activation, before any other hook of that
    /// activation.
    fn setup(&mut self, store: &mut SharedStore) -> Result<(), HookError> {
        let _ = store;
        Ok(())
    }

    /// Release per-activation resources.
    ///
    /// Called exactly once per deactivation, after the last frame hook of
    /// that activation and before the successor's `setup`.
    fn cleanup(&mut self, store: &mut SharedStore) -> Result<(), HookError> {
        let _ = store;
        Ok(())
    }

    /// Consume one input event.
    ///
    /// The default ignores the event; scenes are free to ignore any event
    /// kind they do not recognize. The quit event is handled by the
    /// director and never reaches a scene.
    fn handle_input(
        &mut self,
        event: &InputEvent,
        store: &mut SharedStore,
    ) -> Result<(), HookError> {
        let _ = (event, store);
        Ok(())
    }

    /// Advance internal state by one frame tick, independent of input.
    fn update(&mut self, store: &mut SharedStore) -> Result<(), HookError> {
        let _ = store;
        Ok(())
    }

    /// Produce visual output for one frame.
    ///
    /// Must not mutate gameplay state; `&mut self` exists only so scenes
    /// can maintain render caches.
    fn render(&mut self, surface: &mut dyn Surface, store: &SharedStore) -> Result<(), HookError> {
        let _ = (surface, store);
        Ok(())
    }

    /// Report whether this scene wants to keep running or hand over.
    ///
    /// The director reads this once per frame, after input dispatch.
    fn status(&self) -> SceneStatus<I> {
        SceneStatus::Running
    }

    /// Declare the identifiers this scene can finish into.
    ///
    /// Advisory: [`crate::builder::DirectorBuilder`] verifies every declared
    /// route against the table before the loop starts. An empty declaration
    /// (the default) skips that check and relies on the runtime lookup.
    fn routes(&self) -> Vec<I> {
        Vec::new()
    }
}
