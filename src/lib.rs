//! Stagehand: a scene state machine driver for frame-based applications
//!
//! Stagehand replaces the nested-loop style of writing game modes (one
//! `while` loop per menu, one per gameplay screen) with a single driver
//! that owns a table of scenes and moves between them. Each scene is one
//! mode of the application; the director polls input, forwards it to the
//! active scene, runs its per-frame hooks, and performs validated
//! transitions when the scene signals it is finished.
//!
//! # Core Concepts
//!
//! - **Scene**: one mode of behavior with `setup`/`cleanup` lifecycle
//!   hooks and `handle_input`/`update`/`render` frame hooks
//! - **Director**: the driver owning the active scene and the frame loop
//! - **SharedStore**: an out-of-band key/value channel for cross-scene
//!   communication
//!
//! The driver is single-threaded and cooperative: a frame runs as one
//! uninterrupted unit, and the only cancellation mechanism is the quit
//! event, observed at frame boundaries. Rendering backends, windowing,
//! device polling, and frame pacing live behind the [`driver::io`] seams;
//! the crate drives them but never implements them.
//!
//! # Example
//!
//! ```rust
//! use stagehand::builder::DirectorBuilder;
//! use stagehand::core::{HookError, Scene, SceneStatus, SharedStore};
//! use stagehand::driver::{NullSurface, QueuedInput, Unpaced};
//! use stagehand::core::InputEvent;
//! use stagehand::scene_ids;
//!
//! scene_ids! {
//!     enum Mode {
//!         Menu,
//!         Game,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Menu {
//!     start_pressed: bool,
//! }
//!
//! impl Scene<Mode> for Menu {
//!     fn setup(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
//!         self.start_pressed = false;
//!         Ok(())
//!     }
//!
//!     fn handle_input(
//!         &mut self,
//!         event: &InputEvent,
//!         _store: &mut SharedStore,
//!     ) -> Result<(), HookError> {
//!         if matches!(event, InputEvent::KeyDown { .. }) {
//!             self.start_pressed = true;
//!         }
//!         Ok(())
//!     }
//!
//!     fn status(&self) -> SceneStatus<Mode> {
//!         if self.start_pressed {
//!             SceneStatus::Finished { next: Mode::Game }
//!         } else {
//!             SceneStatus::Running
//!         }
//!     }
//!
//!     fn routes(&self) -> Vec<Mode> {
//!         vec![Mode::Game]
//!     }
//! }
//!
//! struct Game;
//! impl Scene<Mode> for Game {}
//!
//! let mut director = DirectorBuilder::new()
//!     .scene(Mode::Menu, Menu::default())
//!     .scene(Mode::Game, Game)
//!     .start(Mode::Menu)
//!     .build()
//!     .unwrap();
//!
//! // Scripted input: press a key on the first frame, quit on the second.
//! let mut input = QueuedInput::from(vec![
//!     vec![InputEvent::key_down(13)],
//!     vec![InputEvent::Quit],
//! ]);
//!
//! director
//!     .run(&mut input, &mut NullSurface, &mut Unpaced)
//!     .unwrap();
//!
//! assert_eq!(director.active(), &Mode::Game);
//! ```

pub mod builder;
pub mod core;
pub mod driver;

// Re-export commonly used types
pub use builder::{BuildError, DirectorBuilder};
pub use core::{
    HookError, HookKind, InputEvent, Scene, SceneId, SceneStatus, SharedStore, Surface,
    TransitionLog, TransitionRecord,
};
pub use driver::{Director, DriverError, FramePacer, InputSource, NullSurface, Phase, QueuedInput, Unpaced};
