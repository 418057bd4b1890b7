//! Builder for assembling a director from a scene table.

use crate::builder::error::BuildError;
use crate::core::{Scene, SceneId, SharedStore};
use crate::driver::Director;
use std::collections::HashMap;

/// Builder for constructing a [`Director`] with a fluent API.
///
/// Registration order does not matter. `build()` validates the whole table
/// before the loop ever starts: the start id must be registered, ids must
/// be unique, and every route a scene declares must point at a registered
/// scene.
///
/// # Example
///
/// ```rust
/// use stagehand::builder::DirectorBuilder;
/// use stagehand::core::{Scene, SceneStatus};
/// use stagehand::scene_ids;
///
/// scene_ids! {
///     enum Mode {
///         Menu,
///         Game,
///     }
/// }
///
/// struct Menu;
/// impl Scene<Mode> for Menu {}
///
/// struct Game;
/// impl Scene<Mode> for Game {}
///
/// let director = DirectorBuilder::new()
///     .scene(Mode::Menu, Menu)
///     .scene(Mode::Game, Game)
///     .start(Mode::Menu)
///     .build()
///     .unwrap();
///
/// assert_eq!(director.active(), &Mode::Menu);
/// ```
pub struct DirectorBuilder<I: SceneId> {
    scenes: Vec<(I, Box<dyn Scene<I>>)>,
    start: Option<I>,
    store: SharedStore,
}

impl<I: SceneId> DirectorBuilder<I> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            start: None,
            store: SharedStore::new(),
        }
    }

    /// Register a scene under `id`.
    pub fn scene(mut self, id: I, scene: impl Scene<I> + 'static) -> Self {
        self.scenes.push((id, Box::new(scene)));
        self
    }

    /// Register a pre-boxed scene under `id`.
    pub fn boxed_scene(mut self, id: I, scene: Box<dyn Scene<I>>) -> Self {
        self.scenes.push((id, scene));
        self
    }

    /// Set the start scene (required).
    pub fn start(mut self, id: I) -> Self {
        self.start = Some(id);
        self
    }

    /// Seed the shared store before the first scene enters.
    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = store;
        self
    }

    /// Validate the table and construct the director.
    ///
    /// On success the start scene is active and its `setup()` has run. If
    /// any validation fails, no scene's `setup()` is ever called.
    pub fn build(self) -> Result<Director<I>, BuildError> {
        if self.scenes.is_empty() {
            return Err(BuildError::NoScenes);
        }

        let mut table: HashMap<I, Box<dyn Scene<I>>> = HashMap::with_capacity(self.scenes.len());
        for (id, scene) in self.scenes {
            if table.contains_key(&id) {
                return Err(BuildError::DuplicateScene {
                    id: id.name().to_string(),
                });
            }
            table.insert(id, scene);
        }

        let start = self.start.ok_or(BuildError::MissingStart)?;
        if !table.contains_key(&start) {
            return Err(BuildError::UnknownStart {
                id: start.name().to_string(),
            });
        }

        for (id, scene) in &table {
            for route in scene.routes() {
                if !table.contains_key(&route) {
                    return Err(BuildError::UnknownRoute {
                        from: id.name().to_string(),
                        to: route.name().to_string(),
                    });
                }
            }
        }

        Director::new(table, start, self.store)
    }
}

impl<I: SceneId> Default for DirectorBuilder<I> {
    fn default() -> Self {
        Self::new()
    }
}
