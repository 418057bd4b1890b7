//! Menu Flow
//!
//! This example wires three scenes (menu, gameplay, game over) into a
//! director and drives them with a scripted input source, so it runs
//! headless.
//!
//! Key concepts:
//! - Scenes override only the hooks they need
//! - Transitions are signaled through `status()`, validated against the
//!   table
//! - The shared store carries the score from gameplay to the game-over
//!   screen
//!
//! Run with: cargo run --example menu_flow

use stagehand::builder::DirectorBuilder;
use stagehand::core::{HookError, InputEvent, Scene, SceneStatus, SharedStore};
use stagehand::driver::{NullSurface, QueuedInput, Unpaced};
use stagehand::scene_ids;

scene_ids! {
    enum Flow {
        Menu,
        Playing,
        GameOver,
    }
}

const KEY_ENTER: u32 = 13;
const KEY_X: u32 = 88;

#[derive(Default)]
struct Menu {
    start_pressed: bool,
}

impl Scene<Flow> for Menu {
    fn setup(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
        self.start_pressed = false;
        println!("[menu] press enter to play");
        Ok(())
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        _store: &mut SharedStore,
    ) -> Result<(), HookError> {
        if matches!(event, InputEvent::KeyDown { key } if *key == KEY_ENTER) {
            self.start_pressed = true;
        }
        Ok(())
    }

    fn status(&self) -> SceneStatus<Flow> {
        if self.start_pressed {
            SceneStatus::Finished { next: Flow::Playing }
        } else {
            SceneStatus::Running
        }
    }

    fn routes(&self) -> Vec<Flow> {
        vec![Flow::Playing]
    }
}

#[derive(Default)]
struct Playing {
    score: u32,
    dead: bool,
}

impl Scene<Flow> for Playing {
    fn setup(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
        self.score = 0;
        self.dead = false;
        println!("[playing] go!");
        Ok(())
    }

    fn cleanup(&mut self, store: &mut SharedStore) -> Result<(), HookError> {
        store
            .set("score", self.score)
            .map_err(|e| HookError::new(e.to_string()))
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        _store: &mut SharedStore,
    ) -> Result<(), HookError> {
        if matches!(event, InputEvent::KeyDown { key } if *key == KEY_X) {
            self.dead = true;
        }
        Ok(())
    }

    fn update(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
        self.score += 100;
        Ok(())
    }

    fn status(&self) -> SceneStatus<Flow> {
        if self.dead {
            SceneStatus::Finished {
                next: Flow::GameOver,
            }
        } else {
            SceneStatus::Running
        }
    }

    fn routes(&self) -> Vec<Flow> {
        vec![Flow::GameOver]
    }
}

struct GameOver;

impl Scene<Flow> for GameOver {
    fn setup(&mut self, store: &mut SharedStore) -> Result<(), HookError> {
        let score = store.get::<u32>("score").unwrap_or(0);
        println!("[game over] final score: {score}");
        Ok(())
    }
}

fn main() {
    let mut director = DirectorBuilder::new()
        .scene(Flow::Menu, Menu::default())
        .scene(Flow::Playing, Playing::default())
        .scene(Flow::GameOver, GameOver)
        .start(Flow::Menu)
        .build()
        .expect("table is well-formed");

    // Scripted session: start the game, survive three frames, die, then
    // quit from the game-over screen.
    let mut input = QueuedInput::from(vec![
        vec![InputEvent::key_down(KEY_ENTER)],
        vec![],
        vec![],
        vec![InputEvent::key_down(KEY_X)],
        vec![InputEvent::Quit],
    ]);

    director
        .run(&mut input, &mut NullSurface, &mut Unpaced)
        .expect("run completes cleanly");

    println!(
        "frames: {}, transitions: {}",
        director.frame(),
        director.log().len()
    );
}
