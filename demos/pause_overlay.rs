//! Pause Overlay
//!
//! Demonstrates re-entering a scene: gameplay and a pause screen hand
//! control back and forth, and each re-entry of the pause screen starts
//! from a fresh setup.
//!
//! Run with: cargo run --example pause_overlay

use stagehand::builder::DirectorBuilder;
use stagehand::core::{HookError, InputEvent, Scene, SceneStatus, SharedStore};
use stagehand::driver::{NullSurface, QueuedInput, Unpaced};
use stagehand::scene_ids;

scene_ids! {
    enum Mode {
        Playing,
        Paused,
    }
}

const KEY_P: u32 = 80;

/// Toggles into the other mode when the pause key goes down.
struct Toggle {
    label: &'static str,
    other: Mode,
    toggled: bool,
    visits: u32,
}

impl Toggle {
    fn new(label: &'static str, other: Mode) -> Self {
        Self {
            label,
            other,
            toggled: false,
            visits: 0,
        }
    }
}

impl Scene<Mode> for Toggle {
    fn setup(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
        self.toggled = false;
        self.visits += 1;
        println!("[{}] entered (visit {})", self.label, self.visits);
        Ok(())
    }

    fn cleanup(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
        println!("[{}] left", self.label);
        Ok(())
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        _store: &mut SharedStore,
    ) -> Result<(), HookError> {
        if matches!(event, InputEvent::KeyDown { key } if *key == KEY_P) {
            self.toggled = true;
        }
        Ok(())
    }

    fn status(&self) -> SceneStatus<Mode> {
        if self.toggled {
            SceneStatus::Finished { next: self.other }
        } else {
            SceneStatus::Running
        }
    }

    fn routes(&self) -> Vec<Mode> {
        vec![self.other]
    }
}

fn main() {
    let mut director = DirectorBuilder::new()
        .scene(Mode::Playing, Toggle::new("playing", Mode::Paused))
        .scene(Mode::Paused, Toggle::new("paused", Mode::Playing))
        .start(Mode::Playing)
        .build()
        .expect("table is well-formed");

    // Pause twice, then quit from gameplay.
    let mut input = QueuedInput::from(vec![
        vec![InputEvent::key_down(KEY_P)],
        vec![InputEvent::key_down(KEY_P)],
        vec![InputEvent::key_down(KEY_P)],
        vec![InputEvent::key_down(KEY_P)],
        vec![InputEvent::Quit],
    ]);

    director
        .run(&mut input, &mut NullSurface, &mut Unpaced)
        .expect("run completes cleanly");

    println!("path length: {}", director.log().path().len());
}
