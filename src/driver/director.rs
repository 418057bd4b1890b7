//! The director: owns the scene table and drives the frame loop.

use crate::builder::BuildError;
use crate::core::{
    HookError, HookKind, Scene, SceneId, SceneStatus, SharedStore, Surface, TransitionLog,
    TransitionRecord,
};
use crate::driver::error::DriverError;
use crate::driver::io::{FramePacer, InputSource};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// The director's own lifecycle.
///
/// ```text
/// Initialized -> Running <-> Transitioning
///                   |
///                   v
///             ShuttingDown -> Stopped
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Construction done; the start scene's setup has run.
    Initialized,
    /// The frame loop is executing.
    Running,
    /// Mid-frame sub-step: cleanup of the old scene, setup of the new.
    Transitioning,
    /// The running flag cleared; final cleanup pending.
    ShuttingDown,
    /// Terminal.
    Stopped,
}

/// Owns the scene table, the active scene, and the frame loop.
///
/// Exactly one scene is active at any time, and only the director invokes
/// its hooks. The whole frame pipeline (poll, dispatch, transition check,
/// update, render) runs as one uninterrupted unit per frame; the only
/// cancellation point is the running flag, checked at frame boundaries.
///
/// Constructed through [`crate::builder::DirectorBuilder`], or directly
/// from a table via [`Director::new`].
pub struct Director<I: SceneId> {
    scenes: HashMap<I, Box<dyn Scene<I>>>,
    active: I,
    phase: Phase,
    running: bool,
    frame: u64,
    store: SharedStore,
    log: TransitionLog<I>,
}

impl<I: SceneId> Director<I> {
    /// Construct a director from a scene table and a start id.
    ///
    /// Marks the start scene active and runs its `setup()`. Fails with
    /// [`BuildError::UnknownStart`] when the start id is absent from the
    /// table, in which case no scene's setup is ever called; fails with
    /// [`BuildError::StartSetup`] when the start scene's setup itself
    /// fails, after a best-effort cleanup of the half-entered scene.
    pub fn new(
        scenes: HashMap<I, Box<dyn Scene<I>>>,
        start: I,
        store: SharedStore,
    ) -> Result<Self, BuildError> {
        if !scenes.contains_key(&start) {
            return Err(BuildError::UnknownStart {
                id: start.name().to_string(),
            });
        }

        let mut director = Self {
            scenes,
            active: start,
            phase: Phase::Initialized,
            running: true,
            frame: 0,
            store,
            log: TransitionLog::new(),
        };

        if let Err(source) = director.hook(HookKind::Setup, |scene, store| scene.setup(store)) {
            if let Err(secondary) = director.hook(HookKind::Cleanup, |scene, store| scene.cleanup(store)) {
                warn!(error = %secondary, "cleanup failed after start setup failure");
            }
            return Err(BuildError::StartSetup {
                id: director.active.name().to_string(),
                source,
            });
        }

        debug!(scene = director.active.name(), "start scene entered");
        Ok(director)
    }

    /// Identifier of the active scene.
    pub fn active(&self) -> &I {
        &self.active
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the overall running flag is still set.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames processed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Shared store, readable between runs.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Mutable access to the shared store.
    pub fn store_mut(&mut self) -> &mut SharedStore {
        &mut self.store
    }

    /// Transition log of the run so far.
    pub fn log(&self) -> &TransitionLog<I> {
        &self.log
    }

    /// Clear the running flag from outside the loop.
    ///
    /// Equivalent to an [`crate::core::InputEvent::Quit`] arriving on the next frame.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Drive the frame loop until shutdown or a fatal error.
    ///
    /// Blocks, repeating the frame pipeline and calling `pacer.pace()` at
    /// every frame boundary. Returns `Ok(())` on clean shutdown, after the
    /// active scene's final `cleanup()`. On a fatal error the driver
    /// attempts a best-effort cleanup of the active scene and returns the
    /// error; it never retries a hook.
    ///
    /// Running a stopped director is a no-op.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        surface: &mut dyn Surface,
        pacer: &mut dyn FramePacer,
    ) -> Result<(), DriverError> {
        if self.phase == Phase::Stopped {
            return Ok(());
        }
        self.phase = Phase::Running;

        while self.running {
            if let Err(err) = self.process_frame(input, surface) {
                self.abort(&err);
                return Err(err);
            }
            pacer.pace();
        }

        self.shutdown()
    }

    /// One iteration of the loop: poll, dispatch, transition check,
    /// update, render.
    fn process_frame(
        &mut self,
        input: &mut dyn InputSource,
        surface: &mut dyn Surface,
    ) -> Result<(), DriverError> {
        self.frame += 1;

        let events = input.poll_events();
        for event in &events {
            if event.is_quit() {
                // Quit bypasses the scene entirely and stops forwarding
                // of the remaining events this frame.
                debug!(frame = self.frame, "quit requested");
                self.running = false;
                break;
            }
            self.hook(HookKind::HandleInput, |scene, store| {
                scene.handle_input(event, store)
            })
            .map_err(|source| self.wrap(HookKind::HandleInput, source))?;
        }

        if let SceneStatus::Finished { next } = self.active_status()? {
            self.switch_to(next)?;
        }

        if self.running {
            self.hook(HookKind::Update, |scene, store| scene.update(store))
                .map_err(|source| self.wrap(HookKind::Update, source))?;
            self.hook(HookKind::Render, |scene, store| {
                scene.render(surface, store)
            })
            .map_err(|source| self.wrap(HookKind::Render, source))?;
        }

        Ok(())
    }

    /// Deactivate the active scene and activate `next`.
    ///
    /// The outgoing scene's `cleanup()` runs exactly once whether or not
    /// the target exists; an unknown target then fails without any
    /// further `setup()`.
    fn switch_to(&mut self, next: I) -> Result<(), DriverError> {
        self.phase = Phase::Transitioning;

        let known = self.scenes.contains_key(&next);
        let cleaned = self.hook(HookKind::Cleanup, |scene, store| scene.cleanup(store));

        if !known {
            if let Err(secondary) = cleaned {
                warn!(error = %secondary, "cleanup failed while aborting on unknown target");
            }
            return Err(DriverError::UnknownScene {
                id: next.name().to_string(),
            });
        }
        self.fatal(HookKind::Cleanup, cleaned)?;

        let record = TransitionRecord {
            from: self.active.clone(),
            to: next.clone(),
            frame: self.frame,
            timestamp: Utc::now(),
        };
        info!(
            from = record.from.name(),
            to = record.to.name(),
            frame = self.frame,
            "scene transition"
        );
        self.log = self.log.record(record);
        self.active = next;

        self.hook(HookKind::Setup, |scene, store| scene.setup(store))
            .map_err(|source| self.wrap(HookKind::Setup, source))?;
        self.phase = Phase::Running;
        Ok(())
    }

    /// Final cleanup after the running flag cleared.
    fn shutdown(&mut self) -> Result<(), DriverError> {
        self.phase = Phase::ShuttingDown;
        let cleaned = self.hook(HookKind::Cleanup, |scene, store| scene.cleanup(store));
        self.phase = Phase::Stopped;
        info!(frames = self.frame, "director stopped");
        self.fatal(HookKind::Cleanup, cleaned)
    }

    /// Fatal-error teardown. Cleanup is attempted unless the error came
    /// out of a cleanup itself, or out of the unknown-target path, where
    /// the outgoing scene was already cleaned.
    fn abort(&mut self, err: &DriverError) {
        self.phase = Phase::ShuttingDown;
        self.running = false;

        let already_cleaned = matches!(
            err,
            DriverError::UnknownScene { .. }
                | DriverError::Hook {
                    hook: HookKind::Cleanup,
                    ..
                }
        );
        if !already_cleaned {
            if let Err(secondary) = self.hook(HookKind::Cleanup, |scene, store| scene.cleanup(store)) {
                warn!(error = %secondary, "cleanup failed during abort");
            }
        }

        self.phase = Phase::Stopped;
        debug!(frames = self.frame, error = %err, "director aborted");
    }

    /// Read the active scene's status.
    fn active_status(&self) -> Result<SceneStatus<I>, DriverError> {
        self.scenes
            .get(&self.active)
            .map(|scene| scene.status())
            .ok_or_else(|| DriverError::UnknownScene {
                id: self.active.name().to_string(),
            })
    }

    /// Invoke one hook on the active scene.
    fn hook<F>(&mut self, kind: HookKind, f: F) -> Result<(), HookError>
    where
        F: FnOnce(&mut dyn Scene<I>, &mut SharedStore) -> Result<(), HookError>,
    {
        let Self {
            scenes,
            active,
            store,
            ..
        } = self;
        let scene = scenes
            .get_mut(active)
            .ok_or_else(|| HookError::new(format!("active scene '{}' vanished", active.name())))?;
        if let Err(source) = f(scene.as_mut(), store) {
            debug!(scene = active.name(), hook = kind.name(), error = %source, "hook failed");
            return Err(source);
        }
        Ok(())
    }

    /// Promote a hook result to a driver error.
    fn fatal(&self, kind: HookKind, result: Result<(), HookError>) -> Result<(), DriverError> {
        result.map_err(|source| self.wrap(kind, source))
    }

    fn wrap(&self, kind: HookKind, source: HookError) -> DriverError {
        DriverError::Hook {
            scene: self.active.name().to_string(),
            hook: kind,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DirectorBuilder;
    use crate::core::InputEvent;
    use crate::driver::io::{NullSurface, QueuedInput, Unpaced};
    use std::cell::RefCell;
    use std::rc::Rc;

    crate::scene_ids! {
        enum TestMode {
            Menu,
            Game,
            Missing,
        }
    }

    type Trace = Rc<RefCell<Vec<String>>>;

    /// Scene that records every hook call and finishes when it sees a
    /// key-down for its trigger key.
    struct Scripted {
        label: &'static str,
        trace: Trace,
        next: Option<TestMode>,
        trigger: u32,
        done: bool,
        fail_in: Option<HookKind>,
    }

    impl Scripted {
        fn new(label: &'static str, trace: Trace, trigger: u32, next: Option<TestMode>) -> Self {
            Self {
                label,
                trace,
                next,
                trigger,
                done: false,
                fail_in: None,
            }
        }

        fn failing(mut self, hook: HookKind) -> Self {
            self.fail_in = Some(hook);
            self
        }

        fn mark(&self, hook: &str) {
            self.trace.borrow_mut().push(format!("{}:{hook}", self.label));
        }

        fn check(&self, hook: HookKind) -> Result<(), HookError> {
            if self.fail_in == Some(hook) {
                Err(HookError::new("scripted failure"))
            } else {
                Ok(())
            }
        }
    }

    impl Scene<TestMode> for Scripted {
        fn setup(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
            self.done = false;
            self.mark("setup");
            self.check(HookKind::Setup)
        }

        fn cleanup(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
            self.mark("cleanup");
            self.check(HookKind::Cleanup)
        }

        fn handle_input(
            &mut self,
            event: &InputEvent,
            _store: &mut SharedStore,
        ) -> Result<(), HookError> {
            self.mark("input");
            if matches!(event, InputEvent::KeyDown { key } if *key == self.trigger) {
                self.done = true;
            }
            self.check(HookKind::HandleInput)
        }

        fn update(&mut self, _store: &mut SharedStore) -> Result<(), HookError> {
            self.mark("update");
            self.check(HookKind::Update)
        }

        fn render(
            &mut self,
            _surface: &mut dyn Surface,
            _store: &SharedStore,
        ) -> Result<(), HookError> {
            self.mark("render");
            self.check(HookKind::Render)
        }

        fn status(&self) -> SceneStatus<TestMode> {
            match self.next {
                Some(next) if self.done => SceneStatus::Finished { next },
                _ => SceneStatus::Running,
            }
        }
    }

    fn count(trace: &Trace, entry: &str) -> usize {
        trace.borrow().iter().filter(|e| *e == entry).count()
    }

    #[test]
    fn quit_stops_the_loop_and_cleans_up_once() {
        let trace: Trace = Rc::default();
        let mut director = DirectorBuilder::new()
            .scene(
                TestMode::Menu,
                Scripted::new("menu", trace.clone(), 1, None),
            )
            .start(TestMode::Menu)
            .build()
            .unwrap();

        let mut input = QueuedInput::from(vec![vec![], vec![InputEvent::Quit]]);
        director
            .run(&mut input, &mut NullSurface, &mut Unpaced)
            .unwrap();

        assert_eq!(director.phase(), Phase::Stopped);
        assert!(!director.is_running());
        assert_eq!(count(&trace, "menu:setup"), 1);
        assert_eq!(count(&trace, "menu:cleanup"), 1);
        // The quiet frame ran update and render; the quit frame ran
        // neither.
        assert_eq!(count(&trace, "menu:update"), 1);
        assert_eq!(count(&trace, "menu:render"), 1);
    }

    #[test]
    fn events_after_quit_are_not_forwarded() {
        let trace: Trace = Rc::default();
        let mut director = DirectorBuilder::new()
            .scene(
                TestMode::Menu,
                Scripted::new("menu", trace.clone(), 1, None),
            )
            .start(TestMode::Menu)
            .build()
            .unwrap();

        let mut input = QueuedInput::from(vec![vec![
            InputEvent::key_down(9),
            InputEvent::Quit,
            InputEvent::key_down(9),
        ]]);
        director
            .run(&mut input, &mut NullSurface, &mut Unpaced)
            .unwrap();

        assert_eq!(count(&trace, "menu:input"), 1);
    }

    #[test]
    fn transition_runs_cleanup_then_setup_then_new_frame_hooks() {
        let trace: Trace = Rc::default();
        let mut director = DirectorBuilder::new()
            .scene(
                TestMode::Menu,
                Scripted::new("menu", trace.clone(), 1, Some(TestMode::Game)),
            )
            .scene(
                TestMode::Game,
                Scripted::new("game", trace.clone(), 2, None),
            )
            .start(TestMode::Menu)
            .build()
            .unwrap();

        let mut input = QueuedInput::from(vec![
            vec![InputEvent::key_down(1)],
            vec![InputEvent::Quit],
        ]);
        director
            .run(&mut input, &mut NullSurface, &mut Unpaced)
            .unwrap();

        // The transition frame: menu gets the input, hands over, and the
        // frame's update/render land on game.
        let expected_prefix = vec![
            "menu:setup",
            "menu:input",
            "menu:cleanup",
            "game:setup",
            "game:update",
            "game:render",
        ];
        assert_eq!(&trace.borrow()[..expected_prefix.len()], &expected_prefix);
        assert_eq!(director.active(), &TestMode::Game);
        assert_eq!(director.log().path(), vec![&TestMode::Menu, &TestMode::Game]);
    }

    #[test]
    fn unknown_target_cleans_outgoing_exactly_once() {
        let trace: Trace = Rc::default();
        let mut director = DirectorBuilder::new()
            .scene(
                TestMode::Menu,
                Scripted::new("menu", trace.clone(), 1, Some(TestMode::Missing)),
            )
            .start(TestMode::Menu)
            .build()
            .unwrap();

        let mut input = QueuedInput::from(vec![vec![InputEvent::key_down(1)]]);
        let err = director
            .run(&mut input, &mut NullSurface, &mut Unpaced)
            .unwrap_err();

        assert!(matches!(err, DriverError::UnknownScene { .. }));
        assert!(err.is_configuration());
        assert_eq!(count(&trace, "menu:cleanup"), 1);
        assert_eq!(count(&trace, "menu:setup"), 1);
        assert_eq!(director.phase(), Phase::Stopped);
        assert!(director.log().is_empty());
    }

    #[test]
    fn update_failure_aborts_with_best_effort_cleanup() {
        let trace: Trace = Rc::default();
        let mut director = DirectorBuilder::new()
            .scene(
                TestMode::Menu,
                Scripted::new("menu", trace.clone(), 1, None).failing(HookKind::Update),
            )
            .start(TestMode::Menu)
            .build()
            .unwrap();

        let mut input = QueuedInput::new();
        let err = director
            .run(&mut input, &mut NullSurface, &mut Unpaced)
            .unwrap_err();

        assert!(matches!(
            err,
            DriverError::Hook {
                hook: HookKind::Update,
                ..
            }
        ));
        assert_eq!(count(&trace, "menu:cleanup"), 1);
        assert_eq!(director.phase(), Phase::Stopped);
    }

    #[test]
    fn cleanup_failure_is_not_retried() {
        let trace: Trace = Rc::default();
        let mut director = DirectorBuilder::new()
            .scene(
                TestMode::Menu,
                Scripted::new("menu", trace.clone(), 1, Some(TestMode::Game))
                    .failing(HookKind::Cleanup),
            )
            .scene(
                TestMode::Game,
                Scripted::new("game", trace.clone(), 2, None),
            )
            .start(TestMode::Menu)
            .build()
            .unwrap();

        let mut input = QueuedInput::from(vec![vec![InputEvent::key_down(1)]]);
        let err = director
            .run(&mut input, &mut NullSurface, &mut Unpaced)
            .unwrap_err();

        assert!(matches!(
            err,
            DriverError::Hook {
                hook: HookKind::Cleanup,
                ..
            }
        ));
        assert_eq!(count(&trace, "menu:cleanup"), 1);
        assert_eq!(count(&trace, "game:setup"), 0);
    }

    #[test]
    fn setup_failure_mid_run_cleans_the_incoming_scene() {
        let trace: Trace = Rc::default();
        let mut director = DirectorBuilder::new()
            .scene(
                TestMode::Menu,
                Scripted::new("menu", trace.clone(), 1, Some(TestMode::Game)),
            )
            .scene(
                TestMode::Game,
                Scripted::new("game", trace.clone(), 2, None).failing(HookKind::Setup),
            )
            .start(TestMode::Menu)
            .build()
            .unwrap();

        let mut input = QueuedInput::from(vec![vec![InputEvent::key_down(1)]]);
        let err = director
            .run(&mut input, &mut NullSurface, &mut Unpaced)
            .unwrap_err();

        assert!(matches!(
            err,
            DriverError::Hook {
                hook: HookKind::Setup,
                ..
            }
        ));
        assert_eq!(count(&trace, "game:setup"), 1);
        assert_eq!(count(&trace, "game:cleanup"), 1);
    }

    #[test]
    fn running_a_stopped_director_is_a_noop() {
        let trace: Trace = Rc::default();
        let mut director = DirectorBuilder::new()
            .scene(
                TestMode::Menu,
                Scripted::new("menu", trace.clone(), 1, None),
            )
            .start(TestMode::Menu)
            .build()
            .unwrap();

        let mut input = QueuedInput::from(vec![vec![InputEvent::Quit]]);
        director
            .run(&mut input, &mut NullSurface, &mut Unpaced)
            .unwrap();
        let frames = director.frame();

        director
            .run(&mut QueuedInput::new(), &mut NullSurface, &mut Unpaced)
            .unwrap();
        assert_eq!(director.frame(), frames);
        assert_eq!(count(&trace, "menu:cleanup"), 1);
    }

    #[test]
    fn request_quit_shuts_down_before_the_next_frame() {
        let trace: Trace = Rc::default();
        let mut director = DirectorBuilder::new()
            .scene(
                TestMode::Menu,
                Scripted::new("menu", trace.clone(), 1, None),
            )
            .start(TestMode::Menu)
            .build()
            .unwrap();

        director.request_quit();
        director
            .run(&mut QueuedInput::new(), &mut NullSurface, &mut Unpaced)
            .unwrap();

        assert_eq!(director.frame(), 0);
        assert_eq!(count(&trace, "menu:cleanup"), 1);
        assert_eq!(director.phase(), Phase::Stopped);
    }

    #[test]
    fn render_receives_the_host_surface() {
        struct Canvas {
            pixels: u32,
        }
        impl Surface for Canvas {
            fn as_any(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        struct Painter;
        impl Scene<TestMode> for Painter {
            fn render(
                &mut self,
                surface: &mut dyn Surface,
                _store: &SharedStore,
            ) -> Result<(), HookError> {
                let canvas = surface
                    .as_any()
                    .downcast_mut::<Canvas>()
                    .ok_or_else(|| HookError::new("unexpected surface backend"))?;
                canvas.pixels += 1;
                Ok(())
            }
        }

        let mut director = DirectorBuilder::new()
            .scene(TestMode::Menu, Painter)
            .start(TestMode::Menu)
            .build()
            .unwrap();

        let mut canvas = Canvas { pixels: 0 };
        let mut input = QueuedInput::from(vec![vec![], vec![], vec![InputEvent::Quit]]);
        director
            .run(&mut input, &mut canvas, &mut Unpaced)
            .unwrap();

        assert_eq!(canvas.pixels, 2);
    }
}
