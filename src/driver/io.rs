//! External collaborator seams.
//!
//! The director consumes three host-provided collaborators: an input
//! source, a draw surface, and a frame pacer. All three are traits; the
//! driver never implements device polling, rendering, or clock pacing
//! itself. The leaf types here are the trivial implementations used by
//! tests and headless hosts.

use crate::core::{InputEvent, Surface};
use std::any::Any;
use std::collections::VecDeque;

/// Source of input events, polled once per frame.
pub trait InputSource {
    /// Drain all pending events, in the order they arrived. An empty
    /// vector means a quiet frame.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Regulates how often frames run.
///
/// Called once at the end of every frame. A real host blocks here to hit
/// its target rate; the driver does not care how long the call takes.
pub trait FramePacer {
    /// Wait for the next frame boundary.
    fn pace(&mut self);
}

/// Input source fed from pre-scripted per-frame batches.
///
/// Each pushed batch is returned by one `poll_events` call; once the
/// script runs out, every subsequent frame is quiet.
#[derive(Debug, Default)]
pub struct QueuedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl QueuedInput {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
        }
    }

    /// Append one frame's worth of events.
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    /// Remaining scripted frames.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl From<Vec<Vec<InputEvent>>> for QueuedInput {
    fn from(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl InputSource for QueuedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Surface that discards everything drawn on it.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn as_any(&mut self) -> &mut dyn Any {
        self
    }
}

/// Pacer that never waits. Frames run back to back.
#[derive(Debug, Default)]
pub struct Unpaced;

impl FramePacer for Unpaced {
    fn pace(&mut self) {}
}
