//! Input events forwarded to the active scene.
//!
//! The driver does not poll devices itself. A host-side input source
//! translates whatever its windowing layer produces into these semantic
//! events; the director forwards them verbatim to the active scene, with
//! one exception: [`InputEvent::Quit`] is consumed by the director.

use serde::{Deserialize, Serialize};

/// Signal identifier.
///
/// Used by [`InputEvent::Signal`] so external systems (animation done,
/// asset loaded) can poke the active scene without inventing a key code.
pub type SignalId = String;

/// One externally-sourced input event.
///
/// Scenes ignore any kind they do not recognize; the default
/// `handle_input` ignores everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Application-level quit request. Consumed by the director, which
    /// clears the running flag in the same frame; never forwarded to a
    /// scene.
    Quit,

    /// A key went down.
    KeyDown { key: u32 },

    /// A key went up.
    KeyUp { key: u32 },

    /// Pointer pressed at window coordinates.
    PointerDown { x: f32, y: f32 },

    /// Pointer released at window coordinates.
    PointerUp { x: f32, y: f32 },

    /// Out-of-band signal from a host system.
    Signal { id: SignalId },
}

impl InputEvent {
    /// Create a key-down event.
    pub fn key_down(key: u32) -> Self {
        Self::KeyDown { key }
    }

    /// Create a key-up event.
    pub fn key_up(key: u32) -> Self {
        Self::KeyUp { key }
    }

    /// Create a pointer-down event.
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }

    /// Create a pointer-up event.
    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    /// Create a signal event.
    pub fn signal(id: impl Into<SignalId>) -> Self {
        Self::Signal { id: id.into() }
    }

    /// Whether this is the designated quit event.
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}
