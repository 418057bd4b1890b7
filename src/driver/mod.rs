//! The imperative shell: the director and its collaborator seams.
//!
//! This module owns everything that runs a loop: the [`Director`] that
//! holds the scene table and performs transitions, the runtime error
//! type, and the traits the host plugs its input, rendering, and pacing
//! machinery into.

pub mod director;
pub mod error;
pub mod io;

pub use director::{Director, Phase};
pub use error::DriverError;
pub use io::{FramePacer, InputSource, NullSurface, QueuedInput, Unpaced};
