//! Memoria Runtime - The per-frame driver
//!
//! A [`SceneSession`] owns entity storage, mode state, and camera state, and
//! exposes a single `tick(dt, events)` entry point that returns the frame's
//! render commands. Event handlers and the gesture interpreter write through
//! the session's mode-state mutators; nothing captures ambient mutable state,
//! so the whole loop runs headless under test.
//!
//! The loop never blocks: recognizer results are polled behind a frame
//! timestamp guard and slow frames are skipped, never queued.

pub mod input;
pub mod recognizer;
pub mod render;
pub mod session;

pub use input::*;
pub use recognizer::*;
pub use render::*;
pub use session::*;
