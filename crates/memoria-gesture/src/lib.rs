//! Memoria Gesture - Hand landmarks as typed state
//!
//! The external recognizer is a black box that produces landmark coordinates
//! and ranked gesture labels per video frame. This crate gives that boundary
//! a strong type, classifies finger counts from landmark geometry, and turns
//! noisy per-frame signals into debounced mode-transition intents.
//!
//! Gesture input is untrusted: out-of-range counts are dropped, absent hands
//! mutate nothing, and a missing recognizer disables the feature without
//! touching the animation loop.

pub mod count;
pub mod hand;
pub mod interpreter;

pub use count::*;
pub use hand::*;
pub use interpreter::*;
