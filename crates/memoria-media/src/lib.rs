//! Memoria Media - User content and camera boundaries
//!
//! User-supplied images become fixed-size photo card textures: a rounded
//! border, the image fitted into the card window, and a month label stamped
//! from the dot-matrix face. Undecodable images are skipped, never fatal.
//!
//! The camera stream is a trait boundary: acquiring and releasing the real
//! device belongs to the platform layer, the session only drives the
//! lifecycle.

pub mod photo;
pub mod video;

pub use photo::*;
pub use video::*;
