//! Memoria Test - Scripted sessions for validation
//!
//! Drives a full [`SceneSession`](memoria_runtime::SceneSession) headlessly:
//! synthetic hand landmarks stand in for the recognizer, a recording stub
//! stands in for the camera, and every run is fixed-seed and fixed-dt so
//! scenarios replay exactly.

pub mod landmarks;
pub mod simulator;

pub use landmarks::*;
pub use simulator::*;
