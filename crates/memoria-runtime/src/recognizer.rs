//! Hand recognizer boundary
//!
//! The underlying ML model is external: the session requests creation once,
//! checks readiness before use, and polls one result per video frame. The
//! contract is non-blocking - a recognizer that has nothing new for this
//! frame returns None and the loop moves on.

use memoria_core::FrameTime;
use memoria_gesture::RecognizerFrame;

/// External hand-landmark recognizer
pub trait HandRecognizer {
    /// Model loaded and ready to serve results
    fn is_ready(&self) -> bool;

    /// Latest result at the given poll time, if a new video frame produced
    /// one. Result timestamps are strictly increasing; the session guards
    /// against processing the same video frame twice.
    fn detect(&mut self, at: FrameTime) -> Option<RecognizerFrame>;
}
