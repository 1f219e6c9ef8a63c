//! Error types for Memoria
//!
//! Nothing in the animation core is allowed to take down the render loop:
//! unavailable resources degrade features, bad media is skipped, and noisy
//! gesture input is dropped at the boundary. These variants cover the few
//! places where an operation can still fail outright.

use thiserror::Error;

/// Core Memoria errors
#[derive(Error, Debug)]
pub enum MemoriaError {
    // Resource unavailable
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("gesture recognizer unavailable")]
    RecognizerUnavailable,

    // Transient media failures
    #[error("photo {index} failed to decode: {reason}")]
    PhotoDecode { index: usize, reason: String },

    // Session lifecycle
    #[error("session already closed")]
    SessionClosed,
}

/// Result type for Memoria operations
pub type MemoriaResult<T> = Result<T, MemoriaError>;
