//! Camera stream boundary
//!
//! The session owns when the stream starts and stops; the platform layer
//! owns how. Releasing must drop every track synchronously - a stream left
//! live across sessions leaks the device.

use memoria_core::MemoriaResult;

/// One camera video stream
pub trait CameraStream {
    /// Start the stream. Permission denial surfaces as
    /// [`MemoriaError::CameraUnavailable`](memoria_core::MemoriaError::CameraUnavailable).
    fn acquire(&mut self) -> MemoriaResult<()>;

    /// Stop the stream and release all tracks. Must be safe to call twice.
    fn release(&mut self);

    fn is_live(&self) -> bool;
}

/// Test double that records lifecycle calls
#[derive(Debug, Default)]
pub struct RecordingCameraStream {
    pub acquires: usize,
    pub releases: usize,
    pub deny_permission: bool,
    live: bool,
}

impl RecordingCameraStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denied() -> Self {
        RecordingCameraStream {
            deny_permission: true,
            ..Self::default()
        }
    }
}

impl CameraStream for RecordingCameraStream {
    fn acquire(&mut self) -> MemoriaResult<()> {
        self.acquires += 1;
        if self.deny_permission {
            return Err(memoria_core::MemoriaError::CameraUnavailable(
                "permission denied".to_string(),
            ));
        }
        self.live = true;
        Ok(())
    }

    fn release(&mut self) {
        self.releases += 1;
        self.live = false;
    }

    fn is_live(&self) -> bool {
        self.live
    }
}
