//! Input events and tap discrimination
//!
//! The platform layer forwards raw pointer and control events; the session
//! consumes them between frames. Tap-vs-drag discrimination lives here so a
//! camera-orbit drag never fires a selection.

use std::time::Duration;

use glam::Vec2;
use memoria_core::FrameTime;

/// A pointer that moves further than this is a drag, not a tap
pub const TAP_MOVE_THRESHOLD_PX: f32 = 30.0;
/// A press held longer than this is a drag, not a tap
pub const TAP_MAX_DURATION: Duration = Duration::from_millis(300);

/// One input event, timestamped by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Vec2, at: FrameTime },
    PointerMove { position: Vec2 },
    PointerUp { position: Vec2, at: FrameTime },
    Resize { width: f32, height: f32 },
    /// Advance the selection (active only while a selection or filter exists)
    NavigateNext,
    NavigatePrev,
    /// Close the zoomed card, or the film strip when nothing is zoomed
    CloseSelection,
    ToggleCamera,
}

/// Distinguishes taps from drags across down/move/up sequences
#[derive(Debug, Default)]
pub struct PointerTracker {
    pressed: Option<(Vec2, FrameTime)>,
    last_position: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, position: Vec2, at: FrameTime) {
        self.pressed = Some((position, at));
        self.last_position = Some(position);
    }

    pub fn pointer_move(&mut self, position: Vec2) {
        self.last_position = Some(position);
    }

    /// Ends the press. Returns the tap position when the gesture qualified
    /// as a tap.
    pub fn pointer_up(&mut self, position: Vec2, at: FrameTime) -> Option<Vec2> {
        let (origin, pressed_at) = self.pressed.take()?;
        self.last_position = Some(position);

        let moved = origin.distance(position);
        let held = at.since(pressed_at);
        if moved <= TAP_MOVE_THRESHOLD_PX && held <= TAP_MAX_DURATION {
            Some(position)
        } else {
            None
        }
    }

    /// Most recent pointer position, for the camera parallax drift
    pub fn last_position(&self) -> Option<Vec2> {
        self.last_position
    }
}
