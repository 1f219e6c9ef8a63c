//! Progress controller - the single formed-ness scalar
//!
//! One float in [0,1] tracks a 0/1 target through the framerate-independent
//! exponential approach. Every entity's chaos/formed blend reads this value
//! through an easing curve; the raw linear progress never touches positions.

use memoria_core::ease;

/// Exponential approach rate toward the target
pub const SMOOTHING_RATE: f32 = 3.0;

/// Smoothed formed-ness scalar
#[derive(Debug, Clone, Copy)]
pub struct ProgressController {
    progress: f32,
    target: f32,
}

impl Default for ProgressController {
    fn default() -> Self {
        ProgressController {
            progress: 0.0,
            target: 0.0,
        }
    }
}

impl ProgressController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target from the mode's formed flag. While a category filter is
    /// active the caller passes `false` - the strip always plays over chaos.
    pub fn set_formed(&mut self, formed: bool) {
        self.target = if formed { 1.0 } else { 0.0 };
    }

    /// Advance by elapsed seconds. Monotonic toward the target, never
    /// overshoots, never leaves [0,1].
    pub fn advance(&mut self, dt: f32) {
        self.progress = ease::smooth_approach(self.progress, self.target, SMOOTHING_RATE, dt)
            .clamp(0.0, 1.0);
    }

    /// Raw linear progress
    #[inline]
    pub fn value(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Eased progress for the particle field
    #[inline]
    pub fn eased_particles(&self) -> f32 {
        ease::ease_in_out_quint(self.progress)
    }

    /// Eased progress for ornaments and photo cards
    #[inline]
    pub fn eased_ornaments(&self) -> f32 {
        ease::ease_out_quart(self.progress)
    }

    /// Session teardown only - the one permitted discontinuity
    pub fn reset(&mut self) {
        *self = ProgressController::default();
    }
}
