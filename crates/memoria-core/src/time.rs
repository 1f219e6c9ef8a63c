//! Time primitives for Memoria
//!
//! The animation loop runs on a single monotonic clock. FrameTime stamps
//! recognizer results, input events, and the gesture debounce gate; it never
//! goes backwards within a session.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Monotonic frame time - microseconds since session start
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameTime(pub u64);

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        FrameTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        FrameTime(millis * 1000)
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        FrameTime((secs * 1_000_000.0) as u64)
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f32(self) -> f32 {
        self.0 as f32 / 1_000_000.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        FrameTime(self.0.saturating_add(duration.as_micros() as u64))
    }

    /// Elapsed time since an earlier instant; zero if `earlier` is ahead
    #[inline]
    pub fn since(self, earlier: FrameTime) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for FrameTime {
    type Output = FrameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        FrameTime(self.0 + rhs.as_micros() as u64)
    }
}

impl Sub<FrameTime> for FrameTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: FrameTime) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{:.3}ms", self.0 as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_monotonic() {
        let t1 = FrameTime::from_millis(100);
        let t2 = t1 + Duration::from_millis(10);

        assert!(t2 > t1);
        assert_eq!(t2 - t1, Duration::from_millis(10));
    }

    #[test]
    fn test_since_saturates() {
        let t1 = FrameTime::from_millis(100);
        let t2 = FrameTime::from_millis(50);

        assert_eq!(t2.since(t1), Duration::ZERO);
        assert_eq!(t1.since(t2), Duration::from_millis(50));
    }

    #[test]
    fn test_secs_conversion() {
        let t = FrameTime::from_secs_f64(1.5);
        assert_eq!(t.as_millis(), 1500);
        assert!((t.as_secs_f32() - 1.5).abs() < 1e-6);
    }
}
