//! Gesture interpretation - per-frame signals into debounced mode intents
//!
//! The interpreter never mutates scene state directly. It reads a snapshot of
//! the current mode, evaluates the rules in precedence order, and returns at
//! most one transition intent for the session to apply through its own
//! mutators. The parallax pointer rides alongside, independent of the state
//! machine.

use std::time::Duration;

use memoria_core::{FrameTime, Month};

use crate::count::count_fingers;
use crate::hand::{GestureLabel, RecognizerFrame};

/// Debounce window between category transitions
pub const TRANSITION_COOLDOWN: Duration = Duration::from_millis(2000);

/// A requested mode transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeIntent {
    /// Form the "2025" arrangement
    Form,
    /// Scatter back to chaos
    Scatter,
    /// Enter film mode for one month
    SelectMonth(Month),
}

/// What the interpreter saw this frame, for the UI overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureStatus {
    #[default]
    None,
    Fist,
    Palm,
    Fingers(u8),
}

/// Snapshot of the mode state the rules depend on
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeSnapshot {
    pub formed: bool,
    pub active_category: Option<Month>,
}

/// Result of interpreting one recognizer frame
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureOutcome {
    /// At most one transition per frame
    pub intent: Option<ModeIntent>,
    pub status: GestureStatus,
    /// First hand's index fingertip in normalized image space
    pub pointer: Option<(f32, f32)>,
}

/// Debounced gesture state machine
#[derive(Debug)]
pub struct GestureInterpreter {
    last_transition: FrameTime,
    cooldown: Duration,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(TRANSITION_COOLDOWN)
    }
}

impl GestureInterpreter {
    pub fn new(cooldown: Duration) -> Self {
        GestureInterpreter {
            last_transition: FrameTime::ZERO,
            cooldown,
        }
    }

    /// Timestamp of the last applied transition
    pub fn last_transition(&self) -> FrameTime {
        self.last_transition
    }

    /// Evaluate one recognizer frame against the current mode.
    ///
    /// Rules, in precedence order:
    /// 1. not formed: a debounced finger count in 1-12 that differs from the
    ///    active category selects that month;
    /// 2. closed fist while scattered or filtered always returns to the
    ///    formed state;
    /// 3. open palm while formed scatters.
    pub fn interpret(&mut self, frame: &RecognizerFrame, mode: ModeSnapshot) -> GestureOutcome {
        let pointer = frame.index_tip().map(|p| (p.x, p.y));

        if frame.hands.is_empty() {
            return GestureOutcome {
                intent: None,
                status: GestureStatus::None,
                pointer,
            };
        }

        let count = count_fingers(&frame.hands);
        let top = frame.top_gesture();

        let status = match top {
            Some(GestureLabel::ClosedFist) => GestureStatus::Fist,
            Some(GestureLabel::OpenPalm) => GestureStatus::Palm,
            _ => GestureStatus::Fingers(count),
        };

        let mut intent = None;

        // Rule 1: finger-count month selection, debounced. Counts outside
        // 1-12 are noise and never transition.
        if !mode.formed {
            if let Some(month) = Month::new(count) {
                let elapsed = frame.timestamp.since(self.last_transition);
                if elapsed >= self.cooldown && Some(month) != mode.active_category {
                    intent = Some(ModeIntent::SelectMonth(month));
                    self.last_transition = frame.timestamp;
                }
            }
        }

        // Rules 2 and 3: classifier labels. The fist wins from any non-formed
        // state; the palm only acts on the formed state.
        if intent.is_none() {
            match top {
                Some(GestureLabel::ClosedFist) if !mode.formed || mode.active_category.is_some() => {
                    intent = Some(ModeIntent::Form);
                    self.last_transition = frame.timestamp;
                }
                Some(GestureLabel::OpenPalm) if mode.formed => {
                    intent = Some(ModeIntent::Scatter);
                    self.last_transition = frame.timestamp;
                }
                _ => {}
            }
        }

        GestureOutcome {
            intent,
            status,
            pointer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{Hand, HandLandmark, LandmarkPoint, RankedGesture};

    fn hand_with_fingers(n: u8) -> Hand {
        const DIGITS: [(HandLandmark, HandLandmark); 5] = [
            (HandLandmark::ThumbTip, HandLandmark::ThumbIp),
            (HandLandmark::IndexTip, HandLandmark::IndexPip),
            (HandLandmark::MiddleTip, HandLandmark::MiddlePip),
            (HandLandmark::RingTip, HandLandmark::RingPip),
            (HandLandmark::PinkyTip, HandLandmark::PinkyPip),
        ];
        let mut hand = Hand::new();
        for (i, (tip, lower)) in DIGITS.iter().enumerate() {
            let x = 0.3 + i as f32 * 0.05;
            let tip_y = if (i as u8) < n { 0.2 } else { 0.6 };
            hand.set_point(*tip, LandmarkPoint::new(x, tip_y));
            hand.set_point(*lower, LandmarkPoint::new(x, 0.5));
        }
        hand
    }

    fn finger_frame(at_ms: u64, fingers: u8) -> RecognizerFrame {
        RecognizerFrame {
            timestamp: FrameTime::from_millis(at_ms),
            hands: vec![hand_with_fingers(fingers)],
            gestures: Vec::new(),
        }
    }

    fn labeled_frame(at_ms: u64, label: GestureLabel) -> RecognizerFrame {
        RecognizerFrame {
            timestamp: FrameTime::from_millis(at_ms),
            hands: vec![hand_with_fingers(0)],
            gestures: vec![RankedGesture::new(label, 0.95)],
        }
    }

    fn scattered() -> ModeSnapshot {
        ModeSnapshot {
            formed: false,
            active_category: None,
        }
    }

    #[test]
    fn test_no_hands_no_mutation() {
        let mut interp = GestureInterpreter::default();
        let out = interp.interpret(&RecognizerFrame::empty(FrameTime::from_millis(5000)), scattered());

        assert_eq!(out.intent, None);
        assert_eq!(out.status, GestureStatus::None);
        assert_eq!(interp.last_transition(), FrameTime::ZERO);
    }

    #[test]
    fn test_finger_count_selects_month() {
        let mut interp = GestureInterpreter::default();
        let out = interp.interpret(&finger_frame(3000, 3), scattered());

        assert_eq!(
            out.intent,
            Some(ModeIntent::SelectMonth(Month::new(3).unwrap()))
        );
        assert_eq!(out.status, GestureStatus::Fingers(3));
    }

    #[test]
    fn test_cooldown_debounces_second_signal() {
        let mut interp = GestureInterpreter::default();

        let first = interp.interpret(&finger_frame(3000, 3), scattered());
        assert!(first.intent.is_some());

        // 500ms later, within the 2000ms window: suppressed
        let mode = ModeSnapshot {
            formed: false,
            active_category: Month::new(3),
        };
        let second = interp.interpret(&finger_frame(3500, 5), mode);
        assert_eq!(second.intent, None);

        // Beyond the window: applies
        let third = interp.interpret(&finger_frame(5200, 5), mode);
        assert_eq!(
            third.intent,
            Some(ModeIntent::SelectMonth(Month::new(5).unwrap()))
        );
    }

    #[test]
    fn test_same_category_never_retransitions() {
        let mut interp = GestureInterpreter::default();
        let mode = ModeSnapshot {
            formed: false,
            active_category: Month::new(4),
        };

        let out = interp.interpret(&finger_frame(10_000, 4), mode);
        assert_eq!(out.intent, None);
    }

    #[test]
    fn test_no_month_selection_while_formed() {
        let mut interp = GestureInterpreter::default();
        let mode = ModeSnapshot {
            formed: true,
            active_category: None,
        };

        let out = interp.interpret(&finger_frame(5000, 7), mode);
        assert_eq!(out.intent, None);
    }

    #[test]
    fn test_fist_forms_from_scattered() {
        let mut interp = GestureInterpreter::default();
        let out = interp.interpret(&labeled_frame(100, GestureLabel::ClosedFist), scattered());

        assert_eq!(out.intent, Some(ModeIntent::Form));
        assert_eq!(out.status, GestureStatus::Fist);
    }

    #[test]
    fn test_fist_wins_over_active_category() {
        let mut interp = GestureInterpreter::default();
        let mode = ModeSnapshot {
            formed: false,
            active_category: Month::new(12),
        };

        let out = interp.interpret(&labeled_frame(100, GestureLabel::ClosedFist), mode);
        assert_eq!(out.intent, Some(ModeIntent::Form));
    }

    #[test]
    fn test_fist_noop_when_already_formed() {
        let mut interp = GestureInterpreter::default();
        let mode = ModeSnapshot {
            formed: true,
            active_category: None,
        };

        let out = interp.interpret(&labeled_frame(100, GestureLabel::ClosedFist), mode);
        assert_eq!(out.intent, None);
    }

    #[test]
    fn test_palm_scatters_only_when_formed() {
        let mut interp = GestureInterpreter::default();

        let ignored = interp.interpret(&labeled_frame(100, GestureLabel::OpenPalm), scattered());
        assert_eq!(ignored.intent, None);

        let mode = ModeSnapshot {
            formed: true,
            active_category: None,
        };
        let out = interp.interpret(&labeled_frame(200, GestureLabel::OpenPalm), mode);
        assert_eq!(out.intent, Some(ModeIntent::Scatter));
        assert_eq!(out.status, GestureStatus::Palm);
    }

    #[test]
    fn test_pointer_updates_without_transition() {
        let mut interp = GestureInterpreter::default();
        let mut frame = finger_frame(100, 0);
        frame.hands[0].set_point(HandLandmark::IndexTip, LandmarkPoint::new(0.7, 0.3));

        let out = interp.interpret(&frame, scattered());
        assert_eq!(out.intent, None);
        assert_eq!(out.pointer, Some((0.7, 0.3)));
    }
}
