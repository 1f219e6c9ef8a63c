//! Synthetic hand landmark fixtures
//!
//! Hands are built from the same tip-vs-lower-joint geometry the finger
//! counter reads, so a fixture asking for `n` fingers always counts as `n`.

use memoria_core::FrameTime;
use memoria_gesture::{
    GestureLabel, Hand, HandLandmark, LandmarkPoint, RankedGesture, RecognizerFrame,
};

const DIGIT_JOINTS: [(HandLandmark, HandLandmark); 5] = [
    (HandLandmark::ThumbTip, HandLandmark::ThumbIp),
    (HandLandmark::IndexTip, HandLandmark::IndexPip),
    (HandLandmark::MiddleTip, HandLandmark::MiddlePip),
    (HandLandmark::RingTip, HandLandmark::RingPip),
    (HandLandmark::PinkyTip, HandLandmark::PinkyPip),
];

/// A hand with exactly `n` digits extended, thumb first
pub fn hand_with_fingers(n: u8) -> Hand {
    let mut hand = Hand::new();
    for (i, (tip, lower)) in DIGIT_JOINTS.iter().enumerate() {
        let x = 0.3 + i as f32 * 0.05;
        let tip_y = if (i as u8) < n { 0.2 } else { 0.6 };
        hand.set_point(*tip, LandmarkPoint::new(x, tip_y));
        hand.set_point(*lower, LandmarkPoint::new(x, 0.5));
    }
    hand
}

/// One-hand frame showing `fingers` digits, no classification label
pub fn fingers_frame(at: FrameTime, fingers: u8) -> RecognizerFrame {
    RecognizerFrame {
        timestamp: at,
        hands: vec![hand_with_fingers(fingers)],
        gestures: Vec::new(),
    }
}

/// Two-hand frame, e.g. `(1, 2)` for the count-12 combination
pub fn two_hand_frame(at: FrameTime, left: u8, right: u8) -> RecognizerFrame {
    RecognizerFrame {
        timestamp: at,
        hands: vec![hand_with_fingers(left), hand_with_fingers(right)],
        gestures: Vec::new(),
    }
}

/// Closed-fist frame with a confident classification
pub fn fist_frame(at: FrameTime) -> RecognizerFrame {
    RecognizerFrame {
        timestamp: at,
        hands: vec![hand_with_fingers(0)],
        gestures: vec![RankedGesture::new(GestureLabel::ClosedFist, 0.95)],
    }
}

/// Open-palm frame with a confident classification
pub fn palm_frame(at: FrameTime) -> RecognizerFrame {
    RecognizerFrame {
        timestamp: at,
        hands: vec![hand_with_fingers(5)],
        gestures: vec![RankedGesture::new(GestureLabel::OpenPalm, 0.95)],
    }
}
