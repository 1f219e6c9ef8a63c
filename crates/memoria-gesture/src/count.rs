//! Finger counting from landmark geometry
//!
//! A digit reads as extended when its fingertip sits above its lower joint in
//! image space (smaller y, since y grows downward). Two hands unlock the full
//! 1-12 range through the 1+1 and 1+2 special combinations.

use crate::hand::{Hand, HandLandmark};

/// (fingertip, lower joint) pair per digit
const DIGIT_JOINTS: [(HandLandmark, HandLandmark); 5] = [
    (HandLandmark::ThumbTip, HandLandmark::ThumbIp),
    (HandLandmark::IndexTip, HandLandmark::IndexPip),
    (HandLandmark::MiddleTip, HandLandmark::MiddlePip),
    (HandLandmark::RingTip, HandLandmark::RingPip),
    (HandLandmark::PinkyTip, HandLandmark::PinkyPip),
];

/// Count extended digits on one hand (0-5)
pub fn extended_fingers(hand: &Hand) -> u8 {
    DIGIT_JOINTS
        .iter()
        .filter(|(tip, lower)| {
            match (hand.point(*tip), hand.point(*lower)) {
                (Some(t), Some(l)) => t.y < l.y,
                _ => false,
            }
        })
        .count() as u8
}

/// Count across all detected hands.
///
/// One hand yields 0-10 naively; the two-hand combinations (1,1) -> 11 and
/// {1,2} -> 12 extend the reachable range to the full twelve months. Extra
/// hands beyond the second are ignored.
pub fn count_fingers(hands: &[Hand]) -> u8 {
    match hands {
        [] => 0,
        [only] => extended_fingers(only),
        [first, second, ..] => {
            let a = extended_fingers(first);
            let b = extended_fingers(second);
            match (a, b) {
                (1, 1) => 11,
                (1, 2) | (2, 1) => 12,
                _ => a + b,
            }
        }
    }
}
