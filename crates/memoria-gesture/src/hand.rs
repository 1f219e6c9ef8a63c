//! Hand landmark model - the recognizer boundary, strongly typed
//!
//! The recognizer emits a fixed-size ordered set of landmark coordinates per
//! detected hand in normalized image space (y grows downward), plus zero or
//! more gesture classifications ranked by confidence. Only the top-ranked
//! label is ever consumed.

use memoria_core::FrameTime;

/// Landmark identifier for one hand (21-point model)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,

    // Thumb
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,

    // Index finger
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,

    // Middle finger
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,

    // Ring finger
    RingMcp,
    RingPip,
    RingDip,
    RingTip,

    // Pinky
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    /// All landmarks in recognizer order
    pub fn all() -> &'static [HandLandmark] {
        &[
            HandLandmark::Wrist,
            HandLandmark::ThumbCmc,
            HandLandmark::ThumbMcp,
            HandLandmark::ThumbIp,
            HandLandmark::ThumbTip,
            HandLandmark::IndexMcp,
            HandLandmark::IndexPip,
            HandLandmark::IndexDip,
            HandLandmark::IndexTip,
            HandLandmark::MiddleMcp,
            HandLandmark::MiddlePip,
            HandLandmark::MiddleDip,
            HandLandmark::MiddleTip,
            HandLandmark::RingMcp,
            HandLandmark::RingPip,
            HandLandmark::RingDip,
            HandLandmark::RingTip,
            HandLandmark::PinkyMcp,
            HandLandmark::PinkyPip,
            HandLandmark::PinkyDip,
            HandLandmark::PinkyTip,
        ]
    }

    /// Number of landmarks per hand
    pub fn count() -> usize {
        21
    }
}

/// Landmark coordinate in normalized image space (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One detected hand
#[derive(Debug, Clone)]
pub struct Hand {
    /// Landmark points indexed by the HandLandmark enum
    pub points: Vec<LandmarkPoint>,
}

impl Hand {
    /// Hand with every landmark at the origin
    pub fn new() -> Self {
        Hand {
            points: vec![LandmarkPoint::default(); HandLandmark::count()],
        }
    }

    /// Get a landmark point by identifier
    pub fn point(&self, landmark: HandLandmark) -> Option<&LandmarkPoint> {
        self.points.get(landmark as usize)
    }

    /// Set a landmark point
    pub fn set_point(&mut self, landmark: HandLandmark, point: LandmarkPoint) {
        let idx = landmark as usize;
        if idx < self.points.len() {
            self.points[idx] = point;
        }
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

/// Gesture classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureLabel {
    ClosedFist,
    OpenPalm,
    Pointing,
    ThumbsUp,
    Unknown,
}

/// One ranked classification from the recognizer
#[derive(Debug, Clone, Copy)]
pub struct RankedGesture {
    pub label: GestureLabel,
    pub confidence: f32,
}

impl RankedGesture {
    pub fn new(label: GestureLabel, confidence: f32) -> Self {
        Self { label, confidence }
    }
}

/// One recognizer result for one video frame
#[derive(Debug, Clone)]
pub struct RecognizerFrame {
    /// Strictly increasing video frame timestamp
    pub timestamp: FrameTime,

    /// Zero or more detected hands
    pub hands: Vec<Hand>,

    /// Gesture classifications, ranked by confidence
    pub gestures: Vec<RankedGesture>,
}

impl RecognizerFrame {
    /// Frame with no detections
    pub fn empty(timestamp: FrameTime) -> Self {
        RecognizerFrame {
            timestamp,
            hands: Vec::new(),
            gestures: Vec::new(),
        }
    }

    /// The highest-confidence classification, if any
    pub fn top_gesture(&self) -> Option<GestureLabel> {
        self.gestures
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .map(|g| g.label)
    }

    /// First hand's index fingertip - drives the parallax pointer
    pub fn index_tip(&self) -> Option<LandmarkPoint> {
        self.hands
            .first()
            .and_then(|h| h.point(HandLandmark::IndexTip))
            .copied()
    }
}
