//! Scripted session simulator
//!
//! Wraps a real [`SceneSession`] with a frame feed the test controls: queue
//! recognizer frames and input events, step fixed-dt ticks, inspect the
//! submissions. The camera stream is the recording stub so lifecycle
//! violations show up as counts.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use memoria_core::{FrameTime, MemoriaResult};
use memoria_gesture::RecognizerFrame;
use memoria_layout::DotMatrixRasterizer;
use memoria_media::{CameraStream, RecordingCameraStream};
use memoria_runtime::{FrameSubmission, HandRecognizer, InputEvent, SceneSession, SessionConfig};
use memoria_scene::RegistryConfig;

/// Recognizer fed from a shared queue the simulator keeps writing
struct FeedRecognizer {
    feed: Rc<RefCell<VecDeque<RecognizerFrame>>>,
}

impl HandRecognizer for FeedRecognizer {
    fn is_ready(&self) -> bool {
        true
    }

    fn detect(&mut self, _at: FrameTime) -> Option<RecognizerFrame> {
        self.feed.borrow_mut().pop_front()
    }
}

/// Camera stream stub shared between the session and the test
#[derive(Clone, Default)]
struct SharedCameraStream(Rc<RefCell<RecordingCameraStream>>);

impl CameraStream for SharedCameraStream {
    fn acquire(&mut self) -> MemoriaResult<()> {
        self.0.borrow_mut().acquire()
    }

    fn release(&mut self) {
        self.0.borrow_mut().release()
    }

    fn is_live(&self) -> bool {
        self.0.borrow().is_live()
    }
}

/// Scenario parameters with small-scene defaults
pub struct ScenarioBuilder {
    config: SessionConfig,
    dt: f32,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        ScenarioBuilder {
            config: SessionConfig {
                registry: RegistryConfig {
                    photo_count: 24,
                    ornament_count: 9,
                    particle_count: 120,
                    ..RegistryConfig::default()
                },
                ..SessionConfig::default()
            },
            dt: 1.0 / 60.0,
        }
    }
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    pub fn build(self) -> SessionSimulator {
        SessionSimulator::new(self.config, self.dt)
    }
}

/// A scene session under scripted control
pub struct SessionSimulator {
    session: SceneSession,
    feed: Rc<RefCell<VecDeque<RecognizerFrame>>>,
    stream: SharedCameraStream,
    dt: f32,
    pending: Vec<InputEvent>,
    last: Option<FrameSubmission>,
}

impl SessionSimulator {
    pub fn new(config: SessionConfig, dt: f32) -> Self {
        let mut session = SceneSession::new(config, &DotMatrixRasterizer::new(8));

        let feed: Rc<RefCell<VecDeque<RecognizerFrame>>> = Rc::default();
        let stream = SharedCameraStream::default();
        session.set_recognizer(Box::new(FeedRecognizer { feed: feed.clone() }));
        session.set_camera_stream(Box::new(stream.clone()));

        SessionSimulator {
            session,
            feed,
            stream,
            dt,
            pending: vec![InputEvent::ToggleCamera],
            last: None,
        }
    }

    /// Deliver a recognizer result on the next step
    pub fn queue_frame(&mut self, frame: RecognizerFrame) {
        self.feed.borrow_mut().push_back(frame);
    }

    /// Deliver an input event on the next step
    pub fn queue_event(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Advance one fixed-dt frame
    pub fn step(&mut self) -> &FrameSubmission {
        let events = std::mem::take(&mut self.pending);
        let frame = self
            .session
            .tick(self.dt, &events)
            .expect("simulated session is open");
        self.last = Some(frame);
        self.last.as_ref().unwrap()
    }

    /// Advance many frames with no new input
    pub fn run(&mut self, frames: usize) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Session clock time after `frames` more steps, for stamping fixtures
    pub fn time_after(&self, frames: u64) -> FrameTime {
        let ticks = self.session.stats().ticks + frames;
        FrameTime::from_secs_f64(ticks as f64 * self.dt as f64)
    }

    pub fn session(&self) -> &SceneSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SceneSession {
        &mut self.session
    }

    pub fn last_frame(&self) -> Option<&FrameSubmission> {
        self.last.as_ref()
    }

    pub fn camera_live(&self) -> bool {
        self.stream.0.borrow().is_live()
    }

    pub fn camera_releases(&self) -> usize {
        self.stream.0.borrow().releases
    }

    pub fn teardown(&mut self) {
        self.session.teardown();
    }
}
