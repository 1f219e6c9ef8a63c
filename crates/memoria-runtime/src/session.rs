//! Scene session - one interactive wall, from start to teardown
//!
//! The session is the explicit context everything writes through: input
//! handlers mutate mode state between frames, the gesture interpreter's
//! intents are applied through the same mutators, and `tick` reads the result
//! to drive every entity transform. Strict per-frame order: progress, then
//! gestures, then camera, then entities, then submission.

use std::time::{Duration, Instant};

use glam::{EulerRot, Quat, Vec2, Vec3};
use memoria_core::{ease, EntityId, FrameTime, MemoriaError, MemoriaResult};
use memoria_gesture::{
    GestureInterpreter, GestureStatus, ModeIntent, ModeSnapshot, TRANSITION_COOLDOWN,
};
use memoria_layout::TextRasterizer;
use memoria_media::{ingest_photos, CameraStream, PhotoCard, PhotoSource};
use memoria_scene::{
    Camera, EntityKind, EntityRegistry, ModeState, ProgressController, RegistryConfig,
    SelectionResolver, Viewport,
};

use crate::input::{InputEvent, PointerTracker};
use crate::recognizer::HandRecognizer;
use crate::render::{
    CameraTransform, EntityTransform, FrameSubmission, ORDER_FIELD, ORDER_SELECTED, ORDER_STRIP,
};

/// Camera resting distance on wide viewports
const DEFAULT_DISTANCE: f32 = 60.0;
/// Wider framing so the full footprint fits narrow screens
const NARROW_DISTANCE: f32 = 85.0;
/// Close-in framing while the film strip is up
const CATEGORY_DISTANCE: f32 = 30.0;

const PARALLAX_DRIFT_X: f32 = 6.0;
const PARALLAX_DRIFT_Y: f32 = 3.0;

/// Selected card offset in front of the camera
const SELECTED_DISTANCE: f32 = 8.0;
const SELECTED_SCALE: f32 = 2.5;

const STRIP_SPACING: f32 = 6.0;
const STRIP_DEPTH: f32 = 20.0;
const STRIP_SCALE: f32 = 1.6;
const STRIP_SCROLL_SPEED: f32 = 0.4;
const STRIP_SCROLL_AMPLITUDE: f32 = 2.0;

const IDLE_FLOAT_SPEED: f32 = 1.2;
const IDLE_FLOAT_AMPLITUDE: f32 = 0.4;
const FORMED_SWAY_SPEED: f32 = 0.8;
const FORMED_SWAY_AMPLITUDE: f32 = 0.12;

/// Park for entities filtered out of the strip
const OFFSCREEN_PARK: Vec3 = Vec3::new(0.0, -150.0, 0.0);

fn default_distance(viewport: Viewport) -> f32 {
    if viewport.is_narrow() {
        NARROW_DISTANCE
    } else {
        DEFAULT_DISTANCE
    }
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub registry: RegistryConfig,
    pub viewport: Viewport,
    /// Debounce window for category transitions
    pub gesture_cooldown: Duration,
    /// Fixed-fraction camera lerp per frame
    pub camera_smoothing: f32,
    /// Fixed-fraction entity lerp per frame
    pub entity_smoothing: f32,
    /// Faster tracking for the zoomed card
    pub selected_smoothing: f32,
    /// Faster tracking while the strip is animating
    pub category_smoothing: f32,
    /// Seed for the narrow-viewport random selection fallback
    pub selection_seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            registry: RegistryConfig::default(),
            viewport: Viewport::new(1280.0, 720.0),
            gesture_cooldown: TRANSITION_COOLDOWN,
            camera_smoothing: 0.05,
            entity_smoothing: 0.05,
            selected_smoothing: 0.15,
            category_smoothing: 0.10,
            selection_seed: 0x5e1ec7,
        }
    }
}

/// Per-session counters
#[derive(Debug, Clone, Default)]
pub struct RuntimeStats {
    pub ticks: u64,
    pub recognizer_frames: u64,
    pub recognizer_skipped: u64,
    pub intents_applied: u64,
    pub taps_resolved: u64,
    pub photos_added: u64,
    pub photos_skipped: u64,
    pub last_tick_duration: Duration,
}

/// One uploaded photo: the fresh entity plus its card texture for the
/// renderer to bind
#[derive(Debug)]
pub struct PhotoUpload {
    pub id: EntityId,
    pub card: PhotoCard,
}

/// One active scene session
pub struct SceneSession {
    registry: EntityRegistry,
    mode: ModeState,
    progress: ProgressController,
    camera: Camera,
    camera_target: Vec3,
    interpreter: GestureInterpreter,
    resolver: SelectionResolver,
    tracker: PointerTracker,
    recognizer: Option<Box<dyn HandRecognizer>>,
    camera_stream: Option<Box<dyn CameraStream>>,
    gesture_active: bool,
    last_video_timestamp: Option<FrameTime>,
    /// Camera resting z, recomputed on resize
    resting_distance: f32,
    /// Drift target in NDC-style coordinates, from pointer or index fingertip
    parallax: Vec2,
    clock: FrameTime,
    status: GestureStatus,
    config: SessionConfig,
    stats: RuntimeStats,
    closed: bool,
}

impl SceneSession {
    pub fn new(config: SessionConfig, rasterizer: &dyn TextRasterizer) -> Self {
        let registry = EntityRegistry::build(&config.registry, rasterizer);
        let mut camera = Camera::new(config.viewport);
        let distance = default_distance(config.viewport);
        camera.position = Vec3::new(0.0, 0.0, distance);

        tracing::info!(entities = registry.len(), "scene session started");

        SceneSession {
            registry,
            mode: ModeState::new(),
            progress: ProgressController::new(),
            camera,
            camera_target: Vec3::new(0.0, 0.0, distance),
            interpreter: GestureInterpreter::new(config.gesture_cooldown),
            resolver: SelectionResolver::new(config.selection_seed),
            tracker: PointerTracker::new(),
            recognizer: None,
            camera_stream: None,
            gesture_active: false,
            last_video_timestamp: None,
            resting_distance: distance,
            parallax: Vec2::ZERO,
            clock: FrameTime::ZERO,
            status: GestureStatus::None,
            config,
            stats: RuntimeStats::default(),
            closed: false,
        }
    }

    /// Install the external recognizer. Requested once; the session checks
    /// readiness before every use.
    pub fn set_recognizer(&mut self, recognizer: Box<dyn HandRecognizer>) {
        self.recognizer = Some(recognizer);
    }

    pub fn set_camera_stream(&mut self, stream: Box<dyn CameraStream>) {
        self.camera_stream = Some(stream);
    }

    /// Ingest user images and add one photo entity per decodable source.
    /// Corrupt files are skipped; cards that already composited keep their
    /// entities regardless of later failures in the batch.
    pub fn upload_photos(&mut self, sources: &[PhotoSource]) -> Vec<PhotoUpload> {
        let report = ingest_photos(sources);
        self.stats.photos_skipped += report.skipped as u64;

        report
            .cards
            .into_iter()
            .map(|card| {
                let id = self.registry.add_photo(card.month);
                self.stats.photos_added += 1;
                PhotoUpload { id, card }
            })
            .collect()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Mutable entity access for harnesses and platform integrations
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn mode(&self) -> &ModeState {
        &self.mode
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    pub fn status(&self) -> GestureStatus {
        self.status
    }

    pub fn gesture_active(&self) -> bool {
        self.gesture_active
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Advance one frame. Events are the handler mutations since the last
    /// tick; they run to completion before the frame computes.
    pub fn tick(&mut self, dt: f32, events: &[InputEvent]) -> MemoriaResult<FrameSubmission> {
        if self.closed {
            return Err(MemoriaError::SessionClosed);
        }
        let started = Instant::now();
        let dt = dt.max(0.0);
        self.clock = self.clock.saturating_add(Duration::from_secs_f32(dt));
        self.stats.ticks += 1;

        for event in events {
            self.handle_event(*event);
        }

        // 1. Progress tracks the formed flag, forced to zero while filtered
        let formed_target = self.mode.formed() && self.mode.active_category().is_none();
        self.progress.set_formed(formed_target);
        self.progress.advance(dt);

        // 2. Gestures, guarded against reprocessing a video frame
        self.poll_gestures();

        // 3. Camera drift
        self.update_camera();

        // 4-6. Entity targets, smoothing, draw order
        let entities = self.update_entities();

        // 7. Submission
        let submission = FrameSubmission {
            camera: CameraTransform {
                position: self.camera.position,
                look_at: self.camera.look_at,
            },
            entities,
            status: self.status,
            progress: self.progress.value(),
        };

        self.stats.last_tick_duration = started.elapsed();
        Ok(submission)
    }

    /// Release external resources and reset interaction state. Further ticks
    /// are rejected; the registry stays readable for diagnostics.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        if let Some(stream) = &mut self.camera_stream {
            stream.release();
        }
        self.gesture_active = false;
        self.last_video_timestamp = None;
        self.mode.reset();
        self.progress.reset();
        self.closed = true;

        tracing::info!(ticks = self.stats.ticks, "scene session torn down");
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { position, at } => {
                self.tracker.pointer_down(position, at);
            }
            InputEvent::PointerMove { position } => {
                self.tracker.pointer_move(position);
                self.parallax = self.camera.viewport().to_ndc(position);
            }
            InputEvent::PointerUp { position, at } => {
                if let Some(tap) = self.tracker.pointer_up(position, at) {
                    if let Some(id) =
                        self.resolver
                            .resolve(tap, &self.camera, &self.registry, &self.mode)
                    {
                        self.mode.select(id);
                        self.stats.taps_resolved += 1;
                        tracing::debug!(%id, "tap selected entity");
                    }
                }
            }
            InputEvent::Resize { width, height } => {
                let viewport = Viewport::new(width, height);
                self.camera.set_viewport(viewport);
                self.resting_distance = default_distance(viewport);
            }
            InputEvent::NavigateNext => self.navigate(1),
            InputEvent::NavigatePrev => self.navigate(-1),
            InputEvent::CloseSelection => {
                if self.mode.active_entity().is_some() {
                    self.mode.clear_selection();
                } else if self.mode.active_category().is_some() {
                    self.mode.clear_category();
                }
            }
            InputEvent::ToggleCamera => self.toggle_camera(),
        }
    }

    /// Step the selection through the navigable pool: the active month's
    /// photos while filtered, otherwise all photos once a selection exists.
    fn navigate(&mut self, step: i32) {
        let pool: Vec<EntityId> = match self.mode.active_category() {
            Some(month) => self.registry.photos_in_month(month),
            None => {
                if self.mode.active_entity().is_none() {
                    return;
                }
                self.registry.photos().map(|e| e.id).collect()
            }
        };
        if pool.is_empty() {
            return;
        }

        let current = self
            .mode
            .active_entity()
            .and_then(|id| pool.iter().position(|&p| p == id));
        let next = match current {
            Some(i) => (i as i32 + step).rem_euclid(pool.len() as i32) as usize,
            None if step >= 0 => 0,
            None => pool.len() - 1,
        };
        self.mode.select(pool[next]);
    }

    fn toggle_camera(&mut self) {
        if self.gesture_active {
            self.disable_camera();
        } else if let Err(err) = self.enable_camera() {
            tracing::warn!(error = %err, "gesture feature unavailable, camera stays off");
        }
    }

    /// Turn the gesture feature on. Fails when the recognizer is missing or
    /// not ready, or when the camera stream cannot be acquired; the scene
    /// keeps running either way.
    pub fn enable_camera(&mut self) -> MemoriaResult<()> {
        if !self.recognizer.as_ref().is_some_and(|r| r.is_ready()) {
            return Err(MemoriaError::RecognizerUnavailable);
        }
        let stream = self
            .camera_stream
            .as_mut()
            .ok_or_else(|| MemoriaError::CameraUnavailable("no stream installed".to_string()))?;
        stream.acquire()?;
        self.gesture_active = true;
        tracing::info!("camera on");
        Ok(())
    }

    /// Turn the gesture feature off: release the stream and return the
    /// interaction state to defaults.
    pub fn disable_camera(&mut self) {
        if let Some(stream) = &mut self.camera_stream {
            stream.release();
        }
        self.gesture_active = false;
        self.last_video_timestamp = None;
        self.status = GestureStatus::None;
        self.mode.reset();
        tracing::info!("camera off");
    }

    fn poll_gestures(&mut self) {
        if !self.gesture_active {
            return;
        }
        let Some(recognizer) = self.recognizer.as_mut() else {
            return;
        };
        if !recognizer.is_ready() {
            return;
        }
        let Some(frame) = recognizer.detect(self.clock) else {
            return;
        };

        // Never process the same video frame twice
        if self
            .last_video_timestamp
            .is_some_and(|t| frame.timestamp <= t)
        {
            self.stats.recognizer_skipped += 1;
            return;
        }
        self.last_video_timestamp = Some(frame.timestamp);
        self.stats.recognizer_frames += 1;

        let snapshot = ModeSnapshot {
            formed: self.mode.formed(),
            active_category: self.mode.active_category(),
        };
        let outcome = self.interpreter.interpret(&frame, snapshot);

        self.status = outcome.status;
        if let Some((x, y)) = outcome.pointer {
            // Normalized image space (y down) into drift coordinates
            self.parallax = Vec2::new(x * 2.0 - 1.0, 1.0 - y * 2.0);
        }
        if let Some(intent) = outcome.intent {
            self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: ModeIntent) {
        self.stats.intents_applied += 1;
        tracing::debug!(?intent, "applying gesture intent");
        match intent {
            ModeIntent::Form => self.mode.form(),
            ModeIntent::Scatter => self.mode.scatter(),
            ModeIntent::SelectMonth(month) => self.mode.enter_category(month),
        }
    }

    fn update_camera(&mut self) {
        self.camera_target = if self.mode.active_category().is_some() {
            Vec3::new(0.0, 0.0, CATEGORY_DISTANCE)
        } else {
            Vec3::new(
                self.parallax.x * PARALLAX_DRIFT_X,
                self.parallax.y * PARALLAX_DRIFT_Y,
                self.resting_distance,
            )
        };
        // Fixed-fraction smoothing: the camera approaches, never snaps
        self.camera.position = self
            .camera
            .position
            .lerp(self.camera_target, self.config.camera_smoothing);
    }

    fn update_entities(&mut self) -> Vec<EntityTransform> {
        let category = self.mode.active_category();
        let strip: Vec<EntityId> = category
            .map(|m| self.registry.photos_in_month(m))
            .unwrap_or_default();
        let scroll = (self.clock.as_secs_f32() * STRIP_SCROLL_SPEED).sin() * STRIP_SCROLL_AMPLITUDE;
        let selected = self.mode.active_entity();
        let cam_pos = self.camera.position;
        let cam_forward = self.camera.forward();
        let t = self.clock.as_secs_f32();
        let eased_particles = self.progress.eased_particles();
        let eased_ornaments = self.progress.eased_ornaments();

        let base_smoothing = self.config.entity_smoothing;
        let selected_smoothing = self.config.selected_smoothing;
        let category_smoothing = self.config.category_smoothing;

        let mut out = Vec::with_capacity(self.registry.len());
        for entity in self.registry.iter_mut() {
            let (target_pos, target_rot, target_scale, visible, draw_order, smoothing) =
                if selected == Some(entity.id) {
                    // Zoomed: fixed offset in front of the camera, facing it
                    (
                        cam_pos + cam_forward * SELECTED_DISTANCE,
                        Vec3::ZERO,
                        SELECTED_SCALE,
                        true,
                        ORDER_SELECTED,
                        selected_smoothing,
                    )
                } else if category.is_some() {
                    if let Some(slot) = strip.iter().position(|&id| id == entity.id) {
                        let centered = slot as f32 - (strip.len() as f32 - 1.0) / 2.0;
                        let sway =
                            ((t * FORMED_SWAY_SPEED) + entity.phase_seed).sin() * 0.05;
                        (
                            Vec3::new(centered * STRIP_SPACING + scroll, 0.0, STRIP_DEPTH),
                            Vec3::new(0.0, sway, 0.0),
                            STRIP_SCALE,
                            true,
                            ORDER_STRIP,
                            category_smoothing,
                        )
                    } else {
                        (
                            OFFSCREEN_PARK,
                            entity.current_rotation,
                            1.0,
                            false,
                            ORDER_FIELD,
                            category_smoothing,
                        )
                    }
                } else {
                    let eased = match entity.kind {
                        EntityKind::Particle => eased_particles,
                        _ => eased_ornaments,
                    };
                    let float = ((t * IDLE_FLOAT_SPEED) + entity.phase_seed).sin()
                        * IDLE_FLOAT_AMPLITUDE;
                    let pos = entity.blend_position(eased) + Vec3::new(0.0, float, 0.0);

                    let scattered_rot =
                        Vec3::new(entity.spin_seed, entity.spin_seed * 0.7, 0.0);
                    let sway = ((t * FORMED_SWAY_SPEED) + entity.phase_seed).sin()
                        * FORMED_SWAY_AMPLITUDE;
                    let rot = scattered_rot.lerp(Vec3::new(0.0, sway, 0.0), eased);

                    (pos, rot, 1.0, true, ORDER_FIELD, base_smoothing)
                };

            // Fixed-fraction smoothing toward the target
            entity.current_position = entity.current_position.lerp(target_pos, smoothing);
            entity.current_rotation = entity.current_rotation.lerp(target_rot, smoothing);
            entity.current_scale = ease::lerp(entity.current_scale, target_scale, smoothing);
            entity.visible = visible;

            out.push(EntityTransform {
                id: entity.id,
                position: entity.current_position,
                rotation: Quat::from_euler(
                    EulerRot::XYZ,
                    entity.current_rotation.x,
                    entity.current_rotation.y,
                    entity.current_rotation.z,
                ),
                scale: entity.current_scale,
                visible,
                draw_order,
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;
    use memoria_core::Month;
    use memoria_gesture::{
        GestureLabel, Hand, HandLandmark, LandmarkPoint, RankedGesture, RecognizerFrame,
    };
    use memoria_layout::DotMatrixRasterizer;
    use memoria_media::RecordingCameraStream;

    const DT: f32 = 1.0 / 60.0;

    type Feed = Rc<RefCell<VecDeque<RecognizerFrame>>>;

    /// Recognizer reading from a queue the test keeps a handle to
    struct ScriptedRecognizer {
        feed: Feed,
    }

    impl HandRecognizer for ScriptedRecognizer {
        fn is_ready(&self) -> bool {
            true
        }

        fn detect(&mut self, _at: FrameTime) -> Option<RecognizerFrame> {
            self.feed.borrow_mut().pop_front()
        }
    }

    /// Camera stream double the test can keep inspecting after installation
    #[derive(Clone, Default)]
    struct SharedStream(Rc<RefCell<RecordingCameraStream>>);

    impl CameraStream for SharedStream {
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

    fn fist_frame(at_ms: u64) -> RecognizerFrame {
        RecognizerFrame {
            timestamp: FrameTime::from_millis(at_ms),
            hands: vec![hand_with_fingers(0)],
            gestures: vec![RankedGesture::new(GestureLabel::ClosedFist, 0.95)],
        }
    }

    fn twelve_frame(at_ms: u64) -> RecognizerFrame {
        RecognizerFrame {
            timestamp: FrameTime::from_millis(at_ms),
            hands: vec![hand_with_fingers(1), hand_with_fingers(2)],
            gestures: Vec::new(),
        }
    }

    fn test_config() -> SessionConfig {
        SessionConfig {
            registry: RegistryConfig {
                photo_count: 12,
                ornament_count: 6,
                particle_count: 60,
                ..RegistryConfig::default()
            },
            ..SessionConfig::default()
        }
    }

    fn session() -> SceneSession {
        SceneSession::new(test_config(), &DotMatrixRasterizer::new(8))
    }

    /// Session with a scripted recognizer and live camera. Frames pushed to
    /// the returned feed arrive on subsequent ticks.
    fn gesture_session() -> (SceneSession, Feed, SharedStream) {
        let mut s = session();
        let feed = Feed::default();
        let stream = SharedStream::default();
        s.set_recognizer(Box::new(ScriptedRecognizer { feed: feed.clone() }));
        s.set_camera_stream(Box::new(stream.clone()));
        s.tick(DT, &[InputEvent::ToggleCamera]).unwrap();
        (s, feed, stream)
    }

    fn push(feed: &Feed, frame: RecognizerFrame) {
        feed.borrow_mut().push_back(frame);
    }

    /// Park every entity far from the pick rays, put one photo at the origin
    fn stage_photo(s: &mut SceneSession, id: EntityId) {
        for e in s.registry_mut().iter_mut() {
            e.current_position = Vec3::new(0.0, -500.0, 0.0);
        }
        s.registry_mut().get_mut(id).unwrap().current_position = Vec3::ZERO;
    }

    fn tap_center() -> [InputEvent; 2] {
        let center = Vec2::new(640.0, 360.0);
        [
            InputEvent::PointerDown {
                position: center,
                at: FrameTime::from_millis(0),
            },
            InputEvent::PointerUp {
                position: center,
                at: FrameTime::from_millis(100),
            },
        ]
    }

    #[test]
    fn test_tick_submits_all_entities() {
        let mut s = session();
        let frame = s.tick(DT, &[]).unwrap();

        assert_eq!(frame.entities.len(), s.registry().len());
        assert_eq!(frame.status, GestureStatus::None);
        assert!(frame.progress < 0.05);
    }

    #[test]
    fn test_closed_session_rejects_tick() {
        let mut s = session();
        s.teardown();

        assert!(matches!(
            s.tick(DT, &[]),
            Err(MemoriaError::SessionClosed)
        ));
    }

    #[test]
    fn test_teardown_releases_stream() {
        let (mut s, _feed, stream) = gesture_session();
        assert!(stream.0.borrow().is_live());

        s.teardown();

        assert!(!stream.0.borrow().is_live());
        assert_eq!(stream.0.borrow().releases, 1);
        assert!(!s.gesture_active());
    }

    #[test]
    fn test_fist_forms_end_to_end() {
        let (mut s, feed, _stream) = gesture_session();
        assert!(!s.mode().formed());

        push(&feed, fist_frame(100));
        for _ in 0..300 {
            s.tick(DT, &[]).unwrap();
        }

        assert!(s.mode().formed());
        assert!(s.mode().active_category().is_none());
        assert!(s.progress() > 0.95);
    }

    #[test]
    fn test_two_hand_twelve_enters_film_mode() {
        let (mut s, feed, _stream) = gesture_session();

        push(&feed, twelve_frame(3000));
        s.tick(DT, &[]).unwrap();

        assert_eq!(s.mode().active_category(), Month::new(12));
        assert!(!s.mode().formed());
        assert_eq!(s.stats().intents_applied, 1);
    }

    #[test]
    fn test_same_video_frame_processed_once() {
        let (mut s, feed, _stream) = gesture_session();

        push(&feed, fist_frame(100));
        push(&feed, fist_frame(100));
        s.tick(DT, &[]).unwrap();
        s.tick(DT, &[]).unwrap();

        assert_eq!(s.stats().recognizer_frames, 1);
        assert_eq!(s.stats().recognizer_skipped, 1);
    }

    #[test]
    fn test_gesture_feature_off_without_recognizer() {
        let mut s = session();
        s.set_camera_stream(Box::new(SharedStream::default()));

        s.tick(DT, &[InputEvent::ToggleCamera]).unwrap();

        assert!(!s.gesture_active());
    }

    #[test]
    fn test_camera_denied_stays_off() {
        let mut s = session();
        s.set_recognizer(Box::new(ScriptedRecognizer {
            feed: Feed::default(),
        }));
        s.set_camera_stream(Box::new(SharedStream(Rc::new(RefCell::new(
            RecordingCameraStream::denied(),
        )))));

        s.tick(DT, &[InputEvent::ToggleCamera]).unwrap();

        assert!(!s.gesture_active());
    }

    #[test]
    fn test_camera_toggle_off_resets_mode() {
        let (mut s, feed, stream) = gesture_session();
        push(&feed, twelve_frame(3000));
        s.tick(DT, &[]).unwrap();
        assert!(s.mode().active_category().is_some());

        s.tick(DT, &[InputEvent::ToggleCamera]).unwrap();

        assert!(!s.gesture_active());
        assert!(!stream.0.borrow().is_live());
        assert_eq!(*s.mode(), ModeState::default());
    }

    #[test]
    fn test_tap_selects_and_reselect_is_idempotent() {
        let mut s = session();
        let id = EntityId::new(3);
        stage_photo(&mut s, id);

        s.tick(DT, &tap_center()).unwrap();
        assert_eq!(s.mode().active_entity(), Some(id));

        s.tick(DT, &tap_center()).unwrap();
        assert_eq!(s.mode().active_entity(), Some(id));
    }

    #[test]
    fn test_selected_entity_draw_order_and_scale() {
        let mut s = session();
        let id = EntityId::new(3);
        stage_photo(&mut s, id);

        s.tick(DT, &tap_center()).unwrap();
        let frame = s.tick(DT, &[]).unwrap();

        let selected = frame.entities[id.index()];
        assert_eq!(selected.draw_order, ORDER_SELECTED);
        assert!(selected.scale > 1.0, "zoomed card grows");
        assert!(frame
            .entities
            .iter()
            .filter(|t| t.id != id)
            .all(|t| t.draw_order == ORDER_FIELD));
    }

    #[test]
    fn test_selected_entity_moves_toward_camera() {
        let mut s = session();
        let id = EntityId::new(3);
        stage_photo(&mut s, id);

        s.tick(DT, &tap_center()).unwrap();
        let z_before = s.registry().get(id).unwrap().current_position.z;
        for _ in 0..120 {
            s.tick(DT, &[]).unwrap();
        }
        let pos = s.registry().get(id).unwrap().current_position;

        assert!(pos.z > z_before, "card approaches the camera");
        let target = s.camera().position + s.camera().forward() * SELECTED_DISTANCE;
        assert!((pos - target).length() < 1.0);
    }

    #[test]
    fn test_film_mode_strip_and_visibility() {
        let (mut s, feed, _stream) = gesture_session();
        push(&feed, twelve_frame(3000));
        s.tick(DT, &[]).unwrap();
        let frame = s.tick(DT, &[]).unwrap();

        let month = Month::new(12).unwrap();
        for t in &frame.entities {
            let matches = s.registry().get(t.id).unwrap().kind.month() == Some(month);
            if matches {
                assert!(t.visible);
                assert_eq!(t.draw_order, ORDER_STRIP);
            } else {
                assert!(!t.visible);
                assert_eq!(t.draw_order, ORDER_FIELD);
            }
        }
    }

    #[test]
    fn test_film_mode_camera_framing() {
        let (mut s, feed, _stream) = gesture_session();
        push(&feed, twelve_frame(3000));
        for _ in 0..400 {
            s.tick(DT, &[]).unwrap();
        }

        assert!((s.camera().position.z - CATEGORY_DISTANCE).abs() < 1.0);
    }

    #[test]
    fn test_camera_never_snaps() {
        let mut s = session();
        s.tick(DT, &[InputEvent::Resize {
            width: 390.0,
            height: 844.0,
        }])
        .unwrap();

        // One frame later the camera has moved a fraction, not jumped
        let z = s.camera().position.z;
        assert!(z > DEFAULT_DISTANCE - 2.0 && z < NARROW_DISTANCE - 10.0);

        for _ in 0..400 {
            s.tick(DT, &[]).unwrap();
        }
        assert!((s.camera().position.z - NARROW_DISTANCE).abs() < 1.0);
    }

    #[test]
    fn test_navigation_requires_selection_or_filter() {
        let mut s = session();
        s.tick(DT, &[InputEvent::NavigateNext]).unwrap();
        assert!(s.mode().active_entity().is_none());
    }

    #[test]
    fn test_navigation_cycles_within_month() {
        let (mut s, feed, _stream) = gesture_session();
        push(&feed, twelve_frame(3000));
        s.tick(DT, &[]).unwrap();

        let pool = s.registry().photos_in_month(Month::new(12).unwrap());
        assert_eq!(pool.len(), 1, "12 photos round-robin over 12 months");

        s.tick(DT, &[InputEvent::NavigateNext]).unwrap();
        assert_eq!(s.mode().active_entity(), Some(pool[0]));

        // Close the zoom first, then the strip
        s.tick(DT, &[InputEvent::CloseSelection]).unwrap();
        assert!(s.mode().active_entity().is_none());
        assert!(s.mode().active_category().is_some());

        s.tick(DT, &[InputEvent::CloseSelection]).unwrap();
        assert!(s.mode().active_category().is_none());
    }

    #[test]
    fn test_navigation_wraps_over_all_photos() {
        let mut s = session();
        let id = EntityId::new(11);
        stage_photo(&mut s, id);

        s.tick(DT, &tap_center()).unwrap();
        assert_eq!(s.mode().active_entity(), Some(id));

        // Last photo wraps to the first
        s.tick(DT, &[InputEvent::NavigateNext]).unwrap();
        assert_eq!(s.mode().active_entity(), Some(EntityId::new(0)));

        s.tick(DT, &[InputEvent::NavigatePrev]).unwrap();
        assert_eq!(s.mode().active_entity(), Some(id));
    }

    #[test]
    fn test_category_gesture_ignored_while_formed() {
        let (mut s, feed, _stream) = gesture_session();

        // Form first
        push(&feed, fist_frame(100));
        for _ in 0..200 {
            s.tick(DT, &[]).unwrap();
        }
        assert!(s.progress() > 0.9);
        assert!(s.mode().formed());

        // A finger count while formed never opens the strip
        push(&feed, twelve_frame(5000));
        s.tick(DT, &[]).unwrap();
        assert!(s.mode().active_category().is_none());
        assert!(s.mode().formed());
    }

    #[test]
    fn test_dt_zero_is_harmless() {
        let mut s = session();
        let frame = s.tick(0.0, &[]).unwrap();
        assert_eq!(frame.entities.len(), s.registry().len());
    }
}
