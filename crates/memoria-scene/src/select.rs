//! Selection resolution - taps into entity ids
//!
//! Direct ray hits come first. On narrow viewports, where precise tapping is
//! hard, a near-miss falls back to screen-space proximity ("magnetism") and
//! finally to a uniformly random photo so the first tap always lands on
//! something.

use glam::Vec2;
use memoria_core::EntityId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::camera::Camera;
use crate::entity::EntityRegistry;
use crate::mode::ModeState;

/// Screen-space magnetism threshold in NDC units
pub const MAGNETISM_THRESHOLD: f32 = 0.15;

/// Resolves pointer/tap coordinates to photo selections
#[derive(Debug)]
pub struct SelectionResolver {
    rng: StdRng,
}

impl SelectionResolver {
    pub fn new(seed: u64) -> Self {
        SelectionResolver {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Resolve one tap. Returns the id to select, or None to leave the
    /// current selection untouched.
    ///
    /// While a category filter is active, tap selection is suppressed
    /// entirely: the film strip is navigated with its own controls.
    pub fn resolve(
        &mut self,
        tap_px: Vec2,
        camera: &Camera,
        registry: &EntityRegistry,
        mode: &ModeState,
    ) -> Option<EntityId> {
        if mode.active_category().is_some() {
            return None;
        }

        let viewport = camera.viewport();
        let ndc = viewport.to_ndc(tap_px);
        let ray = camera.pick_ray(ndc);

        // Nearest ray hit across every entity kind; only a Photo hit selects.
        // An ornament or particle sitting in front of a photo occludes it.
        let mut nearest: Option<(f32, EntityId, bool)> = None;
        for entity in registry.iter().filter(|e| e.visible) {
            let radius = entity.kind.bounding_radius();
            if let Some(t) = ray.intersect_sphere(entity.current_position, radius) {
                if nearest.map_or(true, |(best, _, _)| t < best) {
                    nearest = Some((t, entity.id, entity.kind.is_photo()));
                }
            }
        }
        if let Some((_, id, is_photo)) = nearest {
            if is_photo {
                return Some(id);
            }
        }

        if !viewport.is_narrow() {
            return None;
        }

        // Magnetism: closest photo by projected screen distance
        let mut closest: Option<(f32, EntityId)> = None;
        for entity in registry.photos().filter(|e| e.visible) {
            let Some(projected) = camera.project(entity.current_position) else {
                continue;
            };
            let d = projected.distance(ndc);
            if d <= MAGNETISM_THRESHOLD && closest.map_or(true, |(best, _)| d < best) {
                closest = Some((d, entity.id));
            }
        }
        if let Some((_, id)) = closest {
            return Some(id);
        }

        // Nothing near the tap and nothing selected: pick a random photo so
        // small screens always get a response.
        if mode.active_entity().is_none() {
            let ids: Vec<EntityId> = registry.photos().map(|e| e.id).collect();
            return ids.choose(&mut self.rng).copied();
        }

        None
    }
}
