//! Entities and the registry that owns them
//!
//! Chaos and formed positions are assigned once at construction and never
//! regenerated while the scene instance lives. The formed position of entity
//! `i` derives from a shared text point cloud at `i % cloud.len()`, so the
//! layout is reproducible for a given id and cloud.

use std::f32::consts::TAU;

use glam::Vec3;
use memoria_core::{EntityId, Month};
use memoria_layout::{LayoutConfig, ScatterSampler, TextLayout, TextRasterizer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Procedural ornament sub-kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrnamentShape {
    Star,
    Gift,
    Snowflake,
}

impl OrnamentShape {
    /// Every third of the ornament range gets one of the three shapes
    #[inline]
    pub fn from_index(index: usize) -> Self {
        match index % 3 {
            0 => OrnamentShape::Star,
            1 => OrnamentShape::Gift,
            _ => OrnamentShape::Snowflake,
        }
    }
}

/// Entity kind with kind-specific fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Photo { month: Month },
    Ornament { shape: OrnamentShape },
    Particle,
}

impl EntityKind {
    #[inline]
    pub fn is_photo(&self) -> bool {
        matches!(self, EntityKind::Photo { .. })
    }

    /// Month tag for film-mode filtering
    #[inline]
    pub fn month(&self) -> Option<Month> {
        match self {
            EntityKind::Photo { month } => Some(*month),
            _ => None,
        }
    }

    /// Radius of the picking sphere around the entity center
    pub fn bounding_radius(&self) -> f32 {
        match self {
            EntityKind::Photo { .. } => 2.4,
            EntityKind::Ornament { .. } => 1.6,
            EntityKind::Particle => 0.4,
        }
    }
}

/// One animated entity
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,

    /// Randomized resting point when scattered - fixed at creation
    pub chaos_position: Vec3,
    /// Designated point within the text silhouette - fixed at creation
    pub formed_position: Vec3,

    /// Interpolated position, recomputed every frame
    pub current_position: Vec3,
    /// Per-axis euler rotation, smoothed every frame
    pub current_rotation: Vec3,
    /// Uniform scale, smoothed every frame
    pub current_scale: f32,
    pub visible: bool,

    /// Fixed phase for the idle float so motion is not uniform
    pub phase_seed: f32,
    /// Fixed rotation seed for the scattered state
    pub spin_seed: f32,
}

impl Entity {
    /// Chaos/formed blend at an eased progress value
    #[inline]
    pub fn blend_position(&self, eased: f32) -> Vec3 {
        self.chaos_position.lerp(self.formed_position, eased)
    }
}

/// Scene population parameters
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub photo_count: usize,
    pub ornament_count: usize,
    pub particle_count: usize,
    /// Target text for the formed arrangement
    pub text: String,
    pub layout: LayoutConfig,
    /// Seed for chaos positions, offsets, and per-entity animation seeds
    pub seed: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            photo_count: 36,
            ornament_count: 60,
            particle_count: 4000,
            text: "2025".to_string(),
            layout: LayoutConfig::default(),
            seed: 0x2025,
        }
    }
}

impl RegistryConfig {
    pub fn total(&self) -> usize {
        self.photo_count + self.ornament_count + self.particle_count
    }
}

/// Owner of the entity set
#[derive(Debug)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    /// Shared text point cloud, kept so late additions stay on the silhouette
    cloud: Vec<Vec3>,
    /// Continues the construction seed for late additions
    rng: StdRng,
}

impl EntityRegistry {
    /// Build the full entity set: photos first, then ornaments, then
    /// background particles, with ids dense in that order.
    ///
    /// The shared text point cloud is computed once, sized to the total
    /// entity count. Photos and ornaments take their cloud point with a small
    /// jitter; particles take theirs offset along a random radius so the
    /// silhouette reads as solid text.
    pub fn build(config: &RegistryConfig, rasterizer: &dyn TextRasterizer) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let total = config.total();

        let cloud = TextLayout::generate(rasterizer, &config.text, total, &config.layout, &mut rng);

        let entity_scatter = ScatterSampler::entities();
        let particle_scatter = ScatterSampler::particles();

        let mut entities = Vec::with_capacity(total);
        for index in 0..total {
            let kind = if index < config.photo_count {
                EntityKind::Photo {
                    // Round-robin so every month has photos to film
                    month: Month::from_index_wrapping(index),
                }
            } else if index < config.photo_count + config.ornament_count {
                EntityKind::Ornament {
                    shape: OrnamentShape::from_index(index - config.photo_count),
                }
            } else {
                EntityKind::Particle
            };

            let base = cloud[index % cloud.len()];
            let formed_position = match kind {
                EntityKind::Particle => base + random_radial(&mut rng, 1.5),
                _ => base + random_radial(&mut rng, 0.5),
            };

            let chaos_position = match kind {
                EntityKind::Particle => particle_scatter.sample(&mut rng),
                _ => entity_scatter.sample(&mut rng),
            };

            let spin_seed = rng.gen::<f32>() * TAU;
            entities.push(Entity {
                id: EntityId::new(index as u32),
                kind,
                chaos_position,
                formed_position,
                current_position: chaos_position,
                current_rotation: Vec3::new(spin_seed, spin_seed * 0.7, 0.0),
                current_scale: 1.0,
                visible: true,
                phase_seed: rng.gen::<f32>() * TAU,
                spin_seed,
            });
        }

        EntityRegistry {
            entities,
            cloud,
            rng,
        }
    }

    /// Add one photo entity after construction (user upload). The formed
    /// position continues the shared point cloud at the new index, so the
    /// silhouette absorbs uploads without regenerating anything.
    pub fn add_photo(&mut self, month: Month) -> EntityId {
        let index = self.entities.len();
        let base = if self.cloud.is_empty() {
            Vec3::ZERO
        } else {
            self.cloud[index % self.cloud.len()]
        };
        let formed_position = base + random_radial(&mut self.rng, 0.5);
        let chaos_position = ScatterSampler::entities().sample(&mut self.rng);

        let spin_seed = self.rng.gen::<f32>() * TAU;
        let id = EntityId::new(index as u32);
        self.entities.push(Entity {
            id,
            kind: EntityKind::Photo { month },
            chaos_position,
            formed_position,
            current_position: chaos_position,
            current_rotation: Vec3::new(spin_seed, spin_seed * 0.7, 0.0),
            current_scale: 1.0,
            visible: true,
            phase_seed: self.rng.gen::<f32>() * TAU,
            spin_seed,
        });
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Photo entities in id order
    pub fn photos(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_photo())
    }

    /// Photo ids tagged with a month, in id order
    pub fn photos_in_month(&self, month: Month) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.kind.month() == Some(month))
            .map(|e| e.id)
            .collect()
    }
}

/// Random direction scaled by a random magnitude up to `max`
fn random_radial<R: Rng + ?Sized>(rng: &mut R, max: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let r = rng.gen::<f32>() * max;
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}
