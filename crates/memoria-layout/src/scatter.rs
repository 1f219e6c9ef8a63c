//! Chaos scatter sampling
//!
//! Chaos positions are uniform by volume inside a sphere: radius via the
//! cube-root transform, direction via a uniform-on-sphere angle pair. Surface
//! bias would read as a hollow shell once thousands of entities settle.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Scatter radius for photo and ornament entities
pub const ENTITY_RADIUS: f32 = 40.0;
/// Scatter radius for the background particle field
pub const PARTICLE_RADIUS: f32 = 80.0;

/// Uniform-by-volume sphere sampler
#[derive(Debug, Clone, Copy)]
pub struct ScatterSampler {
    radius: f32,
}

impl ScatterSampler {
    pub fn new(radius: f32) -> Self {
        ScatterSampler { radius }
    }

    /// Sampler for photos and ornaments
    pub fn entities() -> Self {
        Self::new(ENTITY_RADIUS)
    }

    /// Sampler for background particles
    pub fn particles() -> Self {
        Self::new(PARTICLE_RADIUS)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Draw one chaos position
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let r = self.radius * rng.gen::<f32>().cbrt();
        let theta = rng.gen::<f32>() * TAU;
        let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();

        Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
    }
}
