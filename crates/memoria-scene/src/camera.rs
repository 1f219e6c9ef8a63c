//! Perspective camera and picking rays
//!
//! The camera is plain state: the runtime loop drifts it toward its target
//! and the selection resolver uses it to project entities and cast pick rays.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Viewports narrower than this (logical px) get mobile behavior: a wider
/// default camera distance and the proximity/random selection fallback.
pub const NARROW_VIEWPORT_PX: f32 = 768.0;

/// Logical viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    #[inline]
    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_VIEWPORT_PX
    }

    /// Viewport pixels to normalized device coordinates
    #[inline]
    pub fn to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * px.x / self.width.max(1.0) - 1.0,
            1.0 - 2.0 * px.y / self.height.max(1.0),
        )
    }
}

/// A picking ray in world space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Nearest forward intersection distance with a sphere
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }

        let sqrt_disc = disc.sqrt();
        let t = -b - sqrt_disc;
        if t >= 0.0 {
            return Some(t);
        }
        let t = -b + sqrt_disc;
        if t >= 0.0 {
            return Some(t);
        }
        None
    }
}

/// Perspective camera
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    viewport: Viewport,
}

impl Camera {
    pub fn new(viewport: Viewport) -> Self {
        Camera {
            position: Vec3::new(0.0, 0.0, 60.0),
            look_at: Vec3::ZERO,
            fov_y: 50f32.to_radians(),
            near: 0.1,
            far: 400.0,
            viewport,
        }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize between frames: only the projection changes
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.viewport.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Forward direction
    #[inline]
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }

    /// Project a world point to NDC. None when the point is behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.xy() / clip.w)
    }

    /// Cast a ray through an NDC coordinate
    pub fn pick_ray(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));

        Ray {
            origin: near,
            dir: (far - near).normalize_or_zero(),
        }
    }
}
