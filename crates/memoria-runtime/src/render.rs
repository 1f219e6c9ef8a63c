//! Render command output
//!
//! The external renderer consumes one [`FrameSubmission`] per tick: the
//! smoothed camera, one transform per entity, and the frame's eased progress
//! so shaders can phase with the morph. Draw order is explicit - the zoomed
//! card and the film strip render above the background field without relying
//! on depth alone.

use glam::{Quat, Vec3};
use memoria_core::EntityId;
use memoria_gesture::GestureStatus;

/// Background particle field and resting entities
pub const ORDER_FIELD: u8 = 0;
/// Film-strip entities while a category filter is active
pub const ORDER_STRIP: u8 = 1;
/// The selected, zoomed entity
pub const ORDER_SELECTED: u8 = 2;

/// Camera state for the frame
#[derive(Debug, Clone, Copy)]
pub struct CameraTransform {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// One entity's transform for the frame
#[derive(Debug, Clone, Copy)]
pub struct EntityTransform {
    pub id: EntityId,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub visible: bool,
    pub draw_order: u8,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameSubmission {
    pub camera: CameraTransform,
    pub entities: Vec<EntityTransform>,
    pub status: GestureStatus,
    /// Raw morph progress in [0,1]; shaders apply their own easing
    pub progress: f32,
}
