//! Procedural ornament geometry
//!
//! Mesh construction is pure data-in data-out: generators return flat buffer
//! sets and [`merge_meshes`] concatenates them with index-offset remapping.
//! No generator touches shared state, so merged geometry can be rebuilt from
//! scratch at any time.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::entity::OrnamentShape;

/// One renderable buffer set
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2], color: [f32; 3]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        self.uvs.push(uv);
        self.colors.push(color);
        index
    }

    /// Rotate all positions and normals in place
    pub fn rotate(&mut self, rotation: Quat) {
        for p in &mut self.positions {
            *p = (rotation * Vec3::from_array(*p)).to_array();
        }
        for n in &mut self.normals {
            *n = (rotation * Vec3::from_array(*n)).to_array();
        }
    }

    /// Translate all positions in place
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p = (Vec3::from_array(*p) + offset).to_array();
        }
    }
}

/// Concatenate buffer sets into one, remapping indices past the vertices that
/// came before. Pure: inputs are untouched, output owns fresh buffers.
pub fn merge_meshes(parts: &[MeshData]) -> MeshData {
    let mut merged = MeshData::default();

    for part in parts {
        let base = merged.positions.len() as u32;
        merged.positions.extend_from_slice(&part.positions);
        merged.normals.extend_from_slice(&part.normals);
        merged.uvs.extend_from_slice(&part.uvs);
        merged.colors.extend_from_slice(&part.colors);
        merged.indices.extend(part.indices.iter().map(|i| i + base));
    }

    merged
}

/// Axis-aligned box centered at the origin
pub fn box_mesh(width: f32, height: f32, depth: f32, color: [f32; 3]) -> MeshData {
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let mut mesh = MeshData::default();

    // (normal, two tangents) per face
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::Z, Vec3::NEG_X),
        (Vec3::Z, Vec3::Y, Vec3::NEG_X),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    let half = Vec3::new(hw, hh, hd);

    for (normal, up, right) in faces {
        let center = normal * half;
        let u = right * half;
        let v = up * half;

        let i0 = mesh.push_vertex(center - u - v, normal, [0.0, 0.0], color);
        let i1 = mesh.push_vertex(center + u - v, normal, [1.0, 0.0], color);
        let i2 = mesh.push_vertex(center + u + v, normal, [1.0, 1.0], color);
        let i3 = mesh.push_vertex(center - u + v, normal, [0.0, 1.0], color);

        mesh.indices.extend([i0, i1, i2, i0, i2, i3]);
    }

    mesh
}

/// Five-pointed star: a fan over alternating outer/inner radii, front and
/// back faces so it reads from both sides.
pub fn star_mesh(outer_radius: f32, inner_radius: f32, color: [f32; 3]) -> MeshData {
    let mut mesh = MeshData::default();
    let spokes = 10;

    for (normal, winding) in [(Vec3::Z, 1i32), (Vec3::NEG_Z, -1i32)] {
        let center = mesh.push_vertex(Vec3::ZERO, normal, [0.5, 0.5], color);

        let ring: Vec<u32> = (0..spokes)
            .map(|i| {
                let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
                // Point up: first spoke at 12 o'clock
                let angle = TAU * i as f32 / spokes as f32 + TAU / 4.0;
                let p = Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0);
                mesh.push_vertex(
                    p,
                    normal,
                    [0.5 + p.x / (2.0 * outer_radius), 0.5 + p.y / (2.0 * outer_radius)],
                    color,
                )
            })
            .collect();

        for i in 0..spokes {
            let a = ring[i];
            let b = ring[(i + 1) % spokes];
            if winding > 0 {
                mesh.indices.extend([center, a, b]);
            } else {
                mesh.indices.extend([center, b, a]);
            }
        }
    }

    mesh
}

/// Gift box: body plus two ribbon bands crossing over it
pub fn gift_mesh(size: f32, body_color: [f32; 3], ribbon_color: [f32; 3]) -> MeshData {
    let ribbon_width = size * 0.22;
    let overhang = size * 1.04;

    let body = box_mesh(size, size, size, body_color);
    let band_x = box_mesh(ribbon_width, overhang, overhang, ribbon_color);
    let band_z = box_mesh(overhang, overhang, ribbon_width, ribbon_color);

    merge_meshes(&[body, band_x, band_z])
}

/// Snowflake: six thin arms rotated around z, each with a short side branch
pub fn snowflake_mesh(radius: f32, color: [f32; 3]) -> MeshData {
    let arm_thickness = radius * 0.08;

    let mut parts = Vec::new();
    for i in 0..6 {
        let angle = TAU * i as f32 / 6.0;
        let rotation = Quat::from_rotation_z(angle);

        let mut arm = box_mesh(arm_thickness, radius, arm_thickness, color);
        arm.translate(Vec3::new(0.0, radius / 2.0, 0.0));
        arm.rotate(rotation);
        parts.push(arm);

        let mut branch = box_mesh(arm_thickness * 0.8, radius * 0.35, arm_thickness * 0.8, color);
        branch.translate(Vec3::new(0.0, radius * 0.175, 0.0));
        branch.rotate(Quat::from_rotation_z(TAU / 8.0));
        branch.translate(Vec3::new(0.0, radius * 0.55, 0.0));
        branch.rotate(rotation);
        parts.push(branch);
    }

    merge_meshes(&parts)
}

const STAR_GOLD: [f32; 3] = [1.0, 0.84, 0.3];
const RIBBON_GOLD: [f32; 3] = [1.0, 0.9, 0.5];
const SNOW_ICE: [f32; 3] = [0.85, 0.93, 1.0];

/// Gift bodies cycle through a small palette per instance
const GIFT_COLORS: [[f32; 3]; 4] = [
    [0.82, 0.18, 0.22],
    [0.16, 0.42, 0.72],
    [0.14, 0.55, 0.32],
    [0.58, 0.27, 0.62],
];

/// The mesh for one ornament instance. Stars and snowflakes carry fixed
/// colors; gifts take a per-instance body color.
pub fn ornament_mesh(shape: OrnamentShape, instance: usize) -> MeshData {
    match shape {
        OrnamentShape::Star => star_mesh(1.2, 0.5, STAR_GOLD),
        OrnamentShape::Gift => gift_mesh(1.0, GIFT_COLORS[instance % GIFT_COLORS.len()], RIBBON_GOLD),
        OrnamentShape::Snowflake => snowflake_mesh(1.1, SNOW_ICE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(mesh: &MeshData) {
        let n = mesh.vertex_count();
        assert_eq!(mesh.normals.len(), n);
        assert_eq!(mesh.uvs.len(), n);
        assert_eq!(mesh.colors.len(), n);
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < n));
    }

    #[test]
    fn test_box_mesh() {
        let mesh = box_mesh(2.0, 2.0, 2.0, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_consistent(&mesh);
    }

    #[test]
    fn test_merge_offsets_indices() {
        let a = box_mesh(1.0, 1.0, 1.0, [1.0, 1.0, 1.0]);
        let b = star_mesh(1.0, 0.5, [1.0, 0.9, 0.3]);
        let merged = merge_meshes(&[a.clone(), b.clone()]);

        assert_eq!(merged.vertex_count(), a.vertex_count() + b.vertex_count());
        assert_eq!(
            merged.indices.len(),
            a.indices.len() + b.indices.len()
        );
        // Second part's indices all point past the first part's vertices
        let min_b = merged.indices[a.indices.len()..]
            .iter()
            .min()
            .copied()
            .unwrap();
        assert!(min_b as usize >= a.vertex_count());
        assert_consistent(&merged);
    }

    #[test]
    fn test_merge_is_pure() {
        let a = box_mesh(1.0, 1.0, 1.0, [1.0, 1.0, 1.0]);
        let before = a.indices.clone();
        let _ = merge_meshes(&[a.clone(), a.clone()]);
        assert_eq!(a.indices, before);
    }

    #[test]
    fn test_star_within_radius() {
        let mesh = star_mesh(1.5, 0.6, [1.0, 0.9, 0.3]);
        assert_consistent(&mesh);
        for p in &mesh.positions {
            assert!(Vec3::from_array(*p).length() <= 1.5 + 1e-4);
        }
    }

    #[test]
    fn test_gift_and_snowflake_consistent() {
        assert_consistent(&gift_mesh(1.0, [0.8, 0.2, 0.2], [1.0, 0.9, 0.5]));
        assert_consistent(&snowflake_mesh(1.0, [0.85, 0.93, 1.0]));
    }

    #[test]
    fn test_ornament_meshes_by_shape() {
        for (i, shape) in [
            OrnamentShape::Star,
            OrnamentShape::Gift,
            OrnamentShape::Snowflake,
        ]
        .into_iter()
        .enumerate()
        {
            assert_consistent(&ornament_mesh(shape, i));
        }

        // Per-instance gift colors differ
        let a = ornament_mesh(OrnamentShape::Gift, 0);
        let b = ornament_mesh(OrnamentShape::Gift, 1);
        assert_ne!(a.colors[0], b.colors[0]);
    }

    #[test]
    fn test_empty_merge() {
        let merged = merge_meshes(&[]);
        assert_eq!(merged.vertex_count(), 0);
        assert!(merged.indices.is_empty());
    }
}
