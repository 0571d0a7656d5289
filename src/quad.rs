use glam::{Quat, Vec3};

use crate::buffers::Rgba;
use crate::mesh::QuadMesh;

/// Per-edge half-extent multipliers for one quad; all non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeScale {
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
}

impl EdgeScale {
    pub const UNIT: Self = Self {
        left: 1.0,
        right: 1.0,
        up: 1.0,
        down: 1.0,
    };
}

/// Appends one camera-facing quad to `mesh`.
///
/// The rectangle is built around the local origin with half-extents
/// `half_size * scale` per edge, wound top-left, bottom-left, bottom-right,
/// top-right so it faces the camera along local -Z, rotated by the camera
/// quaternion and translated to `position`. All four corners carry `color`.
pub fn append_quad(
    mesh: &mut QuadMesh,
    position: Vec3,
    half_size: f32,
    rotation: Quat,
    color: Rgba,
    scale: EdgeScale,
) {
    let left = half_size * scale.left;
    let right = half_size * scale.right;
    let up = half_size * scale.up;
    let down = half_size * scale.down;

    let corners = [
        Vec3::new(-left, up, 0.0),
        Vec3::new(-left, -down, 0.0),
        Vec3::new(right, -down, 0.0),
        Vec3::new(right, up, 0.0),
    ];
    mesh.push_quad(corners.map(|c| rotation * c + position), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scale_yields_a_centered_square() {
        let mut mesh = QuadMesh::new();
        append_quad(
            &mut mesh,
            Vec3::new(5.0, 0.0, -2.0),
            0.5,
            Quat::IDENTITY,
            [1.0; 4],
            EdgeScale::UNIT,
        );
        let p = mesh.positions();
        assert!((p[0] - Vec3::new(4.5, 0.5, -2.0)).length() < 1e-6);
        assert!((p[2] - Vec3::new(5.5, -0.5, -2.0)).length() < 1e-6);
    }

    #[test]
    fn asymmetric_scale_stretches_one_edge_only() {
        let mut mesh = QuadMesh::new();
        append_quad(
            &mut mesh,
            Vec3::ZERO,
            1.0,
            Quat::IDENTITY,
            [1.0; 4],
            EdgeScale {
                left: 3.0,
                ..EdgeScale::UNIT
            },
        );
        let p = mesh.positions();
        assert_eq!(p[0].x, -3.0);
        assert_eq!(p[1].x, -3.0);
        assert_eq!(p[2].x, 1.0);
        assert_eq!(p[0].y, 1.0);
        assert_eq!(p[1].y, -1.0);
    }

    #[test]
    fn rotation_is_applied_about_the_quad_center() {
        let rot = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let mut mesh = QuadMesh::new();
        append_quad(&mut mesh, Vec3::X, 1.0, rot, [1.0; 4], EdgeScale::UNIT);
        // top-left corner (-1, 1, 0) rotates to (-1, -1, 0) then shifts by +X
        let p = mesh.positions();
        assert!((p[0] - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn all_corners_share_the_color() {
        let mut mesh = QuadMesh::new();
        let color = [0.25, 0.5, 0.75, 1.0];
        append_quad(&mut mesh, Vec3::ZERO, 1.0, Quat::IDENTITY, color, EdgeScale::UNIT);
        assert!(mesh.colors().iter().all(|c| *c == color));
    }
}
