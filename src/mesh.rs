use glam::Vec3;

use crate::buffers::Rgba;

/// Accumulated quad soup: one position and one color per vertex, four vertex
/// indices per face. Quads are never welded, so overlapping underlay quads
/// stay independent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuadMesh {
    positions: Vec<Vec3>,
    colors: Vec<Rgba>,
    faces: Vec<[u32; 4]>,
}

impl QuadMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(quads: usize) -> Self {
        Self {
            positions: Vec::with_capacity(quads * 4),
            colors: Vec::with_capacity(quads * 4),
            faces: Vec::with_capacity(quads),
        }
    }

    /// Appends one quad; `corners` are final world-space positions in face
    /// winding order, all four sharing `color`.
    pub fn push_quad(&mut self, corners: [Vec3; 4], color: Rgba) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&corners);
        self.colors.extend_from_slice(&[color; 4]);
        self.faces.push([base, base + 1, base + 2, base + 3]);
    }

    /// Appends every quad of `other`, rebasing its face indices past this
    /// mesh's vertices.
    pub fn merge(&mut self, other: &QuadMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.colors.extend_from_slice(&other.colors);
        self.faces
            .extend(other.faces.iter().map(|f| f.map(|i| i + offset)));
    }

    pub fn quad_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn faces(&self) -> &[[u32; 4]] {
        &self.faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(z: f32) -> [Vec3; 4] {
        [
            Vec3::new(-1.0, 1.0, z),
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
        ]
    }

    #[test]
    fn push_quad_tracks_counts() {
        let mut m = QuadMesh::new();
        assert!(m.is_empty());
        m.push_quad(square(0.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(m.quad_count(), 1);
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.colors().len(), 4);
        assert_eq!(m.faces()[0], [0, 1, 2, 3]);
    }

    #[test]
    fn merge_rebases_face_indices() {
        let mut a = QuadMesh::new();
        a.push_quad(square(0.0), [1.0; 4]);

        let mut b = QuadMesh::new();
        b.push_quad(square(-1.0), [0.5; 4]);
        b.push_quad(square(-2.0), [0.25; 4]);

        a.merge(&b);
        assert_eq!(a.quad_count(), 3);
        assert_eq!(a.vertex_count(), 12);
        assert_eq!(a.faces()[1], [4, 5, 6, 7]);
        assert_eq!(a.faces()[2], [8, 9, 10, 11]);
        assert_eq!(a.positions()[4].z, -1.0);
        assert_eq!(a.colors()[8], [0.25; 4]);
    }
}
