//! CPU-side mesh generation for primitive shapes.

use bigday_assets::Shape;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Cache key: shapes that produce identical geometry share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKey {
    Cube,
    Triangle,
    Square,
    Sphere(u32),
}

impl MeshKey {
    /// `None` for shapes without a GPU mesh in this backend.
    pub fn for_shape(shape: &Shape) -> Option<Self> {
        match shape {
            Shape::Cube => Some(Self::Cube),
            Shape::Triangle => Some(Self::Triangle),
            Shape::Square => Some(Self::Square),
            Shape::SubdivisionSphere { subdivisions } => Some(Self::Sphere(*subdivisions)),
            Shape::TextLine { .. } | Shape::FromFile { .. } => None,
        }
    }

    pub fn build(self) -> MeshData {
        match self {
            Self::Cube => cube(),
            Self::Triangle => triangle(),
            Self::Square => square(),
            Self::Sphere(n) => subdivision_sphere(n),
        }
    }
}

/// Cube spanning -1..1, four vertices per face so normals stay flat.
pub fn cube() -> MeshData {
    let mut mesh = MeshData::default();
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        for sign in [1.0_f32, -1.0] {
            let n = axis * sign;
            // Two in-plane axes ordered so (u × v) points along n.
            let (u, v) = match (axis.x != 0.0, axis.y != 0.0) {
                (true, _) => (Vec3::Y, Vec3::Z),
                (_, true) => (Vec3::Z, Vec3::X),
                _ => (Vec3::X, Vec3::Y),
            };
            let (u, v) = if sign > 0.0 { (u, v) } else { (v, u) };
            let base = mesh.vertices.len() as u32;
            for (a, b) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                mesh.vertices.push(Vertex::new(n + u * a + v * b, n));
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
    }
    mesh
}

/// Right triangle with corners (0,0,0), (1,0,0), (0,1,0), facing +Z.
pub fn triangle() -> MeshData {
    MeshData {
        vertices: vec![
            Vertex::new(Vec3::ZERO, Vec3::Z),
            Vertex::new(Vec3::X, Vec3::Z),
            Vertex::new(Vec3::Y, Vec3::Z),
        ],
        indices: vec![0, 1, 2],
    }
}

/// Square spanning -1..1 in the z = 0 plane, facing +Z.
pub fn square() -> MeshData {
    MeshData {
        vertices: vec![
            Vertex::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(1.0, -1.0, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(1.0, 1.0, 0.0), Vec3::Z),
        ],
        indices: vec![0, 1, 2, 1, 3, 2],
    }
}

/// Unit sphere from a tetrahedron, each face split into four `subdivisions`
/// times with new points pushed out to the surface. Normals are the positions.
pub fn subdivision_sphere(subdivisions: u32) -> MeshData {
    let corners = [
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 0.9428, 0.3333),
        Vec3::new(-0.8165, -0.4714, 0.3333),
        Vec3::new(0.8165, -0.4714, 0.3333),
    ]
    .map(Vec3::normalize);

    let mut mesh = MeshData::default();
    for [a, b, c] in [[0, 1, 2], [3, 2, 1], [1, 0, 3], [0, 2, 3]] {
        subdivide(&mut mesh, corners[a], corners[b], corners[c], subdivisions);
    }
    mesh
}

fn subdivide(mesh: &mut MeshData, a: Vec3, b: Vec3, c: Vec3, depth: u32) {
    if depth == 0 {
        let base = mesh.vertices.len() as u32;
        mesh.vertices
            .extend([a, b, c].map(|p| Vertex::new(p, p)));
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        return;
    }
    let ab = (a + b).normalize();
    let bc = (b + c).normalize();
    let ca = (c + a).normalize();
    subdivide(mesh, a, ab, ca, depth - 1);
    subdivide(mesh, ab, b, bc, depth - 1);
    subdivide(mesh, ca, bc, c, depth - 1);
    subdivide(mesh, ab, bc, ca, depth - 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &MeshData, tri: usize) -> Vec3 {
        let p = |i: usize| Vec3::from_array(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position);
        (p(1) - p(0)).cross(p(2) - p(0)).normalize()
    }

    #[test]
    fn cube_counts_and_winding() {
        let mesh = cube();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for tri in 0..12 {
            let stored = Vec3::from_array(mesh.vertices[mesh.indices[tri * 3] as usize].normal);
            assert!(face_normal(&mesh, tri).abs_diff_eq(stored, 1e-5), "tri {tri}");
        }
    }

    #[test]
    fn cube_spans_unit_extent() {
        let mesh = cube();
        for v in &mesh.vertices {
            for c in v.position {
                assert_eq!(c.abs(), 1.0);
            }
        }
    }

    #[test]
    fn flat_shapes_face_positive_z() {
        for mesh in [triangle(), square()] {
            for tri in 0..mesh.triangle_count() {
                assert!(face_normal(&mesh, tri).abs_diff_eq(Vec3::Z, 1e-6));
            }
        }
        assert_eq!(square().triangle_count(), 2);
    }

    #[test]
    fn sphere_face_count_grows_by_four() {
        assert_eq!(subdivision_sphere(0).triangle_count(), 4);
        assert_eq!(subdivision_sphere(1).triangle_count(), 16);
        assert_eq!(subdivision_sphere(4).triangle_count(), 1024);
    }

    #[test]
    fn sphere_points_lie_on_unit_sphere() {
        let mesh = subdivision_sphere(3);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn text_and_file_shapes_have_no_mesh() {
        assert_eq!(MeshKey::for_shape(&Shape::text_line(35)), None);
        assert_eq!(MeshKey::for_shape(&Shape::from_file("assets/miffy.obj")), None);
        assert_eq!(
            MeshKey::for_shape(&Shape::subdivision_sphere(4)),
            Some(MeshKey::Sphere(4))
        );
    }
}
