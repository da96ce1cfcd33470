use serde::{Deserialize, Serialize};

use crate::math::{Frame, Vec3};

/// A vertex with position and a flat RGB color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Vec3,
    pub color: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self { position, color }
    }

    /// Convert to flat array for a GPU buffer
    /// Layout: position(3) + color(3) = 6 floats
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.position.x, self.position.y, self.position.z,
            self.color[0], self.color[1], self.color[2],
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Bounding sphere, filled by `calculate_bounds`
    pub bounds_center: Vec3,
    pub bounds_radius: f32,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            ..Default::default()
        }
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.push(a);
        self.indices.push(b);
        self.indices.push(c);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Append another mesh, offsetting its indices
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend(other.vertices.iter().cloned());
        self.indices.extend(other.indices.iter().map(|idx| idx + offset));
    }

    /// Calculate bounding sphere (centroid plus farthest vertex)
    pub fn calculate_bounds(&mut self) {
        if self.vertices.is_empty() {
            self.bounds_center = Vec3::ZERO;
            self.bounds_radius = 0.0;
            return;
        }

        let mut center = Vec3::ZERO;
        for v in &self.vertices {
            center += v.position;
        }
        center = center.scale(1.0 / self.vertices.len() as f32);

        let max_dist = self
            .vertices
            .iter()
            .map(|v| v.position.distance(&center))
            .fold(0.0f32, f32::max);

        self.bounds_center = center;
        self.bounds_radius = max_dist;
    }

    /// Interleaved vertex buffer data
    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| v.to_array())
            .collect()
    }

    pub fn positions(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| v.position.to_array())
            .collect()
    }

    pub fn colors(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.color).collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Create a ring of `segments` vertices around `center` in the frame's cross-section plane
pub fn create_ring(
    center: Vec3,
    frame: &Frame,
    radius: f32,
    segments: usize,
    color: [f32; 3],
) -> Vec<Vertex> {
    (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            Vertex::new(frame.ring_point(center, angle, radius), color)
        })
        .collect()
}

/// Connect two consecutive rings with outward-facing triangles.
/// The angular index wraps, so the tube is closed around its axis.
pub fn connect_rings(mesh: &mut Mesh, ring1_start: u32, ring2_start: u32, segments: usize) {
    for i in 0..segments {
        let i_next = (i + 1) % segments;

        let a = ring1_start + i as u32;
        let b = ring1_start + i_next as u32;
        let c = ring2_start + i_next as u32;
        let d = ring2_start + i as u32;

        mesh.add_quad(a, d, c, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: [f32; 3] = [0.5, 0.5, 0.5];

    #[test]
    fn test_vertex_to_array() {
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), [0.1, 0.2, 0.3]);
        let arr = v.to_array();
        assert_eq!(arr.len(), 6);
        assert_eq!(arr[0], 1.0);
        assert_eq!(arr[2], 3.0);
        assert_eq!(arr[3], 0.1);
        assert_eq!(arr[5], 0.3);
    }

    #[test]
    fn test_mesh_add_vertices() {
        let mut mesh = Mesh::new();
        let start = mesh.add_vertices(vec![
            Vertex::new(Vec3::ZERO, GREY),
            Vertex::new(Vec3::RIGHT, GREY),
        ]);
        assert_eq!(start, 0);
        let next = mesh.add_vertices(vec![Vertex::new(Vec3::UP, GREY)]);
        assert_eq!(next, 2);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_mesh_merge() {
        let mut mesh1 = Mesh::new();
        mesh1.add_vertices(vec![Vertex::new(Vec3::ZERO, GREY)]);
        mesh1.add_triangle(0, 0, 0);

        let mut mesh2 = Mesh::new();
        mesh2.add_vertices(vec![Vertex::new(Vec3::UP, GREY)]);
        mesh2.add_triangle(0, 0, 0);

        mesh1.merge(&mesh2);
        assert_eq!(mesh1.vertex_count(), 2);
        assert_eq!(mesh1.indices[3], 1);
    }

    #[test]
    fn test_create_ring() {
        let frame = Frame::from_up(Vec3::UP);
        let ring = create_ring(Vec3::ZERO, &frame, 1.0, 8, GREY);
        assert_eq!(ring.len(), 8);

        for v in &ring {
            let dist = (v.position.x.powi(2) + v.position.z.powi(2)).sqrt();
            assert!((dist - 1.0).abs() < 0.001);
            assert!(v.position.y.abs() < 0.001);
        }
    }

    #[test]
    fn test_connect_rings_wraps() {
        let frame = Frame::from_up(Vec3::UP);
        let mut mesh = Mesh::new();
        let start1 = mesh.add_vertices(create_ring(Vec3::ZERO, &frame, 1.0, 4, GREY));
        let start2 = mesh.add_vertices(create_ring(Vec3::UP, &frame, 0.8, 4, GREY));
        connect_rings(&mut mesh, start1, start2, 4);

        assert_eq!(mesh.triangle_count(), 8);
        // Last quad closes back onto index 0
        assert!(mesh.indices[18..].contains(&0));
        assert!(mesh.indices.iter().all(|&i| i < 8));
    }

    #[test]
    fn test_connect_rings_faces_outward() {
        let frame = Frame::from_up(Vec3::UP);
        let mut mesh = Mesh::new();
        let start1 = mesh.add_vertices(create_ring(Vec3::ZERO, &frame, 1.0, 6, GREY));
        let start2 = mesh.add_vertices(create_ring(Vec3::new(0.0, 3.0, 0.0), &frame, 1.0, 6, GREY));
        connect_rings(&mut mesh, start1, start2, 6);

        for tri in mesh.indices.chunks(3) {
            let a = mesh.vertices[tri[0] as usize].position;
            let b = mesh.vertices[tri[1] as usize].position;
            let c = mesh.vertices[tri[2] as usize].position;
            let normal = (b - a).cross(&(c - a));
            let centroid = (a + b + c).scale(1.0 / 3.0);
            let radial = Vec3::new(centroid.x, 0.0, centroid.z);
            assert!(normal.dot(&radial) > 0.0, "triangle {:?} faces inward", tri);
        }
    }

    #[test]
    fn test_calculate_bounds() {
        let mut mesh = Mesh::new();
        mesh.add_vertices(vec![
            Vertex::new(Vec3::new(-1.0, 0.0, 0.0), GREY),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0), GREY),
        ]);
        mesh.calculate_bounds();

        assert_eq!(mesh.bounds_center, Vec3::ZERO);
        assert!((mesh.bounds_radius - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_buffer_layouts() {
        let mut mesh = Mesh::new();
        mesh.add_vertices(vec![
            Vertex::new(Vec3::ZERO, GREY),
            Vertex::new(Vec3::RIGHT, GREY),
        ]);

        assert_eq!(mesh.vertex_data().len(), 12);
        assert_eq!(mesh.positions(), vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(mesh.colors().len(), 6);
    }
}
