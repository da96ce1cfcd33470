use crate::math::{Frame, Vec3};
use super::branch::{Mesh, create_ring, connect_rings};

/// Bark brown shared by every vertex of every branch
pub const BARK_COLOR: [f32; 3] = [139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0];

/// Parameters for tube tessellation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationParams {
    /// Radial segments around each ring
    pub sides: usize,
    /// Cross-section radius at the last spine point
    pub tip_radius: f32,
    pub color: [f32; 3],
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            sides: 12,
            tip_radius: 2.0,
            color: BARK_COLOR,
        }
    }
}

/// Sweeps a circular cross-section along a spine to build an open tube
#[derive(Debug, Clone)]
pub struct MeshTessellator {
    params: TessellationParams,
}

impl MeshTessellator {
    pub fn new(params: TessellationParams) -> Self {
        Self { params }
    }

    /// Tessellate one branch.
    ///
    /// Produces `N * sides` vertices and `(N - 1) * sides * 2` triangles for a
    /// spine of `N` points. The radius runs linearly from `base_radius` at the
    /// first point to the tip radius at the last. Neither end is capped.
    pub fn tessellate(&self, spine: &[Vec3], base_radius: f32) -> Mesh {
        let sides = self.params.sides;
        let n = spine.len();
        assert!(n >= 2, "a spine needs at least 2 points, got {}", n);
        assert!(sides >= 3, "a tube needs at least 3 sides, got {}", sides);

        let mut mesh = Mesh::with_capacity(n * sides, (n - 1) * sides * 6);
        let mut ring_starts = Vec::with_capacity(n);

        for (i, &center) in spine.iter().enumerate() {
            let t = i as f32 / (n - 1) as f32;
            let radius = lerp(base_radius, self.params.tip_radius, t);
            let frame = Frame::along(center, spine.get(i + 1).copied());

            let ring = create_ring(center, &frame, radius, sides, self.params.color);
            ring_starts.push(mesh.add_vertices(ring));
        }

        for pair in ring_starts.windows(2) {
            connect_rings(&mut mesh, pair[0], pair[1], sides);
        }

        mesh.calculate_bounds();
        mesh
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_spine(points: usize, height: f32) -> Vec<Vec3> {
        (0..points)
            .map(|i| Vec3::new(0.0, height * i as f32 / (points - 1) as f32, 0.0))
            .collect()
    }

    #[test]
    fn test_mesh_sizing() {
        let tess = MeshTessellator::new(TessellationParams {
            sides: 8,
            ..Default::default()
        });
        let mesh = tess.tessellate(&straight_spine(5, 10.0), 4.0);

        assert_eq!(mesh.vertex_count(), 5 * 8);
        assert_eq!(mesh.indices.len(), 4 * 8 * 6);
        assert_eq!(mesh.triangle_count(), 4 * 8 * 2);
    }

    #[test]
    fn test_two_point_spine() {
        let tess = MeshTessellator::new(TessellationParams::default());
        let mesh = tess.tessellate(&[Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)], 1.0);
        assert_eq!(mesh.vertex_count(), 2 * 12);
        assert_eq!(mesh.indices.len(), 12 * 6);
    }

    #[test]
    fn test_radius_tapers_to_tip() {
        let tess = MeshTessellator::new(TessellationParams {
            sides: 6,
            tip_radius: 2.0,
            ..Default::default()
        });
        let spine = straight_spine(3, 10.0);
        let mesh = tess.tessellate(&spine, 8.0);

        let ring_radius = |ring: usize| {
            let v = mesh.vertices[ring * 6].position;
            v.distance(&spine[ring])
        };
        assert!((ring_radius(0) - 8.0).abs() < 1e-4);
        assert!((ring_radius(1) - 5.0).abs() < 1e-4);
        assert!((ring_radius(2) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_uniform_bark_color() {
        let tess = MeshTessellator::new(TessellationParams::default());
        let mesh = tess.tessellate(&straight_spine(4, 3.0), 1.0);
        assert!(mesh.vertices.iter().all(|v| v.color == BARK_COLOR));
    }

    #[test]
    fn test_indices_in_range() {
        let tess = MeshTessellator::new(TessellationParams::default());
        let mesh = tess.tessellate(&straight_spine(6, 3.0), 1.0);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_spine_along_x_has_no_nan() {
        let tess = MeshTessellator::new(TessellationParams::default());
        let spine: Vec<Vec3> = (0..4).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let mesh = tess.tessellate(&spine, 1.0);
        assert!(mesh.vertices.iter().all(|v| v.position.is_finite()));
    }

    #[test]
    fn test_bounds_cover_tube() {
        let tess = MeshTessellator::new(TessellationParams::default());
        let mesh = tess.tessellate(&straight_spine(5, 20.0), 3.0);
        assert!(mesh.bounds_radius >= 10.0);
    }

    #[test]
    #[should_panic(expected = "at least 2 points")]
    fn test_single_point_spine_panics() {
        let tess = MeshTessellator::new(TessellationParams::default());
        tess.tessellate(&[Vec3::ZERO], 1.0);
    }
}
