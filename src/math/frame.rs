use tracing::trace;

use super::Vec3;

/// Below this cross-product length the primary reference axis is treated as parallel
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Orthonormal frame used to orient a cross-section ring on the spine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Spine heading at this point
    pub up: Vec3,
    pub right: Vec3,
    pub forward: Vec3,
}

impl Frame {
    /// Build a frame from a unit heading.
    ///
    /// `right` is `up x X`. When the heading runs along world X that product
    /// vanishes, so world Z is used as the secondary reference axis instead.
    pub fn from_up(up: Vec3) -> Self {
        let mut right = up.cross(&Vec3::RIGHT);
        if right.length() < DEGENERATE_EPSILON {
            trace!(?up, "heading parallel to X, using Z as reference axis");
            right = up.cross(&Vec3::FORWARD);
        }
        let right = right.normalize();
        let forward = right.cross(&up);

        Self { up, right, forward }
    }

    /// Frame at spine point `from`, heading toward the next point `to`.
    /// The last point of a spine has no successor and uses world up.
    pub fn along(from: Vec3, to: Option<Vec3>) -> Self {
        let up = match to {
            Some(next) => (next - from).normalize(),
            None => Vec3::UP,
        };
        Self::from_up(up)
    }

    /// Point on the ring of radius `radius` around `center` at angle `theta`
    pub fn ring_point(&self, center: Vec3, theta: f32, radius: f32) -> Vec3 {
        center + self.right.scale(theta.cos() * radius) + self.forward.scale(theta.sin() * radius)
    }
}
