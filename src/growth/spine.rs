use crate::math::Vec3;
use crate::random::RandomSource;

/// Spacing between noise samples along a spine
const NOISE_STEP: f32 = 0.2;
/// Offset on the second noise axis that decorrelates the z channel from x
const NOISE_CHANNEL_OFFSET: f32 = 100.0;
/// Peak sideways wobble at the base of a spine
const NOISE_AMPLITUDE: f32 = 2.0;

/// Inputs for one branch centerline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpineParams {
    pub start: Vec3,
    /// Initial heading. Need not be unit length; it is normalized at the first step.
    pub direction: Vec3,
    /// Nominal arc length
    pub length: f32,
    pub point_count: usize,
    /// How strongly the heading bends toward straight down from base to tip
    pub droop: f32,
}

/// Synthesize a drooping, gently wobbling polyline.
///
/// The first point is `start`, exactly. Each following point advances along a
/// heading blended from `direction` toward straight down with weight
/// `t * droop`; the weight is not clamped, so `droop > 1` over-droops past
/// vertical. A sideways noise offset is added that is strongest at the base
/// and fades toward the tip.
pub fn generate_spine(params: &SpineParams, random: &RandomSource) -> Vec<Vec3> {
    let n = params.point_count;
    assert!(n >= 2, "a spine needs at least 2 points, got {}", n);

    let segments = (n - 1) as f32;
    let step = params.length / segments;

    let mut spine = Vec::with_capacity(n);
    let mut pos = params.start;
    spine.push(pos);

    for i in 0..n - 1 {
        let t = i as f32 / segments;
        let heading = params.direction.lerp(&Vec3::DOWN, t * params.droop).normalize();

        let u = i as f32 * NOISE_STEP;
        let offset = Vec3::new(
            random.noise2d(u, 0.0) - 0.5,
            0.0,
            random.noise2d(u, NOISE_CHANNEL_OFFSET) - 0.5,
        )
        .scale(NOISE_AMPLITUDE * (1.0 - t));

        pos += heading.scale(step) + offset;
        spine.push(pos);
    }

    spine
}
