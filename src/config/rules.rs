use serde::{Deserialize, Serialize};

/// Half-open scalar range `[lo, hi)` drawn from the random source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarRange {
    pub lo: f32,
    pub hi: f32,
}

impl ScalarRange {
    pub const fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }
}

/// Half-open integer range `[lo, hi)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub lo: i32,
    pub hi: i32,
}

impl CountRange {
    pub const fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }
    }
}

/// What a child-count draw does when its upper bound falls below its lower bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvertedRangePolicy {
    /// No children
    #[default]
    Empty,
    /// Draw from `[hi, lo)` instead
    Reversed,
}

/// Linear maps from recursion depth to spine resolution and droop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthMapping {
    /// Spine points on the trunk (depth 0)
    pub max_points: usize,
    /// Spine points at the deepest level
    pub min_points: usize,
    /// Droop at depth 0
    pub base_droop: f32,
    /// Droop at the deepest level
    pub tip_droop: f32,
}

impl Default for DepthMapping {
    fn default() -> Self {
        Self {
            max_points: 32,
            min_points: 7,
            base_droop: 0.5,
            tip_droop: 1.2,
        }
    }
}

impl DepthMapping {
    /// Spine point count for `depth`, clamped to `[min_points, max_points]`
    /// and never below 2.
    pub fn point_count(&self, depth: usize, max_depth: usize) -> usize {
        let t = depth_fraction(depth, max_depth).clamp(0.0, 1.0);
        let from = self.max_points as f32;
        let to = self.min_points as f32;
        // Truncate like an integer cast of the mapped value
        let mapped = (from + (to - from) * t) as usize;
        let lo = self.min_points.min(self.max_points);
        let hi = self.min_points.max(self.max_points);
        mapped.clamp(lo, hi).max(2)
    }

    /// Droop for `depth`. The map is not clamped; depth never leaves
    /// `[0, max_depth]` during a build, so no extrapolation happens there.
    pub fn droop(&self, depth: usize, max_depth: usize) -> f32 {
        let t = depth_fraction(depth, max_depth);
        self.base_droop + (self.tip_droop - self.base_droop) * t
    }
}

fn depth_fraction(depth: usize, max_depth: usize) -> f32 {
    if max_depth == 0 {
        0.0
    } else {
        depth as f32 / max_depth as f32
    }
}

/// How children are counted, placed, and aimed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchingRules {
    /// Child count drawn for the trunk
    pub trunk_children: CountRange,
    /// Lower bound of the child count below the trunk
    pub child_min: i32,
    /// Below the trunk the child count is drawn from `[child_min, child_max_base - depth)`
    pub child_max_base: i32,
    /// First attachment point on the trunk as a fraction of its spine
    pub trunk_attach_min_t: f32,
    /// First attachment point on other branches
    pub attach_min_t: f32,
    /// Blend weight from parent tangent toward the outward heading on the trunk
    pub trunk_outward_mix: f32,
    pub outward_mix: f32,
    /// Vertical component of the outward heading before normalization
    pub outward_tilt: f32,
    /// Child length as a fraction of the parent's
    pub length_scale: ScalarRange,
    /// Child base radius as a fraction of the parent's
    pub radius_scale: f32,
    /// Downward amount subtracted from a child's heading below depth 1
    pub sag: ScalarRange,
    pub inverted_range: InvertedRangePolicy,
}

impl Default for BranchingRules {
    fn default() -> Self {
        Self {
            trunk_children: CountRange::new(6, 9),
            child_min: 2,
            child_max_base: 4,
            trunk_attach_min_t: 0.6,
            attach_min_t: 0.5,
            trunk_outward_mix: 0.6,
            outward_mix: 0.3,
            outward_tilt: 0.3,
            length_scale: ScalarRange::new(0.5, 0.7),
            radius_scale: 0.5,
            sag: ScalarRange::new(0.2, 0.5),
            inverted_range: InvertedRangePolicy::Empty,
        }
    }
}

impl BranchingRules {
    /// Child-count range for a branch at `depth`
    pub fn child_range(&self, depth: usize) -> CountRange {
        if depth == 0 {
            self.trunk_children
        } else {
            CountRange::new(self.child_min, self.child_max_base - depth as i32)
        }
    }
}
