use std::f32::consts::{PI, TAU};

use tracing::{debug, info, trace};

use super::branch::Branch;
use super::spine::{generate_spine, SpineParams};
use crate::config::{InvertedRangePolicy, TreeConfig};
use crate::math::Vec3;
use crate::mesh::{MeshTessellator, TessellationParams, BARK_COLOR};
use crate::random::RandomSource;

/// Where a child attaches and how it starts out
#[derive(Debug, Clone, Copy)]
struct ChildSeed {
    start: Vec3,
    direction: Vec3,
    length: f32,
    base_radius: f32,
}

/// Recursive willow construction
pub struct TreeBuilder {
    pub config: TreeConfig,
    tessellator: MeshTessellator,
}

impl TreeBuilder {
    pub fn new(config: TreeConfig) -> Self {
        let tessellator = MeshTessellator::new(TessellationParams {
            sides: config.sides,
            tip_radius: config.tip_radius,
            color: BARK_COLOR,
        });
        Self { config, tessellator }
    }

    /// Grow the whole tree from the configured seed
    pub fn build(&self) -> Branch {
        let mut random = RandomSource::new(self.config.seed);
        self.build_with(&mut random)
    }

    /// Grow the whole tree drawing from an existing random source
    pub fn build_with(&self, random: &mut RandomSource) -> Branch {
        let config = &self.config;
        let tree = self.build_branch(
            random,
            config.trunk_start,
            config.trunk_direction,
            config.trunk_length,
            config.trunk_radius,
            0,
        );

        info!(
            seed = random.seed(),
            branches = tree.count(),
            vertices = tree.total_vertex_count(),
            "willow tree built"
        );
        tree
    }

    fn build_branch(
        &self,
        random: &mut RandomSource,
        start: Vec3,
        direction: Vec3,
        length: f32,
        base_radius: f32,
        depth: usize,
    ) -> Branch {
        let max_depth = self.config.max_depth;
        let mapping = &self.config.depth_mapping;

        let point_count = mapping.point_count(depth, max_depth);
        let droop = mapping.droop(depth, max_depth);
        assert!(point_count >= 2, "depth {} mapped to {} spine points", depth, point_count);

        let spine = generate_spine(
            &SpineParams {
                start,
                direction,
                length,
                point_count,
                droop,
            },
            random,
        );
        let mesh = self.tessellator.tessellate(&spine, base_radius);

        let mut children = Vec::new();
        if depth < max_depth {
            let child_count = self.child_count(random, depth);
            trace!(depth, point_count, droop, child_count, "branch");

            children.reserve(child_count);
            for c in 0..child_count {
                let seed = self.child_seed(random, &spine, length, base_radius, depth, c, child_count);
                children.push(self.build_branch(
                    random,
                    seed.start,
                    seed.direction,
                    seed.length,
                    seed.base_radius,
                    depth + 1,
                ));
            }
        } else {
            trace!(depth, point_count, droop, "leaf branch");
        }

        Branch {
            start,
            spine,
            base_radius,
            length,
            depth,
            mesh,
            children,
        }
    }

    /// Draw how many children a branch at `depth` gets
    fn child_count(&self, random: &mut RandomSource, depth: usize) -> usize {
        let rules = &self.config.branching;
        let range = rules.child_range(depth);

        let count = match random.uniform_int(range.lo, range.hi) {
            Some(n) => n,
            None => {
                let n = match rules.inverted_range {
                    InvertedRangePolicy::Empty => 0,
                    InvertedRangePolicy::Reversed => {
                        random.uniform_int(range.hi, range.lo).unwrap_or(0)
                    }
                };
                debug!(
                    depth,
                    lo = range.lo,
                    hi = range.hi,
                    policy = ?rules.inverted_range,
                    count = n,
                    "inverted child-count range"
                );
                n
            }
        };

        count.max(0) as usize
    }

    /// Attachment point, heading, and size of child `c` of `child_count`
    #[allow(clippy::too_many_arguments)]
    fn child_seed(
        &self,
        random: &mut RandomSource,
        spine: &[Vec3],
        length: f32,
        base_radius: f32,
        depth: usize,
        c: usize,
        child_count: usize,
    ) -> ChildSeed {
        let rules = &self.config.branching;
        let trunk = depth == 0;

        let min_t = if trunk { rules.trunk_attach_min_t } else { rules.attach_min_t };
        let idx = attachment_index(spine.len(), min_t, c, child_count);
        let start = spine[idx];

        let theta = if trunk {
            let n = child_count as f32;
            let base_angle = TAU * c as f32 / n;
            base_angle + random.uniform(-PI / n, PI / n)
        } else {
            random.uniform(-PI, PI)
        };
        let outward = Vec3::new(theta.cos(), rules.outward_tilt, theta.sin()).normalize();

        let parent_dir = (spine[idx] - spine[idx.saturating_sub(2)]).normalize();
        let mix = if trunk { rules.trunk_outward_mix } else { rules.outward_mix };
        let mut direction = parent_dir.lerp(&outward, mix).normalize();

        // Left unnormalized; the child's spine normalizes it at its first step
        let child_depth = depth + 1;
        if child_depth > 1 {
            direction.y -= random.uniform(rules.sag.lo, rules.sag.hi);
        }

        ChildSeed {
            start,
            direction,
            length: length * random.uniform(rules.length_scale.lo, rules.length_scale.hi),
            base_radius: base_radius * rules.radius_scale,
        }
    }
}

/// Spine index a child attaches at: children are spread linearly from
/// `min_t` of the way along the spine to three points short of the tip.
fn attachment_index(point_count: usize, min_t: f32, c: usize, child_count: usize) -> usize {
    let lo = point_count as f32 * min_t;
    let hi = point_count as f32 - 3.0;

    let mapped = if child_count <= 1 {
        lo
    } else {
        lo + (hi - lo) * (c as f32 / (child_count - 1) as f32)
    };
    let mapped = mapped.clamp(lo.min(hi), lo.max(hi));

    // Float-to-int casts truncate and saturate negatives to 0
    (mapped as usize).min(point_count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> TreeConfig {
        TreeConfig {
            max_depth: 2,
            sides: 6,
            ..Default::default()
        }
    }

    #[test]
    fn test_attachment_index_spread() {
        // Trunk: 32 points, min_t 0.6 -> [19.2, 29]
        assert_eq!(attachment_index(32, 0.6, 0, 7), 19);
        assert_eq!(attachment_index(32, 0.6, 6, 7), 29);
        let mid = attachment_index(32, 0.6, 3, 7);
        assert!((19..=29).contains(&mid));
    }

    #[test]
    fn test_attachment_index_single_child() {
        assert_eq!(attachment_index(25, 0.5, 0, 1), 12);
    }

    #[test]
    fn test_attachment_index_short_spine_clamps() {
        for c in 0..3 {
            let idx = attachment_index(2, 0.5, c, 3);
            assert!(idx <= 1);
        }
        // [1.5, 0]: first child truncates to 1, second to 0
        assert_eq!(attachment_index(3, 0.5, 0, 2), 1);
        assert_eq!(attachment_index(3, 0.5, 1, 2), 0);
    }

    #[test]
    fn test_trunk_is_depth_zero() {
        let tree = TreeBuilder::new(small_config()).build();
        assert_eq!(tree.depth, 0);
        assert_eq!(tree.spine.len(), 32);
        assert_eq!(tree.spine[0], Vec3::ZERO);
        assert_eq!(tree.base_radius, 32.0);
        assert_eq!(tree.length, 220.0);
    }

    #[test]
    fn test_trunk_child_count() {
        let tree = TreeBuilder::new(small_config()).build();
        assert!((6..9).contains(&tree.children.len()));
    }

    #[test]
    fn test_children_attach_to_parent_spine() {
        let tree = TreeBuilder::new(small_config()).build();
        for child in &tree.children {
            assert!(tree.spine.contains(&child.start));
            assert_eq!(child.spine[0], child.start);
            assert_eq!(child.depth, 1);
            assert_eq!(child.base_radius, 16.0);
            assert!(child.length >= 220.0 * 0.5 && child.length < 220.0 * 0.7);
        }
    }

    #[test]
    fn test_depth_one_has_two_children() {
        let tree = TreeBuilder::new(TreeConfig::default()).build();
        for child in &tree.children {
            assert_eq!(child.children.len(), 2);
        }
    }

    #[test]
    fn test_shallow_tree_still_reaches_max_depth() {
        let config = TreeConfig {
            max_depth: 3,
            sides: 6,
            ..Default::default()
        };
        let tree = TreeBuilder::new(config).build();
        assert!(tree.count_at_depth(2) > 0);
        for b in tree.iter_preorder().filter(|b| b.depth == 2) {
            assert_eq!(b.children.len(), 2);
        }
        assert_eq!(tree.max_depth_reached(), 3);
    }

    #[test]
    fn test_deep_limit_keeps_two_children_at_depth_one() {
        let config = TreeConfig {
            max_depth: 6,
            sides: 4,
            ..Default::default()
        };
        let tree = TreeBuilder::new(config).build();
        for child in &tree.children {
            assert_eq!(child.children.len(), 2);
        }
        // Depth 3 draws from the inverted [2, 1) and stays bare
        assert_eq!(tree.max_depth_reached(), 3);
        assert!(tree.count() <= 1 + 8 + 16 + 32);
    }

    #[test]
    fn test_inverted_range_empty_policy() {
        let tree = TreeBuilder::new(TreeConfig::default()).build();
        assert!(tree.iter_preorder().filter(|b| b.depth == 3).all(|b| b.is_leaf()));
        assert_eq!(tree.count_at_depth(4), 0);
    }

    #[test]
    fn test_inverted_range_reversed_policy() {
        let mut config = TreeConfig::default();
        config.branching.inverted_range = InvertedRangePolicy::Reversed;
        let tree = TreeBuilder::new(config).build();
        // [1, 2) always draws one child
        for b in tree.iter_preorder().filter(|b| b.depth == 3) {
            assert_eq!(b.children.len(), 1);
        }
        assert!(tree.count_at_depth(4) > 0);
        assert!(tree.iter_preorder().filter(|b| b.depth == 4).all(|b| b.is_leaf()));
    }

    #[test]
    fn test_zero_max_depth_is_bare_trunk() {
        let config = TreeConfig {
            max_depth: 0,
            ..Default::default()
        };
        let tree = TreeBuilder::new(config).build();
        assert_eq!(tree.count(), 1);
        assert_eq!(tree.spine.len(), 32);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = TreeBuilder::new(small_config()).build();
        let b = TreeBuilder::new(small_config()).build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_tree() {
        let a = TreeBuilder::new(small_config().with_seed(1)).build();
        let b = TreeBuilder::new(small_config().with_seed(2)).build();
        assert_ne!(a, b);
    }

    #[test]
    fn test_meshes_match_spines() {
        let config = small_config();
        let sides = config.sides;
        let tree = TreeBuilder::new(config).build();
        for b in tree.iter_preorder() {
            let n = b.spine.len();
            assert_eq!(b.mesh.vertex_count(), n * sides);
            assert_eq!(b.mesh.indices.len(), (n - 1) * sides * 6);
        }
    }
}
