use crate::math::Vec3;
use crate::mesh::Mesh;

/// Ground height the reference scene rests the trunk on
pub const DEFAULT_GROUND_Y: f32 = -50.0;

/// A node in the finished tree.
///
/// Children are owned by value, so the structure is a strict tree with no
/// back-references. Nothing is mutated once a subtree has been built.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Declared start point; always equal to `spine[0]`
    pub start: Vec3,
    /// Centerline from base to tip, at least 2 points
    pub spine: Vec<Vec3>,
    /// Cross-section radius at the first spine point
    pub base_radius: f32,
    /// Nominal length the spine was generated with
    pub length: f32,
    /// Recursion depth, 0 = trunk
    pub depth: usize,
    /// Tube mesh built once from `spine` and `base_radius`
    pub mesh: Mesh,
    pub children: Vec<Branch>,
}

impl Branch {
    /// Get all nodes in pre-order (self first, then children)
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter { stack: vec![self] }
    }

    /// Total number of nodes in subtree
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(|c| c.count()).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn max_depth_reached(&self) -> usize {
        self.iter_preorder().map(|b| b.depth).max().unwrap_or(self.depth)
    }

    pub fn count_at_depth(&self, depth: usize) -> usize {
        self.iter_preorder().filter(|b| b.depth == depth).count()
    }

    pub fn total_vertex_count(&self) -> usize {
        self.iter_preorder().map(|b| b.mesh.vertex_count()).sum()
    }

    pub fn total_index_count(&self) -> usize {
        self.iter_preorder().map(|b| b.mesh.indices.len()).sum()
    }

    /// Lowest height on this branch's own spine (children are not considered)
    pub fn lowest_trunk_point(&self) -> f32 {
        self.spine.iter().fold(self.start.y, |low, p| low.min(p.y))
    }

    /// Vertical shift that rests the trunk's lowest point on `ground_y`
    pub fn ground_offset(&self, ground_y: f32) -> f32 {
        ground_y - self.lowest_trunk_point()
    }

    /// Every branch mesh concatenated in pre-order, with bounds computed
    pub fn merged_mesh(&self) -> Mesh {
        let mut merged = Mesh::with_capacity(self.total_vertex_count(), self.total_index_count());
        for branch in self.iter_preorder() {
            merged.merge(&branch.mesh);
        }
        merged.calculate_bounds();
        merged
    }
}

pub struct PreorderIter<'a> {
    stack: Vec<&'a Branch>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = &'a Branch;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push in reverse so the first child is visited first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Visit every branch once, read-only, handing the renderer what it draws
pub fn traverse<F>(tree: &Branch, mut visit: F)
where
    F: FnMut(&[Vec3], f32, &Mesh, usize),
{
    for branch in tree.iter_preorder() {
        visit(&branch.spine, branch.base_radius, &branch.mesh, branch.depth);
    }
}
