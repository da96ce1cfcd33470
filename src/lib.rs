use js_sys::{Float32Array, Uint32Array};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod growth;
pub mod math;
pub mod mesh;
pub mod random;

pub use config::{ConfigError, TreeConfig};
pub use growth::{traverse, Branch, TreeBuilder, DEFAULT_GROUND_Y};
pub use math::Vec3;
pub use mesh::Mesh;
pub use random::RandomSource;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Build a complete willow tree. Deterministic in all arguments.
///
/// Every other knob keeps its value from `TreeConfig::default()`.
pub fn build_tree(
    seed: u64,
    trunk_start: Vec3,
    trunk_direction: Vec3,
    trunk_length: f32,
    trunk_radius: f32,
    max_depth: usize,
    sides: usize,
) -> Branch {
    let config = TreeConfig {
        seed,
        trunk_start,
        trunk_direction,
        trunk_length,
        trunk_radius,
        max_depth,
        sides,
        ..Default::default()
    };
    TreeBuilder::new(config).build()
}

/// Finished tree exposed to JavaScript. Branches are addressed by pre-order index.
#[wasm_bindgen]
pub struct WillowTree {
    tree: Branch,
    merged: Mesh,
}

#[wasm_bindgen]
impl WillowTree {
    /// Grow the reference willow from `seed`
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WillowTree {
        Self::from_config(TreeConfig::default().with_seed(seed))
    }

    /// Grow a tree from a YAML config
    #[wasm_bindgen]
    pub fn from_yaml(yaml: &str) -> Result<WillowTree, JsValue> {
        let config = TreeConfig::from_yaml(yaml)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(config))
    }

    #[wasm_bindgen]
    pub fn branch_count(&self) -> usize {
        self.tree.count()
    }

    #[wasm_bindgen]
    pub fn branch_depth(&self, index: usize) -> Option<usize> {
        self.branch(index).map(|b| b.depth)
    }

    #[wasm_bindgen]
    pub fn branch_base_radius(&self, index: usize) -> Option<f32> {
        self.branch(index).map(|b| b.base_radius)
    }

    /// Vertex positions of one branch, 3 floats per vertex
    #[wasm_bindgen]
    pub fn positions(&self, index: usize) -> Option<Float32Array> {
        self.branch(index)
            .map(|b| Float32Array::from(b.mesh.positions().as_slice()))
    }

    /// Vertex colors of one branch, 3 floats per vertex
    #[wasm_bindgen]
    pub fn colors(&self, index: usize) -> Option<Float32Array> {
        self.branch(index)
            .map(|b| Float32Array::from(b.mesh.colors().as_slice()))
    }

    #[wasm_bindgen]
    pub fn indices(&self, index: usize) -> Option<Uint32Array> {
        self.branch(index)
            .map(|b| Uint32Array::from(b.mesh.index_data()))
    }

    #[wasm_bindgen]
    pub fn merged_positions(&self) -> Float32Array {
        Float32Array::from(self.merged.positions().as_slice())
    }

    #[wasm_bindgen]
    pub fn merged_colors(&self) -> Float32Array {
        Float32Array::from(self.merged.colors().as_slice())
    }

    #[wasm_bindgen]
    pub fn merged_indices(&self) -> Uint32Array {
        Uint32Array::from(self.merged.index_data())
    }

    /// Vertical shift that rests the trunk on a ground plane at `ground_y`
    #[wasm_bindgen]
    pub fn ground_offset(&self, ground_y: f32) -> f32 {
        self.tree.ground_offset(ground_y)
    }
}

impl WillowTree {
    pub fn from_config(config: TreeConfig) -> Self {
        let tree = TreeBuilder::new(config).build();
        let merged = tree.merged_mesh();
        Self { tree, merged }
    }

    pub fn tree(&self) -> &Branch {
        &self.tree
    }

    fn branch(&self, index: usize) -> Option<&Branch> {
        self.tree.iter_preorder().nth(index)
    }
}
