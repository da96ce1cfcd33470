pub mod rules;
pub mod tree_config;

pub use rules::{BranchingRules, CountRange, DepthMapping, InvertedRangePolicy, ScalarRange};
pub use tree_config::{ConfigError, TreeConfig};
