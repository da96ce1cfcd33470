pub mod branch;
pub mod builder;
pub mod spine;

pub use branch::{traverse, Branch, PreorderIter, DEFAULT_GROUND_Y};
pub use builder::TreeBuilder;
pub use spine::{generate_spine, SpineParams};
