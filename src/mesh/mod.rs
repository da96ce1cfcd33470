pub mod branch;
pub mod tessellator;

pub use branch::{Mesh, Vertex};
pub use tessellator::{MeshTessellator, TessellationParams, BARK_COLOR};
