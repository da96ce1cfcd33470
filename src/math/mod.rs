pub mod vec3;
pub mod frame;

pub use vec3::Vec3;
pub use frame::Frame;
