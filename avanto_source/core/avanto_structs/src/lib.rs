pub mod ground;
pub mod transform_3d;

pub use glam::{Mat4, Quat, Vec2, Vec3};
pub use ground::{GroundProfile, GroundStep, MAX_GROUND_CHANGES};
pub use transform_3d::Transform3D;
