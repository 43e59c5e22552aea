//! Math utilities and types
//!
//! Vertex positions and directions share nalgebra's `Vector3<f32>`.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (RGBA colors in debug export)
pub type Vec4 = nalgebra::Vector4<f32>;

/// Straight down in world space (negative Y), the altimeter's ray direction
pub fn down() -> Vec3 {
    -Vec3::y()
}

/// Component-wise minimum of two vectors
pub fn component_min(a: &Vec3, b: &Vec3) -> Vec3 {
    Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

/// Component-wise maximum of two vectors
pub fn component_max(a: &Vec3, b: &Vec3) -> Vec3 {
    Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}
