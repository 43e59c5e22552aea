//! Geometric primitives shared by the octree and its callers
//!
//! Axis-aligned boxes and rays, plus the two tests every query is built on:
//! box-box overlap and the ray-box slab test.

mod aabb;
mod ray;

pub use aabb::{mesh_bounds, Aabb, OCTANT_COUNT};
pub use ray::{Ray, RaySpan};
