//! Spatial partitioning data structures
//!
//! A static octree built once over a terrain mesh's vertices. It answers
//! broad-phase box overlap queries and nearest-hit ray queries, and can
//! enumerate its leaves for debug drawing.

mod node;
mod octree;
mod query;
mod snapshot;
mod traversal;

#[cfg(test)]
mod tests;

pub use node::{NodeId, OctreeNode};
pub use octree::{Octree, OctreeConfig, OctreeStats, DEFAULT_LEAF_THRESHOLD, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use query::RayHit;
pub use snapshot::{OctreeError, OctreeSnapshot};
pub use traversal::Leaves;
