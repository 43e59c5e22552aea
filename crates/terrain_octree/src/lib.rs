//! # Terrain Octree
//!
//! A static octree over the vertices of a terrain mesh, built once at level
//! load and queried every frame.
//!
//! ## Features
//!
//! - **Broad-phase collision**: which terrain leaves overlap a moving body's
//!   bounding box
//! - **Nearest-hit rays**: the closest leaf along a ray, for altimeters and
//!   mouse picking
//! - **Debug export**: leaf and level wireframes for an external renderer
//! - **Configuration**: TOML/RON files for build and contact parameters
//!
//! ## Quick Start
//!
//! ```rust
//! use terrain_octree::prelude::*;
//!
//! let vertices: Vec<Vec3> = (0..=10)
//!     .flat_map(|x| (0..=10).map(move |z| Vec3::new(x as f32, 0.0, z as f32)))
//!     .collect();
//!
//! let octree = Octree::build(&vertices, 20);
//!
//! // Altitude of a body hovering above the plane
//! let height = altitude(&octree, Vec3::new(5.0, 3.0, 5.0));
//! assert_eq!(height, Some(3.0));
//!
//! // Broad-phase contact of its bounding box
//! let probe = ContactProbe::default();
//! let body = Aabb::from_center_extents(Vec3::new(5.0, 0.5, 5.0), Vec3::new(0.5, 0.5, 0.5));
//! let report = probe.classify(&octree, &body);
//! assert_ne!(report.state, ContactState::Clear);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod geometry;
pub mod spatial;
pub mod sensing;
pub mod debug;

/// Common imports for users of the index
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, TerrainConfig},
        foundation::math::Vec3,
        geometry::{mesh_bounds, Aabb, Ray},
        sensing::{altitude, pick_vertex, ContactConfig, ContactProbe, ContactReport, ContactState},
        spatial::{NodeId, Octree, OctreeConfig, OctreeNode, RayHit},
    };
}
