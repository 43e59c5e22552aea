//! Debug geometry export
//!
//! Turns octree structure and query results into renderer-agnostic shapes.
//! Nothing here draws; a renderer consumes the shapes.

pub mod draw;
pub mod terrain_debug;

pub use draw::{wireframe_lines, DebugShape, LineSegment};
pub use terrain_debug::{depth_color, TerrainDebugColors, TerrainDebugExporter};
