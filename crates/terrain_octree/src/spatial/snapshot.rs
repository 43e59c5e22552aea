//! Structural snapshots of a built tree
//!
//! A snapshot is the node arena plus the build parameters, detached from the
//! vertex buffer. It serializes to RON for debugging and golden comparisons.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spatial::{Octree, OctreeConfig, OctreeNode};

/// Errors from snapshot serialization
#[derive(Error, Debug)]
pub enum OctreeError {
    /// Snapshot could not be written
    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] ron::Error),

    /// Snapshot text could not be read back
    #[error("Snapshot parse failed: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Owned copy of an octree's structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OctreeSnapshot {
    /// Parameters the tree was built with
    pub config: OctreeConfig,
    /// Length of the vertex buffer the indices refer to
    pub vertex_count: usize,
    /// Node arena in depth-first pre-order
    pub nodes: Vec<OctreeNode>,
}

impl OctreeSnapshot {
    /// Serialize as pretty-printed RON
    pub fn to_ron(&self) -> Result<String, OctreeError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Parse a snapshot written by [`OctreeSnapshot::to_ron`]
    pub fn from_ron(text: &str) -> Result<Self, OctreeError> {
        Ok(ron::from_str(text)?)
    }
}

impl Octree<'_> {
    /// Copy the tree structure out of the index
    pub fn snapshot(&self) -> OctreeSnapshot {
        OctreeSnapshot {
            config: *self.config(),
            vertex_count: self.vertices().len(),
            nodes: self.nodes().to_vec(),
        }
    }

    /// Tree structure as pretty-printed RON
    pub fn to_ron(&self) -> Result<String, OctreeError> {
        self.snapshot().to_ron()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_snapshot_survives_ron() {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 1.0, 2.0),
            Vec3::new(-4.0, 2.5, 1.0),
        ];
        let octree = Octree::build(&vertices, 1);

        let text = octree.to_ron().unwrap();
        let parsed = OctreeSnapshot::from_ron(&text).unwrap();
        assert_eq!(parsed, octree.snapshot());
        assert_eq!(parsed.vertex_count, 3);
    }

    #[test]
    fn test_bad_snapshot_text() {
        assert!(matches!(OctreeSnapshot::from_ron("(nodes: oops"), Err(OctreeError::Parse(_))));
    }
}
