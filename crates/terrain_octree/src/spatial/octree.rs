//! Octree spatial partitioning structure
//!
//! Divides the bounding box of a terrain mesh into hierarchical regions.
//! Built in one pass from the full vertex set: a node subdivides into up to
//! eight octants while it holds more vertices than the leaf threshold, and
//! only octants that actually receive vertices are allocated.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::foundation::math::Vec3;
use crate::geometry::{Aabb, OCTANT_COUNT};
use crate::spatial::{NodeId, OctreeNode};

/// Default maximum vertices per leaf
pub const DEFAULT_LEAF_THRESHOLD: usize = 20;

/// Default maximum subdivision depth
pub const DEFAULT_MAX_DEPTH: u32 = 12;

/// Upper bound on `max_depth`, whatever the configuration asks for
pub const MAX_DEPTH_LIMIT: u32 = 24;

/// Configuration for octree construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Maximum vertices per node before subdivision
    pub leaf_threshold: usize,

    /// Maximum subdivision depth
    ///
    /// Guarantees termination on meshes with many duplicate vertices: a node
    /// at this depth becomes a leaf regardless of its vertex count.
    pub max_depth: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            leaf_threshold: DEFAULT_LEAF_THRESHOLD,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl OctreeConfig {
    /// Config with the given leaf threshold and the default depth cap
    pub fn with_leaf_threshold(leaf_threshold: usize) -> Self {
        Self {
            leaf_threshold,
            ..Self::default()
        }
    }

    /// Check the values loaded from a configuration file
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leaf_threshold == 0 {
            return Err(ConfigError::Invalid("octree.leaf_threshold must be at least 1".to_string()));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "octree.max_depth {} exceeds the limit of {}",
                self.max_depth, MAX_DEPTH_LIMIT
            )));
        }
        Ok(())
    }

    fn effective_max_depth(&self) -> u32 {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }
}

/// Summary of a built tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OctreeStats {
    /// Vertices indexed by the tree
    pub vertex_count: usize,
    /// Nodes allocated in the arena
    pub node_count: usize,
    /// Leaves that hold at least one vertex
    pub leaf_count: usize,
    /// Deepest node depth
    pub max_depth: u32,
    /// Leaves that stopped at the depth cap while still over the threshold
    pub saturated_leaves: usize,
}

/// Octree spatial partitioning structure
///
/// Nodes live in a flat arena in depth-first pre-order; the root is always
/// [`NodeId::ROOT`]. The vertex buffer is borrowed from the caller and never
/// copied or modified. There is no mutation API: rebuilding means building a
/// new tree.
#[derive(Debug, Clone)]
pub struct Octree<'v> {
    /// Node arena, pre-order
    nodes: Vec<OctreeNode>,

    /// Mesh vertices the leaf indices refer to
    vertices: &'v [Vec3],

    /// Configuration used for the build
    config: OctreeConfig,
}

impl<'v> Octree<'v> {
    /// Build an octree over `vertices` with the given leaf threshold
    pub fn build(vertices: &'v [Vec3], leaf_threshold: usize) -> Self {
        Self::build_with_config(vertices, OctreeConfig::with_leaf_threshold(leaf_threshold))
    }

    /// Build an octree over `vertices`
    ///
    /// The root covers the tight bounding box of the vertices. An empty
    /// vertex set produces a tree whose root is an empty leaf; every query on
    /// it returns nothing.
    pub fn build_with_config(vertices: &'v [Vec3], config: OctreeConfig) -> Self {
        let mut octree = Self {
            nodes: Vec::new(),
            vertices,
            config,
        };

        let Some(bounds) = Aabb::from_points(vertices) else {
            log::debug!("Building octree over an empty mesh");
            octree.nodes.push(OctreeNode::leaf(Aabb::new(Vec3::zeros(), Vec3::zeros()), 0, Vec::new()));
            return octree;
        };

        log::debug!(
            "Building octree over {} vertices, bounds {:?}..{:?}, leaf threshold {}, max depth {}",
            vertices.len(),
            bounds.min,
            bounds.max,
            config.leaf_threshold,
            config.effective_max_depth()
        );

        octree.subdivide(bounds, (0..vertices.len()).collect(), 0);

        let stats = octree.stats();
        log::info!(
            "Built octree: {} vertices, {} nodes, {} leaves, depth {}",
            stats.vertex_count,
            stats.node_count,
            stats.leaf_count,
            stats.max_depth
        );
        if stats.saturated_leaves > 0 {
            log::debug!(
                "{} leaves reached the depth cap above the leaf threshold",
                stats.saturated_leaves
            );
        }

        octree
    }

    /// Create the node for `bounds` and, if needed, its subtree
    ///
    /// Nodes are pushed before their children so the arena stays in
    /// pre-order. A vertex goes to the high side of an axis when its
    /// coordinate is `>=` the center (see [`Aabb::octant_of`]).
    fn subdivide(&mut self, bounds: Aabb, indices: Vec<usize>, depth: u32) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());

        if indices.len() <= self.config.leaf_threshold || depth >= self.config.effective_max_depth() {
            self.nodes.push(OctreeNode::leaf(bounds, depth, indices));
            return id;
        }

        self.nodes.push(OctreeNode::leaf(bounds, depth, Vec::new()));

        let mut buckets: [Vec<usize>; OCTANT_COUNT] = Default::default();
        for index in indices {
            buckets[bounds.octant_of(&self.vertices[index])].push(index);
        }

        let mut children = [None; OCTANT_COUNT];
        for (octant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            children[octant] = Some(self.subdivide(bounds.octant(octant), bucket, depth + 1));
        }

        self.nodes[id.index()].children = children;
        id
    }

    /// Root node
    pub fn root(&self) -> &OctreeNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Bounds of the whole tree (the mesh's bounding box)
    pub fn bounds(&self) -> Aabb {
        self.root().bounds
    }

    /// Look up a node by id
    pub fn get(&self, id: NodeId) -> Option<&OctreeNode> {
        self.nodes.get(id.index())
    }

    /// All nodes in depth-first pre-order
    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    /// Mesh vertices the tree indexes
    pub fn vertices(&self) -> &'v [Vec3] {
        self.vertices
    }

    /// Configuration used for the build
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Whether the tree indexes no vertices
    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    /// Vertices of a leaf as `(index, position)` pairs, in stored order
    pub fn leaf_vertices<'a>(&'a self, node: &'a OctreeNode) -> impl Iterator<Item = (usize, &'v Vec3)> + 'a {
        let vertices = self.vertices;
        node.vertex_indices.iter().map(move |&i| (i, &vertices[i]))
    }

    /// Gather node, leaf and depth counts
    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats {
            node_count: self.nodes.len(),
            ..OctreeStats::default()
        };
        for node in &self.nodes {
            stats.max_depth = stats.max_depth.max(node.depth);
            if node.is_leaf() && !node.vertex_indices.is_empty() {
                stats.leaf_count += 1;
                stats.vertex_count += node.vertex_indices.len();
                if node.vertex_indices.len() > self.config.leaf_threshold {
                    stats.saturated_leaves += 1;
                }
            }
        }
        stats
    }
}

impl Index<NodeId> for Octree<'_> {
    type Output = OctreeNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_corners() -> Vec<Vec3> {
        Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)).corners().to_vec()
    }

    #[test]
    fn test_octree_small_mesh_is_single_leaf() {
        let vertices = cube_corners();
        let octree = Octree::build(&vertices, 8);

        assert!(octree.root().is_leaf());
        assert_eq!(octree.root().vertex_indices, (0..8).collect::<Vec<_>>());
        assert_eq!(octree.bounds(), Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_octree_subdivision() {
        let vertices = cube_corners();
        let octree = Octree::build(&vertices, 1);

        // Each corner lands in its own octant
        assert!(!octree.root().is_leaf());
        assert!(octree.root().vertex_indices.is_empty());
        assert_eq!(octree.nodes().len(), 9);
        for (octant, child) in octree.root().octants() {
            let node = &octree[child];
            assert!(node.is_leaf());
            assert_eq!(node.depth, 1);
            assert_eq!(node.vertex_indices, vec![octant]);
            assert_eq!(node.bounds, octree.bounds().octant(octant));
        }
    }

    #[test]
    fn test_empty_octants_not_allocated() {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.1, 0.1, 0.1),
            Vec3::new(4.0, 4.0, 4.0),
        ];
        let octree = Octree::build(&vertices, 1);

        let present: Vec<_> = octree.root().octants().map(|(octant, _)| octant).collect();
        assert_eq!(present, vec![0, 7]);
    }

    #[test]
    fn test_duplicates_stop_at_depth_cap() {
        let vertices = vec![Vec3::new(3.0, 3.0, 3.0); 50];
        let config = OctreeConfig { leaf_threshold: 4, max_depth: 5 };
        let octree = Octree::build_with_config(&vertices, config);

        let stats = octree.stats();
        assert_eq!(stats.max_depth, 5);
        assert_eq!(stats.leaf_count, 1);
        assert_eq!(stats.saturated_leaves, 1);
        assert_eq!(stats.vertex_count, 50);
    }

    #[test]
    fn test_depth_cap_is_clamped() {
        let vertices = vec![Vec3::zeros(); 3];
        let config = OctreeConfig { leaf_threshold: 1, max_depth: 1000 };
        let octree = Octree::build_with_config(&vertices, config);

        assert_eq!(octree.stats().max_depth, MAX_DEPTH_LIMIT);
    }

    #[test]
    fn test_empty_mesh() {
        let vertices: Vec<Vec3> = Vec::new();
        let octree = Octree::build(&vertices, DEFAULT_LEAF_THRESHOLD);

        assert!(octree.is_empty());
        assert_eq!(octree.nodes().len(), 1);
        assert_eq!(octree.stats().leaf_count, 0);
    }

    #[test]
    fn test_leaf_vertices_follow_buffer() {
        let vertices = cube_corners();
        let octree = Octree::build(&vertices, 1);
        for node in octree.nodes().iter().filter(|n| n.is_leaf()) {
            for (index, position) in octree.leaf_vertices(node) {
                assert_eq!(*position, vertices[index]);
                assert!(node.bounds.contains_point(position));
            }
        }
    }

    #[test]
    fn test_octree_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Octree<'static>>();
    }

    #[test]
    fn test_config_validation() {
        assert!(OctreeConfig::default().validate().is_ok());
        assert!(OctreeConfig::with_leaf_threshold(0).validate().is_err());
        assert!(OctreeConfig { leaf_threshold: 1, max_depth: MAX_DEPTH_LIMIT + 1 }.validate().is_err());
    }
}
