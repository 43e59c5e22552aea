//! Octree nodes and their arena handles

use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, OCTANT_COUNT};

/// Handle of a node inside an [`Octree`](crate::spatial::Octree) arena
///
/// Only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// The root is always the first node allocated
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Single node in the octree hierarchy
///
/// A node is a leaf iff every child slot is empty. Only leaves carry vertex
/// indices; internal nodes always have an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OctreeNode {
    /// World-space bounds of this node
    pub bounds: Aabb,

    /// Child slots indexed by octant, `None` for octants without vertices
    pub children: [Option<NodeId>; OCTANT_COUNT],

    /// Indices into the mesh vertex buffer (leaves only, input order)
    pub vertex_indices: Vec<usize>,

    /// Depth in the tree (0 = root)
    pub depth: u32,
}

impl OctreeNode {
    /// Create a new leaf node
    pub fn leaf(bounds: Aabb, depth: u32, vertex_indices: Vec<usize>) -> Self {
        Self {
            bounds,
            children: [None; OCTANT_COUNT],
            vertex_indices,
            depth,
        }
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Whether this node covers no vertices at all
    ///
    /// Only the root of a tree built from an empty mesh is ever empty.
    pub fn is_empty(&self) -> bool {
        self.is_leaf() && self.vertex_indices.is_empty()
    }

    /// Ids of the present children, in octant order
    pub fn child_ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.children.iter().flatten().copied()
    }

    /// Present children paired with their octant index
    pub fn octants(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(octant, child)| child.map(|id| (octant, id)))
    }
}
