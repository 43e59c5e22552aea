//! Leaf and level enumeration (for visualization)

use crate::geometry::Aabb;
use crate::spatial::{NodeId, Octree, OctreeNode};

/// Depth-first iterator over the non-empty leaves of an octree
///
/// Created by [`Octree::leaves`]. The tree never changes after it is built,
/// so a fresh iterator always yields the same leaves in the same order.
#[derive(Debug, Clone)]
pub struct Leaves<'t> {
    nodes: &'t [OctreeNode],
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Leaves<'t> {
    type Item = &'t OctreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = &self.nodes[id.index()];
            if node.is_leaf() {
                if node.vertex_indices.is_empty() {
                    continue;
                }
                return Some(node);
            }
            // Reversed so the lowest octant is popped first
            self.stack.extend(node.child_ids().rev());
        }
        None
    }
}

impl Octree<'_> {
    /// Every leaf that holds vertices, depth-first
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            nodes: self.nodes(),
            stack: vec![NodeId::ROOT],
        }
    }

    /// Bounds of every leaf, in the same order as [`Octree::leaves`]
    pub fn leaf_bounds(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.leaves().map(|leaf| leaf.bounds)
    }

    /// All nodes at a given depth, depth-first
    ///
    /// Lets a viewer draw the tree one level at a time. Empty for depths
    /// the tree never reaches.
    pub fn nodes_at_depth(&self, depth: u32) -> Vec<&OctreeNode> {
        // The arena is in pre-order, so a linear scan is depth-first order
        self.nodes()
            .iter()
            .filter(|node| node.depth == depth && !node.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::foundation::math::Vec3;
    use crate::spatial::Octree;

    #[test]
    fn test_leaves_match_arena_leaves() {
        let vertices: Vec<Vec3> = (0..40)
            .map(|i| {
                let f = i as f32;
                Vec3::new((f * 1.7) % 9.0, (f * 0.3) % 2.0, (f * 2.9) % 7.0)
            })
            .collect();
        let octree = Octree::build(&vertices, 3);

        let iterated: Vec<_> = octree.leaves().collect();
        let scanned: Vec<_> = octree.nodes().iter().filter(|n| n.is_leaf()).collect();
        assert_eq!(iterated, scanned);
    }

    #[test]
    fn test_nodes_at_depth() {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(8.0, 8.0, 8.0),
        ];
        let octree = Octree::build(&vertices, 1);

        assert_eq!(octree.nodes_at_depth(0).len(), 1);
        assert_eq!(octree.nodes_at_depth(1).len(), 2);
        assert!(octree.nodes_at_depth(40).is_empty());
        for node in octree.nodes_at_depth(2) {
            assert_eq!(node.depth, 2);
        }
    }

    #[test]
    fn test_leaves_of_empty_tree() {
        let vertices: Vec<Vec3> = Vec::new();
        let octree = Octree::build(&vertices, 1);
        assert_eq!(octree.leaves().count(), 0);
    }
}
