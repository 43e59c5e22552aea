//! Box and ray queries against a built octree

use crate::geometry::{Aabb, Ray, OCTANT_COUNT};
use crate::spatial::{NodeId, Octree, OctreeNode};

/// Nearest leaf hit along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<'t> {
    /// Arena id of the hit leaf
    pub node: NodeId,
    /// The hit leaf itself
    pub leaf: &'t OctreeNode,
    /// Distance along the ray at which it enters the leaf's bounds
    pub distance: f32,
}

impl RayHit<'_> {
    /// First vertex index stored in the hit leaf
    ///
    /// Leaves returned by a ray query always hold at least one vertex.
    pub fn first_vertex(&self) -> Option<usize> {
        self.leaf.vertex_indices.first().copied()
    }
}

impl Octree<'_> {
    /// Bounds of every leaf overlapping `query`
    ///
    /// Broad-phase only: a leaf counts as soon as its box touches the query
    /// box, whatever the triangles inside look like. Callers that want a
    /// "colliding" decision compare the result length against their own
    /// threshold (see [`ContactProbe`](crate::sensing::ContactProbe)).
    pub fn query_box(&self, query: &Aabb) -> Vec<Aabb> {
        self.overlapping_leaves(query)
            .into_iter()
            .map(|id| self[id].bounds)
            .collect()
    }

    /// Ids of every leaf overlapping `query`, in depth-first order
    pub fn overlapping_leaves(&self, query: &Aabb) -> Vec<NodeId> {
        let mut results = Vec::new();
        self.collect_overlapping(NodeId::ROOT, query, &mut results);
        results
    }

    fn collect_overlapping(&self, id: NodeId, query: &Aabb, results: &mut Vec<NodeId>) {
        let node = &self[id];

        // Prune the whole subtree
        if !node.bounds.overlaps(query) {
            return;
        }

        if node.is_leaf() {
            if !node.vertex_indices.is_empty() {
                results.push(id);
            }
            return;
        }

        for child in node.child_ids() {
            self.collect_overlapping(child, query, results);
        }
    }

    /// Nearest leaf along `ray`, if any
    ///
    /// Only the forward half of the ray (`t >= 0`) is considered; a ray
    /// starting inside a leaf hits it at distance 0. The result is the leaf
    /// with the smallest entry distance over the whole tree, not the first
    /// one reached during traversal. On exact ties the leaf visited first
    /// wins (children are visited by entry distance, then octant index).
    pub fn query_ray(&self, ray: &Ray) -> Option<RayHit<'_>> {
        let span = self.root().bounds.intersect_ray(ray, 0.0, f32::INFINITY)?;

        let mut best = None;
        self.nearest_leaf(NodeId::ROOT, span.entry, ray, &mut best);

        best.map(|(node, distance)| RayHit {
            node,
            leaf: &self[node],
            distance,
        })
    }

    /// Descend from `id`, whose box the ray enters at `entry`
    ///
    /// `best` holds the closest leaf found so far anywhere in the search and
    /// bounds the slab tests of every remaining subtree.
    fn nearest_leaf(&self, id: NodeId, entry: f32, ray: &Ray, best: &mut Option<(NodeId, f32)>) {
        let node = &self[id];

        if node.is_leaf() {
            let closer = best.map_or(true, |(_, distance)| entry < distance);
            if closer && !node.vertex_indices.is_empty() {
                *best = Some((id, entry));
            }
            return;
        }

        let limit = best.map_or(f32::INFINITY, |(_, distance)| distance);
        let mut candidates = [(0.0_f32, NodeId::ROOT); OCTANT_COUNT];
        let mut count = 0;
        for child in node.child_ids() {
            if let Some(span) = self[child].bounds.intersect_ray(ray, 0.0, limit) {
                candidates[count] = (span.entry, child);
                count += 1;
            }
        }

        // Near children first so that their hits tighten the bound early
        let candidates = &mut candidates[..count];
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        for &(child_entry, child) in candidates.iter() {
            if best.is_some_and(|(_, distance)| child_entry > distance) {
                break;
            }
            self.nearest_leaf(child, child_entry, ray, best);
        }
    }
}
