//! Picking a terrain vertex with a view ray

use crate::foundation::math::Vec3;
use crate::geometry::Ray;
use crate::spatial::Octree;

/// Terrain vertex selected by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickedVertex {
    /// Index into the mesh vertex buffer
    pub index: usize,
    /// Position of the vertex
    pub position: Vec3,
    /// Distance along the ray to the leaf holding the vertex
    pub distance: f32,
}

/// Pick the vertex represented by the nearest leaf along `ray`
///
/// `ray` is usually built from the camera position through the unprojected
/// cursor position with [`Ray::through`]. The first vertex stored in the hit
/// leaf stands in for the leaf.
pub fn pick_vertex(octree: &Octree<'_>, ray: &Ray) -> Option<PickedVertex> {
    let hit = octree.query_ray(ray)?;
    let index = hit.first_vertex()?;
    Some(PickedVertex {
        index,
        position: octree.vertices()[index],
        distance: hit.distance,
    })
}
