//! Altitude above ground from a straight-down ray

use crate::foundation::math::{down, Vec3};
use crate::geometry::Ray;
use crate::spatial::{Octree, RayHit};

/// Nearest terrain leaf straight below `position`
pub fn ground_hit<'t>(octree: &'t Octree<'_>, position: Vec3) -> Option<RayHit<'t>> {
    octree.query_ray(&Ray::new(position, down()))
}

/// Height of `position` above the terrain directly beneath it
///
/// Measured to the first vertex stored in the nearest leaf below, so the
/// value has the resolution of the leaf size rather than of the triangles.
/// Returns `None` when no terrain lies below (off the edge of the mesh, or
/// already under the surface with nothing further down).
pub fn altitude(octree: &Octree<'_>, position: Vec3) -> Option<f32> {
    let hit = ground_hit(octree, position)?;
    let vertex = octree.vertices()[hit.first_vertex()?];
    Some(position.y - vertex.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_altitude_over_single_step() {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(4.0, 3.0, 0.0),
            Vec3::new(5.0, 3.0, 0.0),
        ];
        let octree = Octree::build(&vertices, 2);

        assert_relative_eq!(altitude(&octree, Vec3::new(0.5, 10.0, 0.0)).unwrap(), 10.0);
        assert_relative_eq!(altitude(&octree, Vec3::new(4.5, 10.0, 0.0)).unwrap(), 7.0);
    }

    #[test]
    fn test_no_ground_below() {
        let vertices = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)];
        let octree = Octree::build(&vertices, 1);

        assert!(altitude(&octree, Vec3::new(9.0, 10.0, 9.0)).is_none());
        assert!(altitude(&octree, Vec3::new(0.5, -1.0, 0.5)).is_none());
    }
}
