//! Rays for altitude sensing and picking

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// A ray for ray casting and picking
///
/// The direction is expected to be unit length. [`Ray::new`] stores it as
/// given; queries never renormalize, so distances are only meaningful in
/// world units when the caller passes a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (should be normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Creates a ray through `target`, normalizing the direction
    ///
    /// Returns `None` when `target` coincides with `origin`.
    pub fn through(origin: Vec3, target: Vec3) -> Option<Self> {
        let direction = (target - origin).try_normalize(f32::EPSILON)?;
        Some(Self { origin, direction })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Whether the ray runs parallel to the slabs of `axis`
    ///
    /// A NaN component is treated as parallel as well so that it cannot
    /// leak into slab distances.
    pub fn is_parallel(&self, axis: usize) -> bool {
        let d = self.direction[axis];
        d == 0.0 || d.is_nan()
    }
}

/// Parametric interval along a ray that lies inside a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySpan {
    /// Distance at which the ray enters the box (clamped to the query range)
    pub entry: f32,
    /// Distance at which the ray leaves the box (clamped to the query range)
    pub exit: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_keeps_direction() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(ray.direction, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_through_normalizes() {
        let ray = Ray::through(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 5.0)).unwrap();
        assert_relative_eq!(ray.direction, Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(ray.point_at(4.0), Vec3::new(1.0, 1.0, 5.0));
        assert!(Ray::through(Vec3::zeros(), Vec3::zeros()).is_none());
    }

    #[test]
    fn test_parallel_axes() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, -1.0, f32::NAN));
        assert!(ray.is_parallel(0));
        assert!(!ray.is_parallel(1));
        assert!(ray.is_parallel(2));
    }
}
