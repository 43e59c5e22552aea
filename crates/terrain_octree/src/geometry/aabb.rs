//! Axis-aligned bounding box

use serde::{Deserialize, Serialize};

use crate::foundation::math::{component_max, component_min, Vec3};
use crate::geometry::{Ray, RaySpan};

/// Number of child octants produced by bisecting a box on all three axes
pub const OCTANT_COUNT: usize = 8;

/// Axis-Aligned Bounding Box for spatial queries
///
/// Invariant: `min[i] <= max[i]` on every axis. Boxes are plain values and
/// never change after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from two opposite corners
    ///
    /// The corners may be given in any order; each axis is sorted so the
    /// `min <= max` invariant always holds.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: component_min(&a, &b),
            max: component_max(&a, &b),
        }
    }

    /// Create an AABB centered at a point with given half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self::new(center - extents, center + extents)
    }

    /// Tight bounds of a set of points, `None` for an empty set
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (component_min(&min, p), component_max(&max, p))
        });
        Some(Self { min, max })
    }

    /// Get the center of the AABB
    ///
    /// Stays finite for finite boxes whose corners sum past `f32::MAX`.
    pub fn center(&self) -> Vec3 {
        self.min * 0.5 + self.max * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full edge lengths along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if this AABB contains a point (boundary-inclusive)
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if `other` lies entirely inside this box
    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    /// Check if this AABB overlaps another AABB
    ///
    /// Boundary-inclusive: boxes that only touch on a face, edge or corner
    /// still overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Self {
            min: component_min(&self.min, &other.min),
            max: component_max(&self.max, &other.max),
        }
    }

    /// Translate the box by an offset
    pub fn translated(&self, offset: Vec3) -> Aabb {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Octant index (0-7) a point falls into relative to the box center
    ///
    /// A coordinate equal to the center goes to the high side. The index
    /// packs one bit per axis:
    ///
    /// ```text
    /// 0: -X, -Y, -Z    4: -X, -Y, +Z
    /// 1: +X, -Y, -Z    5: +X, -Y, +Z
    /// 2: -X, +Y, -Z    6: -X, +Y, +Z
    /// 3: +X, +Y, -Z    7: +X, +Y, +Z
    /// ```
    pub fn octant_of(&self, point: &Vec3) -> usize {
        let center = self.center();
        let x_bit = usize::from(point.x >= center.x);
        let y_bit = usize::from(point.y >= center.y);
        let z_bit = usize::from(point.z >= center.z);
        (z_bit << 2) | (y_bit << 1) | x_bit
    }

    /// Exact bisected sub-box for an octant index
    pub fn octant(&self, octant: usize) -> Aabb {
        let center = self.center();
        let pick = |bit: usize, lo: f32, mid: f32, hi: f32| {
            if octant & bit == 0 { (lo, mid) } else { (mid, hi) }
        };
        let (min_x, max_x) = pick(1, self.min.x, center.x, self.max.x);
        let (min_y, max_y) = pick(2, self.min.y, center.y, self.max.y);
        let (min_z, max_z) = pick(4, self.min.z, center.z, self.max.z);
        Self {
            min: Vec3::new(min_x, min_y, min_z),
            max: Vec3::new(max_x, max_y, max_z),
        }
    }

    /// The eight corners, indexed like octants
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// `t_min`/`t_max` clamp the ray's parametric range (use
    /// `0.0..f32::INFINITY` for a half-line). Returns the clamped entry and
    /// exit distances when the ranges overlap; a grazing hit where
    /// `entry == exit` counts.
    ///
    /// An axis with a zero direction component is treated as parallel to its
    /// slabs: the ray misses unless the origin already lies between them. No
    /// division by zero happens on that path, so a degenerate direction never
    /// produces NaN.
    pub fn intersect_ray(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<RaySpan> {
        let mut entry = t_min;
        let mut exit = t_max;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if ray.is_parallel(axis) {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv_dir = 1.0 / ray.direction[axis];
            let mut t0 = (lo - origin) * inv_dir;
            let mut t1 = (hi - origin) * inv_dir;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            entry = entry.max(t0);
            exit = exit.min(t1);
            if entry > exit {
                return None;
            }
        }

        Some(RaySpan { entry, exit })
    }
}

/// Tight bounding box of a mesh's vertices
///
/// This is the enclosing box the octree is built over. Returns `None` when
/// the mesh has no vertices.
pub fn mesh_bounds(vertices: &[Vec3]) -> Option<Aabb> {
    Aabb::from_points(vertices)
}
