//! Debug drawing primitives

use crate::foundation::math::{Vec3, Vec4};
use crate::geometry::Aabb;

/// Line segment from start to end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Start point
    pub start: Vec3,
    /// End point
    pub end: Vec3,
}

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Axis-aligned box at center with half-extents
    Box {
        center: Vec3,
        extents: Vec3,
        color: Vec4,
        wireframe: bool,
    },

    /// Line segment from start to end
    Line {
        start: Vec3,
        end: Vec3,
        color: Vec4,
    },
}

impl DebugShape {
    /// Wireframe box covering `bounds`
    pub fn wire_box(bounds: &Aabb, color: Vec4) -> Self {
        DebugShape::Box {
            center: bounds.center(),
            extents: bounds.extents(),
            color,
            wireframe: true,
        }
    }

    /// Color of the shape
    pub fn color(&self) -> Vec4 {
        match self {
            DebugShape::Box { color, .. } | DebugShape::Line { color, .. } => *color,
        }
    }

    /// Expand into line segments for renderers that only draw lines
    pub fn to_lines(&self) -> Vec<LineSegment> {
        match self {
            DebugShape::Box { center, extents, .. } => {
                wireframe_lines(&Aabb::from_center_extents(*center, *extents)).to_vec()
            }
            DebugShape::Line { start, end, .. } => vec![LineSegment { start: *start, end: *end }],
        }
    }
}

/// The twelve edges of a box
pub fn wireframe_lines(bounds: &Aabb) -> [LineSegment; 12] {
    let c = bounds.corners();
    // Corner pairs differing in exactly one axis bit
    const EDGES: [(usize, usize); 12] = [
        (0, 1), (2, 3), (4, 5), (6, 7), // along X
        (0, 2), (1, 3), (4, 6), (5, 7), // along Y
        (0, 4), (1, 5), (2, 6), (3, 7), // along Z
    ];
    EDGES.map(|(a, b)| LineSegment { start: c[a], end: c[b] })
}
