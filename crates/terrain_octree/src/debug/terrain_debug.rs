//! Terrain octree debug visualization
//!
//! Exports the tree's leaves, a single level, or the leaves touched by a
//! contact probe as wireframe boxes.

use crate::debug::draw::DebugShape;
use crate::foundation::math::Vec4;
use crate::sensing::ContactReport;
use crate::spatial::Octree;

/// Per-depth colors, cycled for deep trees
const DEPTH_PALETTE: [[f32; 4]; 6] = [
    [1.0, 1.0, 1.0, 0.6], // white
    [1.0, 0.2, 0.2, 0.6], // red
    [0.2, 1.0, 0.2, 0.6], // green
    [0.3, 0.5, 1.0, 0.6], // blue
    [1.0, 1.0, 0.2, 0.6], // yellow
    [1.0, 0.3, 1.0, 0.6], // magenta
];

/// Color used for nodes at `depth`
pub fn depth_color(depth: u32) -> Vec4 {
    let [r, g, b, a] = DEPTH_PALETTE[depth as usize % DEPTH_PALETTE.len()];
    Vec4::new(r, g, b, a)
}

/// Color scheme for terrain visualization
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainDebugColors {
    /// Leaves overlapped by a probe that is only touching
    pub contact_touching: Vec4,

    /// Leaves overlapped by a probe that is penetrating
    pub contact_penetrating: Vec4,
}

impl Default for TerrainDebugColors {
    fn default() -> Self {
        Self {
            contact_touching: Vec4::new(1.0, 0.8, 0.0, 0.8),    // Amber
            contact_penetrating: Vec4::new(1.0, 0.0, 0.0, 0.9), // Red
        }
    }
}

/// Collects debug shapes for an octree according to display toggles
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainDebugExporter {
    colors: TerrainDebugColors,

    /// Show every leaf, colored by depth
    pub show_leaves: bool,

    /// Show all nodes at this depth instead of the leaves
    pub show_level: Option<u32>,

    /// Show the leaves reported by contact probes
    pub show_contacts: bool,
}

impl Default for TerrainDebugExporter {
    fn default() -> Self {
        Self {
            colors: TerrainDebugColors::default(),
            show_leaves: false,
            show_level: None,
            show_contacts: true,
        }
    }
}

impl TerrainDebugExporter {
    /// Create an exporter with default toggles
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: TerrainDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Wireframes of every leaf
    pub fn leaf_shapes(octree: &Octree<'_>) -> Vec<DebugShape> {
        octree
            .leaves()
            .map(|leaf| DebugShape::wire_box(&leaf.bounds, depth_color(leaf.depth)))
            .collect()
    }

    /// Wireframes of every node at `depth`
    pub fn level_shapes(octree: &Octree<'_>, depth: u32) -> Vec<DebugShape> {
        octree
            .nodes_at_depth(depth)
            .into_iter()
            .map(|node| DebugShape::wire_box(&node.bounds, depth_color(depth)))
            .collect()
    }

    /// Wireframes of the leaves a contact probe overlapped
    pub fn contact_shapes(&self, report: &ContactReport) -> Vec<DebugShape> {
        let color = if report.is_penetrating() {
            self.colors.contact_penetrating
        } else {
            self.colors.contact_touching
        };
        report
            .leaf_bounds
            .iter()
            .map(|bounds| DebugShape::wire_box(bounds, color))
            .collect()
    }

    /// Everything enabled by the toggles for one frame
    ///
    /// A selected level replaces the leaf view, matching a viewer that
    /// switches between "leaves" and "level N" modes.
    pub fn frame_shapes(&self, octree: &Octree<'_>, contacts: Option<&ContactReport>) -> Vec<DebugShape> {
        let mut shapes = match self.show_level {
            Some(depth) => Self::level_shapes(octree, depth),
            None if self.show_leaves => Self::leaf_shapes(octree),
            None => Vec::new(),
        };
        if self.show_contacts {
            if let Some(report) = contacts {
                shapes.extend(self.contact_shapes(report));
            }
        }
        shapes
    }
}
