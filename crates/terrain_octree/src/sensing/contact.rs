//! Broad-phase contact classification
//!
//! The number of terrain leaves a body's bounding box overlaps is used as a
//! rough proxy for how deep it sits in the terrain: a few leaves means the
//! box is grazing the surface, many means it has sunk in. The cut-off is a
//! tuning value, not a geometric fact, so it is configurable.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::geometry::Aabb;
use crate::spatial::Octree;

/// Overlapping leaf count at which a box counts as penetrating
pub const DEFAULT_PENETRATION_LEAF_COUNT: usize = 10;

/// Contact classification settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Minimum overlapping leaves for [`ContactState::Penetrating`]
    pub penetration_leaf_count: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            penetration_leaf_count: DEFAULT_PENETRATION_LEAF_COUNT,
        }
    }
}

impl ContactConfig {
    /// Check the values loaded from a configuration file
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.penetration_leaf_count == 0 {
            return Err(ConfigError::Invalid(
                "contact.penetration_leaf_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How a body's bounding box relates to the terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactState {
    /// No terrain leaf overlaps the box
    Clear,
    /// Some leaves overlap, fewer than the penetration count
    Touching,
    /// At least the penetration count of leaves overlap
    Penetrating,
}

/// Result of one contact probe
#[derive(Debug, Clone, PartialEq)]
pub struct ContactReport {
    /// Classification of the overlap
    pub state: ContactState,
    /// Bounds of the overlapping leaves (for debug drawing)
    pub leaf_bounds: Vec<Aabb>,
}

impl ContactReport {
    /// Number of overlapping leaves
    pub fn leaf_count(&self) -> usize {
        self.leaf_bounds.len()
    }

    /// Whether the body should be treated as colliding
    pub fn is_penetrating(&self) -> bool {
        self.state == ContactState::Penetrating
    }
}

/// Classifies a body's bounding box against terrain every frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactProbe {
    config: ContactConfig,
}

impl ContactProbe {
    /// Create a probe with the given settings
    pub fn new(config: ContactConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Classify a leaf count
    pub fn state_for(&self, leaf_count: usize) -> ContactState {
        if leaf_count == 0 {
            ContactState::Clear
        } else if leaf_count < self.config.penetration_leaf_count {
            ContactState::Touching
        } else {
            ContactState::Penetrating
        }
    }

    /// Run the broad-phase query for `bounds` and classify the result
    pub fn classify(&self, octree: &Octree<'_>, bounds: &Aabb) -> ContactReport {
        let leaf_bounds = octree.query_box(bounds);
        let state = self.state_for(leaf_bounds.len());
        log::trace!("Contact probe: {} leaves, {:?}", leaf_bounds.len(), state);
        ContactReport { state, leaf_bounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    fn grid() -> Vec<Vec3> {
        let mut vertices = Vec::new();
        for x in 0..16 {
            for z in 0..16 {
                vertices.push(Vec3::new(x as f32, 0.0, z as f32));
            }
        }
        vertices
    }

    #[test]
    fn test_state_thresholds() {
        let probe = ContactProbe::new(ContactConfig { penetration_leaf_count: 3 });
        assert_eq!(probe.state_for(0), ContactState::Clear);
        assert_eq!(probe.state_for(2), ContactState::Touching);
        assert_eq!(probe.state_for(3), ContactState::Penetrating);
        assert_eq!(probe.state_for(30), ContactState::Penetrating);
    }

    #[test]
    fn test_classify_against_terrain() {
        let vertices = grid();
        let octree = Octree::build(&vertices, 1);
        let probe = ContactProbe::new(ContactConfig { penetration_leaf_count: 10 });

        let above = Aabb::new(Vec3::new(4.0, 2.0, 4.0), Vec3::new(6.0, 3.0, 6.0));
        let report = probe.classify(&octree, &above);
        assert_eq!(report.state, ContactState::Clear);
        assert_eq!(report.leaf_count(), 0);

        let grazing = Aabb::new(Vec3::new(4.2, 0.0, 4.2), Vec3::new(4.4, 1.0, 4.4));
        let report = probe.classify(&octree, &grazing);
        assert_eq!(report.state, ContactState::Touching);

        let sunk = Aabb::new(Vec3::new(2.0, -1.0, 2.0), Vec3::new(8.0, 1.0, 8.0));
        let report = probe.classify(&octree, &sunk);
        assert!(report.is_penetrating());
        assert!(report.leaf_count() >= 10);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        assert!(ContactConfig { penetration_leaf_count: 0 }.validate().is_err());
        assert!(ContactConfig::default().validate().is_ok());
    }
}
