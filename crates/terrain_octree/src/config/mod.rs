//! Configuration system
//!
//! Any `Serialize + Deserialize + Default` type can be loaded from and saved
//! to `.toml` or `.ron` files; the format is picked from the file extension.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

use crate::sensing::ContactConfig;
use crate::spatial::OctreeConfig;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check values that the type system cannot express
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Parse configuration from a string in the given format
    fn from_str_as(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Render configuration as a string in the given format
    fn to_string_as(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string())),
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading {:?} configuration from {}", format, path.display());
        Self::from_str_as(&contents, format)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.to_string_as(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document
    Toml,
    /// Rusty Object Notation
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Terrain collision settings as stored on disk
///
/// ```toml
/// [octree]
/// leaf_threshold = 20
/// max_depth = 12
///
/// [contact]
/// penetration_leaf_count = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Octree build parameters
    pub octree: OctreeConfig,
    /// Broad-phase contact classification
    pub contact: ContactConfig,
}

impl Config for TerrainConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.octree.validate()?;
        self.contact.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = TerrainConfig::default();
        config.octree.leaf_threshold = 4;
        config.contact.penetration_leaf_count = 3;

        let text = config.to_string_as(ConfigFormat::Toml).unwrap();
        let parsed = TerrainConfig::from_str_as(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = TerrainConfig::from_str_as("[octree]\nleaf_threshold = 5\n", ConfigFormat::Toml).unwrap();
        assert_eq!(parsed.octree.leaf_threshold, 5);
        assert_eq!(parsed.octree.max_depth, OctreeConfig::default().max_depth);
        assert_eq!(parsed.contact, ContactConfig::default());
    }

    #[test]
    fn test_ron_parse() {
        let text = "(octree: (leaf_threshold: 8, max_depth: 6), contact: (penetration_leaf_count: 2))";
        let parsed = TerrainConfig::from_str_as(text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed.octree.max_depth, 6);
        assert_eq!(parsed.contact.penetration_leaf_count, 2);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = TerrainConfig::from_str_as("[octree]\nleaf_threshold = 0\n", ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = TerrainConfig::from_str_as("[octree]\nmax_depth = 99\n", ConfigFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("terrain.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a/b/terrain.ron")).unwrap(), ConfigFormat::Ron);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("terrain.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TerrainConfig::default();
        config.octree.max_depth = 7;
        config.contact.penetration_leaf_count = 4;

        for name in ["terrain.toml", "terrain.ron"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            assert_eq!(TerrainConfig::load_from_file(&path).unwrap(), config);
        }

        let err = config.save_to_file(dir.path().join("terrain.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_demo_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../lander_demo/terrain.toml");
        let config = TerrainConfig::load_from_file(path).unwrap();
        assert_eq!(config.octree.leaf_threshold, 20);
        assert_eq!(config.octree.max_depth, 12);
        assert_eq!(config.contact.penetration_leaf_count, 10);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TerrainConfig::load_from_file("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
