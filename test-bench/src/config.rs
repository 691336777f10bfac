//! Generator configuration.
//!
//! Settings can be stored as JSON and loaded with [`GeneratorConfig::load`];
//! every field has a default, so a partial file (or none at all) is fine.
//! Command line flags are applied on top by the binary.

use crate::suite::{region_words, ADDRESS_SPACE_WORDS};
use equalizer::ImageSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default largest image side, used when no explicit bound is given.
pub const DEFAULT_SIDE_LIMIT: usize = 128;

/// Largest side whose square region still fits the 16-bit address space.
pub const MAX_SIDE_LIMIT: usize = 181;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "tb.vhd";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Side limit {0} must be between 1 and 181")]
    SideLimitOutOfRange(usize),
}

/// Settings for a generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Default side cap for random dimensions and fixed-mode regions
    pub side_limit: usize,
    /// Test bench file to write
    pub output: PathBuf,
    /// Fixed RNG seed; a wall-clock seed is used when unset
    pub seed: Option<u64>,
    /// Wait for ENTER before exiting
    pub pause_on_exit: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            side_limit: DEFAULT_SIDE_LIMIT,
            output: PathBuf::from(DEFAULT_OUTPUT),
            seed: None,
            pause_on_exit: true,
        }
    }
}

impl GeneratorConfig {
    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save this config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the side limit is usable.
    ///
    /// Sides are stored in 8-bit memory words and a full square region must
    /// stay addressable by the device.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.side_limit == 0 || self.side_limit > MAX_SIDE_LIMIT {
            return Err(ConfigError::SideLimitOutOfRange(self.side_limit));
        }
        debug_assert!(region_words(ImageSize::square(self.side_limit)) <= ADDRESS_SPACE_WORDS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.side_limit, 128);
        assert_eq!(config.output, PathBuf::from("tb.vhd"));
        assert_eq!(config.seed, None);
        assert!(config.pause_on_exit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_side_limit_bounds() {
        let mut config = GeneratorConfig::default();
        config.side_limit = MAX_SIDE_LIMIT;
        assert!(config.validate().is_ok());
        config.side_limit = MAX_SIDE_LIMIT + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SideLimitOutOfRange(182))
        ));
        config.side_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tbgen.json");
        std::fs::write(&path, r#"{ "seed": 42, "side_limit": 64 }"#).unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.side_limit, 64);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tbgen.json");
        let config = GeneratorConfig {
            side_limit: 32,
            output: dir.path().join("out.vhd"),
            seed: Some(7),
            pause_on_exit: false,
        };
        config.save(&path).unwrap();
        assert_eq!(GeneratorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_bad_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tbgen.json");
        std::fs::write(&path, r#"{ "side_limit": 500 }"#).unwrap();
        assert!(matches!(
            GeneratorConfig::load(&path),
            Err(ConfigError::SideLimitOutOfRange(500))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = GeneratorConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
