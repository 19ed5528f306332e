//! Build configuration
//!
//! Every field has a default, so a build needs no configuration at all.
//! A JSON file may override any subset of fields.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, IoResultExt};
use crate::manifest::PackManifest;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_ARCHIVE_NAME: &str = "fls-datapack.zip";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Pack root; wiped at the start of every build.
    pub output_dir: PathBuf,
    /// Archive file name, written inside `output_dir` before hashing.
    pub archive_name: String,
    /// Honeycomb loot table to copy instead of the bundled one.
    pub loot_table_source: Option<PathBuf>,
    pub manifest: PackManifest,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            loot_table_source: None,
            manifest: PackManifest::default(),
        }
    }
}

impl BuildConfig {
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let content = fs::read_to_string(path).at(path)?;
        serde_json::from_str(&content).map_err(|source| BuildError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builder-style override of the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn data_dir(&self) -> PathBuf {
        self.output_dir.join("data")
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.archive_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.data_dir(), Path::new("output/data"));
        assert_eq!(config.archive_path(), Path::new("output/fls-datapack.zip"));
        assert_eq!(config.loot_table_source, None);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.json");
        fs::write(&path, r#"{"output_dir": "dist", "manifest": {"pack_format": 57}}"#).unwrap();

        let config = BuildConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, Path::new("dist"));
        assert_eq!(config.archive_name, DEFAULT_ARCHIVE_NAME);
        assert_eq!(config.manifest.pack_format, 57);
        assert_eq!(config.manifest.description, "FLS datapack");
        assert_eq!(config.loot_table_source, None);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(BuildConfig::load(&path), Err(BuildError::Config { .. })));
    }
}
